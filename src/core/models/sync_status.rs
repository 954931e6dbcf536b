use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAction {
    Setup,
    ReorderCards,
    ReorderColumns,
    Rename,
    SetDefault,
    Delete,
    Create,
}

impl BoardAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardAction::Setup => "set up the board",
            BoardAction::ReorderCards => "reorder cards",
            BoardAction::ReorderColumns => "reorder columns",
            BoardAction::Rename => "rename column",
            BoardAction::SetDefault => "set default column",
            BoardAction::Delete => "delete column",
            BoardAction::Create => "create column",
        }
    }
}

/// What the status indicator shows. Only the latest action is tracked.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SyncStatus {
    #[default]
    Idle,
    Saving(BoardAction),
    Saved(BoardAction),
    Failed {
        action: BoardAction,
        message: String,
        at: DateTime<Utc>,
    },
}

impl SyncStatus {
    pub fn failed(action: BoardAction, message: impl Into<String>) -> Self {
        SyncStatus::Failed {
            action,
            message: message.into(),
            at: Utc::now(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SyncStatus::Failed { .. })
    }

    pub fn label(&self) -> String {
        match self {
            SyncStatus::Idle => String::new(),
            SyncStatus::Saving(action) => format!("Saving: {}...", action.as_str()),
            SyncStatus::Saved(action) => format!("Saved: {}", action.as_str()),
            SyncStatus::Failed { action, message, at } => format!(
                "Could not {} ({}) at {}. Reload the page to see the board as saved.",
                action.as_str(),
                message,
                at.format("%H:%M:%S")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_label_names_the_action_and_cause() {
        let status = SyncStatus::failed(BoardAction::Delete, "status 500");
        assert!(status.is_failed());
        let label = status.label();
        assert!(label.starts_with("Could not delete column (status 500)"));
    }

    #[test]
    fn idle_has_no_label() {
        assert_eq!(SyncStatus::default().label(), "");
        assert!(!SyncStatus::Saved(BoardAction::Rename).is_failed());
    }
}
