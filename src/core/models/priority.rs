use serde::{Deserialize, Serialize};

/// One card's new position, as the server's priority endpoint expects it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IssuePriority {
    pub id: i64,
    pub priority: usize,
    #[serde(rename = "ProjectBoardID")]
    pub project_board_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoardPriority {
    pub id: i64,
    pub priority: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct IssuesPriorities {
    pub issues: Vec<IssuePriority>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BoardsPriorities {
    pub boards: Vec<BoardPriority>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoardTitle {
    pub title: String,
}
