use crate::core::models::{BoardPriority, IssuePriority};
use super::snapshot::{CardDrag, ColumnCards, ColumnView};

/// Dense, zero-based priorities for the issue cards of one column.
/// Children without an id are skipped and take no slot.
pub fn card_priorities(column: &ColumnCards) -> Vec<IssuePriority> {
    column
        .cards
        .iter()
        .filter_map(|card| card.id)
        .enumerate()
        .map(|(priority, id)| IssuePriority {
            id,
            priority,
            project_board_id: column.column_id,
        })
        .collect()
}

/// Destination cards first, then the source column unless the drop was a
/// no-op in place.
pub fn card_moves(drag: &CardDrag) -> Vec<IssuePriority> {
    let mut issues = card_priorities(&drag.to);
    if !drag.is_in_place() {
        issues.extend(card_priorities(&drag.from));
    }
    issues
}

pub fn column_priorities(columns: &[ColumnView]) -> Vec<BoardPriority> {
    columns
        .iter()
        .filter_map(|column| column.column_id)
        .enumerate()
        .map(|(priority, id)| BoardPriority { id, priority })
        .collect()
}
