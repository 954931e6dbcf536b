// Typed records captured from the board markup at the moment a drag ends.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardView {
    /// `None` for children that are not issues (placeholders, headers).
    pub id: Option<i64>,
}

impl CardView {
    pub fn issue(id: i64) -> Self {
        Self { id: Some(id) }
    }

    pub fn placeholder() -> Self {
        Self { id: None }
    }
}

/// A card container and its children in DOM order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnCards {
    pub column_id: i64,
    pub cards: Vec<CardView>,
}

impl ColumnCards {
    pub fn new(column_id: i64, card_ids: &[i64]) -> Self {
        Self {
            column_id,
            cards: card_ids.iter().copied().map(CardView::issue).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnView {
    pub column_id: Option<i64>,
}

impl ColumnView {
    pub fn board(column_id: i64) -> Self {
        Self { column_id: Some(column_id) }
    }
}

/// Everything the card drag handler needs from the drag library's event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDrag {
    pub from: ColumnCards,
    pub to: ColumnCards,
    pub same_container: bool,
    pub old_index: Option<u32>,
    pub new_index: Option<u32>,
}

impl CardDrag {
    /// Dropped back where it started.
    pub fn is_in_place(&self) -> bool {
        self.same_container && self.old_index == self.new_index
    }
}
