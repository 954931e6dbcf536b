pub mod priority;
pub mod sync_status;

pub use priority::{BoardPriority, IssuePriority, IssuesPriorities, BoardsPriorities, BoardTitle};
pub use sync_status::{BoardAction, SyncStatus};
