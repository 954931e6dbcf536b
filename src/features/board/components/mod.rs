pub mod sync_indicator;

pub use sync_indicator::SyncIndicator;
