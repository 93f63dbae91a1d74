//! yellowbrick-ingest: import completed-task history exports for stat recomputation.

pub mod history;

pub use history::{parse_history, parse_history_csv, PriorityParser};
