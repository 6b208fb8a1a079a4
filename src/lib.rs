// IssueStore - single-blob issue tracking with pluggable key-value storage

pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod issue;
pub mod notify;
pub mod stats;
pub mod storage;
pub mod store;

// Re-export main types for convenience
pub use config::Config;
pub use error::{Error, Result};
pub use export::ExportFormat;
pub use filter::IssueFilter;
pub use issue::{Issue, NewIssue, Priority};
pub use notify::{DEFAULT_NOTIFY_DURATION, LogNotifier, Notifier, NullNotifier, Severity};
pub use stats::{PriorityCounts, Stats};
pub use storage::{BlobStorage, FileStorage, MemoryStorage};
pub use store::{IssueStore, STORAGE_KEY};
