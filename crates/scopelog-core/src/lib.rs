//! scopelog-core: one-shot log lines that flush to stderr when they go out of scope.
//!
//! The central design principle: a [`LogLine`] is built in a single statement
//! and emitted exactly once, by its `Drop`. Lines from concurrent threads are
//! kept whole by a process-wide lock held for the life of each line.

pub mod clock;
pub mod error;
pub mod line;
pub mod lock;
pub mod models;

pub use clock::{format_timestamp, local_timestamp, TIMESTAMP_FORMAT};
pub use error::{Result, ScopelogError};
pub use line::{
    log, log_error, log_error_nt, log_info, log_info_nt, log_warn, log_warn_nt, LogLine,
};
pub use models::{LineOptions, Severity};
