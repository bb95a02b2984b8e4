pub mod bookmarks;
pub mod error;
pub mod exec;
pub mod gc;
pub mod resolver;
pub mod signals;
pub mod staging;
pub mod tee;
pub mod traces;

pub use bookmarks::{Bookmark, BookmarkStore, validate_bookmark_name};
pub use error::{Error, Result};
pub use exec::{ExecOptions, ExitOutcome, Invocation, TraceTap, execute};
pub use gc::{GcPolicy, GcReport, collect_garbage};
pub use resolver::{resolve_trace_name, select_candidate};
pub use signals::{SignalForwarder, SignalTarget};
pub use staging::StagingTrace;
pub use tee::{TeeOutcome, TraceOutcome, tee};
pub use traces::dump_trace;
