pub mod dialect;
pub mod entry;
pub mod error;
pub mod trace;

pub use dialect::Dialect;
pub use entry::{EntryDraft, HistoryEntry, SharedEntry};
pub use error::{Error, Result};
pub use trace::TraceName;
