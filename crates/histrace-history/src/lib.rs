// Error types
pub mod error;

// Per-dialect line grammar
pub mod classifier;

// Consumption strategies
pub mod keeper;

// Incremental parser driving a classifier into a keeper
pub mod parser;

// Background trace existence check
pub mod correlator;

// Entry point tying environment, parser and correlator together
pub mod query;

pub use classifier::{CommandLine, Line, LineClassifier, TimestampPosition, classifier_for};
pub use correlator::TraceCorrelator;
pub use error::{Error, Result};
pub use keeper::{AllKeeper, EntrySink, Keeper, LastKeeper, PreciseKeeper, RangeKeeper};
pub use parser::HistoryParser;
pub use query::{build_filter, fuzzy_pattern, get_commands};
