pub mod config;
pub mod environment;
pub mod error;
pub mod path;

pub use config::{Config, MatchingConfig, TieBreak};
pub use environment::{Environment, EnvironmentBuilder, Overrides};
pub use error::{Error, Result};
pub use path::{default_history_file, expand_tilde, resolve_app_dir};
