//! Testing infrastructure for histrace integration tests.
//!
//! - `TestWorld`: isolated home with a history file, app dir and tmp dir
//! - `fixtures`: history file contents per shell dialect

pub mod fixtures;
pub mod world;

pub use world::{CliResult, TestWorld};
