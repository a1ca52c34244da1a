//! CLI command implementations

pub mod error;
pub mod search;

pub use error::CliError;
pub use search::{Cli, CollectCommand, Commands, SearchCommand};
