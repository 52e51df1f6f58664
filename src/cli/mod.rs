//! CLI module
//!
//! # Commands
//!
//! - `extract` - Pull pages from a resource and land them locally
//! - `check` - Test connection and credentials against the API

mod commands;
mod runner;

pub use commands::{Cli, Commands, ResourceKind};
pub use runner::Runner;
