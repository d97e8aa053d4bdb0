//! CLI module
//!
//! Command-line interface for listing GitLab resources.
//!
//! # Commands
//!
//! - `projects` - List projects (offset or keyset pagination)
//! - `issues` - List issues of one project
//!
//! `--mode` picks how the listing is consumed: `scan` (items, error at the
//! end), `paired` (each element carries its own error) or `collect` (all or
//! nothing).

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, ScanMode};
pub use runner::Runner;
