//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod convert;
mod spec;

pub use completions::handle_completions;
pub use convert::handle_convert;
pub use spec::handle_spec;
