//! Terminal front-end: subcommands, the interactive game session and display
//! formatting.

pub mod command;
pub mod formatter;
pub mod play;
pub mod prompt;
pub mod runner;

pub use command::Command;
pub use formatter::Formatter;
pub use runner::{App, run};
