//! Terminal UI layer: rendering, command parsing, line editing and the runner.

pub mod command;
pub mod formatter;
pub mod input;
pub mod runner;
pub mod terminal;

pub use runner::run_client;
pub use terminal::TerminalSurface;
