//! Command-line interface.

pub mod analyze;
pub mod args;
pub mod history;
pub mod serve;

pub use analyze::handle_analyze_command;
pub use args::{AnalyzeCliArgs, Cli, CliCommand, HistoryCliArgs, ServeCliArgs, ShowCliArgs};
pub use history::{handle_history_command, handle_show_command};
pub use serve::handle_serve_command;
