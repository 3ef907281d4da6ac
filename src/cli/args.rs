use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "meetric")]
#[command(about = "Rule-based meeting transcript analysis", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Analyze a transcript CSV file
    Analyze(AnalyzeCliArgs),
    /// Search and view stored analysis runs
    History(HistoryCliArgs),
    /// Render a stored analysis run
    Show(ShowCliArgs),
    /// Run the HTTP API server
    Serve(ServeCliArgs),
    /// Print version information
    Version,
}

#[derive(ClapArgs, Debug)]
pub struct AnalyzeCliArgs {
    /// Transcript CSV file (columns: timestamp, speaker, text)
    pub file: PathBuf,
    /// Title stored with the run
    #[arg(short, long)]
    pub title: Option<String>,
    /// Print the analysis bundle as JSON instead of the text report
    #[arg(long)]
    pub json: bool,
    /// Write the output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Do not save this run to history
    #[arg(long)]
    pub no_save: bool,
}

#[derive(ClapArgs, Debug)]
pub struct HistoryCliArgs {
    /// Filter runs by a substring of the source file or title
    #[arg(short, long)]
    pub query: Option<String>,
    /// Maximum number of results to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

#[derive(ClapArgs, Debug)]
pub struct ShowCliArgs {
    /// ID of the stored analysis run
    pub id: i64,
    /// Print the analysis bundle as JSON instead of the text report
    #[arg(long)]
    pub json: bool,
}

#[derive(ClapArgs, Debug)]
pub struct ServeCliArgs {
    /// Port to bind on (overrides the configured port)
    #[arg(short, long)]
    pub port: Option<u16>,
}
