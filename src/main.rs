use anyhow::Result;
use clap::Parser;
use meetric::{
    cli::{
        handle_analyze_command, handle_history_command, handle_serve_command,
        handle_show_command, Cli, CliCommand,
    },
    config::Config,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        CliCommand::Version => {
            println!("Meetric {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        CliCommand::Analyze(args) => {
            let config = Config::load()?;
            handle_analyze_command(args, &config)
        }
        CliCommand::History(args) => handle_history_command(args),
        CliCommand::Show(args) => {
            let config = Config::load()?;
            handle_show_command(args, &config)
        }
        CliCommand::Serve(args) => {
            let config = Config::load()?;
            handle_serve_command(args, &config).await
        }
    }
}
