//! CLI handler for the serve command.

use anyhow::Result;

use crate::api::ApiServer;
use crate::cli::args::ServeCliArgs;
use crate::config::Config;

pub async fn handle_serve_command(args: ServeCliArgs, config: &Config) -> Result<()> {
    let mut server = ApiServer::new(config);
    if let Some(port) = args.port {
        server = server.with_port(port);
    }
    server.start().await
}
