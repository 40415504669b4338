//! Pulse CLI Application
//!
//! Command-line interface and MCP server for the pulse project health
//! dashboard.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use jiff::Timestamp;
use log::info;
use mcp::{run_stdio_server, PulseMcpServer};
use pulse_core::MonitorBuilder;
use renderer::TerminalRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        snapshot,
        no_color,
        now,
        command,
    } = Args::parse();

    let monitor = MonitorBuilder::new()
        .with_database_path(database_file)
        .with_snapshot_path(snapshot)
        .build()
        .await
        .context("Failed to initialize monitor")?;

    info!("Pulse started");

    if let Some(Commands::Serve) = command {
        info!("Starting Pulse MCP server");
        let server = PulseMcpServer::new(monitor)
            .await
            .context("Failed to initialize MCP server")?;
        return run_stdio_server(server).await.context("MCP server failed");
    }

    let now = now.unwrap_or_else(Timestamp::now);
    let cli = Cli::new(monitor, TerminalRenderer::new(!no_color), now);

    match command {
        Some(Commands::Projects) | None => cli.list_projects().await,
        Some(Commands::Health(args)) => cli.health(args).await,
        Some(Commands::FollowUps(args)) => cli.follow_ups(args).await,
        Some(Commands::Escalations(args)) => cli.escalations(args).await,
        Some(Commands::Context(args)) => cli.context(args).await,
        Some(Commands::Notify(args)) => cli.notify(args).await,
        Some(Commands::Settings { command }) => cli.handle_settings_command(command).await,
        Some(Commands::Serve) => Ok(()),
    }
}
