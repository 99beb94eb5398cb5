//! CLI entry point for FlexCore.
//!
//! This binary provides the `flexcore` command with subcommands for asking
//! FlexBot, chatting line by line, the terminal widget, and inspecting the
//! catalog, product details and cart.

mod cli;
mod commands;
mod helpers;
mod repl;
mod settings;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::settings::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let settings = Settings::load(&cli.config)?;

    match cli.command {
        Commands::Ask { text, seed } => commands::cmd_ask(&settings, &text, seed),
        Commands::Chat {
            no_delay,
            export_dir,
        } => repl::cmd_chat(&settings, no_delay, &export_dir).await,
        Commands::Tui { export_dir } => commands::cmd_tui(&settings, export_dir).await,
        Commands::Catalog { filter } => commands::cmd_catalog(&settings, &filter),
        Commands::Product { id, add } => commands::cmd_product(&settings, &id, add),
        Commands::Cart { ids } => commands::cmd_cart(&settings, &ids),
    }
}
