//! CLI argument definitions for FlexCore.
//!
//! All `clap` structures live here so that `main.rs` stays focused on
//! dispatching subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// FlexCore -- the storefront assistant from the command line.
#[derive(Parser)]
#[command(
    name = "flexcore",
    version,
    about = "FlexCore storefront assistant",
    long_about = "Talk to FlexBot, browse the FlexCore catalog and try out the cart \
                  from a terminal."
)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(long, short, global = true, default_value = "config/flexcore.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask FlexBot a single question and print the reply.
    Ask {
        /// The question.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Seed for the fallback picker, for reproducible answers.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Chat with FlexBot line by line (/clear, /export, /quit).
    Chat {
        /// Answer immediately instead of simulating typing.
        #[arg(long)]
        no_delay: bool,

        /// Directory exports are written to.
        #[arg(long, default_value = ".")]
        export_dir: PathBuf,
    },

    /// Start the interactive terminal widget (ratatui).
    Tui {
        /// Directory exports are written to.
        #[arg(long, default_value = ".")]
        export_dir: PathBuf,
    },

    /// Print the product catalog and check it against the detail catalog.
    Catalog {
        /// Only list this category (`all`, `base`, `cores`, `bundles`).
        #[arg(long, default_value = "all")]
        filter: String,
    },

    /// Show the detail view of one product.
    Product {
        /// Product id, e.g. `running-core`.
        id: String,

        /// Also add the product to a fresh cart.
        #[arg(long)]
        add: bool,
    },

    /// Add products to a fresh cart and print the result.
    Cart {
        /// Product ids; repeat an id to add it more than once.
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
}
