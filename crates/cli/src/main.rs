//! Quick-View CLI - product quick-view and add-to-cart from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show a product with its colors and sizes
//! qv show basic-tee
//!
//! # Add a size/color combination to the cart
//! qv add basic-tee --size M --color Black
//!
//! # Show the cart of this session
//! qv cart
//! ```
//!
//! # Exit codes
//!
//! - `0` - success
//! - `1` - storefront, network, or configuration failure
//! - `2` - the selection or handle needs fixing

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use quick_view_core::Handle;
use quick_view_storefront::config::StorefrontConfig;
use quick_view_storefront::{AjaxClient, QuickViewError, telemetry};

mod commands;

#[derive(Parser)]
#[command(name = "qv")]
#[command(author, version, about = "Product quick-view for a storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a product: title, price, description, image, colors and sizes
    Show {
        /// Product handle
        handle: Handle,
    },
    /// Add a product variant to the cart
    Add {
        /// Product handle
        handle: Handle,

        /// Size, matched exactly against the variants
        #[arg(short, long)]
        size: Option<String>,

        /// Color, matched exactly against the variants
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Show the cart
    Cart,
}

#[tokio::main]
#[allow(clippy::print_stderr)]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let _sentry_guard = telemetry::init(&config);
    tracing::debug!(base_url = %config.shop.base_url, "Loaded configuration");

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            e.report();
            eprintln!("{}", e.user_message());
            if e.is_user_error() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), QuickViewError> {
    let client = AjaxClient::new(&config.shop)?;

    match cli.command {
        Commands::Show { handle } => commands::product::show(client, config.bonus, &handle).await,
        Commands::Add {
            handle,
            size,
            color,
        } => commands::product::add(client, config.bonus, &handle, size, color).await,
        Commands::Cart => commands::cart::show(&client).await,
    }
}
