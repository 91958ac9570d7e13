//! TurboCart CLI - drive a storefront's add-to-cart flow from a terminal.
//!
//! Commands:
//! - `turbo-cart cart` - Show the cart item count
//! - `turbo-cart add` - Add a variant directly
//! - `turbo-cart pick` - Open the variant picker for a product
//! - `turbo-cart config` - Show the effective configuration

mod commands;
mod context;
mod output;
mod shell;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AddArgs, PickArgs};

/// TurboCart CLI - add-to-cart flows against a storefront
#[derive(Parser)]
#[command(name = "turbo-cart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current cart item count
    Cart,

    /// Add a variant to the cart
    Add(AddArgs),

    /// Open the variant picker for a product and add a selection
    Pick(PickArgs),

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let output = output::Output::new(cli.verbose, cli.json);
    let ctx = context::Context::load(cli.config.as_deref(), output)?;

    let result = match cli.command {
        Commands::Cart => commands::cart::run(&ctx).await,
        Commands::Add(args) => commands::add::run(args, &ctx).await,
        Commands::Pick(args) => commands::pick::run(args, &ctx).await,
        Commands::Config => commands::config::run(&ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise `-v` turns on debug logs for the cart crates.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "turbo_cart=debug,turbo_data=debug,warn"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
