//! ShopFlow CLI - Browse the catalog, manage the cart, and place orders.
//!
//! # Usage
//!
//! ```bash
//! # Browse
//! shopflow products list --category Electronics --in-stock
//! shopflow products search headphones
//!
//! # Cart (persisted under SHOPFLOW_DATA_DIR)
//! shopflow cart add 3 --quantity 2 --option Color=Black
//! shopflow cart update 3 1 --option Color=Black
//! shopflow cart show
//!
//! # Orders (also persisted under SHOPFLOW_DATA_DIR)
//! shopflow checkout --first-name Ada --last-name Lovelace ...
//! shopflow orders list --status shipped
//! ```
//!
//! # Commands
//!
//! - `products` - List, show, search, featured, related
//! - `categories` - List and show categories
//! - `cart` - Show, add, remove, update, clear
//! - `orders` - Order history, details, and status updates
//! - `checkout` - Place an order from the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use shopflow_storefront::Storefront;
use shopflow_storefront::config::{LogFormat, StorefrontConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::cart::CartAction;
use commands::categories::CategoryAction;
use commands::checkout::CheckoutArgs;
use commands::orders::OrderAction;
use commands::products::ProductAction;

#[derive(Parser)]
#[command(name = "shopflow")]
#[command(author, version, about = "ShopFlow storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Browse product categories
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// View and update orders
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Place an order from the current cart
    Checkout(CheckoutArgs),
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry.dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry
                .environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry.sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Map tracing levels to Sentry: errors and warnings become events, the rest breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Install the tracing subscriber. Logs go to stderr so command output stays clean.
fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopflow_storefront=info,shopflow_cli=info".into());

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter));

    match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            // Tracing is not up yet; fall back to defaults so the error is visible.
            init_tracing(LogFormat::default());
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(2);
        }
    };

    let _sentry_guard = init_sentry(&config);
    init_tracing(config.log_format);

    if let Err(e) = run(cli, config).await {
        e.report();
        tracing::error!("Command failed: {}", e.user_message());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> shopflow_storefront::Result<()> {
    let storefront = Storefront::from_config(config)?;

    match cli.command {
        Commands::Products { action } => commands::products::run(&storefront, action).await?,
        Commands::Categories { action } => commands::categories::run(&storefront, action).await?,
        Commands::Cart { action } => commands::cart::run(&storefront, action).await?,
        Commands::Orders { action } => commands::orders::run(&storefront, action).await?,
        Commands::Checkout(args) => commands::checkout::run(&storefront, args).await?,
    }
    Ok(())
}
