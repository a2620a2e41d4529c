//! Souq CLI - Cart management and API access from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add two units of product 5 to the local cart
//! souq cart add 5 2
//!
//! # Show the cart, with totals priced against the live catalog
//! souq cart total
//!
//! # Browse the catalog
//! souq products list --search "lamp" --limit 10
//! souq products show 5
//!
//! # Track an order by its public number
//! souq orders track SQ-2026-0009
//!
//! # Admin dashboard statistics (requires a signed-in session)
//! souq analytics dashboard
//! ```
//!
//! # Commands
//!
//! - `cart` - Manage the durable local cart
//! - `products` - Browse the catalog
//! - `orders` - Track and inspect orders
//! - `analytics` - Admin dashboard statistics

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "souq")]
#[command(author, version, about = "Souq CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the durable local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Browse the catalog
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Track and inspect orders
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Admin dashboard statistics
    Analytics {
        #[command(subcommand)]
        action: AnalyticsAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add quantity to a product line (creates the line if absent)
    Add {
        /// Product ID
        product_id: i64,
        /// Units to add
        quantity: u32,
    },
    /// Set a product line to an exact quantity (0 removes it)
    Set {
        /// Product ID
        product_id: i64,
        /// New quantity
        quantity: u32,
    },
    /// Remove a product line
    Remove {
        /// Product ID
        product_id: i64,
    },
    /// Print the cart contents
    List,
    /// Price the cart against the live catalog and print the total
    Total,
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products
    List {
        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Page size
        #[arg(short, long, default_value_t = 20)]
        limit: u32,

        /// Free-text search
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one product
    Show {
        /// Product ID
        product_id: i64,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// Track an order by its public order number
    Track {
        /// Order number (e.g. `SQ-2026-0009`)
        order_number: String,
    },
}

#[derive(Subcommand)]
enum AnalyticsAction {
    /// Print headline dashboard statistics
    Dashboard,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry() -> Option<sentry::ClientInitGuard> {
    let dsn = std::env::var("SENTRY_DSN").ok()?;

    let guard = sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: std::env::var("SENTRY_ENVIRONMENT")
                .ok()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    // Load .env before reading SENTRY_DSN
    dotenvy::dotenv().ok();

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry();

    // Initialize tracing with EnvFilter and Sentry integration
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "souq_cli=info,souq_client=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(product_id.into(), quantity),
            CartAction::Set {
                product_id,
                quantity,
            } => commands::cart::set(product_id.into(), quantity),
            CartAction::Remove { product_id } => commands::cart::remove(product_id.into()),
            CartAction::List => commands::cart::list(),
            CartAction::Total => commands::cart::total().await?,
            CartAction::Clear => commands::cart::clear(),
        },
        Commands::Products { action } => match action {
            ProductAction::List {
                page,
                limit,
                search,
            } => commands::shop::list_products(page, limit, search.as_deref()).await?,
            ProductAction::Show { product_id } => {
                commands::shop::show_product(product_id.into()).await?;
            }
        },
        Commands::Orders { action } => match action {
            OrderAction::Track { order_number } => {
                commands::shop::track_order(&order_number).await?;
            }
        },
        Commands::Analytics { action } => match action {
            AnalyticsAction::Dashboard => commands::shop::dashboard().await?,
        },
    }
    Ok(())
}
