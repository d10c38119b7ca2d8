//! MyCart CLI - Browse the catalog, manage the cart, sign in.
//!
//! # Usage
//!
//! ```bash
//! # List electronics, cheapest first
//! mycart products --category Electronics --sort price-low
//!
//! # Search titles
//! mycart products --query wireless
//!
//! # Add two units of product 8, then show the cart
//! mycart cart add 8 --quantity 2
//! mycart cart show
//!
//! # Sign in (any password is accepted)
//! mycart auth sign-in -e jane@example.com -p secret
//! ```
//!
//! # Commands
//!
//! - `products` / `product` / `trending` / `categories` - Catalog browsing
//! - `cart show|add|remove|set|clear` - Cart management
//! - `auth sign-in|sign-up|google|sign-out|whoami` - Mock identity
//!
//! Configuration is read from the environment (see `StorefrontConfig`).

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)] // command output goes to stdout

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mycart_storefront::config::{LogFormat, StorefrontConfig};
use mycart_storefront::{AppError, AppState};

mod commands;

#[derive(Parser)]
#[command(name = "mycart")]
#[command(author, version, about = "MyCart storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products matching filters
    Products(commands::catalog::ProductFilterArgs),
    /// Show one product
    Product {
        /// Product ID
        id: String,
    },
    /// List trending products
    Trending {
        /// How many products to show
        #[arg(short, long, default_value_t = 4)]
        limit: usize,
    },
    /// List categories
    Categories,
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Sign in and out
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add a product
    Add {
        /// Product ID
        id: String,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product
    Remove {
        /// Product ID
        id: String,
    },
    /// Set a product's quantity (0 or less removes it)
    Set {
        /// Product ID
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Sign in with email and password
    SignIn {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Create an account
    SignUp {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        /// Display name
        #[arg(short, long)]
        name: String,
    },
    /// Sign in with Google
    Google,
    /// Sign out
    SignOut,
    /// Show the signed-in user
    Whoami,
}

/// Initialize tracing with `EnvFilter`, in the configured output format.
fn init_tracing(format: LogFormat) {
    // Defaults to warn so command output stays readable; RUST_LOG overrides
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mycart_storefront=warn,mycart=warn".into());

    let registry = tracing_subscriber::registry().with(env_filter);
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
            init_tracing(LogFormat::default());
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(2);
        }
    };
    init_tracing(config.log_format);

    if let Err(e) = run(cli, config).await {
        tracing::error!(error = %e, "Command failed");
        println!("{}", e.user_message());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), AppError> {
    let mut state = AppState::from_config(config)?;

    let output = match cli.command {
        Commands::Products(args) => {
            let filter = args.into_filter_state()?;
            commands::catalog::render_products(&state.visible_products(&filter))
        }
        Commands::Product { id } => commands::catalog::render_product(state.product(&id.into())?),
        Commands::Trending { limit } => {
            commands::catalog::render_trending(state.catalog(), limit)
        }
        Commands::Categories => commands::catalog::render_categories(state.catalog()),
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::render_cart(state.cart()),
            CartAction::Add { id, quantity } => commands::cart::add(&mut state, &id, quantity)?,
            CartAction::Remove { id } => commands::cart::remove(&mut state, &id),
            CartAction::Set { id, quantity } => commands::cart::set(&mut state, &id, quantity),
            CartAction::Clear => commands::cart::clear(&mut state),
        },
        Commands::Auth { action } => match action {
            AuthAction::SignIn { email, password } => {
                commands::auth::sign_in(&mut state, &email, password).await?
            }
            AuthAction::SignUp {
                email,
                password,
                name,
            } => commands::auth::sign_up(&mut state, &email, password, &name).await?,
            AuthAction::Google => commands::auth::google(&mut state).await?,
            AuthAction::SignOut => commands::auth::sign_out(&mut state),
            AuthAction::Whoami => commands::auth::whoami(&state),
        },
    };

    println!("{output}");
    Ok(())
}
