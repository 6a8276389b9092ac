//! Medmart CLI - Inspect and edit the persisted cart.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! mm-cli cart show
//!
//! # Add a catalog record to the cart
//! mm-cli cart add --product '{"id": 7, "name": "Aspirin", "price": 4.25}' --quantity 2
//!
//! # Change or remove a line
//! mm-cli cart update 7 5
//! mm-cli cart update 7 0
//! mm-cli cart remove 7
//!
//! # Normalize a catalog listing file
//! mm-cli catalog show listing.json
//!
//! # Where the checkout button would go
//! mm-cli checkout --cookie "mm_session=abc"
//! ```
//!
//! # Commands
//!
//! - `cart` - Show and mutate the cart
//! - `catalog show` - Preview how a listing normalizes into cart products
//! - `checkout` - Resolve the checkout redirect

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use medmart_storefront::CartStore;
use medmart_storefront::config::StorefrontConfig;

mod commands;

#[derive(Parser)]
#[command(name = "mm-cli")]
#[command(author, version, about = "Medmart cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show and mutate the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Work with catalog data
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Resolve where checkout navigation goes
    Checkout {
        /// Raw `Cookie` header value
        #[arg(short, long)]
        cookie: Option<String>,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the cart lines and totals
    Show,
    /// Add a catalog record to the cart
    Add {
        /// Catalog record as JSON
        #[arg(short, long)]
        product: String,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set a line's quantity (zero or below removes it)
    Update {
        /// Product ID
        id: String,

        /// New quantity
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove {
        /// Product ID
        id: String,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Normalize a listing file and print the resulting products
    Show {
        /// Path to a JSON listing
        path: String,
    },
}

fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "medmart_storefront=info,medmart_cli=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;

    // One store per process, handed to each command
    let mut store = CartStore::open(config.storage.file_storage(), config.storage.key.clone());

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => {
                commands::cart::show(&store);
            }
            CartAction::Add { product, quantity } => {
                commands::cart::add(&mut store, &product, quantity)?;
            }
            CartAction::Update { id, quantity } => {
                commands::cart::update(&mut store, &id, quantity)?;
            }
            CartAction::Remove { id } => commands::cart::remove(&mut store, &id),
            CartAction::Clear => commands::cart::clear(&mut store),
        },
        Commands::Catalog { action } => match action {
            CatalogAction::Show { path } => {
                commands::catalog::show(&path)?;
            }
        },
        Commands::Checkout { cookie } => {
            commands::checkout::redirect(&store, cookie.as_deref(), &config.auth_cookie_name);
        }
    }
    Ok(())
}
