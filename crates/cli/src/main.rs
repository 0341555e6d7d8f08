//! Sacola CLI - work with the stored cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! sacola show
//!
//! # Add three coffees at R$ 12,50
//! sacola add Coffee 12.50 -q 3
//!
//! # Step a quantity, remove the first line
//! sacola step Coffee -1
//! sacola remove 0
//!
//! # Print the WhatsApp or Pix checkout link
//! sacola checkout whatsapp
//! sacola checkout pix
//! ```
//!
//! # Commands
//!
//! - `show` - Print the cart
//! - `add` / `remove` / `step` / `clear` - Change the cart; it is printed after each change
//! - `checkout` - Print the checkout link for a channel
//! - `message` - Print the order message sent over WhatsApp
//!
//! The cart lives in `{data-dir}/{key}.json`, the same file the storefront uses.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use sacola_core::{
    CartStore, DEFAULT_CART_KEY, FileStore, ItemName, Price, Quantity,
    checkout::{DEFAULT_PIX_PAGE, DEFAULT_WHATSAPP_PHONE},
};

mod commands;

#[derive(Parser)]
#[command(name = "sacola")]
#[command(author, version, about = "Sacola cart tools")]
struct Cli {
    /// Directory holding the stored cart
    #[arg(long, global = true, env = "SACOLA_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Storage key of the cart
    #[arg(long, global = true, env = "SACOLA_CART_KEY", default_value = DEFAULT_CART_KEY)]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cart
    Show,
    /// Add units of an item (merges with an entry of the same name)
    Add {
        /// Item name
        name: ItemName,

        /// Unit price, e.g. 12.50 or 12,50
        price: Price,

        /// Units to add (1-99)
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=99))]
        quantity: u8,
    },
    /// Remove the entry at a position (0-based)
    Remove {
        /// Entry position
        index: usize,
    },
    /// Change an item's quantity by a delta, clamped to 1-99
    Step {
        /// Item name
        name: String,

        /// Amount to add, negative to subtract
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Remove every entry
    Clear,
    /// Print the checkout link for a channel
    Checkout {
        #[arg(value_enum)]
        channel: Channel,

        /// WhatsApp number, digits only
        #[arg(long, env = "SACOLA_WHATSAPP_PHONE", default_value = DEFAULT_WHATSAPP_PHONE)]
        phone: String,

        /// Pix payment page
        #[arg(long, env = "SACOLA_PIX_PAGE", default_value = DEFAULT_PIX_PAGE)]
        pix_page: String,
    },
    /// Print the order message
    Message,
}

/// Checkout channel.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Channel {
    Whatsapp,
    Pix,
}

fn main() {
    // Load .env before parsing so env fallbacks see it
    let _ = dotenvy::dotenv();

    // Logs go to stderr; stdout carries the cart and links
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = CartStore::open_with_key(FileStore::new(&cli.data_dir), &cli.key);
    store.subscribe(commands::render::print_change);

    match cli.command {
        Commands::Show => commands::render::print_cart(store.cart()),
        Commands::Add {
            name,
            price,
            quantity,
        } => {
            commands::cart::add(&mut store, name, price, Quantity::clamped(i64::from(quantity)))?;
        }
        Commands::Remove { index } => {
            commands::cart::remove(&mut store, index)?;
        }
        Commands::Step { name, delta } => {
            commands::cart::step(&mut store, &name, delta)?;
        }
        Commands::Clear => {
            commands::cart::clear(&mut store)?;
        }
        Commands::Checkout {
            channel,
            phone,
            pix_page,
        } => {
            let url = match channel {
                Channel::Whatsapp => commands::checkout::whatsapp(store.cart(), &phone)?,
                Channel::Pix => commands::checkout::pix(store.cart(), &pix_page)?,
            };
            commands::render::print_line(&url);
        }
        Commands::Message => commands::render::print_line(&store.order_message()),
    }
    Ok(())
}
