//! Command line interface

use std::{
    io::{self, Write},
    path::Path,
};

use anyhow::{Context, Result, bail};
use beeshop::{
    catalog::Catalog,
    checkout::{CheckoutForm, SimulatedGateway},
    config::BeeshopConfig,
    contact::{ContactForm, ContactInbox},
    fixtures::{bundled_catalog, load_catalog},
    products::ProductId,
    storage::FileStorage,
    storefront::Storefront,
};
use clap::{Args, Parser, Subcommand};
use jiff::tz::TimeZone;
use rusty_money::iso::Currency;
use tracing::debug;

mod output;

type Shop = Storefront<FileStorage, SimulatedGateway>;

#[derive(Debug, Parser)]
#[command(name = "beeshop", about = "BeeShop cart", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: BeeshopConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the products on sale
    Products,

    /// Add a product to the cart
    Add(AddArgs),

    /// Remove a product from the cart
    Remove(ProductArgs),

    /// Set a line's quantity; zero or less removes it
    Set(SetArgs),

    /// Show the cart
    Show,

    /// Empty the cart
    Clear,

    /// Place an order for everything in the cart
    Checkout(CheckoutArgs),

    /// Send a message to the shop
    Contact(ContactArgs),
}

#[derive(Debug, Args)]
struct ProductArgs {
    /// Product id
    id: u32,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Product id
    id: u32,

    /// Units to add
    #[arg(short, long, default_value_t = 1)]
    quantity: u32,
}

#[derive(Debug, Args)]
struct SetArgs {
    /// Product id
    id: u32,

    /// New quantity
    #[arg(allow_negative_numbers = true)]
    quantity: i64,
}

#[derive(Debug, Args)]
struct CheckoutArgs {
    /// Full name
    #[arg(long)]
    name: String,

    /// Contact email
    #[arg(long)]
    email: String,

    /// Contact phone number
    #[arg(long)]
    phone: String,

    /// Delivery address
    #[arg(long)]
    address: String,
}

#[derive(Debug, Args)]
struct ContactArgs {
    /// Your name
    #[arg(long)]
    name: String,

    /// Reply email
    #[arg(long)]
    email: String,

    /// Message text
    #[arg(long)]
    message: String,
}

impl From<ContactArgs> for ContactForm {
    fn from(args: ContactArgs) -> Self {
        ContactForm {
            name: args.name,
            email: args.email,
            message: args.message,
        }
    }
}

impl From<CheckoutArgs> for CheckoutForm {
    fn from(args: CheckoutArgs) -> Self {
        CheckoutForm {
            name: args.name,
            email: args.email,
            phone: args.phone,
            address: args.address,
        }
    }
}

pub(crate) fn run(cli: Cli) -> Result<()> {
    let settings = cli.config.settings()?;
    let catalog = open_catalog(cli.config.shop.catalog.as_deref(), settings.currency)?;
    let storage = FileStorage::new(&cli.config.storage.storage_dir);
    let mut shop = Storefront::new(storage, SimulatedGateway::new(), settings);
    let mut out = io::stdout().lock();

    let outcome = execute(&mut shop, &catalog, cli.command, &mut out);

    output::write_notifications(&mut out, shop.notifications())?;

    outcome
}

fn open_catalog(path: Option<&Path>, currency: &'static Currency) -> Result<Catalog> {
    let (catalog, catalog_currency) = match path {
        Some(path) => load_catalog(path)
            .with_context(|| format!("failed to load catalog {}", path.display()))?,
        None => bundled_catalog().context("invalid bundled catalog")?,
    };

    if catalog_currency != currency {
        bail!(
            "catalog is priced in {}, but the shop uses {}",
            catalog_currency.iso_alpha_code,
            currency.iso_alpha_code
        );
    }

    debug!(products = catalog.len(), "catalog loaded");

    Ok(catalog)
}

fn execute(
    shop: &mut Shop,
    catalog: &Catalog,
    command: Commands,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Commands::Products => output::write_products(out, catalog)?,
        Commands::Add(args) => {
            let product = catalog
                .get(ProductId::new(args.id))
                .with_context(|| format!("no product with id {}", args.id))?;

            shop.add_product(product, args.quantity)?;
            output::write_cart(out, shop.cart_view())?;
        }
        Commands::Remove(args) => {
            shop.remove_from_cart(ProductId::new(args.id))?;
            output::write_cart(out, shop.cart_view())?;
        }
        Commands::Set(args) => {
            shop.update_quantity(ProductId::new(args.id), args.quantity)?;
            output::write_cart(out, shop.cart_view())?;
        }
        Commands::Show => output::write_cart(out, shop.cart_view())?,
        Commands::Clear => {
            shop.clear_cart()?;
            output::write_cart(out, shop.cart_view())?;
        }
        Commands::Checkout(args) => {
            let modal = shop.checkout()?;
            writeln!(out, "{}", modal.title())?;
            output::write_summary(out, &modal.summary())?;

            let confirmation = shop.submit_order(&args.into())?;

            if let Some(order) = shop
                .gateway()
                .orders()
                .iter()
                .find(|order| order.id == confirmation.order_id)
            {
                let placed_on = order.created_at.to_zoned(TimeZone::system()).date();
                output::write_order(out, order, shop.settings().currency, placed_on)?;
            }
        }
        Commands::Contact(args) => {
            let mut inbox = ContactInbox::new();

            shop.submit_contact(&mut inbox, &args.into())?;
        }
    }

    Ok(())
}
