//! Trolley CLI
//!
//! Every invocation rehydrates the cart from storage, applies at most one
//! operation and prints the result.

use std::io::{self, Write};

use anyhow::{Context, Result, anyhow, bail};
use rusty_money::iso::Currency;
use tabled::{builder::Builder, settings::Style};
use tracing::info;

use trolley::{
    catalog::Catalog,
    operations::CartOperation,
    persistence::{CartSlot, Persistence},
    pricing::{format_currency, parse_currency},
    products::Product,
    storage::FileStorage,
    store::CartStore,
    summary::CartSummary,
};

use crate::config::{Command, Config};

mod config;
mod logging;

/// Trolley CLI entry point
pub fn main() -> Result<()> {
    let config = Config::load().unwrap_or_else(|e| e.exit());

    logging::init_subscriber(&config.logging)?;

    let currency = parse_currency(&config.catalog.currency)?;

    let catalog = Catalog::load(&config.catalog.catalog).with_context(|| {
        format!(
            "loading catalog from {}",
            config.catalog.catalog.display()
        )
    })?;

    let storage = FileStorage::open(&config.storage.storage_dir).with_context(|| {
        format!(
            "opening storage at {}",
            config.storage.storage_dir.display()
        )
    })?;

    let mut store = CartStore::with_slot(CartSlot::new(storage, &config.storage.storage_key));

    let mut out = io::stdout().lock();

    let operation = match config.command {
        Command::Products => {
            write_products(&mut out, &catalog, &store, currency)?;

            return Ok(());
        }
        Command::Show => None,
        Command::Add { product } => Some(CartOperation::Add(find(&catalog, &product)?.clone())),
        Command::Remove { product } => Some(CartOperation::Remove(product.into())),
        Command::Increment { product } => Some(CartOperation::Increment(product.into())),
        Command::Decrement { product } => Some(CartOperation::Decrement(product.into())),
    };

    if let Some(operation) = operation {
        if store.apply(&operation) {
            info!(%operation, revision = store.revision(), "cart updated");
        } else {
            writeln!(out, "Nothing to do: {operation}")?;
        }
    }

    CartSummary::new(store.items(), currency).write_to(&mut out)?;

    if store.persistence() == Persistence::MemoryOnly {
        bail!(
            "the cart could not be saved to {}",
            config.storage.storage_dir.display()
        );
    }

    Ok(())
}

fn find<'a>(catalog: &'a Catalog, id: &str) -> Result<&'a Product> {
    catalog
        .get(id)
        .ok_or_else(|| anyhow!("no product with id {id:?} in the catalog"))
}

fn write_products(
    out: &mut impl Write,
    catalog: &Catalog,
    store: &CartStore<FileStorage>,
    currency: &Currency,
) -> Result<()> {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Product", "Price", "In cart"]);

    for product in catalog.iter() {
        let in_cart = if store.items().contains(product) {
            "yes"
        } else {
            ""
        };

        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            format_currency(product.price, currency),
            in_cart.to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());

    writeln!(out, "{table}")?;

    Ok(())
}
