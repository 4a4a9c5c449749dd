//! Summary
//!
//! Renders a cart the way the shopper sees it: one row per line item, then
//! the item count and total.

use std::io;

use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{cart::CartItems, pricing::format_currency};

/// Errors that can occur when rendering a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// IO error
    #[error("Failed to write cart summary: {0}")]
    Io(#[from] io::Error),
}

/// A cart paired with the currency to show it in.
#[derive(Debug, Clone, Copy)]
pub struct CartSummary<'a> {
    items: &'a CartItems,
    currency: &'a Currency,
}

impl<'a> CartSummary<'a> {
    /// Create a summary of `items`.
    pub fn new(items: &'a CartItems, currency: &'a Currency) -> Self {
        Self { items, currency }
    }

    /// Write the summary table followed by the count and total.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SummaryError> {
        if self.items.is_empty() {
            writeln!(out, "Your cart is empty.")?;

            return Ok(());
        }

        let mut builder = Builder::default();

        builder.push_record(["Product", "Quantity", "Price"]);

        for item in self.items {
            builder.push_record([
                item.product().name.clone(),
                item.quantity().to_string(),
                format_currency(item.line_total(), self.currency),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Alignment::center());
        table.modify(Columns::new(1..3), Alignment::right());

        writeln!(out, "{table}")?;
        writeln!(out, " Items: {}", self.items.len())?;
        writeln!(
            out,
            " Total: {}",
            format_currency(self.items.total(), self.currency)
        )?;

        Ok(())
    }
}
