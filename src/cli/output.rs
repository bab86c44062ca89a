//! Terminal output

use std::io::Write;

use beeshop::{
    catalog::Catalog,
    checkout::PlacedOrder,
    notifications::{Notifications, Severity},
    pricing::format_price,
    utils::format_date,
    view::{CartItemsView, CartViewModel, OrderSummary, SUMMARY_HEADING},
};
use jiff::civil::Date;
use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};

pub(super) fn write_products(out: &mut impl Write, catalog: &Catalog) -> std::io::Result<()> {
    let mut builder = Builder::default();
    builder.push_record(["ID", "Produs", "Categorie", "Preț"]);

    for product in catalog.iter() {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.category.clone(),
            format_price(product.price, product.currency),
        ]);
    }

    writeln!(out, "{}", render(builder, 3))
}

pub(super) fn write_cart(out: &mut impl Write, cart: &CartViewModel) -> std::io::Result<()> {
    match &cart.items {
        CartItemsView::Empty(message) => writeln!(out, "{message}")?,
        CartItemsView::Lines(lines) => {
            let mut builder = Builder::default();
            builder.push_record(["ID", "Produs", "Preț", "Cant."]);

            for line in lines {
                builder.push_record([
                    line.id.to_string(),
                    line.name.clone(),
                    line.unit_price.clone(),
                    line.quantity.to_string(),
                ]);
            }

            writeln!(out, "{}", render(builder, 2))?;
        }
    }

    writeln!(out, " Produse: {}", cart.item_count)?;
    writeln!(out, " \x1b[1mTotal: {}\x1b[0m", cart.total)
}

pub(super) fn write_summary(out: &mut impl Write, summary: &OrderSummary) -> std::io::Result<()> {
    writeln!(out, " \x1b[1m{SUMMARY_HEADING}\x1b[0m")?;

    for line in &summary.lines {
        writeln!(out, "  {:<40} {:>14}", line.label, line.subtotal)?;
    }

    writeln!(out, "  {}", summary.total)
}

pub(super) fn write_order(
    out: &mut impl Write,
    order: &PlacedOrder,
    currency: &Currency,
    placed_on: Date,
) -> std::io::Result<()> {
    writeln!(
        out,
        "Comanda #{} pentru {} ({}) plasată pe {}",
        order.id,
        order.customer_name,
        format_price(order.total_amount, currency),
        format_date(placed_on)
    )
}

pub(super) fn write_notifications(
    out: &mut impl Write,
    notifications: &Notifications,
) -> std::io::Result<()> {
    for (_, notification) in notifications.iter() {
        writeln!(
            out,
            "{}{}\x1b[0m {}",
            severity_color(notification.severity),
            severity_symbol(notification.severity),
            notification.message
        )?;
    }

    Ok(())
}

fn render(builder: Builder, price_column: usize) -> String {
    let mut table = builder.build();

    table.with(Theme::from(Style::modern_rounded()));
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(price_column..), Alignment::right());

    table.to_string()
}

fn severity_symbol(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "✔",
        Severity::Error => "✖",
        Severity::Warning => "⚠",
        Severity::Info => "ℹ",
    }
}

fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "\x1b[32m",
        Severity::Error => "\x1b[31m",
        Severity::Warning => "\x1b[33m",
        Severity::Info => "\x1b[36m",
    }
}
