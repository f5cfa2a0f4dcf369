//! Report
//!
//! Console rendering of the administrative order list: one table row per
//! order plus the dashboard counters underneath.

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{orders::Order, pricing, query::OrderStats};

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// IO error
    #[error("IO error")]
    Io,
}

/// Writes the order table followed by the dashboard counters.
///
/// Orders are rendered in the order given; callers filter and sort with
/// [`crate::query`] first.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the report cannot be written.
pub fn write_orders_table(mut out: impl io::Write, orders: &[Order]) -> Result<(), ReportError> {
    let mut builder = Builder::default();

    builder.push_record(["Pedido", "Cliente", "Data", "Unidades", "Total", "Status"]);

    for order in orders {
        builder.push_record([
            format!("#{}", order.short_id()),
            order.customer.name.clone(),
            order.created_at.strftime("%d/%m/%Y %H:%M").to_string(),
            pricing::unit_count(&order.line_items).to_string(),
            pricing::display_brl(order.total),
            order.status.to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..5), Alignment::right());

    writeln!(out, "{table}").map_err(|_err| ReportError::Io)?;

    write_stats_summary(&mut out, orders)
}

fn write_stats_summary(out: &mut impl io::Write, orders: &[Order]) -> Result<(), ReportError> {
    let stats = OrderStats::collect(orders);

    writeln!(
        out,
        " Pendentes: {}  Em Produção: {}  Entregues: {}  Outros: {}",
        stats.pending, stats.in_production, stats.delivered, stats.other,
    )
    .map_err(|_err| ReportError::Io)?;

    writeln!(
        out,
        " Vendas (entregues): {}",
        pricing::display_brl(stats.total_sales),
    )
    .map_err(|_err| ReportError::Io)
}
