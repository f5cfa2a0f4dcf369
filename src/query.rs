//! Query
//!
//! Filtering, free-text search and dashboard aggregation over the order
//! collection. Both filters compose with logical AND and preserve the input
//! collection's order; callers that want chronology sort before filtering.

use rust_decimal::Decimal;

use crate::orders::{Order, OrderStatus};

/// A status filter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    /// Match one concrete status.
    Is(OrderStatus),

    /// Match every status outside the headline buckets (Pending,
    /// InProduction, Delivered).
    Other,
}

impl StatusFilter {
    /// Whether the given status passes this filter.
    #[must_use]
    pub fn matches(self, status: OrderStatus) -> bool {
        match self {
            Self::Is(wanted) => status == wanted,
            Self::Other => !status.is_headline(),
        }
    }
}

/// Composed filter used by the administrative list view.
#[derive(Debug, Clone, Default)]
pub struct OrderQuery {
    /// Status filter; `None` means no filter.
    pub status: Option<StatusFilter>,

    /// Free-text search; empty matches everything.
    pub search: String,
}

impl OrderQuery {
    /// Whether an order passes both filters.
    #[must_use]
    pub fn matches(&self, order: &Order) -> bool {
        let status_ok = self
            .status
            .is_none_or(|filter| filter.matches(order.status));

        status_ok && matches_search(order, &self.search)
    }

    /// Applies the query, preserving input order.
    #[must_use]
    pub fn apply<'a>(&self, orders: &'a [Order]) -> Vec<&'a Order> {
        orders.iter().filter(|order| self.matches(order)).collect()
    }
}

/// Narrows orders by status. `None` means no filter.
#[must_use]
pub fn filter_by_status(orders: &[Order], filter: Option<StatusFilter>) -> Vec<&Order> {
    orders
        .iter()
        .filter(|order| filter.is_none_or(|f| f.matches(order.status)))
        .collect()
}

/// Case-insensitive substring search over customer name, customer email,
/// order id and customer phone. An empty query matches everything.
#[must_use]
pub fn search_text<'a>(orders: &'a [Order], query: &str) -> Vec<&'a Order> {
    orders
        .iter()
        .filter(|order| matches_search(order, query))
        .collect()
}

fn matches_search(order: &Order, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();

    [
        order.customer.name.as_str(),
        order.customer.email.as_str(),
        order.id.as_str(),
        order.customer.phone.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Dashboard aggregation over the order collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderStats {
    /// Orders currently pending.
    pub pending: usize,

    /// Orders in production.
    pub in_production: usize,

    /// Orders delivered.
    pub delivered: usize,

    /// Orders outside the headline buckets.
    pub other: usize,

    /// Sum of the totals of delivered orders.
    pub total_sales: Decimal,
}

impl OrderStats {
    /// Collects the dashboard numbers from a list of orders.
    #[must_use]
    pub fn collect(orders: &[Order]) -> Self {
        let mut stats = Self::default();

        for order in orders {
            match order.status {
                OrderStatus::Pending => stats.pending += 1,
                OrderStatus::InProduction => stats.in_production += 1,
                OrderStatus::Delivered => {
                    stats.delivered += 1;
                    stats.total_sales += order.total;
                }
                OrderStatus::Finalized | OrderStatus::Cancelled => stats.other += 1,
            }
        }

        stats
    }
}
