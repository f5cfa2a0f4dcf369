//! Order Status
//!
//! The closed status set and the forward-only advance machine. Direct status
//! selection is a separate, unconstrained entry point on the order service;
//! both must keep working.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Lifecycle status of an order.
///
/// Serialized with the capitalized Portuguese labels already present in
/// stored collections; several legacy spellings are accepted on read (see
/// [`OrderStatus::from_stored`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// Newly submitted, not yet picked up.
    Pending,
    /// Accepted and being produced.
    InProduction,
    /// Handed over to the customer.
    Delivered,
    /// Closed out. Terminal for the advance machine.
    Finalized,
    /// Side-exit reachable only through direct status selection.
    Cancelled,
}

impl OrderStatus {
    /// Every member of the closed set, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::InProduction,
        Self::Delivered,
        Self::Finalized,
        Self::Cancelled,
    ];

    /// The three headline statuses shown as their own dashboard buckets;
    /// everything else falls into the "other" bucket.
    pub const HEADLINE: [Self; 3] = [Self::Pending, Self::InProduction, Self::Delivered];

    /// Canonical stored label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pendente",
            Self::InProduction => "Em Produção",
            Self::Delivered => "Entregue",
            Self::Finalized => "Finalizado",
            Self::Cancelled => "Cancelado",
        }
    }

    /// Maps a stored label onto the closed set.
    ///
    /// Accepts the canonical labels, their lowercase/unaccented variants, and
    /// the retired `Confirmado`/`Pronto` labels (mapped to the nearest
    /// downstream status so old orders stay visible in the headline buckets).
    /// Anything unrecognized reads as [`OrderStatus::Pending`]; a malformed
    /// record must never make the collection unreadable.
    #[must_use]
    pub fn from_stored(raw: &str) -> Self {
        match raw.trim() {
            "Pendente" | "pendente" => Self::Pending,
            "Em Produção" | "Em Producao" | "em produção" | "producao" | "Confirmado"
            | "confirmado" => Self::InProduction,
            "Entregue" | "entregue" | "Pronto" | "pronto" => Self::Delivered,
            "Finalizado" | "finalizado" => Self::Finalized,
            "Cancelado" | "cancelado" => Self::Cancelled,
            _ => Self::Pending,
        }
    }

    /// The next status in the forward-only machine.
    ///
    /// `Finalized` is terminal and `Cancelled` sits outside the machine; both
    /// advance to themselves.
    #[must_use]
    pub fn advanced(self) -> Self {
        match self {
            Self::Pending => Self::InProduction,
            Self::InProduction => Self::Delivered,
            Self::Delivered => Self::Finalized,
            Self::Finalized | Self::Cancelled => self,
        }
    }

    /// Whether this status gets its own dashboard bucket.
    #[must_use]
    pub fn is_headline(self) -> bool {
        Self::HEADLINE.contains(&self)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;

        Ok(Self::from_stored(&raw))
    }
}
