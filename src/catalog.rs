//! Catalog
//!
//! Compiled-in reference data for the two choice dimensions of a bem casado:
//! fillings and packagings. Declaration order is the canonical display order
//! and is stable across calls. The catalog is never persisted; carts and
//! orders embed snapshots of the entries they were built from.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A filling option.
///
/// The `alias` attributes accept the field names used by previously stored
/// carts and orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filling {
    /// Stable identifier, unique among fillings.
    pub id: String,

    /// Customer-facing name.
    #[serde(alias = "nome")]
    pub display_name: String,

    /// Price per unit.
    #[serde(alias = "preco")]
    pub unit_price: Decimal,

    /// Swatch colour shown next to the option.
    #[serde(alias = "cor")]
    pub color_tag: String,

    /// Short customer-facing description.
    #[serde(alias = "descricao")]
    pub description: String,
}

/// A packaging option.
///
/// Same shape as [`Filling`], kept as its own type so the two dimensions
/// cannot be swapped when assembling an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Packaging {
    /// Stable identifier, unique among packagings.
    pub id: String,

    /// Customer-facing name.
    #[serde(alias = "nome")]
    pub display_name: String,

    /// Price per unit, added on top of the filling price.
    #[serde(alias = "preco")]
    pub unit_price: Decimal,

    /// Swatch colour shown next to the option.
    #[serde(alias = "cor")]
    pub color_tag: String,

    /// Short customer-facing description.
    #[serde(alias = "descricao")]
    pub description: String,
}

fn filling(id: &str, name: &str, price: Decimal, color: &str, description: &str) -> Filling {
    Filling {
        id: id.to_string(),
        display_name: name.to_string(),
        unit_price: price,
        color_tag: color.to_string(),
        description: description.to_string(),
    }
}

fn packaging(id: &str, name: &str, price: Decimal, color: &str, description: &str) -> Packaging {
    Packaging {
        id: id.to_string(),
        display_name: name.to_string(),
        unit_price: price,
        color_tag: color.to_string(),
        description: description.to_string(),
    }
}

static FILLINGS: LazyLock<Vec<Filling>> = LazyLock::new(|| {
    vec![
        filling(
            "doce-leite",
            "Doce de Leite",
            dec!(2.50),
            "#D2691E",
            "Cremoso doce de leite artesanal",
        ),
        filling(
            "brigadeiro",
            "Brigadeiro",
            dec!(2.80),
            "#8B4513",
            "Brigadeiro com chocolate belga",
        ),
        filling(
            "beijinho",
            "Beijinho",
            dec!(2.70),
            "#F5F5DC",
            "Beijinho com coco fresco",
        ),
        filling(
            "nutella",
            "Nutella",
            dec!(3.20),
            "#654321",
            "Creme de avelã Nutella",
        ),
        filling(
            "frutas-vermelhas",
            "Frutas Vermelhas",
            dec!(3.50),
            "#DC143C",
            "Geleia de frutas vermelhas",
        ),
        filling(
            "limao",
            "Limão",
            dec!(2.90),
            "#FFFF00",
            "Curd de limão siciliano",
        ),
    ]
});

static PACKAGINGS: LazyLock<Vec<Packaging>> = LazyLock::new(|| {
    vec![
        packaging(
            "simples",
            "Simples",
            dec!(0.50),
            "#E6E6FA",
            "Saquinho transparente com fita",
        ),
        packaging(
            "premium",
            "Premium",
            dec!(1.20),
            "#FFB6C1",
            "Caixinha personalizada com laço",
        ),
        packaging(
            "luxo",
            "Luxo",
            dec!(2.00),
            "#DDA0DD",
            "Caixa rígida com acabamento especial",
        ),
        packaging(
            "personalizada",
            "Personalizada",
            dec!(2.50),
            "#FF69B4",
            "Design exclusivo com nome dos noivos",
        ),
    ]
});

/// All filling options, in canonical display order.
#[must_use]
pub fn fillings() -> &'static [Filling] {
    &FILLINGS
}

/// All packaging options, in canonical display order.
#[must_use]
pub fn packagings() -> &'static [Packaging] {
    &PACKAGINGS
}

/// Look up a filling by its identifier.
#[must_use]
pub fn filling_by_id(id: &str) -> Option<&'static Filling> {
    FILLINGS.iter().find(|entry| entry.id == id)
}

/// Look up a packaging by its identifier.
#[must_use]
pub fn packaging_by_id(id: &str) -> Option<&'static Packaging> {
    PACKAGINGS.iter().find(|entry| entry.id == id)
}
