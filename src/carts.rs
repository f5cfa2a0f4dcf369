//! Carts
//!
//! One in-progress draft plus the committed line items for a single customer.
//! The cart is scoped per customer identity and every mutation is written
//! through to the backing [`CartStore`] immediately, so switching customers
//! never mixes carts and a reload always sees the latest snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::{
    catalog::{Filling, Packaging},
    pricing::{self, MIN_QUANTITY, PricingError},
    storage::{CartStore, StorageError},
};

/// The item currently being assembled.
///
/// No validation happens while editing; the draft is only checked when it is
/// committed into the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartDraft {
    /// Selected filling, if any.
    pub filling: Option<Filling>,

    /// Selected packaging, if any.
    pub packaging: Option<Packaging>,

    /// Requested number of units.
    pub quantity: u32,

    /// Free-form notes for this item.
    pub notes: String,
}

impl Default for CartDraft {
    fn default() -> Self {
        Self {
            filling: None,
            packaging: None,
            quantity: MIN_QUANTITY,
            notes: String::new(),
        }
    }
}

/// A committed, addressable entry in the cart.
///
/// The `alias` attributes accept the field names used by previously stored
/// carts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Unique identifier within the cart.
    pub id: String,

    /// Snapshot of the chosen filling.
    #[serde(alias = "recheio")]
    pub filling: Filling,

    /// Snapshot of the chosen packaging.
    #[serde(alias = "embalagem")]
    pub packaging: Packaging,

    /// Number of units.
    #[serde(alias = "quantidade")]
    pub quantity: u32,

    /// Free-form notes for this item.
    #[serde(default, alias = "observacoes")]
    pub notes: String,

    /// `(filling.unit_price + packaging.unit_price) * quantity`, recomputed
    /// on every create and edit.
    pub subtotal: Decimal,
}

impl CartLineItem {
    /// Builds a line item with a fresh id and a recomputed subtotal.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidQuantity`] when `quantity` is below the
    /// business minimum.
    pub fn build(
        filling: &Filling,
        packaging: &Packaging,
        quantity: u32,
        notes: &str,
    ) -> Result<Self, PricingError> {
        let subtotal = pricing::subtotal(filling, packaging, quantity)?;

        Ok(Self {
            id: Uuid::now_v7().to_string(),
            filling: filling.clone(),
            packaging: packaging.clone(),
            quantity,
            notes: notes.to_string(),
            subtotal,
        })
    }
}

/// Errors returned by [`CartService`] operations.
#[derive(Debug, Error)]
pub enum CartServiceError {
    /// A filling and a packaging must both be selected before committing.
    #[error("select a filling and a packaging before committing the item")]
    IncompleteSelection,

    /// The draft quantity is below the business minimum.
    #[error(transparent)]
    InvalidQuantity(#[from] PricingError),

    /// A line item edit is already in progress.
    #[error("another line item edit is already in progress")]
    EditInProgress,

    /// No line item edit is in progress.
    #[error("no line item edit is in progress")]
    NoActiveEdit,

    /// The referenced line item is not in the cart.
    #[error("line item not found in the cart")]
    LineItemNotFound,

    /// The cart snapshot could not be written.
    #[error("storage error")]
    Storage(#[from] StorageError),
}

/// Cart manager for one customer session.
#[derive(Debug)]
pub struct CartService<S: CartStore> {
    store: S,
    customer_id: String,
    draft: CartDraft,
    items: Vec<CartLineItem>,
    editing: Option<String>,
}

impl<S: CartStore> CartService<S> {
    /// Opens the cart for the given customer, loading any persisted snapshot.
    pub fn new(store: S, customer_id: impl Into<String>) -> Self {
        let customer_id = customer_id.into();
        let items = store.load_cart(&customer_id);

        Self {
            store,
            customer_id,
            draft: CartDraft::default(),
            items,
            editing: None,
        }
    }

    /// The customer this cart belongs to.
    #[must_use]
    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// The item currently being assembled.
    #[must_use]
    pub fn draft(&self) -> &CartDraft {
        &self.draft
    }

    /// Committed line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Number of committed line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no committed line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Id of the line item currently being edited, if any.
    #[must_use]
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Total of all committed line items.
    #[must_use]
    pub fn total(&self) -> Decimal {
        pricing::order_total(&self.items)
    }

    /// Total number of units across all committed line items.
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        pricing::unit_count(&self.items)
    }

    /// Selects the draft filling.
    pub fn select_filling(&mut self, filling: Filling) {
        self.draft.filling = Some(filling);
    }

    /// Selects the draft packaging.
    pub fn select_packaging(&mut self, packaging: Packaging) {
        self.draft.packaging = Some(packaging);
    }

    /// Sets the draft quantity. Not validated until commit.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.draft.quantity = quantity;
    }

    /// Sets the draft notes.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.draft.notes = notes.into();
    }

    /// Commits the draft as a new line item and resets the draft.
    ///
    /// # Errors
    ///
    /// - [`CartServiceError::IncompleteSelection`]: filling or packaging missing.
    /// - [`CartServiceError::InvalidQuantity`]: quantity below the minimum.
    /// - [`CartServiceError::Storage`]: the cart snapshot could not be written.
    pub fn commit_new(&mut self) -> Result<CartLineItem, CartServiceError> {
        let item = self.build_from_draft(None)?;

        self.items.push(item.clone());
        self.draft = CartDraft::default();
        self.persist()?;

        debug!(customer = %self.customer_id, item = %item.id, "line item added to cart");

        Ok(item)
    }

    /// Loads a line item back into the draft and marks it as being edited.
    ///
    /// At most one edit may be in progress at a time.
    ///
    /// # Errors
    ///
    /// - [`CartServiceError::EditInProgress`]: another edit is already active.
    /// - [`CartServiceError::LineItemNotFound`]: no line item has the given id.
    pub fn begin_edit(&mut self, line_item_id: &str) -> Result<(), CartServiceError> {
        if self.editing.is_some() {
            return Err(CartServiceError::EditInProgress);
        }

        let item = self
            .items
            .iter()
            .find(|item| item.id == line_item_id)
            .ok_or(CartServiceError::LineItemNotFound)?;

        self.draft = CartDraft {
            filling: Some(item.filling.clone()),
            packaging: Some(item.packaging.clone()),
            quantity: item.quantity,
            notes: item.notes.clone(),
        };
        self.editing = Some(item.id.clone());

        Ok(())
    }

    /// Replaces the edited line item in place with the current draft.
    ///
    /// The item keeps its id; filling, packaging, quantity, notes and
    /// subtotal are replaced. If the target was removed while the edit was in
    /// progress, the cart is left unchanged. Edit mode is cleared and the
    /// draft reset either way.
    ///
    /// # Errors
    ///
    /// - [`CartServiceError::NoActiveEdit`]: no edit is in progress.
    /// - [`CartServiceError::IncompleteSelection`]: filling or packaging missing.
    /// - [`CartServiceError::InvalidQuantity`]: quantity below the minimum.
    /// - [`CartServiceError::Storage`]: the cart snapshot could not be written.
    pub fn commit_edit(&mut self) -> Result<(), CartServiceError> {
        let Some(target) = self.editing.clone() else {
            return Err(CartServiceError::NoActiveEdit);
        };

        let replacement = self.build_from_draft(Some(target.clone()))?;

        if let Some(slot) = self.items.iter_mut().find(|item| item.id == target) {
            *slot = replacement;
        }

        self.editing = None;
        self.draft = CartDraft::default();
        self.persist()?;

        debug!(customer = %self.customer_id, item = %target, "line item updated");

        Ok(())
    }

    /// Abandons the in-progress edit and resets the draft. The cart is not
    /// mutated.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.draft = CartDraft::default();
    }

    /// Removes a line item. A no-op when the id is absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the cart snapshot could not be written.
    pub fn remove(&mut self, line_item_id: &str) -> Result<(), StorageError> {
        let before = self.items.len();
        self.items.retain(|item| item.id != line_item_id);

        if self.items.len() != before {
            self.persist()?;
        }

        Ok(())
    }

    /// Empties the cart unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the cart snapshot could not be written.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.items.clear();
        self.persist()
    }

    fn build_from_draft(&self, keep_id: Option<String>) -> Result<CartLineItem, CartServiceError> {
        let (Some(filling), Some(packaging)) =
            (self.draft.filling.as_ref(), self.draft.packaging.as_ref())
        else {
            return Err(CartServiceError::IncompleteSelection);
        };

        let mut item = CartLineItem::build(filling, packaging, self.draft.quantity, &self.draft.notes)?;

        if let Some(id) = keep_id {
            item.id = id;
        }

        Ok(item)
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.store.save_cart(&self.customer_id, &self.items)
    }
}
