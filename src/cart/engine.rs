//! Cart state and its reducer.

use super::catalog::{max_price, Catalog, ProductId};
use crate::config::{default_free_delivery_threshold, ConfigError, PharmacyConfig};
use crate::core::Reducer;
use crate::state_enum;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

state_enum! {
    /// Whether the cart holds anything.
    pub enum CartStatus {
        Empty,
        Filled,
    }
}

/// One product line. `quantity` is always at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Unit price captured when the line was created.
    pub price: Decimal,
    pub quantity: u32,
}

impl LineItem {
    /// Price times quantity, `None` on overflow.
    pub fn subtotal(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Items in the cart. Totals are derived on read, never stored.
///
/// Deserialization rejects lines a reducer could never produce: a zero
/// quantity or a price outside the catalog range.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CartLines")]
pub struct CartState {
    items: BTreeMap<ProductId, LineItem>,
}

#[derive(Deserialize)]
struct CartLines {
    items: BTreeMap<ProductId, LineItem>,
}

impl TryFrom<CartLines> for CartState {
    type Error = String;

    fn try_from(lines: CartLines) -> Result<Self, String> {
        for (id, line) in &lines.items {
            if line.quantity == 0 {
                return Err(format!("cart line '{id}' has zero quantity"));
            }
            if line.price.is_sign_negative() || line.price > max_price() {
                return Err(format!(
                    "cart line '{id}' has price {} outside 0..={}",
                    line.price,
                    max_price()
                ));
            }
        }
        Ok(Self { items: lines.items })
    }
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &BTreeMap<ProductId, LineItem> {
        &self.items
    }

    pub fn line(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.get(id)
    }

    /// Quantity of `id`, zero when absent.
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.items.get(id).map_or(0, |line| line.quantity)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of price times quantity over every line, saturating at
    /// `Decimal::MAX`.
    pub fn total(&self) -> Decimal {
        self.checked_total().unwrap_or(Decimal::MAX)
    }

    /// Sum of quantities, shown on the cart badge. Saturates at `u32::MAX`.
    pub fn count(&self) -> u32 {
        self.checked_count().unwrap_or(u32::MAX)
    }

    fn checked_total(&self) -> Option<Decimal> {
        self.items
            .values()
            .try_fold(Decimal::ZERO, |sum, line| sum.checked_add(line.subtotal()?))
    }

    fn checked_count(&self) -> Option<u32> {
        self.items
            .values()
            .try_fold(0u32, |sum, line| sum.checked_add(line.quantity))
    }
}

/// Cart events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CartEvent {
    Add(ProductId),
    Remove(ProductId),
    Clear,
}

/// Derived view of a cart for the checkout panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub count: u32,
    pub total: Decimal,
    pub free_delivery: bool,
}

/// Reducer over [`CartState`], backed by a read-only catalog.
///
/// Prices always come from the catalog at add time; callers only name the
/// product.
#[derive(Clone, Debug)]
pub struct CartEngine {
    catalog: Arc<Catalog>,
    free_delivery_threshold: Decimal,
}

impl CartEngine {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            free_delivery_threshold: default_free_delivery_threshold(),
        }
    }

    pub fn from_config(config: &PharmacyConfig) -> Result<Self, ConfigError> {
        let catalog = Catalog::new(config.products.clone())?;
        Ok(Self::new(catalog).with_free_delivery_threshold(config.free_delivery_threshold))
    }

    pub fn with_free_delivery_threshold(mut self, threshold: Decimal) -> Self {
        self.free_delivery_threshold = threshold;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Add one unit of `id`.
    ///
    /// Existing lines keep their stored price. Unknown and out-of-stock
    /// products leave the cart unchanged, as does an add whose total or
    /// count would overflow.
    pub fn add(&self, cart: &CartState, id: &ProductId) -> CartState {
        let Some(product) = self.catalog.get(id) else {
            debug!(product = %id, "ignoring add of unknown product");
            return cart.clone();
        };
        if !product.in_stock {
            debug!(product = %id, "ignoring add of out-of-stock product");
            return cart.clone();
        }

        let mut next = cart.clone();
        match next.items.get_mut(id) {
            Some(line) => match line.quantity.checked_add(1) {
                Some(quantity) => line.quantity = quantity,
                None => return cart.clone(),
            },
            None => {
                next.items.insert(
                    id.clone(),
                    LineItem {
                        price: product.price,
                        quantity: 1,
                    },
                );
            }
        }
        if next.checked_total().is_none() || next.checked_count().is_none() {
            debug!(product = %id, "ignoring add that would overflow the cart");
            return cart.clone();
        }
        next
    }

    /// Remove one unit of `id`, dropping the line when it reaches zero.
    pub fn remove(&self, cart: &CartState, id: &ProductId) -> CartState {
        let mut next = cart.clone();
        match next.items.get_mut(id) {
            Some(line) if line.quantity > 1 => line.quantity -= 1,
            Some(_) => {
                next.items.remove(id);
            }
            None => debug!(product = %id, "ignoring remove of product not in cart"),
        }
        next
    }

    pub fn clear(&self, _cart: &CartState) -> CartState {
        CartState::new()
    }

    pub fn qualifies_for_free_delivery(&self, cart: &CartState) -> bool {
        !cart.is_empty() && cart.total() >= self.free_delivery_threshold
    }

    pub fn summary(&self, cart: &CartState) -> CartSummary {
        CartSummary {
            count: cart.count(),
            total: cart.total(),
            free_delivery: self.qualifies_for_free_delivery(cart),
        }
    }
}

impl Reducer for CartEngine {
    type State = CartState;
    type Event = CartEvent;
    type Phase = CartStatus;

    fn initial(&self) -> CartState {
        CartState::new()
    }

    fn reduce(&self, state: &CartState, event: CartEvent) -> CartState {
        match event {
            CartEvent::Add(id) => self.add(state, &id),
            CartEvent::Remove(id) => self.remove(state, &id),
            CartEvent::Clear => self.clear(state),
        }
    }

    fn phase(&self, state: &CartState) -> CartStatus {
        if state.is_empty() {
            CartStatus::Empty
        } else {
            CartStatus::Filled
        }
    }
}
