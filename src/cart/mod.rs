//! Pharmacy cart.
//!
//! The cart is a map from product id to a priced line with a positive
//! quantity. Totals and badge counts are always computed from the lines.
//! Catalog filtering is a separate read-side projection and never touches
//! cart state.
//!
//! # Example
//!
//! ```rust
//! use careflow::cart::{CartEngine, CartState, Catalog, Product, ProductId};
//! use rust_decimal::Decimal;
//!
//! let engine = CartEngine::new(
//!     Catalog::new(vec![
//!         Product::new("paracetamol", "Paracetamol 500mg", "Pain Relief", Decimal::new(599, 2), true),
//!         Product::new("metformin", "Metformin 500mg", "Diabetes", Decimal::new(999, 2), false),
//!     ])
//!     .unwrap(),
//! );
//!
//! let paracetamol = ProductId::from("paracetamol");
//! let cart = engine.add(&CartState::new(), &paracetamol);
//! let cart = engine.add(&cart, &paracetamol);
//! let cart = engine.add(&cart, &ProductId::from("metformin"));
//!
//! assert_eq!(cart.count(), 2);
//! assert_eq!(cart.total(), Decimal::new(1198, 2));
//! ```

mod catalog;
mod engine;

pub use catalog::{max_price, Catalog, CatalogFilter, Product, ProductId, ALL_CATEGORIES};
pub use engine::{CartEngine, CartEvent, CartState, CartStatus, CartSummary, LineItem};
