//! Read-only product catalog and its filter projection.

use crate::config::ConfigError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Category label that matches every product.
pub const ALL_CATEGORIES: &str = "All";

/// Highest unit price a catalog accepts.
pub fn max_price() -> Decimal {
    Decimal::new(1_000_000, 0)
}

/// Stable product identifier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A catalog entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub in_stock: bool,
    #[serde(default)]
    pub description: String,
}

impl Product {
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Decimal,
        in_stock: bool,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price,
            in_stock,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Category plus free-text search over product names.
///
/// Filter state is independent of cart state; applying a filter never
/// touches the cart.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFilter {
    /// `None` matches every category.
    pub category: Option<String>,
    /// Case-insensitive substring of the product name. Blank matches all.
    pub query: String,
}

impl CatalogFilter {
    /// Filter that matches the whole catalog.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to a category. [`ALL_CATEGORIES`] clears the restriction.
    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = (category != ALL_CATEGORIES).then_some(category);
        self
    }

    /// Restrict to names containing `query`.
    pub fn matching(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|category| product.category == category);

        let query = self.query.trim();
        let query_ok =
            query.is_empty() || product.name.to_lowercase().contains(&query.to_lowercase());

        category_ok && query_ok
    }
}

/// Products offered by the pharmacy, supplied at construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and prices outside
    /// `0..=max_price()`.
    pub fn new(products: Vec<Product>) -> Result<Self, ConfigError> {
        let mut seen = BTreeSet::new();
        for product in &products {
            if !seen.insert(product.id.clone()) {
                return Err(ConfigError::DuplicateProduct {
                    id: product.id.to_string(),
                });
            }
            if product.price.is_sign_negative() {
                return Err(ConfigError::NegativePrice {
                    id: product.id.to_string(),
                });
            }
            if product.price > max_price() {
                return Err(ConfigError::PriceTooLarge {
                    id: product.id.to_string(),
                    max: max_price(),
                });
            }
        }
        Ok(Self { products })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// Distinct categories in catalog order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.products
            .iter()
            .map(|product| product.category.as_str())
            .filter(|category| seen.insert(*category))
            .collect()
    }

    /// Products matching `filter`, in catalog order.
    pub fn filter(&self, filter: &CatalogFilter) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| filter.matches(product))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Product::new("paracetamol", "Paracetamol 500mg", "Pain Relief", Decimal::new(599, 2), true),
            Product::new("vitamin-d3", "Vitamin D3 1000IU", "Vitamins", Decimal::new(849, 2), true),
            Product::new("ibuprofen", "Ibuprofen 400mg", "Pain Relief", Decimal::new(749, 2), true),
            Product::new("metformin", "Metformin 500mg", "Diabetes", Decimal::new(999, 2), false),
        ])
        .unwrap()
    }

    fn ids(products: Vec<&Product>) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn empty_filter_returns_everything_in_order() {
        let catalog = catalog();
        assert_eq!(
            ids(catalog.filter(&CatalogFilter::all())),
            vec!["paracetamol", "vitamin-d3", "ibuprofen", "metformin"]
        );
    }

    #[test]
    fn category_filter_is_exact() {
        let catalog = catalog();
        let filter = CatalogFilter::all().in_category("Pain Relief");
        assert_eq!(ids(catalog.filter(&filter)), vec!["paracetamol", "ibuprofen"]);
    }

    #[test]
    fn all_category_clears_restriction() {
        let filter = CatalogFilter::all().in_category("Vitamins").in_category(ALL_CATEGORIES);
        assert_eq!(filter.category, None);
    }

    #[test]
    fn query_is_case_insensitive_substring() {
        let catalog = catalog();
        let filter = CatalogFilter::all().matching("500MG");
        assert_eq!(ids(catalog.filter(&filter)), vec!["paracetamol", "metformin"]);
    }

    #[test]
    fn category_and_query_compose() {
        let catalog = catalog();
        let filter = CatalogFilter::all()
            .in_category("Pain Relief")
            .matching("ibu");
        assert_eq!(ids(catalog.filter(&filter)), vec!["ibuprofen"]);
    }

    #[test]
    fn blank_query_matches_everything() {
        let catalog = catalog();
        let filter = CatalogFilter::all().matching("   ");
        assert_eq!(catalog.filter(&filter).len(), 4);
    }

    #[test]
    fn out_of_stock_products_are_still_listed() {
        let catalog = catalog();
        let filter = CatalogFilter::all().in_category("Diabetes");
        assert_eq!(ids(catalog.filter(&filter)), vec!["metformin"]);
    }

    #[test]
    fn categories_are_distinct_in_catalog_order() {
        assert_eq!(
            catalog().categories(),
            vec!["Pain Relief", "Vitamins", "Diabetes"]
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = Catalog::new(vec![
            Product::new("aspirin", "Aspirin 75mg", "Heart Health", Decimal::new(499, 2), true),
            Product::new("aspirin", "Aspirin 300mg", "Heart Health", Decimal::new(599, 2), true),
        ]);
        assert!(matches!(result, Err(ConfigError::DuplicateProduct { id }) if id == "aspirin"));
    }

    #[test]
    fn negative_prices_are_rejected() {
        let result = Catalog::new(vec![Product::new(
            "refund",
            "Refund",
            "Misc",
            Decimal::new(-100, 2),
            true,
        )]);
        assert!(matches!(result, Err(ConfigError::NegativePrice { .. })));
    }

    #[test]
    fn prices_above_the_ceiling_are_rejected() {
        let at_ceiling = Product::new("mri", "MRI Scan", "Imaging", max_price(), true);
        assert!(Catalog::new(vec![at_ceiling]).is_ok());

        let result = Catalog::new(vec![Product::new(
            "gold",
            "Gold Tablets",
            "Misc",
            Decimal::from_str_exact("50000000000000000000000000000").unwrap(),
            true,
        )]);
        assert!(matches!(result, Err(ConfigError::PriceTooLarge { id, .. }) if id == "gold"));
    }
}
