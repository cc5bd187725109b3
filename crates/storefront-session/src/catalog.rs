//! # Product Catalog
//!
//! Where the session looks up products before they enter the cart.
//!
//! The real catalog lives behind the storefront's product service; the
//! session only needs `id → Product`. Stock is carried for display and is not
//! re-checked here.

use std::collections::HashMap;

use storefront_core::Product;

/// Read-only product lookup.
pub trait ProductCatalog: Send + Sync {
    fn product(&self, id: &str) -> Option<Product>;
}

/// Products held in memory, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: HashMap<String, Product>,
}

impl InMemoryCatalog {
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        InMemoryCatalog {
            products: products.into_iter().map(|p| (p.id.clone(), p)).collect(),
        }
    }

    /// Adds or replaces a product.
    pub fn insert(&mut self, product: Product) {
        self.products.insert(product.id.clone(), product);
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductCatalog for InMemoryCatalog {
    fn product(&self, id: &str) -> Option<Product> {
        self.products.get(id).cloned()
    }
}
