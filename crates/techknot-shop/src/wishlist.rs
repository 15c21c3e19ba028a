//! Wishlist of product ids.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Products the shopper has marked, in the order they were marked.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Wishlist {
    ids: Vec<ProductId>,
}

impl Wishlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the id if absent, remove it if present. Returns true when the id
    /// is wishlisted afterwards.
    pub fn toggle(&mut self, id: ProductId) -> bool {
        if let Some(index) = self.ids.iter().position(|i| *i == id) {
            self.ids.remove(index);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
