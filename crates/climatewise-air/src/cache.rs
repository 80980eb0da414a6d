//! Per-product legend cache.
//!
//! Legends change only when the backend's palette does, so they live
//! for the process. The cache is an explicit object owned by the
//! repository instance, refreshed only on `force_refresh` and cleared
//! by `invalidate`; there is no ambient singleton.

use std::collections::HashMap;

use crate::types::Legend;

#[derive(Debug, Default)]
pub struct LegendCache {
    entries: HashMap<String, Legend>,
}

impl LegendCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, product: &str) -> Option<&Legend> {
        self.entries.get(product)
    }

    pub fn insert(&mut self, legend: Legend) {
        self.entries.insert(legend.product.clone(), legend);
    }

    /// Drops one product's entry, or everything when `product` is None.
    pub fn invalidate(&mut self, product: Option<&str>) {
        match product {
            Some(p) => {
                self.entries.remove(p);
            }
            None => self.entries.clear(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
