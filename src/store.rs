// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Ordered line-item store backing the cart.
//!
//! Entries are unique by `id` and never held with a zero quantity. All
//! operations are permissive: bad quantities and unknown ids are ignored
//! rather than reported.

use crate::models::{LineItem, amount_in_range};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct LineItemStore {
    items: Vec<LineItem>,
}

impl From<Vec<LineItem>> for LineItemStore {
    fn from(items: Vec<LineItem>) -> Self {
        Self::from_items(items)
    }
}

impl From<LineItemStore> for Vec<LineItem> {
    fn from(store: LineItemStore) -> Self {
        store.items
    }
}

impl LineItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from persisted entries, merging duplicate ids and
    /// dropping zero-quantity rows and rows priced out of range.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let mut store = Self::new();
        for item in items {
            if !amount_in_range(&item.unit_price) {
                tracing::warn!(id = %item.id, price = %item.unit_price, "dropping stored cart row");
                continue;
            }
            let qty = i64::from(item.quantity);
            store.add(item, qty);
        }
        store
    }

    /// Adds `quantity` units of `item`. Returns false (and does nothing) when
    /// `quantity <= 0`.
    pub fn add(&mut self, item: LineItem, quantity: i64) -> bool {
        if quantity <= 0 {
            return false;
        }
        let qty = clamp_qty(quantity);
        if let Some(existing) = self.items.iter_mut().find(|e| e.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(qty);
        } else {
            self.items.push(LineItem {
                quantity: qty,
                ..item
            });
        }
        true
    }

    /// Replaces the quantity of `id`, removing the entry when `quantity <= 0`.
    /// Unknown ids are a no-op.
    pub fn set_quantity(&mut self, id: &str, quantity: i64) -> bool {
        let Some(pos) = self.items.iter().position(|e| e.id == id) else {
            return false;
        };
        if quantity <= 0 {
            self.items.remove(pos);
        } else {
            self.items[pos].quantity = clamp_qty(quantity);
        }
        true
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn snapshot_and_clear(&mut self) -> Vec<LineItem> {
        std::mem::take(&mut self.items)
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|e| u64::from(e.quantity)).sum()
    }
}

fn clamp_qty(q: i64) -> u32 {
    u32::try_from(q).unwrap_or(u32::MAX)
}
