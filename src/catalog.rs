// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Product catalog retrieval plus the built-in offline catalog and event list.

use crate::error::Result;
use crate::models::{Event, EventKind, Product, amount_in_range};
use rust_decimal::Decimal;

pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products";

/// Single GET, no retry. Any transport, status or decode failure surfaces as
/// `TallyError::Catalog`.
pub fn fetch(client: &reqwest::blocking::Client, url: &str) -> Result<Vec<Product>> {
    tracing::info!(%url, "fetching product catalog");
    let resp = client.get(url).send()?.error_for_status()?;
    let products: Vec<Product> = resp.json()?;
    tracing::debug!(count = products.len(), "catalog fetched");
    Ok(sanitize(products))
}

pub fn parse(body: &str) -> Result<Vec<Product>> {
    Ok(sanitize(serde_json::from_str(body)?))
}

/// Drops products whose price is negative or beyond the accepted range.
pub fn sanitize(products: Vec<Product>) -> Vec<Product> {
    products
        .into_iter()
        .filter(|p| {
            let ok = amount_in_range(&p.price);
            if !ok {
                tracing::warn!(id = %p.id, price = %p.price, "skipping product with invalid price");
            }
            ok
        })
        .collect()
}

/// Case-insensitive title match. A blank query matches everything.
pub fn search<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let q = query.trim().to_lowercase();
    products
        .iter()
        .filter(|p| q.is_empty() || p.title.to_lowercase().contains(&q))
        .collect()
}

/// Built-in events narrowed by title query and kind; `None` kind means all.
pub fn filter_events(query: &str, kind: Option<EventKind>) -> Vec<Event> {
    let q = query.trim().to_lowercase();
    builtin_events()
        .into_iter()
        .filter(|e| kind.is_none_or(|k| e.kind == k))
        .filter(|e| q.is_empty() || e.title.to_lowercase().contains(&q))
        .collect()
}

pub fn find<'a>(products: &'a [Product], id: &str) -> Option<&'a Product> {
    products.iter().find(|p| p.id == id)
}

pub fn builtin_products() -> Vec<Product> {
    [
        ("1", "Laptop", 999, "High-performance laptop"),
        ("2", "Phone", 499, "Latest smartphone"),
        ("3", "Headphones", 99, "Noise-canceling headphones"),
        ("4", "Watch", 199, "Smart fitness watch"),
        ("5", "Tablet", 349, "Portable tablet"),
        ("6", "Camera", 799, "Professional camera"),
        ("7", "Speaker", 149, "Bluetooth speaker"),
        ("8", "Monitor", 299, "4K monitor"),
        ("9", "Keyboard", 89, "Mechanical keyboard"),
        ("10", "Mouse", 49, "Wireless mouse"),
    ]
    .into_iter()
    .map(|(id, title, price, description)| Product {
        id: id.to_string(),
        title: title.to_string(),
        price: Decimal::from(price),
        image: String::new(),
        description: description.to_string(),
        category: "electronics".to_string(),
    })
    .collect()
}

pub fn builtin_events() -> Vec<Event> {
    [
        ("1", EventKind::Movie, "Neon Shadows", 15, "A cyberpunk thriller set in a futuristic city."),
        ("2", EventKind::Event, "Glow Fest", 40, "A vibrant night of lights and music."),
        ("3", EventKind::Travel, "Flight to Bali", 500, "A tropical escape to paradise."),
        ("4", EventKind::Movie, "Echoes of Time", 13, "A time-travel adventure with twists."),
        ("5", EventKind::Event, "Art Expo", 25, "Showcase of modern art and sculptures."),
        ("6", EventKind::Travel, "Train to Alps", 120, "Scenic journey through the mountains."),
    ]
    .into_iter()
    .map(|(id, kind, title, price, description)| Event {
        id: id.to_string(),
        kind,
        title: title.to_string(),
        price: Decimal::from(price),
        description: description.to_string(),
    })
    .collect()
}

pub fn find_event(id: &str) -> Option<Event> {
    builtin_events().into_iter().find(|e| e.id == id.trim())
}
