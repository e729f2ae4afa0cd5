// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Largest amount accepted from user input or a fetched catalog.
pub fn max_amount() -> Decimal {
    Decimal::from(1_000_000_000_000_i64)
}

/// Non-negative and no larger than [`max_amount`].
pub fn amount_in_range(amount: &Decimal) -> bool {
    !amount.is_sign_negative() && *amount <= max_amount()
}

/// One priced, quantified entry in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub title: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub category: String,
    pub added_on: NaiveDate,
}

impl LineItem {
    pub fn from_product(product: &Product, added_on: NaiveDate) -> Self {
        LineItem {
            id: product.id.clone(),
            title: product.title.clone(),
            unit_price: product.price,
            quantity: 0,
            category: product.category.clone(),
            added_on,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    pub fn parse(s: &str) -> Option<TxKind> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Some(TxKind::Income),
            "expense" => Some(TxKind::Expense),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub amount: Decimal, // always >= 0, sign comes from kind
    pub kind: TxKind,
    pub category: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipping {
    pub address: String,
    pub method: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub items: Vec<LineItem>,
    pub total: Decimal,
    pub placed_at: DateTime<Utc>,
    pub shipping: Shipping,
    pub payment_method: String,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub event_id: String,
    pub title: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    pub discount_code: Option<String>,
    pub discount: Decimal,
    pub total: Decimal,
    pub status: BookingStatus,
    pub booked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    "general".to_string()
}

// Catalog APIs disagree on whether ids are numbers or strings.
fn string_or_number<'de, D>(de: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(u64),
    }
    Ok(match Raw::deserialize(de)? {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Movie,
    Event,
    Travel,
}

impl EventKind {
    /// `None` for anything other than movie, event or travel.
    pub fn parse(s: &str) -> Option<EventKind> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" => Some(EventKind::Movie),
            "event" => Some(EventKind::Event),
            "travel" => Some(EventKind::Travel),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub kind: EventKind,
    pub title: String,
    pub price: Decimal,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            name: "Guest".to_string(),
            email: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_accepts_numeric_and_string_ids() {
        let p: Product = serde_json::from_str(
            r#"{"id": 7, "title": "Backpack", "price": 109.95, "image": "x", "description": "d"}"#,
        )
        .unwrap();
        assert_eq!(p.id, "7");
        assert_eq!(p.category, "general");
        assert_eq!(p.price.to_string(), "109.95");

        let p: Product =
            serde_json::from_str(r#"{"id": "a1", "title": "Pen", "price": "2.50"}"#).unwrap();
        assert_eq!(p.id, "a1");
        assert!(p.image.is_empty());
    }

    #[test]
    fn tx_kind_parse_is_case_insensitive() {
        assert_eq!(TxKind::parse(" Income "), Some(TxKind::Income));
        assert_eq!(TxKind::parse("EXPENSE"), Some(TxKind::Expense));
        assert_eq!(TxKind::parse("transfer"), None);
    }

    #[test]
    fn event_kind_parse_ignores_case() {
        assert_eq!(EventKind::parse("Movie"), Some(EventKind::Movie));
        assert_eq!(EventKind::parse(" TRAVEL"), Some(EventKind::Travel));
        assert_eq!(EventKind::parse("all"), None);
    }

    #[test]
    fn amount_range_excludes_negatives_and_huge_values() {
        assert!(amount_in_range(&Decimal::ZERO));
        assert!(amount_in_range(&max_amount()));
        assert!(!amount_in_range(&Decimal::NEGATIVE_ONE));
        assert!(!amount_in_range(&(max_amount() + Decimal::ONE)));
        assert!(!amount_in_range(&Decimal::MAX));
    }

    #[test]
    fn theme_round_trips_as_lowercase_json() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
