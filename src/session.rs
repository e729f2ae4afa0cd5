// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Application state and the only entry points that mutate it.
//!
//! Every key is read once in [`Session::load`]. Each mutating method updates
//! memory first and then writes the touched keys back; a failed write is
//! logged and otherwise ignored, so the in-memory state stays authoritative
//! for the rest of the run.

use crate::activity::ActivityLog;
use crate::aggregate::{self, DiscountTable};
use crate::catalog;
use crate::db::{KvStore, keys};
use crate::error::{Result, TallyError};
use crate::ids::{IdSource, Sequence};
use crate::models::{
    self, Booking, BookingStatus, LineItem, Order, OrderStatus, Product, Profile, Shipping, Theme,
    Transaction, TxKind,
};
use crate::store::LineItemStore;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::str::FromStr;

pub type Clock = fn() -> DateTime<Utc>;

/// Raw, unvalidated ledger input as typed by the user.
#[derive(Debug, Clone)]
pub struct NewTransaction<'a> {
    pub amount: &'a str,
    pub kind: TxKind,
    pub category: &'a str,
    pub date: Option<&'a str>,
    pub note: Option<&'a str>,
}

pub struct Session<K: KvStore> {
    kv: K,
    ids: Box<dyn IdSource>,
    clock: Clock,
    cart: LineItemStore,
    orders: Vec<Order>,
    transactions: Vec<Transaction>,
    budgets: BTreeMap<String, Decimal>,
    bookings: Vec<Booking>,
    discounts: DiscountTable,
    activity: ActivityLog,
    catalog: Vec<Product>,
    profile: Profile,
    theme: Theme,
    catalog_url: String,
    currency: String,
}

impl<K: KvStore> Session<K> {
    /// Loads state and seeds the id sequence past every stored id.
    pub fn load(kv: K) -> Self {
        let mut session = Self::load_with_ids(kv, Box::new(Sequence::new()));
        let seq = {
            let ids = session
                .orders
                .iter()
                .map(|o| o.id.as_str())
                .chain(session.transactions.iter().map(|t| t.id.as_str()))
                .chain(session.bookings.iter().map(|b| b.id.as_str()));
            Sequence::after(ids)
        };
        session.ids = Box::new(seq);
        session
    }

    pub fn load_with_ids(kv: K, ids: Box<dyn IdSource>) -> Self {
        let mut activity: ActivityLog = read(&kv, keys::ACTIVITY).unwrap_or_default();
        if let Some(cap) = read::<usize>(&kv, keys::LOG_CAPACITY) {
            activity.set_capacity(cap);
        }
        let session = Session {
            cart: read(&kv, keys::CART).unwrap_or_default(),
            orders: read(&kv, keys::ORDERS).unwrap_or_default(),
            transactions: read(&kv, keys::TRANSACTIONS).unwrap_or_default(),
            budgets: read(&kv, keys::BUDGETS).unwrap_or_default(),
            bookings: read(&kv, keys::BOOKINGS).unwrap_or_default(),
            discounts: read(&kv, keys::DISCOUNTS).unwrap_or_else(aggregate::default_discounts),
            catalog: read(&kv, keys::CATALOG)
                .map(catalog::sanitize)
                .unwrap_or_else(catalog::builtin_products),
            profile: read(&kv, keys::USER).unwrap_or_default(),
            theme: read(&kv, keys::THEME).unwrap_or_default(),
            catalog_url: read(&kv, keys::CATALOG_URL)
                .unwrap_or_else(|| catalog::DEFAULT_CATALOG_URL.to_string()),
            currency: read(&kv, keys::CURRENCY).unwrap_or_else(|| "USD".to_string()),
            activity,
            kv,
            ids,
            clock: Utc::now,
        };
        tracing::debug!(
            cart = session.cart.len(),
            orders = session.orders.len(),
            transactions = session.transactions.len(),
            "session loaded"
        );
        session
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(s) => s,
            Err(err) => {
                tracing::warn!(key, %err, "could not encode value, not saved");
                return;
            }
        };
        if let Err(err) = self.kv.set(key, &raw) {
            tracing::warn!(key, %err, "storage write failed, keeping in-memory state");
        }
    }

    fn note(&mut self, message: String) {
        tracing::info!("{}", message);
        let now = self.now();
        self.activity.push(now, message);
        self.write(keys::ACTIVITY, &self.activity);
    }

    // ---- cart ----

    pub fn cart(&self) -> &LineItemStore {
        &self.cart
    }

    pub fn cart_total(&self) -> Decimal {
        aggregate::grand_total(self.cart.items())
    }

    /// Returns false without touching the cart for a non-positive quantity
    /// or a product priced out of range.
    pub fn add_to_cart(&mut self, product: &Product, quantity: i64) -> bool {
        if !models::amount_in_range(&product.price) {
            tracing::warn!(id = %product.id, price = %product.price, "refusing out-of-range price");
            return false;
        }
        let item = LineItem::from_product(product, self.today());
        if !self.cart.add(item, quantity) {
            tracing::debug!(id = %product.id, quantity, "ignored non-positive add");
            return false;
        }
        self.write(keys::CART, &self.cart);
        self.note(format!("Added {} x {} to cart", quantity, product.title));
        true
    }

    pub fn set_cart_quantity(&mut self, id: &str, quantity: i64) -> bool {
        if !self.cart.set_quantity(id, quantity) {
            return false;
        }
        self.write(keys::CART, &self.cart);
        if quantity <= 0 {
            self.note(format!("Removed {} from cart", id));
        } else {
            self.note(format!("Set {} quantity to {}", id, quantity));
        }
        true
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.write(keys::CART, &self.cart);
        self.note("Cleared cart".to_string());
    }

    /// Moves the whole cart into a new order. Rejects a blank address or an
    /// empty cart without touching anything.
    pub fn checkout(&mut self, shipping: Shipping, payment_method: &str) -> Result<Order> {
        if shipping.address.trim().is_empty() {
            return Err(TallyError::invalid("Please enter a delivery address"));
        }
        if self.cart.is_empty() {
            return Err(TallyError::EmptyCart);
        }
        let items = self.cart.snapshot_and_clear();
        let order = Order {
            id: self.ids.next_id("ord"),
            total: aggregate::grand_total(&items),
            items,
            placed_at: self.now(),
            shipping: Shipping {
                address: shipping.address.trim().to_string(),
                method: shipping.method,
            },
            payment_method: payment_method.to_string(),
            status: OrderStatus::Pending,
        };
        self.orders.push(order.clone());
        self.write(keys::CART, &self.cart);
        self.write(keys::ORDERS, &self.orders);
        self.note(format!("Placed order {} ({})", order.id, order.total.round_dp(2)));
        Ok(order)
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    // ---- ledger ----

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn add_transaction(&mut self, input: NewTransaction<'_>) -> Result<Transaction> {
        let amount = Decimal::from_str(input.amount.trim())
            .map_err(|_| TallyError::invalid("Please enter a valid amount"))?;
        if amount.is_sign_negative() {
            return Err(TallyError::invalid("Amount must not be negative"));
        }
        if amount > models::max_amount() {
            return Err(TallyError::invalid(format!(
                "Amount must not exceed {}",
                models::max_amount()
            )));
        }
        let category = input.category.trim();
        if category.is_empty() {
            return Err(TallyError::invalid("Category is required"));
        }
        let date = match input.date.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                TallyError::invalid(format!("Invalid date '{}', expected YYYY-MM-DD", raw))
            })?,
            None => self.today(),
        };
        let tx = Transaction {
            id: self.ids.next_id("tx"),
            amount,
            kind: input.kind,
            category: category.to_string(),
            date,
            note: input
                .note
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        };
        self.transactions.insert(0, tx.clone());
        self.write(keys::TRANSACTIONS, &self.transactions);
        self.note(format!("Recorded {} {} ({})", tx.kind, tx.amount, tx.category));
        Ok(tx)
    }

    // ---- budgets ----

    pub fn budgets(&self) -> &BTreeMap<String, Decimal> {
        &self.budgets
    }

    pub fn set_budget(&mut self, category: &str, limit: &str) -> Result<()> {
        let category = category.trim();
        let limit = match Decimal::from_str(limit.trim()) {
            Ok(v) if !category.is_empty() => v,
            _ => return Err(TallyError::invalid("Please enter a valid category and limit")),
        };
        if !models::amount_in_range(&limit) {
            return Err(TallyError::invalid(format!(
                "Budget limit must be between 0 and {}",
                models::max_amount()
            )));
        }
        self.budgets.insert(category.to_string(), limit);
        self.write(keys::BUDGETS, &self.budgets);
        self.note(format!("Budget for {} set to {}", category, limit));
        Ok(())
    }

    pub fn remove_budget(&mut self, category: &str) -> bool {
        let category = category.trim();
        if self.budgets.remove(category).is_none() {
            return false;
        }
        self.write(keys::BUDGETS, &self.budgets);
        self.note(format!("Budget for {} removed", category));
        true
    }

    // ---- bookings ----

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn book(&mut self, event_id: &str, quantity: i64, code: Option<&str>) -> Result<Booking> {
        let event = catalog::find_event(event_id).ok_or_else(|| {
            TallyError::not_found(format!(
                "Booking item '{}' not found. Please go back and try again.",
                event_id.trim()
            ))
        })?;
        if quantity < 1 {
            return Err(TallyError::invalid("Quantity must be at least 1"));
        }
        let quantity = u32::try_from(quantity)
            .map_err(|_| TallyError::invalid("Quantity is too large"))?;
        let subtotal = event.price.saturating_mul(Decimal::from(quantity));
        let code = code.map(str::trim).filter(|c| !c.is_empty());
        let total = match code {
            Some(c) => aggregate::apply_discount(subtotal, c, &self.discounts),
            None => subtotal,
        };
        let booking = Booking {
            id: self.ids.next_id("bk"),
            event_id: event.id,
            title: event.title,
            quantity,
            unit_price: event.price,
            subtotal,
            discount_code: code.filter(|c| self.discounts.contains_key(*c)).map(str::to_string),
            discount: subtotal - total,
            total,
            status: BookingStatus::Upcoming,
            booked_at: self.now(),
        };
        self.bookings.insert(0, booking.clone());
        self.write(keys::BOOKINGS, &self.bookings);
        self.note(format!(
            "Booked {} x {} for {}",
            booking.quantity,
            booking.title,
            booking.total.round_dp(2)
        ));
        Ok(booking)
    }

    // ---- discounts ----

    pub fn discounts(&self) -> &DiscountTable {
        &self.discounts
    }

    pub fn set_discount(&mut self, code: &str, rate: &str) -> Result<()> {
        let code = code.trim();
        if code.is_empty() {
            return Err(TallyError::invalid("Discount code is required"));
        }
        let rate = Decimal::from_str(rate.trim())
            .map_err(|_| TallyError::invalid(format!("Invalid rate '{}'", rate.trim())))?;
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(TallyError::invalid("Rate must be between 0 and 1"));
        }
        self.discounts.insert(code.to_string(), rate);
        self.write(keys::DISCOUNTS, &self.discounts);
        self.note(format!("Discount {} set to {}", code, rate));
        Ok(())
    }

    pub fn remove_discount(&mut self, code: &str) -> bool {
        if self.discounts.remove(code.trim()).is_none() {
            return false;
        }
        self.write(keys::DISCOUNTS, &self.discounts);
        self.note(format!("Discount {} removed", code.trim()));
        true
    }

    // ---- catalog ----

    pub fn products(&self) -> &[Product] {
        &self.catalog
    }

    pub fn cache_catalog(&mut self, products: Vec<Product>) {
        self.catalog = catalog::sanitize(products);
        self.write(keys::CATALOG, &self.catalog);
        self.note(format!("Cached {} catalog products", self.catalog.len()));
    }

    pub fn catalog_url(&self) -> &str {
        &self.catalog_url
    }

    pub fn set_catalog_url(&mut self, url: &str) -> Result<()> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(TallyError::invalid(format!("Invalid catalog URL '{}'", url)));
        }
        self.catalog_url = url.to_string();
        self.write(keys::CATALOG_URL, &self.catalog_url);
        Ok(())
    }

    // ---- profile and settings ----

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn update_profile(&mut self, name: Option<&str>, email: Option<&str>) -> Result<Profile> {
        let mut next = self.profile.clone();
        if let Some(n) = name {
            let n = n.trim();
            if n.is_empty() {
                return Err(TallyError::invalid("Name must not be empty"));
            }
            next.name = n.to_string();
        }
        if let Some(e) = email {
            let e = e.trim();
            if e.is_empty() {
                return Err(TallyError::invalid("Email must not be empty"));
            }
            next.email = e.to_string();
        }
        self.profile = next.clone();
        self.write(keys::USER, &self.profile);
        self.note("Profile updated".to_string());
        Ok(next)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.write(keys::THEME, &self.theme);
        self.theme
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn set_currency(&mut self, code: &str) -> Result<()> {
        let code = code.trim().to_uppercase();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(TallyError::invalid(format!(
                "Invalid currency '{}', expected a 3-letter code",
                code
            )));
        }
        self.currency = code;
        self.write(keys::CURRENCY, &self.currency);
        Ok(())
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn set_log_capacity(&mut self, capacity: usize) {
        self.activity.set_capacity(capacity);
        self.write(keys::LOG_CAPACITY, &self.activity.capacity());
        self.write(keys::ACTIVITY, &self.activity);
    }
}

/// Missing keys and unreadable values both fall back to the default.
fn read<T: DeserializeOwned>(kv: &impl KvStore, key: &str) -> Option<T> {
    match kv.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(v) => Some(v),
            Err(err) => {
                tracing::warn!(key, %err, "ignoring unreadable stored value");
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            tracing::warn!(key, %err, "storage read failed");
            None
        }
    }
}
