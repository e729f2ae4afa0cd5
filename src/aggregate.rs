// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived totals over cart entries and ledger transactions.
//!
//! Everything here is a pure function of its input and is recomputed on every
//! query. Values are never rounded; presentation code rounds to two places.
//! Sums saturate at the `Decimal` range instead of overflowing.

use crate::models::{LineItem, Transaction, TxKind};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Anything carrying an amount, a category and a date.
pub trait Entry {
    fn amount(&self) -> Decimal;
    fn category(&self) -> &str;
    fn date(&self) -> NaiveDate;
}

impl Entry for LineItem {
    fn amount(&self) -> Decimal {
        line_total(self)
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn date(&self) -> NaiveDate {
        self.added_on
    }
}

impl Entry for Transaction {
    fn amount(&self) -> Decimal {
        self.amount
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

pub fn line_total(item: &LineItem) -> Decimal {
    item.unit_price
        .saturating_mul(Decimal::from(item.quantity))
}

pub fn grand_total<E: Entry>(items: &[E]) -> Decimal {
    items
        .iter()
        .map(Entry::amount)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

pub fn by_category<E: Entry>(items: &[E]) -> HashMap<String, Decimal> {
    by_category_where(items, |_| true)
}

pub fn by_category_where<E, P>(items: &[E], predicate: P) -> HashMap<String, Decimal>
where
    E: Entry,
    P: Fn(&E) -> bool,
{
    let mut out: HashMap<String, Decimal> = HashMap::new();
    for e in items.iter().filter(|e| predicate(e)) {
        let slot = out.entry(e.category().to_string()).or_insert(Decimal::ZERO);
        *slot = slot.saturating_add(e.amount());
    }
    out
}

/// Sums amounts per bucket key. Entries for which `bucket` returns `None`
/// are skipped.
pub fn by_period<E, F>(items: &[E], bucket: F) -> HashMap<String, Decimal>
where
    E: Entry,
    F: Fn(&E) -> Option<String>,
{
    let mut out: HashMap<String, Decimal> = HashMap::new();
    for e in items {
        if let Some(key) = bucket(e) {
            let slot = out.entry(key).or_insert(Decimal::ZERO);
            *slot = slot.saturating_add(e.amount());
        }
    }
    out
}

pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

pub fn sorted_periods(map: HashMap<String, Decimal>) -> Vec<(String, Decimal)> {
    let mut v: Vec<_> = map.into_iter().collect();
    v.sort_by(|a, b| a.0.cmp(&b.0));
    v
}

/// The last `n` periods, still ascending.
pub fn recent_periods(map: HashMap<String, Decimal>, n: usize) -> Vec<(String, Decimal)> {
    let v = sorted_periods(map);
    let skip = v.len().saturating_sub(n);
    v.into_iter().skip(skip).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub grand_total: Decimal,
    pub per_category: HashMap<String, Decimal>,
    pub per_period: HashMap<String, Decimal>,
}

pub fn aggregate<E, F>(items: &[E], bucket: F) -> AggregateResult
where
    E: Entry,
    F: Fn(&E) -> Option<String>,
{
    AggregateResult {
        grand_total: grand_total(items),
        per_category: by_category(items),
        per_period: by_period(items, bucket),
    }
}

/// Percentage discount codes, rate in `[0, 1]`.
pub type DiscountTable = BTreeMap<String, Decimal>;

pub fn default_discounts() -> DiscountTable {
    let mut t = DiscountTable::new();
    t.insert("TICKA20".to_string(), Decimal::new(20, 2));
    t
}

/// `total * (1 - rate)`; unknown codes leave the total untouched.
pub fn apply_discount(total: Decimal, code: &str, table: &DiscountTable) -> Decimal {
    let rate = table.get(code).copied().unwrap_or(Decimal::ZERO);
    total * (Decimal::ONE - rate)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LedgerSummary {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

pub fn summarize(transactions: &[Transaction]) -> LedgerSummary {
    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    for t in transactions {
        match t.kind {
            TxKind::Income => income = income.saturating_add(t.amount),
            TxKind::Expense => expenses = expenses.saturating_add(t.amount),
        }
    }
    LedgerSummary {
        income,
        expenses,
        balance: income.saturating_sub(expenses),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetLine {
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub over: bool,
}

/// Compares each budgeted category against its expense total, optionally
/// restricted to one `YYYY-MM` month. Sorted by category.
pub fn budget_status(
    budgets: &BTreeMap<String, Decimal>,
    transactions: &[Transaction],
    month: Option<&str>,
) -> Vec<BudgetLine> {
    let spent = by_category_where(transactions, |t| {
        t.kind == TxKind::Expense && month.is_none_or(|m| month_key(t.date) == m)
    });
    budgets
        .iter()
        .map(|(category, limit)| {
            let spent = spent.get(category).copied().unwrap_or(Decimal::ZERO);
            let remaining = limit.saturating_sub(spent);
            BudgetLine {
                category: category.clone(),
                limit: *limit,
                spent,
                remaining,
                over: remaining < Decimal::ZERO,
            }
        })
        .collect()
}
