// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Tally", "tally"));

/// Fixed keys of the settings table.
pub mod keys {
    pub const TRANSACTIONS: &str = "transactions";
    pub const BUDGETS: &str = "budgets";
    pub const THEME: &str = "theme";
    pub const USER: &str = "user";
    pub const CART: &str = "cart";
    pub const ORDERS: &str = "orders";
    pub const BOOKINGS: &str = "bookings";
    pub const DISCOUNTS: &str = "discounts";
    pub const ACTIVITY: &str = "activity";
    pub const CATALOG: &str = "catalog";
    pub const CATALOG_URL: &str = "catalog_url";
    pub const CURRENCY: &str = "currency";
    pub const LOG_CAPACITY: &str = "log_capacity";
}

/// Flat string key-value storage. Values are JSON documents.
pub trait KvStore {
    fn get(&self, key: &str) -> crate::error::Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> crate::error::Result<()>;
}

pub struct SqliteKv {
    conn: Connection,
}

impl SqliteKv {
    pub fn new(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(SqliteKv { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::new(Connection::open_in_memory()?)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl KvStore for SqliteKv {
    fn get(&self, key: &str) -> crate::error::Result<Option<String>> {
        let v = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key=?1",
                params![key],
                |r| r.get(0),
            )
            .optional()?;
        Ok(v)
    }

    fn set(&self, key: &str, value: &str) -> crate::error::Result<()> {
        self.conn.execute(
            "INSERT INTO settings(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Process-local store, used by tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryKv {
    map: RefCell<HashMap<String, String>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> crate::error::Result<Option<String>> {
        Ok(self.map.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> crate::error::Result<()> {
        self.map
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("tally.sqlite"))
}

/// Opens the database at `path_override`, or the platform default.
pub fn open_or_init(path_override: Option<&Path>) -> Result<(SqliteKv, PathBuf)> {
    let path = match path_override {
        Some(p) => {
            if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            p.to_path_buf()
        }
        None => db_path()?,
    };
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    tracing::debug!(path = %path.display(), "opened database");
    Ok((SqliteKv::new(conn)?, path))
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
    "#,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_kv_upserts() {
        let kv = SqliteKv::open_in_memory().unwrap();
        assert_eq!(kv.get("theme").unwrap(), None);
        kv.set("theme", "\"light\"").unwrap();
        kv.set("theme", "\"dark\"").unwrap();
        assert_eq!(kv.get("theme").unwrap().as_deref(), Some("\"dark\""));
    }

    #[test]
    fn open_or_init_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("t.sqlite");
        let (kv, opened) = open_or_init(Some(path.as_path())).unwrap();
        kv.set("currency", "\"EUR\"").unwrap();
        assert_eq!(opened, path);
        assert!(path.exists());
    }
}
