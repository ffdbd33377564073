// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Pawledger", "pawledger"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("pawledger.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id TEXT PRIMARY KEY,
        account_id TEXT,
        date TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        amount TEXT NOT NULL DEFAULT '0',
        type TEXT NOT NULL DEFAULT 'INCOME',
        category TEXT NOT NULL,
        payment_method TEXT NOT NULL DEFAULT 'pix',
        card_kind TEXT,
        client_name TEXT,
        staff_name TEXT,
        pet_name TEXT,
        recurrence TEXT NOT NULL DEFAULT 'none',
        recurrence_id TEXT,
        notes TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
    CREATE INDEX IF NOT EXISTS idx_transactions_account ON transactions(account_id);

    CREATE TABLE IF NOT EXISTS inventory_items(
        id TEXT PRIMARY KEY,
        account_id TEXT,
        name TEXT NOT NULL,
        quantity INTEGER NOT NULL DEFAULT 0,
        min_quantity INTEGER NOT NULL DEFAULT 0,
        price TEXT NOT NULL DEFAULT '0'
    );

    -- no FK on item_id: history outlives items and survives restores
    CREATE TABLE IF NOT EXISTS inventory_movements(
        id TEXT PRIMARY KEY,
        item_id TEXT NOT NULL,
        account_id TEXT,
        at TEXT NOT NULL,
        kind TEXT NOT NULL CHECK(kind IN ('in','out','adjust')),
        quantity INTEGER NOT NULL DEFAULT 0,
        note TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_movements_item ON inventory_movements(item_id);

    CREATE TABLE IF NOT EXISTS clients(
        id TEXT PRIMARY KEY,
        account_id TEXT,
        name TEXT NOT NULL,
        phone TEXT,
        email TEXT,
        notes TEXT,
        created_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS backups(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        account_id TEXT,
        created_at TEXT NOT NULL,
        payload TEXT NOT NULL
    );
    "#,
    )?;
    Ok(())
}
