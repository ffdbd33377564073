// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::LedgerError;
use crate::models::{InventoryItem, RawTransaction, Transaction};
use crate::normalize;
use crate::store;
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, account: Option<&str>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("dump", sub)) => restore_dump(conn, account, sub),
        _ => Ok(()),
    }
}

fn restore_dump(conn: &mut Connection, account: Option<&str>, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let text = std::fs::read_to_string(path).with_context(|| format!("Open dump {}", path))?;
    let payload: serde_json::Value =
        serde_json::from_str(&text).map_err(|_| LedgerError::MalformedDump)?;
    let (n_tx, n_items) = restore_payload(conn, account, &payload)?;
    println!(
        "Restored {} transaction(s) and {} item(s) from {}",
        n_tx, n_items, path
    );
    Ok(())
}

/// Replace the scope's transactions and inventory with a dump payload.
/// The structural check runs before any write, so a malformed payload has
/// no partial effect; all writes share one transaction.
pub fn restore_payload(
    conn: &mut Connection,
    account: Option<&str>,
    payload: &serde_json::Value,
) -> Result<(usize, usize)> {
    let Some(tx_values) = payload.get("transactions").and_then(|v| v.as_array()) else {
        return Err(LedgerError::MalformedDump.into());
    };

    let today = chrono::Utc::now().date_naive();
    let txs: Vec<Transaction> = tx_values
        .iter()
        .map(|v| {
            let raw: RawTransaction = serde_json::from_value(v.clone()).unwrap_or_default();
            let mut t = normalize::transaction(raw, today);
            t.account_id = account.map(str::to_string);
            t
        })
        .collect();

    let items: Vec<InventoryItem> = payload
        .get("inventory")
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| serde_json::from_value::<InventoryItem>(v.clone()).ok())
                .map(|mut i| {
                    i.account_id = account.map(str::to_string);
                    i.quantity = i.quantity.max(0);
                    i
                })
                .collect()
        })
        .unwrap_or_default();

    let tx = conn.transaction()?;
    store::clear_transactions(&tx, account)?;
    store::clear_items(&tx, account)?;
    store::upsert_transactions(&tx, &txs)?;
    store::upsert_items(&tx, &items)?;
    tx.commit()?;
    Ok((txs.len(), items.len()))
}
