// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::LedgerError;
use crate::models::{
    apply_movement, Client, InventoryItem, InventoryMovement, MovementKind, RawClient,
    RawTransaction, Transaction,
};
use crate::normalize;
use crate::utils::{now_stamp, parse_decimal};
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::json;

/// Movement history keeps only this many entries per scope.
pub const MOVEMENT_HISTORY_CAP: i64 = 200;
/// Rolling backup snapshots kept per scope.
pub const BACKUP_CAP: i64 = 10;

// All queries are scoped with `account_id IS ?`, so the no-account local
// ledger is just the NULL scope.

pub fn list_transactions(conn: &Connection, account: Option<&str>) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, account_id, date, description, amount, type, category, payment_method,
                card_kind, client_name, staff_name, pet_name, recurrence, recurrence_id, notes
         FROM transactions WHERE account_id IS ?1 ORDER BY date DESC, rowid DESC",
    )?;
    let today = chrono::Utc::now().date_naive();
    let rows = stmt.query_map(params![account], |r| {
        Ok(RawTransaction {
            id: r.get(0)?,
            account_id: r.get(1)?,
            date: r.get(2)?,
            description: r.get(3)?,
            amount: r.get::<_, Option<String>>(4)?.map(serde_json::Value::String),
            kind: r.get(5)?,
            category: r.get(6)?,
            payment_method: r.get(7)?,
            card_kind: r.get(8)?,
            client_name: r.get(9)?,
            staff_name: r.get(10)?,
            pet_name: r.get(11)?,
            recurrence: r.get(12)?,
            recurrence_id: r.get(13)?,
            notes: r.get(14)?,
        })
    })?;
    // Rows written by older versions (or foreign dumps) come out canonical.
    let mut data = Vec::new();
    for raw in rows {
        data.push(normalize::transaction(raw?, today));
    }
    Ok(data)
}

pub fn insert_transaction(conn: &Connection, t: &Transaction) -> Result<()> {
    conn.execute(
        "INSERT INTO transactions(id, account_id, date, description, amount, type, category,
             payment_method, card_kind, client_name, staff_name, pet_name, recurrence,
             recurrence_id, notes)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15)",
        params![
            t.id,
            t.account_id,
            t.date.to_string(),
            t.description,
            t.amount.to_string(),
            t.kind.as_str(),
            t.category.as_str(),
            t.payment_method.as_str(),
            t.card_kind.map(|c| c.as_str()),
            t.client_name,
            t.staff_name,
            t.pet_name,
            t.recurrence.as_str(),
            t.recurrence_id,
            t.notes
        ],
    )?;
    Ok(())
}

pub fn upsert_transactions(conn: &Connection, txs: &[Transaction]) -> Result<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO transactions(id, account_id, date, description, amount, type, category,
             payment_method, card_kind, client_name, staff_name, pet_name, recurrence,
             recurrence_id, notes)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15)
         ON CONFLICT(id) DO UPDATE SET
             account_id=excluded.account_id, date=excluded.date,
             description=excluded.description, amount=excluded.amount,
             type=excluded.type, category=excluded.category,
             payment_method=excluded.payment_method, card_kind=excluded.card_kind,
             client_name=excluded.client_name, staff_name=excluded.staff_name,
             pet_name=excluded.pet_name, recurrence=excluded.recurrence,
             recurrence_id=excluded.recurrence_id, notes=excluded.notes",
    )?;
    for t in txs {
        stmt.execute(params![
            t.id,
            t.account_id,
            t.date.to_string(),
            t.description,
            t.amount.to_string(),
            t.kind.as_str(),
            t.category.as_str(),
            t.payment_method.as_str(),
            t.card_kind.map(|c| c.as_str()),
            t.client_name,
            t.staff_name,
            t.pet_name,
            t.recurrence.as_str(),
            t.recurrence_id,
            t.notes
        ])?;
    }
    Ok(())
}

pub fn delete_transaction(conn: &Connection, account: Option<&str>, id: &str) -> Result<bool> {
    let n = conn.execute(
        "DELETE FROM transactions WHERE account_id IS ?1 AND id=?2",
        params![account, id],
    )?;
    Ok(n > 0)
}

pub fn delete_transactions(conn: &Connection, account: Option<&str>, ids: &[String]) -> Result<usize> {
    let mut n = 0;
    for id in ids {
        if delete_transaction(conn, account, id)? {
            n += 1;
        }
    }
    Ok(n)
}

pub fn clear_transactions(conn: &Connection, account: Option<&str>) -> Result<()> {
    conn.execute(
        "DELETE FROM transactions WHERE account_id IS ?1",
        params![account],
    )?;
    Ok(())
}

pub fn list_items(conn: &Connection, account: Option<&str>) -> Result<Vec<InventoryItem>> {
    let mut stmt = conn.prepare(
        "SELECT id, account_id, name, quantity, min_quantity, price
         FROM inventory_items WHERE account_id IS ?1 ORDER BY name",
    )?;
    let rows = stmt.query_map(params![account], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, Option<String>>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, i64>(3)?,
            r.get::<_, i64>(4)?,
            r.get::<_, String>(5)?,
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        let (id, account_id, name, quantity, min_quantity, price_s) = row?;
        data.push(InventoryItem {
            id,
            account_id,
            name,
            quantity: quantity.max(0),
            min_quantity,
            price: parse_decimal(&price_s).unwrap_or_default(),
        });
    }
    Ok(data)
}

pub fn get_item(conn: &Connection, account: Option<&str>, id: &str) -> Result<Option<InventoryItem>> {
    let row = conn
        .query_row(
            "SELECT id, account_id, name, quantity, min_quantity, price
             FROM inventory_items WHERE account_id IS ?1 AND id=?2",
            params![account, id],
            |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, Option<String>>(1)?,
                    r.get::<_, String>(2)?,
                    r.get::<_, i64>(3)?,
                    r.get::<_, i64>(4)?,
                    r.get::<_, String>(5)?,
                ))
            },
        )
        .optional()?;
    Ok(row.map(|(id, account_id, name, quantity, min_quantity, price_s)| InventoryItem {
        id,
        account_id,
        name,
        quantity: quantity.max(0),
        min_quantity,
        price: parse_decimal(&price_s).unwrap_or_default(),
    }))
}

pub fn insert_item(conn: &Connection, item: &InventoryItem) -> Result<()> {
    conn.execute(
        "INSERT INTO inventory_items(id, account_id, name, quantity, min_quantity, price)
         VALUES (?1,?2,?3,?4,?5,?6)",
        params![
            item.id,
            item.account_id,
            item.name,
            item.quantity.max(0),
            item.min_quantity,
            item.price.to_string()
        ],
    )?;
    Ok(())
}

pub fn upsert_items(conn: &Connection, items: &[InventoryItem]) -> Result<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO inventory_items(id, account_id, name, quantity, min_quantity, price)
         VALUES (?1,?2,?3,?4,?5,?6)
         ON CONFLICT(id) DO UPDATE SET
             account_id=excluded.account_id, name=excluded.name,
             quantity=excluded.quantity, min_quantity=excluded.min_quantity,
             price=excluded.price",
    )?;
    for item in items {
        stmt.execute(params![
            item.id,
            item.account_id,
            item.name,
            item.quantity.max(0),
            item.min_quantity,
            item.price.to_string()
        ])?;
    }
    Ok(())
}

pub fn delete_item(conn: &Connection, account: Option<&str>, id: &str) -> Result<bool> {
    let n = conn.execute(
        "DELETE FROM inventory_items WHERE account_id IS ?1 AND id=?2",
        params![account, id],
    )?;
    Ok(n > 0)
}

pub fn clear_items(conn: &Connection, account: Option<&str>) -> Result<()> {
    conn.execute(
        "DELETE FROM inventory_items WHERE account_id IS ?1",
        params![account],
    )?;
    Ok(())
}

/// Apply a movement to its item (clamped at zero), record it, and trim the
/// history. Returns the item's new quantity.
pub fn record_movement(
    conn: &Connection,
    account: Option<&str>,
    item_id: &str,
    kind: MovementKind,
    quantity: i64,
    note: Option<String>,
) -> Result<i64> {
    let item = get_item(conn, account, item_id)?
        .with_context(|| format!("Item '{}' not found", item_id))?;
    let next = apply_movement(item.quantity, kind, quantity);
    conn.execute(
        "UPDATE inventory_items SET quantity=?1 WHERE account_id IS ?2 AND id=?3",
        params![next, account, item_id],
    )?;
    conn.execute(
        "INSERT INTO inventory_movements(id, item_id, account_id, at, kind, quantity, note)
         VALUES (?1,?2,?3,?4,?5,?6,?7)",
        params![
            normalize::fresh_id(),
            item_id,
            account,
            now_stamp(),
            kind.as_str(),
            quantity.max(0),
            note
        ],
    )?;
    // Maintenance, not part of the user action: a failed trim is logged
    // and absorbed.
    if let Err(e) = trim_movements(conn, account) {
        log::warn!("movement history trim failed: {e:#}");
    }
    Ok(next)
}

fn trim_movements(conn: &Connection, account: Option<&str>) -> Result<()> {
    conn.execute(
        "DELETE FROM inventory_movements WHERE account_id IS ?1 AND id NOT IN (
             SELECT id FROM inventory_movements WHERE account_id IS ?1
             ORDER BY at DESC, rowid DESC LIMIT ?2)",
        params![account, MOVEMENT_HISTORY_CAP],
    )?;
    Ok(())
}

pub fn list_movements(
    conn: &Connection,
    account: Option<&str>,
    item_id: Option<&str>,
) -> Result<Vec<InventoryMovement>> {
    let mut stmt = conn.prepare(
        "SELECT id, item_id, account_id, at, kind, quantity, note
         FROM inventory_movements
         WHERE account_id IS ?1 AND (?2 IS NULL OR item_id=?2)
         ORDER BY at DESC, rowid DESC",
    )?;
    let rows = stmt.query_map(params![account, item_id], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, Option<String>>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, i64>(5)?,
            r.get::<_, Option<String>>(6)?,
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        let (id, item_id, account_id, at, kind_s, quantity, note) = row?;
        let kind = MovementKind::parse(&kind_s).unwrap_or(MovementKind::Adjust);
        data.push(InventoryMovement {
            id,
            item_id,
            account_id,
            at,
            kind,
            quantity,
            note,
        });
    }
    Ok(data)
}

pub fn list_clients(conn: &Connection, account: Option<&str>) -> Result<Vec<Client>> {
    let mut stmt = conn.prepare(
        "SELECT id, account_id, name, phone, email, notes, created_at
         FROM clients WHERE account_id IS ?1 ORDER BY created_at DESC, rowid DESC",
    )?;
    let now = now_stamp();
    let rows = stmt.query_map(params![account], |r| {
        Ok(RawClient {
            id: r.get(0)?,
            account_id: r.get(1)?,
            name: r.get(2)?,
            phone: r.get(3)?,
            email: r.get(4)?,
            notes: r.get(5)?,
            created_at: r.get(6)?,
        })
    })?;
    let mut data = Vec::new();
    for raw in rows {
        data.push(normalize::client(raw?, &now));
    }
    Ok(data)
}

pub fn insert_client(conn: &Connection, c: &Client) -> Result<()> {
    conn.execute(
        "INSERT INTO clients(id, account_id, name, phone, email, notes, created_at)
         VALUES (?1,?2,?3,?4,?5,?6,?7)",
        params![c.id, c.account_id, c.name, c.phone, c.email, c.notes, c.created_at],
    )?;
    Ok(())
}

pub fn delete_client(conn: &Connection, account: Option<&str>, id: &str) -> Result<bool> {
    let n = conn.execute(
        "DELETE FROM clients WHERE account_id IS ?1 AND id=?2",
        params![account, id],
    )?;
    Ok(n > 0)
}

/// Timestamped full copy of transactions + inventory; at most `BACKUP_CAP`
/// snapshots are kept, newest first.
pub fn create_backup(conn: &Connection, account: Option<&str>) -> Result<i64> {
    let txs = list_transactions(conn, account)?;
    let items = list_items(conn, account)?;
    let created_at = now_stamp();
    let payload = json!({
        "created_at": created_at,
        "transactions": txs,
        "inventory": items,
    });
    conn.execute(
        "INSERT INTO backups(account_id, created_at, payload) VALUES (?1,?2,?3)",
        params![account, created_at, serde_json::to_string(&payload)?],
    )?;
    let id = conn.last_insert_rowid();
    if let Err(e) = rotate_backups(conn, account) {
        log::warn!("backup rotation failed: {e:#}");
    }
    Ok(id)
}

fn rotate_backups(conn: &Connection, account: Option<&str>) -> Result<()> {
    conn.execute(
        "DELETE FROM backups WHERE account_id IS ?1 AND id NOT IN (
             SELECT id FROM backups WHERE account_id IS ?1 ORDER BY id DESC LIMIT ?2)",
        params![account, BACKUP_CAP],
    )?;
    Ok(())
}

pub fn list_backups(conn: &Connection, account: Option<&str>) -> Result<Vec<(i64, String)>> {
    let mut stmt = conn.prepare(
        "SELECT id, created_at FROM backups WHERE account_id IS ?1 ORDER BY id DESC",
    )?;
    let rows = stmt.query_map(params![account], |r| {
        Ok((r.get::<_, i64>(0)?, r.get::<_, String>(1)?))
    })?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}

pub fn load_backup(conn: &Connection, account: Option<&str>, id: i64) -> Result<String> {
    let payload: Option<String> = conn
        .query_row(
            "SELECT payload FROM backups WHERE account_id IS ?1 AND id=?2",
            params![account, id],
            |r| r.get(0),
        )
        .optional()?;
    payload.ok_or_else(|| LedgerError::BackupNotFound(id).into())
}
