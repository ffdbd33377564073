// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, account: Option<&str>) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Movements pointing at items that no longer exist
    let mut stmt = conn.prepare(
        "SELECT m.id, m.item_id FROM inventory_movements m
         LEFT JOIN inventory_items i ON m.item_id=i.id
         WHERE m.account_id IS ?1 AND i.id IS NULL",
    )?;
    let mut cur = stmt.query(params![account])?;
    while let Some(r) = cur.next()? {
        let id: String = r.get(0)?;
        let item: String = r.get(1)?;
        rows.push(vec!["orphan_movement".into(), format!("{} -> {}", id, item)]);
    }

    // 2) Monthly rows without a recurrence id never materialize
    let mut stmt2 = conn.prepare(
        "SELECT id FROM transactions
         WHERE account_id IS ?1 AND recurrence='monthly'
           AND (recurrence_id IS NULL OR recurrence_id='')",
    )?;
    let mut cur2 = stmt2.query(params![account])?;
    while let Some(r) = cur2.next()? {
        let id: String = r.get(0)?;
        rows.push(vec!["recurring_without_id".into(), id]);
    }

    // 3) Items at or below their reorder threshold
    let mut stmt3 = conn.prepare(
        "SELECT name, quantity, min_quantity FROM inventory_items
         WHERE account_id IS ?1 AND quantity <= min_quantity ORDER BY name",
    )?;
    let mut cur3 = stmt3.query(params![account])?;
    while let Some(r) = cur3.next()? {
        let name: String = r.get(0)?;
        let qty: i64 = r.get(1)?;
        let min: i64 = r.get(2)?;
        rows.push(vec!["low_stock".into(), format!("{} ({}/{})", name, qty, min)]);
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
