// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{InventoryItem, MovementKind};
use crate::normalize;
use crate::store;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};
use anyhow::{anyhow, Context, Result};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, account: Option<&str>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, account, sub)?,
        Some(("list", sub)) => list(conn, account, sub)?,
        Some(("rm", sub)) => rm(conn, account, sub)?,
        Some(("move", sub)) => record_move(conn, account, sub)?,
        Some(("movements", sub)) => movements(conn, account, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_qty(s: &str) -> Result<i64> {
    s.trim()
        .parse::<i64>()
        .with_context(|| format!("Invalid quantity '{}'", s))
}

fn add(conn: &Connection, account: Option<&str>, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let quantity = parse_qty(sub.get_one::<String>("qty").unwrap())?.max(0);
    let min_quantity = parse_qty(sub.get_one::<String>("min").unwrap())?.max(0);
    let price = parse_decimal(sub.get_one::<String>("price").unwrap())?;
    let item = InventoryItem {
        id: normalize::fresh_id(),
        account_id: account.map(str::to_string),
        name: name.clone(),
        quantity,
        min_quantity,
        price,
    };
    store::insert_item(conn, &item)?;
    println!("Added item '{}' x{} (id: {})", item.name, item.quantity, item.id);
    Ok(())
}

#[derive(Serialize)]
struct ItemRow {
    id: String,
    name: String,
    quantity: i64,
    min_quantity: i64,
    price: String,
    low: bool,
}

fn list(conn: &Connection, account: Option<&str>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let items = store::list_items(conn, account)?;
    let data: Vec<ItemRow> = items
        .iter()
        .map(|i| ItemRow {
            id: i.id.clone(),
            name: i.name.clone(),
            quantity: i.quantity,
            min_quantity: i.min_quantity,
            price: i.price.to_string(),
            low: i.is_low(),
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|i| {
                vec![
                    i.name.clone(),
                    i.quantity.to_string(),
                    i.min_quantity.to_string(),
                    i.price.clone(),
                    if i.low { "LOW".into() } else { "OK".into() },
                    i.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Name", "Qty", "Min", "Price", "Status", "ID"], rows)
        );
    }
    Ok(())
}

fn rm(conn: &Connection, account: Option<&str>, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    if !store::delete_item(conn, account, id)? {
        return Err(anyhow!("Item '{}' not found", id));
    }
    println!("Removed item {}", id);
    Ok(())
}

fn record_move(conn: &Connection, account: Option<&str>, sub: &clap::ArgMatches) -> Result<()> {
    let item_id = sub.get_one::<String>("item").unwrap();
    let kind_arg = sub.get_one::<String>("kind").unwrap();
    let kind = MovementKind::parse(kind_arg)
        .ok_or_else(|| anyhow!("Unknown movement kind '{}' (in|out|adjust)", kind_arg))?;
    let qty = parse_qty(sub.get_one::<String>("qty").unwrap())?;
    let note = sub.get_one::<String>("note").cloned();
    let next = store::record_movement(conn, account, item_id, kind, qty, note)?;
    println!("Stock for {} now {}", item_id, next);
    Ok(())
}

#[derive(Serialize)]
struct MovementRow {
    at: String,
    item: String,
    kind: String,
    quantity: i64,
    note: String,
}

fn movements(conn: &Connection, account: Option<&str>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let item = sub.get_one::<String>("item").map(|s| s.as_str());
    let moves = store::list_movements(conn, account, item)?;
    let data: Vec<MovementRow> = moves
        .iter()
        .map(|mv| MovementRow {
            at: mv.at.clone(),
            item: mv.item_id.clone(),
            kind: mv.kind.as_str().to_string(),
            quantity: mv.quantity,
            note: mv.note.clone().unwrap_or_default(),
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|mv| {
                vec![
                    mv.at.clone(),
                    mv.item.clone(),
                    mv.kind.clone(),
                    mv.quantity.to_string(),
                    mv.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["At", "Item", "Kind", "Qty", "Note"], rows)
        );
    }
    Ok(())
}
