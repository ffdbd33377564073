// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::RawClient;
use crate::normalize;
use crate::store;
use crate::utils::{maybe_print_json, now_stamp, pretty_table};
use anyhow::{anyhow, Result};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, account: Option<&str>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, account, sub)?,
        Some(("list", sub)) => list(conn, account, sub)?,
        Some(("rm", sub)) => rm(conn, account, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, account: Option<&str>, sub: &clap::ArgMatches) -> Result<()> {
    let raw = RawClient {
        id: None,
        account_id: account.map(str::to_string),
        name: sub.get_one::<String>("name").cloned(),
        phone: sub.get_one::<String>("phone").cloned(),
        email: sub.get_one::<String>("email").cloned(),
        notes: sub.get_one::<String>("notes").cloned(),
        created_at: None,
    };
    let c = normalize::client(raw, &now_stamp());
    store::insert_client(conn, &c)?;
    println!("Registered client '{}' (id: {})", c.name, c.id);
    Ok(())
}

#[derive(Serialize)]
struct ClientRow {
    id: String,
    name: String,
    phone: String,
    email: String,
    notes: String,
    created_at: String,
}

fn list(conn: &Connection, account: Option<&str>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let clients = store::list_clients(conn, account)?;
    let data: Vec<ClientRow> = clients
        .iter()
        .map(|c| ClientRow {
            id: c.id.clone(),
            name: c.name.clone(),
            phone: c.phone.clone().unwrap_or_default(),
            email: c.email.clone().unwrap_or_default(),
            notes: c.notes.clone().unwrap_or_default(),
            created_at: c.created_at.clone(),
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|c| {
                vec![
                    c.name.clone(),
                    c.phone.clone(),
                    c.email.clone(),
                    c.notes.clone(),
                    c.created_at.clone(),
                    c.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Name", "Phone", "Email", "Notes", "Created", "ID"], rows)
        );
    }
    Ok(())
}

fn rm(conn: &Connection, account: Option<&str>, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    if !store::delete_client(conn, account, id)? {
        return Err(anyhow!("Client '{}' not found", id));
    }
    println!("Removed client {}", id);
    Ok(())
}
