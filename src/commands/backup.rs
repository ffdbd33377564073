// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::importer::restore_payload;
use crate::store;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, account: Option<&str>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("create", _)) => {
            let id = store::create_backup(conn, account)?;
            println!("Backup {} created", id);
        }
        Some(("list", _)) => {
            let data = store::list_backups(conn, account)?
                .into_iter()
                .map(|(id, at)| vec![id.to_string(), at])
                .collect();
            println!("{}", pretty_table(&["ID", "Created"], data));
        }
        Some(("restore", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let payload_s = store::load_backup(conn, account, id)?;
            let payload: serde_json::Value = serde_json::from_str(&payload_s)?;
            let (n_tx, n_items) = restore_payload(conn, account, &payload)?;
            println!(
                "Restored backup {}: {} transaction(s), {} item(s)",
                id, n_tx, n_items
            );
        }
        _ => {}
    }
    Ok(())
}
