// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::filter::{self, TxFilter};
use crate::store;
use crate::utils::now_stamp;
use anyhow::{anyhow, Result};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, account: Option<&str>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, account, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, account: Option<&str>, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let f = TxFilter::from_matches(sub)?;
    let all = store::list_transactions(conn, account)?;
    let txs = filter::apply(&all, &f);

    match fmt.as_str() {
        "csv" => {
            // Fixed column order; every field quoted, internal quotes doubled.
            let mut wtr = csv::WriterBuilder::new()
                .quote_style(csv::QuoteStyle::Always)
                .from_path(out)?;
            wtr.write_record([
                "Date",
                "Description",
                "Type",
                "Category",
                "Payment Method",
                "Amount",
                "Client",
                "Pet",
                "Staff",
                "Recurrence",
                "Notes",
            ])?;
            for t in &txs {
                wtr.write_record([
                    t.date.to_string(),
                    t.description.clone(),
                    t.kind.label().to_string(),
                    t.category.label().to_string(),
                    t.payment_method.label().to_string(),
                    t.amount.to_string(),
                    t.client_name.clone().unwrap_or_default(),
                    t.pet_name.clone().unwrap_or_default(),
                    t.staff_name.clone().unwrap_or_default(),
                    t.recurrence.label().to_string(),
                    t.notes.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            // Full-fidelity dump: restorable via `import dump`.
            let inventory = store::list_items(conn, account)?;
            let payload = json!({
                "exported_at": now_stamp(),
                "date_from": f.date_from.map(|d| d.to_string()),
                "date_to": f.date_to.map(|d| d.to_string()),
                "transactions": txs,
                "inventory": inventory,
            });
            std::fs::write(out, serde_json::to_string_pretty(&payload)?)?;
        }
        _ => {
            return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
        }
    }
    println!("Exported {} transaction(s) to {}", txs.len(), out);
    Ok(())
}
