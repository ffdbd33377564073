// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Recurrence, Transaction};
use crate::normalize::fresh_id;
use crate::store;
use crate::utils::{last_day_of_month, month_key};
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;
use std::collections::HashSet;

/// Same day-of-month as the template, clamped to the target month's last
/// valid day (a template on the 31st lands on Feb 28/29).
pub fn clamp_to_month(day: u32, year: i32, month: u32) -> Option<NaiveDate> {
    let last = last_day_of_month(year, month)?;
    NaiveDate::from_ymd_opt(year, month, day.min(last))
}

/// Synthesize the instances missing for the current month. A transaction
/// carrying a recurrence id marks its own month as satisfied, so running
/// this any number of times within one month adds nothing new.
pub fn materialize(txs: &[Transaction], today: NaiveDate) -> Vec<Transaction> {
    let current = month_key(today);
    let mut seen: HashSet<String> = txs
        .iter()
        .filter_map(|t| {
            t.recurrence_id
                .as_ref()
                .map(|rid| format!("{}-{}", rid, month_key(t.date)))
        })
        .collect();

    let mut fresh = Vec::new();
    for t in txs {
        if t.recurrence != Recurrence::Monthly {
            continue;
        }
        let Some(rid) = t.recurrence_id.as_ref() else {
            continue;
        };
        let key = format!("{}-{}", rid, current);
        if seen.contains(&key) {
            continue;
        }
        let Some(date) = clamp_to_month(t.date.day(), today.year(), today.month()) else {
            continue;
        };
        seen.insert(key);
        fresh.push(Transaction {
            id: fresh_id(),
            date,
            ..t.clone()
        });
    }
    fresh
}

/// Load-time pass: persist whatever `materialize` produced for the scope.
/// Returns the number of instances written.
pub fn sync(conn: &Connection, account: Option<&str>, today: NaiveDate) -> Result<usize> {
    let txs = store::list_transactions(conn, account)?;
    let fresh = materialize(&txs, today);
    for t in &fresh {
        store::insert_transaction(conn, t)?;
    }
    Ok(fresh.len())
}
