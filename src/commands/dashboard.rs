// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::filter::{self, TxFilter};
use crate::models::ALERT_QUANTITY;
use crate::store;
use crate::summary;
use crate::utils::{fmt_amount, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, account: Option<&str>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let all = store::list_transactions(conn, account)?;
    let f = TxFilter::from_matches(sub)?;
    let filtered = filter::apply(&all, &f);

    let totals = summary::totals(&filtered);
    let by_cat = summary::by_category(&filtered);
    let by_pay = summary::by_payment(&filtered);
    let best = summary::best_service(&filtered);
    // Trend is always global: the full collection, not the filtered one.
    let today = chrono::Utc::now().date_naive();
    let months = summary::monthly_comparison(&all, today);

    let items = store::list_items(conn, account)?;
    let alerts: Vec<_> = items
        .iter()
        .filter(|i| i.is_low() || i.quantity <= ALERT_QUANTITY)
        .collect();

    if json_flag || jsonl_flag {
        let payload = json!({
            "totals": totals,
            "by_category": by_cat
                .iter()
                .map(|(c, v)| json!({"category": c.label(), "total": v}))
                .collect::<Vec<_>>(),
            "by_payment": by_pay
                .iter()
                .map(|(p, v)| json!({"payment": p.label(), "total": v}))
                .collect::<Vec<_>>(),
            "best_service": best.map(|(c, v)| json!({"category": c.label(), "total": v})),
            "monthly": months,
            "low_stock": alerts
                .iter()
                .map(|i| json!({"name": i.name, "quantity": i.quantity, "min": i.min_quantity}))
                .collect::<Vec<_>>(),
        });
        maybe_print_json(json_flag, jsonl_flag, &payload)?;
        return Ok(());
    }

    println!(
        "{}",
        pretty_table(
            &["Income", "Expense", "Profit"],
            vec![vec![
                fmt_amount(&totals.income),
                fmt_amount(&totals.expense),
                fmt_amount(&totals.profit),
            ]],
        )
    );

    if !alerts.is_empty() {
        let rows = alerts
            .iter()
            .map(|i| {
                vec![
                    i.name.clone(),
                    i.quantity.to_string(),
                    i.min_quantity.to_string(),
                ]
            })
            .collect();
        println!("Low stock:");
        println!("{}", pretty_table(&["Item", "Qty", "Min"], rows));
    }

    let rows = by_cat
        .iter()
        .map(|(c, v)| vec![c.label().to_string(), fmt_amount(v)])
        .collect();
    println!("By category:");
    println!("{}", pretty_table(&["Category", "Total"], rows));

    let rows = by_pay
        .iter()
        .map(|(p, v)| vec![p.label().to_string(), fmt_amount(v)])
        .collect();
    println!("By payment method:");
    println!("{}", pretty_table(&["Payment", "Total"], rows));

    match best {
        Some((c, v)) => println!("Best service: {} ({})", c.label(), fmt_amount(&v)),
        None => println!("Best service: (no income yet)"),
    }

    let rows = months
        .iter()
        .map(|m| {
            vec![
                m.month.clone(),
                fmt_amount(&m.income),
                fmt_amount(&m.expense),
                fmt_amount(&m.profit),
            ]
        })
        .collect();
    println!("Last 6 months (all data):");
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expense", "Profit"], rows)
    );
    Ok(())
}
