// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::LedgerError;
use crate::filter::{self, TxFilter};
use crate::models::{CardKind, Category, PaymentMethod, RawTransaction, Transaction, TxKind};
use crate::normalize;
use crate::store;
use crate::utils::{get_delete_password, maybe_print_json, parse_date, parse_decimal, pretty_table};
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
    // Typos fail loudly here; only stored data gets the silent defaulting.
    if let Some(d) = sub.get_one::<String>("date") {
        parse_date(d)?;
    }
    parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let kind_arg = sub.get_one::<String>("type").unwrap();
    let kind = TxKind::parse(kind_arg)
        .ok_or_else(|| anyhow!("Unknown type '{}' (income|expense)", kind_arg))?;
    if let Some(c) = sub.get_one::<String>("category") {
        Category::parse(c).ok_or_else(|| anyhow!("Unknown category '{}'", c))?;
    }
    let payment_arg = sub.get_one::<String>("payment").unwrap();
    PaymentMethod::parse(payment_arg)
        .ok_or_else(|| anyhow!("Unknown payment method '{}'", payment_arg))?;
    if let Some(c) = sub.get_one::<String>("card") {
        CardKind::parse(c).ok_or_else(|| anyhow!("Unknown card kind '{}' (credit|debit)", c))?;
    }
    let monthly = sub.get_flag("monthly");

    let raw = RawTransaction {
        id: None,
        account_id: account.map(str::to_string),
        date: sub.get_one::<String>("date").cloned(),
        description: sub.get_one::<String>("description").cloned(),
        amount: sub
            .get_one::<String>("amount")
            .map(|s| serde_json::Value::String(s.clone())),
        kind: Some(kind.as_str().to_string()),
        category: sub.get_one::<String>("category").cloned(),
        payment_method: sub.get_one::<String>("payment").cloned(),
        card_kind: sub.get_one::<String>("card").cloned(),
        client_name: sub.get_one::<String>("client").cloned(),
        staff_name: sub.get_one::<String>("staff").cloned(),
        pet_name: sub.get_one::<String>("pet").cloned(),
        recurrence: monthly.then(|| "monthly".to_string()),
        recurrence_id: monthly.then(normalize::fresh_id),
        notes: sub.get_one::<String>("notes").cloned(),
    };
    let today = chrono::Utc::now().date_naive();
    let t = normalize::transaction(raw, today);
    store::insert_transaction(conn, &t)?;
    println!(
        "Recorded {} {} on {} '{}' [{}] (id: {})",
        t.kind.label(),
        t.amount,
        t.date,
        t.description,
        t.category.label(),
        t.id
    );
    Ok(())
}

fn list(conn: &Connection, account: Option<&str>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, account, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.description.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.payment.clone(),
                    r.amount.clone(),
                    r.client.clone(),
                    r.pet.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Date", "Description", "Type", "Category", "Payment", "Amount", "Client",
                    "Pet", "ID"
                ],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub payment: String,
    pub amount: String,
    pub client: String,
    pub pet: String,
    pub staff: String,
    pub recurring: String,
}

fn to_row(t: &Transaction) -> TransactionRow {
    TransactionRow {
        id: t.id.clone(),
        date: t.date.to_string(),
        description: t.description.clone(),
        kind: t.kind.label().to_string(),
        category: t.category.label().to_string(),
        payment: t.payment_method.label().to_string(),
        amount: t.amount.to_string(),
        client: t.client_name.clone().unwrap_or_default(),
        pet: t.pet_name.clone().unwrap_or_default(),
        staff: t.staff_name.clone().unwrap_or_default(),
        recurring: t.recurrence.label().to_string(),
    }
}

pub fn query_rows(
    conn: &Connection,
    account: Option<&str>,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let f = TxFilter::from_matches(sub)?;
    let all = store::list_transactions(conn, account)?;
    let mut filtered = filter::apply(&all, &f);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        filtered.truncate(*limit);
    }
    Ok(filtered.iter().map(to_row).collect())
}

fn rm(conn: &Connection, account: Option<&str>, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let password = sub.get_one::<String>("password").unwrap();
    if password != &get_delete_password(conn)? {
        return Err(LedgerError::BadPassword.into());
    }
    if !store::delete_transaction(conn, account, id)? {
        return Err(anyhow!("Transaction '{}' not found", id));
    }
    println!("Removed transaction {}", id);
    Ok(())
}
