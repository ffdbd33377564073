// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{
    CardKind, Category, Client, PaymentMethod, RawClient, RawTransaction, Recurrence, Transaction,
    TxKind,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// All defaulting lives here. Every loosely-typed record becomes a valid
/// entity; nothing in this module can fail.

pub fn fresh_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn opt_text(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn coerce_amount(v: Option<&serde_json::Value>) -> Decimal {
    let parsed = match v {
        Some(serde_json::Value::Number(n)) => n.to_string().parse::<Decimal>().ok(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    };
    parsed.unwrap_or(Decimal::ZERO).max(Decimal::ZERO)
}

pub fn transaction(raw: RawTransaction, today: NaiveDate) -> Transaction {
    // Anything that isn't exactly EXPENSE counts as income.
    let kind = if raw.kind.as_deref() == Some("EXPENSE") {
        TxKind::Expense
    } else {
        TxKind::Income
    };
    // A known category from the wrong domain is remapped too, so the
    // category set always matches the kind.
    let category = raw
        .category
        .as_deref()
        .and_then(Category::parse)
        .filter(|c| c.matches_kind(kind))
        .unwrap_or_else(|| Category::fallback(kind));
    let payment_method = raw
        .payment_method
        .as_deref()
        .and_then(PaymentMethod::parse)
        .unwrap_or(PaymentMethod::Pix);
    let card_kind = if payment_method == PaymentMethod::Card {
        raw.card_kind.as_deref().and_then(CardKind::parse)
    } else {
        None
    };
    let recurrence = if raw.recurrence.as_deref() == Some("monthly") {
        Recurrence::Monthly
    } else {
        Recurrence::None
    };
    let date = raw
        .date
        .as_deref()
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
        .unwrap_or(today);

    Transaction {
        id: opt_text(raw.id).unwrap_or_else(fresh_id),
        account_id: opt_text(raw.account_id),
        date,
        description: opt_text(raw.description).unwrap_or_default(),
        amount: coerce_amount(raw.amount.as_ref()),
        kind,
        category,
        payment_method,
        card_kind,
        client_name: opt_text(raw.client_name),
        staff_name: opt_text(raw.staff_name),
        pet_name: opt_text(raw.pet_name),
        recurrence,
        recurrence_id: opt_text(raw.recurrence_id),
        notes: opt_text(raw.notes),
    }
}

pub fn client(raw: RawClient, now: &str) -> Client {
    Client {
        id: opt_text(raw.id).unwrap_or_else(fresh_id),
        account_id: opt_text(raw.account_id),
        name: opt_text(raw.name).unwrap_or_default(),
        phone: opt_text(raw.phone),
        email: opt_text(raw.email),
        notes: opt_text(raw.notes),
        created_at: opt_text(raw.created_at).unwrap_or_else(|| now.to_string()),
    }
}
