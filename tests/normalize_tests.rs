// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pawledger::models::{
    CardKind, Category, PaymentMethod, RawClient, RawTransaction, Recurrence, TxKind,
};
use pawledger::normalize;
use rust_decimal::Decimal;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

#[test]
fn empty_raw_becomes_valid_income_transaction() {
    let t = normalize::transaction(RawTransaction::default(), today());
    assert!(!t.id.is_empty());
    assert_eq!(t.amount, Decimal::ZERO);
    assert_eq!(t.kind, TxKind::Income);
    assert_eq!(t.category, Category::OtherService);
    assert_eq!(t.payment_method, PaymentMethod::Pix);
    assert_eq!(t.date, today());
    assert_eq!(t.recurrence, Recurrence::None);
    assert!(t.client_name.is_none());
    assert!(t.notes.is_none());
}

#[test]
fn bogus_expense_category_maps_to_other_expense() {
    let raw = RawTransaction {
        kind: Some("EXPENSE".into()),
        category: Some("bogus".into()),
        ..Default::default()
    };
    let t = normalize::transaction(raw, today());
    assert_eq!(t.kind, TxKind::Expense);
    assert_eq!(t.category, Category::OtherExpense);
}

#[test]
fn category_from_wrong_domain_is_remapped() {
    // 'bath' is an income category; on an expense row it falls back
    let raw = RawTransaction {
        kind: Some("EXPENSE".into()),
        category: Some("bath".into()),
        ..Default::default()
    };
    assert_eq!(
        normalize::transaction(raw, today()).category,
        Category::OtherExpense
    );

    let raw = RawTransaction {
        kind: Some("EXPENSE".into()),
        category: Some("rent".into()),
        ..Default::default()
    };
    assert_eq!(normalize::transaction(raw, today()).category, Category::Rent);
}

#[test]
fn kind_defaults_to_income_unless_exactly_expense() {
    for v in ["expense", "Expense", "OUT", ""] {
        let raw = RawTransaction {
            kind: Some(v.into()),
            ..Default::default()
        };
        assert_eq!(normalize::transaction(raw, today()).kind, TxKind::Income);
    }
    let raw = RawTransaction {
        kind: Some("EXPENSE".into()),
        ..Default::default()
    };
    assert_eq!(normalize::transaction(raw, today()).kind, TxKind::Expense);
}

#[test]
fn unknown_payment_method_defaults_to_pix() {
    let raw = RawTransaction {
        payment_method: Some("cheque".into()),
        ..Default::default()
    };
    assert_eq!(
        normalize::transaction(raw, today()).payment_method,
        PaymentMethod::Pix
    );
}

#[test]
fn card_kind_only_survives_on_card_payments() {
    let raw = RawTransaction {
        payment_method: Some("card".into()),
        card_kind: Some("debit".into()),
        ..Default::default()
    };
    let t = normalize::transaction(raw, today());
    assert_eq!(t.payment_method, PaymentMethod::Card);
    assert_eq!(t.card_kind, Some(CardKind::Debit));

    let raw = RawTransaction {
        payment_method: Some("cash".into()),
        card_kind: Some("debit".into()),
        ..Default::default()
    };
    assert_eq!(normalize::transaction(raw, today()).card_kind, None);
}

#[test]
fn amount_coercion_is_total() {
    let cases: Vec<(serde_json::Value, &str)> = vec![
        (serde_json::json!(85.5), "85.5"),
        (serde_json::json!("42.10"), "42.10"),
        (serde_json::json!("not a number"), "0"),
        (serde_json::json!(-3), "0"),
        (serde_json::json!({"nested": true}), "0"),
    ];
    for (value, expected) in cases {
        let raw = RawTransaction {
            amount: Some(value),
            ..Default::default()
        };
        let t = normalize::transaction(raw, today());
        assert_eq!(t.amount, expected.parse::<Decimal>().unwrap());
    }
}

#[test]
fn recurrence_requires_exact_monthly() {
    let raw = RawTransaction {
        recurrence: Some("monthly".into()),
        recurrence_id: Some("r1".into()),
        ..Default::default()
    };
    let t = normalize::transaction(raw, today());
    assert_eq!(t.recurrence, Recurrence::Monthly);
    assert_eq!(t.recurrence_id.as_deref(), Some("r1"));

    let raw = RawTransaction {
        recurrence: Some("Monthly".into()),
        ..Default::default()
    };
    assert_eq!(normalize::transaction(raw, today()).recurrence, Recurrence::None);
}

#[test]
fn invalid_date_falls_back_to_today() {
    let raw = RawTransaction {
        date: Some("31/01/2024".into()),
        ..Default::default()
    };
    assert_eq!(normalize::transaction(raw, today()).date, today());

    let raw = RawTransaction {
        date: Some("2024-01-31".into()),
        ..Default::default()
    };
    assert_eq!(
        normalize::transaction(raw, today()).date,
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
    );
}

#[test]
fn blank_optionals_become_absent() {
    let raw = RawTransaction {
        pet_name: Some("   ".into()),
        client_name: Some(" Maria ".into()),
        ..Default::default()
    };
    let t = normalize::transaction(raw, today());
    assert!(t.pet_name.is_none());
    assert_eq!(t.client_name.as_deref(), Some("Maria"));
}

#[test]
fn client_normalization_fills_id_and_created_at() {
    let c = normalize::client(RawClient::default(), "2024-03-15T12:00:00Z");
    assert!(!c.id.is_empty());
    assert_eq!(c.created_at, "2024-03-15T12:00:00Z");
    assert!(c.phone.is_none());

    let raw = RawClient {
        name: Some("Maria Souza".into()),
        phone: Some("".into()),
        created_at: Some("2023-01-01T00:00:00Z".into()),
        ..Default::default()
    };
    let c = normalize::client(raw, "2024-03-15T12:00:00Z");
    assert_eq!(c.name, "Maria Souza");
    assert!(c.phone.is_none());
    assert_eq!(c.created_at, "2023-01-01T00:00:00Z");
}
