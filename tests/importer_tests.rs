// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pawledger::commands::importer::restore_payload;
use pawledger::models::{Category, PaymentMethod, Recurrence, Transaction, TxKind};
use pawledger::{db, store};
use rusqlite::Connection;
use serde_json::json;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn tx(id: &str, date: &str) -> Transaction {
    Transaction {
        id: id.into(),
        account_id: None,
        date: chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        description: "Banho".into(),
        amount: "85.00".parse().unwrap(),
        kind: TxKind::Income,
        category: Category::Bath,
        payment_method: PaymentMethod::Pix,
        card_kind: None,
        client_name: None,
        staff_name: None,
        pet_name: None,
        recurrence: Recurrence::None,
        recurrence_id: None,
        notes: None,
    }
}

#[test]
fn malformed_payload_leaves_data_untouched() {
    let mut conn = setup();
    store::insert_transaction(&conn, &tx("t1", "2025-01-02")).unwrap();

    let payload = json!({"inventory": []});
    assert!(restore_payload(&mut conn, None, &payload).is_err());
    assert_eq!(store::list_transactions(&conn, None).unwrap().len(), 1);

    let payload = json!({"transactions": "not a list"});
    assert!(restore_payload(&mut conn, None, &payload).is_err());
    assert_eq!(store::list_transactions(&conn, None).unwrap().len(), 1);
}

#[test]
fn restore_replaces_scope_and_normalizes() {
    let mut conn = setup();
    store::insert_transaction(&conn, &tx("old", "2024-12-01")).unwrap();

    // camelCase dump from the old app, with a bogus category
    let payload = json!({
        "transactions": [
            {
                "date": "2025-02-03",
                "description": "Ração Premier 15kg",
                "amount": "180.00",
                "type": "EXPENSE",
                "category": "bogus",
                "paymentMethod": "card",
                "cardType": "credit",
                "petName": "Rex"
            }
        ],
        "inventory": [
            {
                "id": "i1",
                "account_id": null,
                "name": "Shampoo",
                "quantity": -2,
                "min_quantity": 1,
                "price": "19.90"
            }
        ]
    });
    let (n_tx, n_items) = restore_payload(&mut conn, None, &payload).unwrap();
    assert_eq!((n_tx, n_items), (1, 1));

    let all = store::list_transactions(&conn, None).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].category, Category::OtherExpense);
    assert_eq!(all[0].payment_method, PaymentMethod::Card);
    assert_eq!(all[0].pet_name.as_deref(), Some("Rex"));
    assert!(!all[0].id.is_empty());

    let items = store::list_items(&conn, None).unwrap();
    assert_eq!(items[0].quantity, 0); // clamped
}

#[test]
fn backup_roundtrip_restores_the_snapshot() {
    let mut conn = setup();
    store::insert_transaction(&conn, &tx("t1", "2025-01-02")).unwrap();
    let backup_id = store::create_backup(&conn, None).unwrap();

    store::insert_transaction(&conn, &tx("t2", "2025-01-03")).unwrap();
    assert_eq!(store::list_transactions(&conn, None).unwrap().len(), 2);

    let payload_s = store::load_backup(&conn, None, backup_id).unwrap();
    let payload: serde_json::Value = serde_json::from_str(&payload_s).unwrap();
    restore_payload(&mut conn, None, &payload).unwrap();

    let all = store::list_transactions(&conn, None).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, "t1");
}

#[test]
fn backups_keep_only_ten_newest() {
    let conn = setup();
    store::insert_transaction(&conn, &tx("t1", "2025-01-02")).unwrap();
    let mut ids = Vec::new();
    for _ in 0..12 {
        ids.push(store::create_backup(&conn, None).unwrap());
    }
    let listed = store::list_backups(&conn, None).unwrap();
    assert_eq!(listed.len(), 10);
    // newest first, the two oldest rotated away
    assert_eq!(listed[0].0, ids[11]);
    assert!(!listed.iter().any(|(id, _)| *id == ids[0] || *id == ids[1]));
}

#[test]
fn missing_backup_is_an_error() {
    let conn = setup();
    assert!(store::load_backup(&conn, None, 999).is_err());
}

#[test]
fn backups_are_scoped_by_account() {
    let conn = setup();
    let mut scoped = tx("t1", "2025-01-02");
    scoped.account_id = Some("acct-1".into());
    store::insert_transaction(&conn, &scoped).unwrap();
    let id = store::create_backup(&conn, Some("acct-1")).unwrap();

    assert!(store::load_backup(&conn, None, id).is_err());
    assert!(store::load_backup(&conn, Some("acct-1"), id).is_ok());
}
