// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pawledger::models::{Category, PaymentMethod, Recurrence, Transaction, TxKind};
use pawledger::{db, recurrence, store};
use rusqlite::Connection;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tx(id: &str, d: &str) -> Transaction {
    Transaction {
        id: id.into(),
        account_id: None,
        date: date(d),
        description: format!("tx {}", id),
        amount: "80".parse().unwrap(),
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

fn template(id: &str, rid: &str, d: &str) -> Transaction {
    Transaction {
        recurrence: Recurrence::Monthly,
        recurrence_id: Some(rid.into()),
        ..tx(id, d)
    }
}

#[test]
fn day_31_template_clamps_to_february_end() {
    let txs = vec![template("t1", "r1", "2023-01-31")];
    let fresh = recurrence::materialize(&txs, date("2023-02-10"));
    assert_eq!(fresh.len(), 1);
    assert_eq!(fresh[0].date, date("2023-02-28"));
    assert_eq!(fresh[0].recurrence_id.as_deref(), Some("r1"));
    assert_ne!(fresh[0].id, "t1");
}

#[test]
fn leap_february_gets_day_29() {
    let txs = vec![template("t1", "r1", "2024-01-31")];
    let fresh = recurrence::materialize(&txs, date("2024-02-10"));
    assert_eq!(fresh.len(), 1);
    assert_eq!(fresh[0].date, date("2024-02-29"));
}

#[test]
fn template_counts_for_its_own_month() {
    let txs = vec![template("t1", "r1", "2024-02-10")];
    assert!(recurrence::materialize(&txs, date("2024-02-20")).is_empty());
}

#[test]
fn idempotent_within_a_month() {
    let mut txs = vec![template("t1", "r1", "2024-01-15")];
    let first = recurrence::materialize(&txs, date("2024-02-20"));
    assert_eq!(first.len(), 1);
    txs.extend(first);
    assert!(recurrence::materialize(&txs, date("2024-02-20")).is_empty());
    // next month produces exactly one more
    let next = recurrence::materialize(&txs, date("2024-03-05"));
    assert_eq!(next.len(), 1);
    assert_eq!(next[0].date, date("2024-03-15"));
}

#[test]
fn non_templates_are_ignored() {
    let bare = tx("t1", "2024-01-15");
    let monthly_without_id = Transaction {
        recurrence: Recurrence::Monthly,
        ..tx("t2", "2024-01-15")
    };
    let txs = vec![bare, monthly_without_id];
    assert!(recurrence::materialize(&txs, date("2024-02-20")).is_empty());
}

#[test]
fn shared_recurrence_id_yields_one_instance() {
    // template plus an already-materialized January instance
    let txs = vec![
        template("t1", "r1", "2023-12-31"),
        template("i1", "r1", "2024-01-31"),
    ];
    let fresh = recurrence::materialize(&txs, date("2024-02-10"));
    assert_eq!(fresh.len(), 1);
    assert_eq!(fresh[0].date, date("2024-02-29"));
}

#[test]
fn sync_persists_once_per_month() {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    store::insert_transaction(&conn, &template("t1", "r1", "2024-01-31")).unwrap();

    let made = recurrence::sync(&conn, None, date("2024-02-10")).unwrap();
    assert_eq!(made, 1);
    let made = recurrence::sync(&conn, None, date("2024-02-25")).unwrap();
    assert_eq!(made, 0);

    let all = store::list_transactions(&conn, None).unwrap();
    assert_eq!(all.len(), 2);
    // date-descending: the materialized February instance lists first
    assert_eq!(all[0].date, date("2024-02-29"));
}
