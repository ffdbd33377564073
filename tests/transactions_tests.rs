// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pawledger::{cli, commands::transactions, db, store, utils};
use rusqlite::Connection;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn add(conn: &Connection, args: &[&str]) {
    let mut argv = vec!["pawledger", "tx", "add"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        transactions::handle(conn, None, tx_m).unwrap();
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn list_limit_respected() {
    let conn = setup();
    for i in 1..=3 {
        add(
            &conn,
            &[
                "--date",
                &format!("2025-01-0{}", i),
                "--description",
                "Banho",
                "--amount",
                "85",
                "--category",
                "bath",
            ],
        );
    }
    let matches = cli::build_cli().get_matches_from(["pawledger", "tx", "list", "--limit", "2"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let rows = transactions::query_rows(&conn, None, list_m).unwrap();
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].date, "2025-01-03");
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn add_defaults_missing_category_per_kind() {
    let conn = setup();
    add(
        &conn,
        &[
            "--date",
            "2025-01-02",
            "--description",
            "Conta de luz",
            "--amount",
            "120",
            "--type",
            "expense",
        ],
    );
    let all = store::list_transactions(&conn, None).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].category.as_str(), "other-expense");
    assert_eq!(all[0].payment_method.as_str(), "pix");
}

#[test]
fn add_monthly_assigns_recurrence_id() {
    let conn = setup();
    add(
        &conn,
        &[
            "--date",
            "2025-01-05",
            "--description",
            "Aluguel",
            "--amount",
            "1500",
            "--type",
            "expense",
            "--category",
            "rent",
            "--monthly",
        ],
    );
    let all = store::list_transactions(&conn, None).unwrap();
    assert_eq!(all[0].recurrence.as_str(), "monthly");
    assert!(all[0].recurrence_id.is_some());
}

#[test]
fn rm_requires_the_deletion_password() {
    let conn = setup();
    add(
        &conn,
        &["--date", "2025-01-02", "--description", "Banho", "--amount", "85"],
    );
    let id = store::list_transactions(&conn, None).unwrap()[0].id.clone();

    let matches = cli::build_cli().get_matches_from([
        "pawledger", "tx", "rm", "--id", &id, "--password", "wrong",
    ]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        assert!(transactions::handle(&conn, None, tx_m).is_err());
    }
    assert_eq!(store::list_transactions(&conn, None).unwrap().len(), 1);

    let matches = cli::build_cli().get_matches_from([
        "pawledger", "tx", "rm", "--id", &id, "--password", "admin",
    ]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        transactions::handle(&conn, None, tx_m).unwrap();
    }
    assert!(store::list_transactions(&conn, None).unwrap().is_empty());
}

#[test]
fn delete_many_removes_only_listed_ids() {
    let conn = setup();
    for i in 1..=3 {
        add(
            &conn,
            &[
                "--date",
                &format!("2025-01-0{}", i),
                "--description",
                "Banho",
                "--amount",
                "85",
            ],
        );
    }
    let all = store::list_transactions(&conn, None).unwrap();
    let victims: Vec<String> = all.iter().take(2).map(|t| t.id.clone()).collect();
    let removed = store::delete_transactions(&conn, None, &victims).unwrap();
    assert_eq!(removed, 2);
    assert_eq!(store::list_transactions(&conn, None).unwrap().len(), 1);
}

#[test]
fn rm_honors_a_custom_password() {
    let conn = setup();
    utils::set_delete_password(&conn, "s3cret").unwrap();
    add(
        &conn,
        &["--date", "2025-01-02", "--description", "Banho", "--amount", "85"],
    );
    let id = store::list_transactions(&conn, None).unwrap()[0].id.clone();

    let matches = cli::build_cli().get_matches_from([
        "pawledger", "tx", "rm", "--id", &id, "--password", "admin",
    ]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        assert!(transactions::handle(&conn, None, tx_m).is_err());
    }

    let matches = cli::build_cli().get_matches_from([
        "pawledger", "tx", "rm", "--id", &id, "--password", "s3cret",
    ]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        transactions::handle(&conn, None, tx_m).unwrap();
    }
    assert!(store::list_transactions(&conn, None).unwrap().is_empty());
}
