// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{get_delete_password, pretty_table, set_delete_password};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-password", sub)) => {
            let password = sub.get_one::<String>("password").unwrap();
            set_delete_password(conn, password)?;
            println!("Deletion password updated");
        }
        Some(("show", _)) => {
            let set = get_delete_password(conn)? != "admin";
            let rows = vec![vec![
                "delete_password".to_string(),
                if set { "(custom)".into() } else { "(default)".into() },
            ]];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        _ => {}
    }
    Ok(())
}
