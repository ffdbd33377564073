// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use pawledger::{cli, commands, db, recurrence};

fn main() -> Result<()> {
    env_logger::init();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut conn = db::open_or_init()?;
    let account = matches.get_one::<String>("account").cloned();

    // One-shot load-time pass: materialize this month's recurring
    // instances before any view runs.
    let skip_sync = matches!(matches.subcommand(), None | Some(("init", _)) | Some(("config", _)));
    if !skip_sync {
        let made = recurrence::sync(
            &conn,
            account.as_deref(),
            chrono::Utc::now().date_naive(),
        )?;
        if made > 0 {
            log::info!("materialized {} recurring transaction(s)", made);
        }
    }

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&conn, account.as_deref(), sub)?,
        Some(("inv", sub)) => commands::inventory::handle(&conn, account.as_deref(), sub)?,
        Some(("client", sub)) => commands::clients::handle(&conn, account.as_deref(), sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&conn, account.as_deref(), sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, account.as_deref(), sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut conn, account.as_deref(), sub)?,
        Some(("backup", sub)) => commands::backup::handle(&mut conn, account.as_deref(), sub)?,
        Some(("config", sub)) => commands::config::handle(&conn, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn, account.as_deref())?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
