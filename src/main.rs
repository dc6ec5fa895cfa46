// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use expensetrackr::notify::{Notice, Severity};
use expensetrackr::storage::SqliteStorage;
use expensetrackr::{cli, commands, db, ExpenseStore};

fn print_notice(n: &Notice) {
    // Errors reach the user through the command's own result.
    if n.severity != Severity::Error {
        println!("{}: {}", n.title, n.description);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "expensetrackr=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let path = db::db_path(matches.get_one::<PathBuf>("db").map(PathBuf::as_path))?;
    let conn = db::open_or_init(&path)?;
    let mut store = ExpenseStore::open(SqliteStorage::new(conn)?)?;
    if store.settings().notifications {
        store.subscribe(print_notice);
    }

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", path.display());
        }
        Some(("expense", sub)) => commands::expenses::handle(&mut store, sub)?,
        Some(("category", sub)) => commands::categories::handle(&mut store, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut store, sub)?,
        Some(("reset", sub)) => commands::reset::handle(&mut store, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&mut store, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
