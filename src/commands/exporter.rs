// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::{today, ExpenseStore};
use crate::transfer::{default_export_name, expenses_csv, ExportDocument};
use anyhow::{bail, Context, Result};

pub fn handle(store: &ExpenseStore, m: &clap::ArgMatches) -> Result<()> {
    let fmt = m
        .get_one::<String>("format")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "json".into());

    let (contents, default_name) = match fmt.as_str() {
        "json" => (
            ExportDocument::from_store(store).to_json_pretty()?,
            default_export_name(today()),
        ),
        "csv" => (
            expenses_csv(store)?,
            default_export_name(today()).replace(".json", ".csv"),
        ),
        _ => bail!("Unknown format: {} (use json|csv)", fmt),
    };
    let out = m.get_one::<String>("out").cloned().unwrap_or(default_name);

    std::fs::write(&out, contents).with_context(|| format!("Write export to {}", out))?;
    tracing::info!(path = %out, format = %fmt, "export written");
    println!(
        "Exported {} expenses and {} categories to {}",
        store.expenses().len(),
        store.categories().len(),
        out
    );
    Ok(())
}
