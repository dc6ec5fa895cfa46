// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::ExpenseStore;
use crate::transfer::import_json;
use anyhow::{Context, Result};

pub fn handle(store: &mut ExpenseStore, m: &clap::ArgMatches) -> Result<()> {
    let path = m
        .get_one::<String>("path")
        .context("path is required")?
        .trim();
    let raw = std::fs::read_to_string(path).with_context(|| format!("Open {}", path))?;
    let summary =
        import_json(store, &raw).with_context(|| format!("Import from {}", path))?;

    match summary.expenses {
        Some(n) => println!("Replaced expenses with {} records", n),
        None => println!("No expenses in file; existing expenses kept"),
    }
    match summary.categories {
        Some(n) => println!("Replaced categories with {} records", n),
        None => println!("No categories in file; existing categories kept"),
    }
    Ok(())
}
