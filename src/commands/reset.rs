// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::ExpenseStore;
use anyhow::{bail, Result};

pub fn handle(store: &mut ExpenseStore, m: &clap::ArgMatches) -> Result<()> {
    if !m.get_flag("yes") {
        bail!("Reset deletes every expense and custom category; re-run with --yes to confirm");
    }
    store.reset()?;
    println!(
        "Restored {} default categories",
        store.categories().len()
    );
    Ok(())
}
