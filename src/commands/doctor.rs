// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::ExpenseStore;
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Integrity problems as `[issue, detail]` rows.
pub fn issues(store: &ExpenseStore) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    // 1) Expenses pointing at a category that no longer exists
    for e in store.expenses() {
        if store.category_by_id(e.category_id).is_none() {
            rows.push(vec![
                "expense_missing_category".into(),
                format!("#{} -> category {}", e.id, e.category_id),
            ]);
        }
    }

    // 2) Duplicate ids
    let mut seen = HashSet::new();
    for e in store.expenses() {
        if !seen.insert(e.id) {
            rows.push(vec!["duplicate_expense_id".into(), e.id.to_string()]);
        }
    }
    let mut seen = HashSet::new();
    for c in store.categories() {
        if !seen.insert(c.id) {
            rows.push(vec!["duplicate_category_id".into(), c.id.to_string()]);
        }
    }

    // 3) Values the store would reject today (typically from imports)
    for e in store.expenses() {
        if e.amount <= Decimal::ZERO {
            rows.push(vec![
                "non_positive_amount".into(),
                format!("#{} {}", e.id, e.amount),
            ]);
        }
        if e.description.trim().is_empty() {
            rows.push(vec!["empty_description".into(), format!("#{}", e.id)]);
        }
    }
    for c in store.categories() {
        if c.name.trim().is_empty() {
            rows.push(vec!["empty_category_name".into(), format!("#{}", c.id)]);
        }
    }
    rows
}

pub fn handle(store: &ExpenseStore) -> Result<()> {
    let rows = issues(store);
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
