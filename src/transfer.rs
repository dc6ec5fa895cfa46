// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Backup documents: export, import and CSV rendering.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::models::{Category, Expense};
use crate::notify::{Notice, Severity};
use crate::store::ExpenseStore;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub expenses: Vec<Expense>,
    pub categories: Vec<Category>,
    pub export_date: DateTime<Utc>,
}

impl ExportDocument {
    pub fn from_store(store: &ExpenseStore) -> Self {
        Self {
            expenses: store.expenses().to_vec(),
            categories: store.categories().to_vec(),
            export_date: Utc::now(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn default_export_name(day: NaiveDate) -> String {
    format!("expense-tracker-export-{}.json", day.format("%Y-%m-%d"))
}

/// Import payload: each collection is optional and replaces the stored one
/// only when present.
#[derive(Debug, Deserialize)]
struct ImportDocument {
    #[serde(default)]
    expenses: Option<Vec<Expense>>,
    #[serde(default)]
    categories: Option<Vec<Category>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub expenses: Option<usize>,
    pub categories: Option<usize>,
}

/// Parse `raw` and replace the collections it carries.
///
/// Nothing changes unless the whole document parses.
pub fn import_json(store: &mut ExpenseStore, raw: &str) -> Result<ImportSummary> {
    let doc: ImportDocument = match serde_json::from_str(raw) {
        Ok(doc) => doc,
        Err(e) => {
            store.notify(Notice::new(
                "Import failed",
                "The selected file is not a valid export",
                Severity::Error,
            ));
            return Err(StoreError::Import(e.to_string()));
        }
    };
    let summary = ImportSummary {
        expenses: doc.expenses.as_ref().map(Vec::len),
        categories: doc.categories.as_ref().map(Vec::len),
    };
    store.replace(doc.expenses, doc.categories)?;
    store.notify(Notice::new(
        "Import successful",
        "Your expense data has been imported",
        Severity::Default,
    ));
    Ok(summary)
}

/// Expenses as CSV with category names resolved.
pub fn expenses_csv(store: &ExpenseStore) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    let csv_err = |e: csv::Error| StoreError::Serialization(e.to_string());
    wtr.write_record(["id", "date", "description", "amount", "category", "notes"])
        .map_err(csv_err)?;
    for e in store.expenses() {
        let category = store
            .category_by_id(e.category_id)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        wtr.write_record([
            e.id.to_string(),
            e.date.to_string(),
            e.description.clone(),
            format!("{:.2}", e.amount),
            category,
            e.notes.clone().unwrap_or_default(),
        ])
        .map_err(csv_err)?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| StoreError::Serialization(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
}
