// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The expense/category store.
//!
//! `ExpenseStore` owns both collections and every rule that touches them.
//! Each mutation validates its input, builds the next collection, writes it
//! through to [`Storage`], swaps it in and finally emits a [`Notice`]. A failed
//! write leaves the in-memory state as it was.

use std::collections::HashSet;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Settings;
use crate::error::{Result, StoreError};
use crate::models::{
    default_categories, Category, CategoryPatch, CategoryTotal, Expense, ExpensePatch,
    NewCategory, NewExpense,
};
use crate::notify::{Notice, Notifier, Severity, Subscriber};
use crate::storage::{Storage, CATEGORIES_KEY, EXPENSES_KEY, SETTINGS_KEY};

pub struct ExpenseStore {
    expenses: Vec<Expense>,
    categories: Vec<Category>,
    storage: Box<dyn Storage>,
    notifier: Notifier,
}

impl ExpenseStore {
    /// Load both collections from `storage`.
    ///
    /// A missing key yields the seed state (no expenses, the eight default
    /// categories). Content that fails to parse is logged and also replaced by
    /// the seed.
    pub fn open(storage: impl Storage + 'static) -> Result<Self> {
        Self::open_boxed(Box::new(storage))
    }

    pub fn open_boxed(storage: Box<dyn Storage>) -> Result<Self> {
        let expenses = load_or_seed(&*storage, EXPENSES_KEY, Vec::new)?;
        let categories = load_or_seed(&*storage, CATEGORIES_KEY, default_categories)?;
        tracing::debug!(
            expenses = expenses.len(),
            categories = categories.len(),
            "store loaded"
        );
        Ok(Self {
            expenses,
            categories,
            storage,
            notifier: Notifier::default(),
        })
    }

    pub fn subscribe(&mut self, f: impl FnMut(&Notice) + 'static) {
        let boxed: Subscriber = Box::new(f);
        self.notifier.subscribe(boxed);
    }

    pub fn notify(&mut self, notice: Notice) {
        self.notifier.emit(notice);
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn expense_by_id(&self, id: i64) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    // --- Expense mutations ---

    /// Validate, assign an id and prepend the new expense.
    pub fn add_expense(&mut self, input: NewExpense) -> Result<Expense> {
        let description = input.description.trim().to_string();
        self.validate_expense(&description, input.amount, input.category_id)?;

        let expense = Expense {
            id: next_id(self.expenses.iter().map(|e| e.id))?,
            description,
            amount: input.amount,
            date: input.date.unwrap_or_else(today),
            category_id: input.category_id,
            notes: input.notes.filter(|n| !n.trim().is_empty()),
        };

        let mut next = Vec::with_capacity(self.expenses.len() + 1);
        next.push(expense.clone());
        next.extend(self.expenses.iter().cloned());
        self.commit_expenses(next)?;

        self.notify(Notice::new(
            "Expense added",
            format!("${:.2} for {}", expense.amount, expense.description),
            Severity::Default,
        ));
        Ok(expense)
    }

    /// Merge `patch` into the expense with `id`. Returns `Ok(None)` without
    /// touching anything when no such expense exists.
    pub fn update_expense(&mut self, id: i64, patch: ExpensePatch) -> Result<Option<Expense>> {
        let Some(pos) = self.expenses.iter().position(|e| e.id == id) else {
            tracing::debug!(id, "update_expense: no such expense");
            return Ok(None);
        };
        let mut updated = self.expenses[pos].clone();
        updated.apply(patch);
        updated.description = updated.description.trim().to_string();
        self.validate_expense(&updated.description, updated.amount, updated.category_id)?;

        let mut next = self.expenses.clone();
        next[pos] = updated.clone();
        self.commit_expenses(next)?;

        self.notify(Notice::new(
            "Expense updated",
            "Your expense has been updated successfully",
            Severity::Default,
        ));
        Ok(Some(updated))
    }

    /// Remove the expense with `id`. Returns whether a record was removed;
    /// deleting an unknown id is a no-op.
    pub fn delete_expense(&mut self, id: i64) -> Result<bool> {
        if !self.expenses.iter().any(|e| e.id == id) {
            return Ok(false);
        }
        let next: Vec<Expense> = self
            .expenses
            .iter()
            .filter(|e| e.id != id)
            .cloned()
            .collect();
        self.commit_expenses(next)?;

        self.notify(Notice::new(
            "Expense deleted",
            "Your expense has been removed",
            Severity::Destructive,
        ));
        Ok(true)
    }

    // --- Category mutations ---

    pub fn add_category(&mut self, input: NewCategory) -> Result<Category> {
        let name = input.name.trim().to_string();
        validate_category_name(&name)?;

        let category = Category {
            id: next_id(self.categories.iter().map(|c| c.id))?,
            name,
            icon: input.icon,
            color: input.color,
        };
        let mut next = self.categories.clone();
        next.push(category.clone());
        self.commit_categories(next)?;

        self.notify(Notice::new(
            "Category added",
            format!("{} has been added to categories", category.name),
            Severity::Default,
        ));
        Ok(category)
    }

    pub fn update_category(&mut self, id: i64, patch: CategoryPatch) -> Result<Option<Category>> {
        let Some(pos) = self.categories.iter().position(|c| c.id == id) else {
            tracing::debug!(id, "update_category: no such category");
            return Ok(None);
        };
        let mut updated = self.categories[pos].clone();
        updated.apply(patch);
        updated.name = updated.name.trim().to_string();
        validate_category_name(&updated.name)?;

        let mut next = self.categories.clone();
        next[pos] = updated.clone();
        self.commit_categories(next)?;

        self.notify(Notice::new(
            "Category updated",
            "Your category has been updated successfully",
            Severity::Default,
        ));
        Ok(Some(updated))
    }

    /// Delete a category unless an expense still references it.
    ///
    /// The check runs against the live expense list. When the category is in
    /// use this returns `Ok(false)` and neither collection changes.
    pub fn delete_category(&mut self, id: i64) -> Result<bool> {
        let in_use = self.expenses.iter().filter(|e| e.category_id == id).count();
        if in_use > 0 {
            tracing::debug!(id, in_use, "delete_category refused");
            self.notify(Notice::new(
                "Cannot delete category",
                "This category is being used by existing expenses",
                Severity::Error,
            ));
            return Ok(false);
        }

        let next: Vec<Category> = self
            .categories
            .iter()
            .filter(|c| c.id != id)
            .cloned()
            .collect();
        self.commit_categories(next)?;

        self.notify(Notice::new(
            "Category deleted",
            "Your category has been removed",
            Severity::Destructive,
        ));
        Ok(true)
    }

    // --- Bulk replacement ---

    /// Replace whichever collections are given, persisting each.
    ///
    /// Each collection is committed on its own. If the categories write fails
    /// after the expenses were replaced, the expenses stay replaced in both
    /// memory and storage and the error is returned.
    pub fn replace(
        &mut self,
        expenses: Option<Vec<Expense>>,
        categories: Option<Vec<Category>>,
    ) -> Result<()> {
        if let Some(next) = expenses {
            self.commit_expenses(next)?;
        }
        if let Some(next) = categories {
            self.commit_categories(next)?;
        }
        Ok(())
    }

    /// Drop both stored collections and fall back to the seed state.
    pub fn reset(&mut self) -> Result<()> {
        self.storage.remove(EXPENSES_KEY)?;
        self.expenses = Vec::new();
        self.storage.remove(CATEGORIES_KEY)?;
        self.categories = default_categories();

        self.notify(Notice::new(
            "Data reset complete",
            "All your expense data has been deleted",
            Severity::Destructive,
        ));
        Ok(())
    }

    // --- Settings ---

    pub fn settings(&self) -> Settings {
        match self.storage.get(SETTINGS_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "stored settings are malformed; using defaults");
                Settings::default()
            }),
            Ok(None) => Settings::default(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read settings; using defaults");
                Settings::default()
            }
        }
    }

    pub fn save_settings(&mut self, settings: &Settings) -> Result<()> {
        let raw = serde_json::to_string(settings)?;
        self.storage.set(SETTINGS_KEY, &raw)?;
        self.notify(Notice::new(
            "Settings saved",
            "Your preferences have been updated successfully",
            Severity::Default,
        ));
        Ok(())
    }

    // --- Aggregation queries ---

    pub fn total_expenses(&self) -> Decimal {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// One entry per category, in category order, including categories no
    /// expense references.
    pub fn expenses_by_category(&self) -> Vec<CategoryTotal> {
        self.categories
            .iter()
            .map(|c| {
                let (total, count) = self
                    .expenses
                    .iter()
                    .filter(|e| e.category_id == c.id)
                    .fold((Decimal::ZERO, 0), |(t, n), e| (t + e.amount, n + 1));
                CategoryTotal {
                    category: c.clone(),
                    total,
                    count,
                }
            })
            .collect()
    }

    /// Most recent first; ties keep collection order.
    pub fn recent_expenses(&self, limit: usize) -> Vec<&Expense> {
        let mut v: Vec<&Expense> = self.expenses.iter().collect();
        v.sort_by(|a, b| b.date.cmp(&a.date));
        v.truncate(limit);
        v
    }

    /// Expenses with `start <= date <= end`.
    pub fn expenses_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|e| e.date >= start && e.date <= end)
            .collect()
    }

    pub fn category_by_id(&self, id: i64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    // --- internals ---

    fn validate_expense(&self, description: &str, amount: Decimal, category_id: i64) -> Result<()> {
        if description.is_empty() {
            return Err(StoreError::Validation("Description is required".into()));
        }
        if amount <= Decimal::ZERO {
            return Err(StoreError::Validation(
                "Amount must be a positive number".into(),
            ));
        }
        if self.category_by_id(category_id).is_none() {
            return Err(StoreError::Validation(format!(
                "Category {} does not exist",
                category_id
            )));
        }
        Ok(())
    }

    fn commit_expenses(&mut self, next: Vec<Expense>) -> Result<()> {
        write_json(&mut *self.storage, EXPENSES_KEY, &next)?;
        self.expenses = next;
        Ok(())
    }

    fn commit_categories(&mut self, next: Vec<Category>) -> Result<()> {
        write_json(&mut *self.storage, CATEGORIES_KEY, &next)?;
        self.categories = next;
        Ok(())
    }
}

fn validate_category_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(StoreError::Validation("Category name is required".into()));
    }
    Ok(())
}

fn load_or_seed<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
    seed: impl FnOnce() -> Vec<T>,
) -> Result<Vec<T>> {
    let Some(raw) = storage.get(key)? else {
        return Ok(seed());
    };
    match serde_json::from_str(&raw) {
        Ok(v) => Ok(v),
        Err(e) => {
            tracing::warn!(key, error = %e, "stored collection is malformed; starting from seed");
            Ok(seed())
        }
    }
}

fn write_json<T: Serialize>(storage: &mut dyn Storage, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    storage.set(key, &raw)?;
    tracing::debug!(key, bytes = raw.len(), "persisted");
    Ok(())
}

/// Time-derived id, strictly above every id already in use.
///
/// Imported data may already hold `i64::MAX`; then the first unused id at or
/// after now is taken instead.
fn next_id(existing: impl Iterator<Item = i64>) -> Result<i64> {
    let now = Utc::now().timestamp_millis();
    let used: HashSet<i64> = existing.collect();
    let Some(&max) = used.iter().max() else {
        return Ok(now);
    };
    if let Some(above) = max.checked_add(1) {
        return Ok(now.max(above));
    }
    tracing::warn!(max, "id space exhausted; reusing a free id");
    (now..=i64::MAX)
        .find(|id| !used.contains(id))
        .ok_or_else(|| StoreError::Validation("No free id available".into()))
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
