// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-side views built on top of the store: the filtered/sorted expense
//! list, the dashboard and the per-month report.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{Result, StoreError};
use crate::models::{CategoryTotal, Color, Expense};
use crate::store::ExpenseStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Date,
    Amount,
    Description,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" => Ok(SortField::Date),
            "amount" => Ok(SortField::Amount),
            "description" => Ok(SortField::Description),
            _ => Err(format!(
                "Unknown sort field '{}' (use date|amount|description)",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Case-insensitive substring of the description.
    pub search: Option<String>,
    pub category_id: Option<i64>,
    /// Range applies only when both bounds are set.
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub sort: SortField,
    pub direction: SortDirection,
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    pub fn matches(&self, e: &Expense) -> bool {
        if let Some(term) = self.search.as_deref().filter(|t| !t.is_empty()) {
            if !e.description.to_lowercase().contains(&term.to_lowercase()) {
                return false;
            }
        }
        if let Some(cat) = self.category_id {
            if e.category_id != cat {
                return false;
            }
        }
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if e.date < from || e.date > to {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, expenses: &'a [Expense]) -> Vec<&'a Expense> {
        let mut rows: Vec<&Expense> = expenses.iter().filter(|e| self.matches(e)).collect();
        rows.sort_by(|a, b| {
            let ord = match self.sort {
                SortField::Date => a.date.cmp(&b.date),
                SortField::Amount => a.amount.cmp(&b.amount),
                SortField::Description => compare_text(&a.description, &b.description),
            };
            match self.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
        if let Some(limit) = self.limit {
            rows.truncate(limit);
        }
        rows
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// First and last day of a `YYYY-MM` month.
pub fn month_bounds(month: &str) -> Result<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d").map_err(|_| {
        StoreError::Validation(format!("Invalid month '{}', expected YYYY-MM", month))
    })?;
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| StoreError::Validation(format!("Invalid month '{}'", month)))?;
    Ok((start, end))
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub total: Decimal,
    pub count: usize,
    /// Categories with spending, in category order.
    pub by_category: Vec<CategoryTotal>,
    pub recent: Vec<Expense>,
}

impl Dashboard {
    pub fn build(store: &ExpenseStore) -> Self {
        Self {
            total: store.total_expenses(),
            count: store.expenses().len(),
            by_category: store
                .expenses_by_category()
                .into_iter()
                .filter(|c| c.total > Decimal::ZERO)
                .collect(),
            recent: store.recent_expenses(5).into_iter().cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySpend {
    pub day: u32,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpend {
    pub id: i64,
    pub name: String,
    pub color: Color,
    pub hex: &'static str,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthReport {
    pub month: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total: Decimal,
    pub count: usize,
    /// Days with spending, ascending.
    pub daily: Vec<DailySpend>,
    /// Total over the days that have spending, two decimals.
    pub average_daily: Decimal,
    /// Share of the month's days with spending, in whole percent.
    pub coverage_pct: u32,
    /// Non-zero category totals, largest first.
    pub by_category: Vec<CategorySpend>,
    pub top: Vec<Expense>,
}

impl MonthReport {
    pub const TOP_LIMIT: usize = 5;

    pub fn build(store: &ExpenseStore, month: &str) -> Result<Self> {
        let (start, end) = month_bounds(month)?;
        let in_month = store.expenses_by_date_range(start, end);

        let total: Decimal = in_month.iter().map(|e| e.amount).sum();

        let mut per_day: BTreeMap<u32, Decimal> = BTreeMap::new();
        for e in &in_month {
            *per_day.entry(e.date.day()).or_insert(Decimal::ZERO) += e.amount;
        }
        let daily: Vec<DailySpend> = per_day
            .into_iter()
            .map(|(day, amount)| DailySpend { day, amount })
            .collect();

        let average_daily = if daily.is_empty() {
            Decimal::ZERO
        } else {
            (total / Decimal::from(daily.len())).round_dp(2)
        };
        let coverage_pct =
            ((daily.len() as f64 / end.day() as f64) * 100.0).round() as u32;

        let mut by_category: Vec<CategorySpend> = store
            .categories()
            .iter()
            .map(|c| CategorySpend {
                id: c.id,
                name: c.name.clone(),
                color: c.color,
                hex: c.color.hex(),
                amount: in_month
                    .iter()
                    .filter(|e| e.category_id == c.id)
                    .map(|e| e.amount)
                    .sum(),
            })
            .filter(|c| c.amount > Decimal::ZERO)
            .collect();
        by_category.sort_by(|a, b| b.amount.cmp(&a.amount));

        let mut top: Vec<Expense> = in_month.iter().map(|e| (*e).clone()).collect();
        top.sort_by(|a, b| b.amount.cmp(&a.amount));
        top.truncate(Self::TOP_LIMIT);

        Ok(Self {
            month: format!("{}", start.format("%Y-%m")),
            start,
            end,
            total,
            count: in_month.len(),
            daily,
            average_daily,
            coverage_pct,
            by_category,
            top,
        })
    }
}
