// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use expensetrackr::models::NewExpense;
use expensetrackr::query::{
    month_bounds, Dashboard, ExpenseFilter, MonthReport, SortDirection, SortField,
};
use expensetrackr::storage::MemoryStorage;
use expensetrackr::ExpenseStore;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn setup() -> ExpenseStore {
    let mut store = ExpenseStore::open(MemoryStorage::new()).unwrap();
    for (desc, amount, date, cat) in [
        ("Morning coffee", "4.50", "2024-03-01", 1),
        ("Train ticket", "12.00", "2024-03-01", 2),
        ("Groceries", "63.20", "2024-03-04", 1),
        ("Cinema", "15.00", "2024-03-10", 4),
        ("Coffee beans", "18.00", "2024-03-10", 1),
        ("Electric bill", "80.00", "2024-03-28", 6),
        ("Flight", "240.00", "2024-04-02", 8),
    ] {
        store
            .add_expense(NewExpense {
                description: desc.into(),
                amount: dec(amount),
                date: Some(d(date)),
                category_id: cat,
                notes: None,
            })
            .unwrap();
    }
    store
}

fn descriptions(rows: &[&expensetrackr::models::Expense]) -> Vec<String> {
    rows.iter().map(|e| e.description.clone()).collect()
}

#[test]
fn search_is_case_insensitive() {
    let store = setup();
    let filter = ExpenseFilter {
        search: Some("COFFEE".into()),
        sort: SortField::Description,
        direction: SortDirection::Asc,
        ..Default::default()
    };
    assert_eq!(
        descriptions(&filter.apply(store.expenses())),
        ["Coffee beans", "Morning coffee"]
    );
}

#[test]
fn category_and_range_filters_combine() {
    let store = setup();
    let filter = ExpenseFilter {
        category_id: Some(1),
        from: Some(d("2024-03-02")),
        to: Some(d("2024-03-31")),
        sort: SortField::Date,
        direction: SortDirection::Asc,
        ..Default::default()
    };
    assert_eq!(
        descriptions(&filter.apply(store.expenses())),
        ["Groceries", "Coffee beans"]
    );
}

#[test]
fn half_open_range_is_ignored() {
    let store = setup();
    let filter = ExpenseFilter {
        from: Some(d("2024-04-01")),
        ..Default::default()
    };
    assert_eq!(filter.apply(store.expenses()).len(), 7);
}

#[test]
fn sorts_by_amount_both_ways_with_limit() {
    let store = setup();
    let mut filter = ExpenseFilter {
        sort: SortField::Amount,
        limit: Some(2),
        ..Default::default()
    };
    assert_eq!(
        descriptions(&filter.apply(store.expenses())),
        ["Flight", "Electric bill"]
    );
    filter.direction = SortDirection::Asc;
    assert_eq!(
        descriptions(&filter.apply(store.expenses())),
        ["Morning coffee", "Train ticket"]
    );
}

#[test]
fn default_sort_is_date_descending() {
    let store = setup();
    let rows = ExpenseFilter::default().apply(store.expenses());
    assert_eq!(rows.first().unwrap().description, "Flight");
    assert_eq!(rows.last().unwrap().date, d("2024-03-01"));
}

#[test]
fn sort_field_parses() {
    assert_eq!("Amount".parse::<SortField>().unwrap(), SortField::Amount);
    assert!("payee".parse::<SortField>().is_err());
}

#[test]
fn month_bounds_handle_leap_years() {
    assert_eq!(
        month_bounds("2024-02").unwrap(),
        (d("2024-02-01"), d("2024-02-29"))
    );
    assert_eq!(
        month_bounds("2023-12").unwrap(),
        (d("2023-12-01"), d("2023-12-31"))
    );
    assert!(month_bounds("2024-13").is_err());
}

#[test]
fn month_report_aggregates() {
    let store = setup();
    let r = MonthReport::build(&store, "2024-03").unwrap();
    assert_eq!(r.count, 6);
    assert_eq!(r.total, dec("192.70"));

    let days: Vec<u32> = r.daily.iter().map(|x| x.day).collect();
    assert_eq!(days, [1, 4, 10, 28]);
    assert_eq!(r.daily[0].amount, dec("16.50"));
    assert_eq!(r.daily[2].amount, dec("33.00"));

    // 192.70 / 4 days
    assert_eq!(r.average_daily, dec("48.18"));
    // 4 of 31 days
    assert_eq!(r.coverage_pct, 13);

    let cats: Vec<i64> = r.by_category.iter().map(|c| c.id).collect();
    assert_eq!(cats, [1, 6, 4, 2]);
    assert_eq!(r.by_category[0].amount, dec("85.70"));
    assert_eq!(r.by_category[0].hex, "#f97316");

    let top: Vec<&str> = r.top.iter().map(|e| e.description.as_str()).collect();
    assert_eq!(
        top,
        ["Electric bill", "Groceries", "Coffee beans", "Cinema", "Train ticket"]
    );
}

#[test]
fn empty_month_report() {
    let store = setup();
    let r = MonthReport::build(&store, "2023-01").unwrap();
    assert_eq!(r.count, 0);
    assert_eq!(r.total, Decimal::ZERO);
    assert_eq!(r.average_daily, Decimal::ZERO);
    assert_eq!(r.coverage_pct, 0);
    assert!(r.by_category.is_empty());
    assert!(r.top.is_empty());
}

#[test]
fn dashboard_keeps_only_spending_categories() {
    let store = setup();
    let dash = Dashboard::build(&store);
    assert_eq!(dash.total, dec("432.70"));
    assert_eq!(dash.count, 7);
    let ids: Vec<i64> = dash.by_category.iter().map(|c| c.category.id).collect();
    assert_eq!(ids, [1, 2, 4, 6, 8]);
    assert_eq!(dash.recent.len(), 5);
    assert_eq!(dash.recent[0].description, "Flight");
}
