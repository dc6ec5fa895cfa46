// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::query::{Dashboard, MonthReport};
use crate::store::{today, ExpenseStore};
use crate::utils::{category_name, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use serde_json::json;

pub fn handle(store: &ExpenseStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(store, sub)?,
        Some(("dashboard", sub)) => dashboard(store, sub)?,
        Some(("month", sub)) => month(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<()> {
    let total = store.total_expenses();
    let by_category = store.expenses_by_category();
    let payload = json!({ "total": total, "byCategory": by_category });
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &payload)? {
        return Ok(());
    }
    let settings = store.settings();
    let mut data: Vec<Vec<String>> = by_category
        .iter()
        .map(|c| {
            vec![
                c.category.name.clone(),
                c.count.to_string(),
                settings.fmt_amount(&c.total),
                share(c.total, total),
            ]
        })
        .collect();
    data.push(vec![
        "Total".into(),
        store.expenses().len().to_string(),
        settings.fmt_amount(&total),
        String::new(),
    ]);
    println!(
        "{}",
        pretty_table(&["Category", "Expenses", "Spent", "Share"], data)
    );
    Ok(())
}

fn dashboard(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<()> {
    let d = Dashboard::build(store);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &d)? {
        return Ok(());
    }
    let settings = store.settings();
    println!(
        "Total spent: {} across {} expenses",
        settings.fmt_amount(&d.total),
        d.count
    );
    if d.by_category.is_empty() {
        println!("No expenses recorded yet.");
        return Ok(());
    }
    let cats = d
        .by_category
        .iter()
        .map(|c| {
            vec![
                c.category.name.clone(),
                settings.fmt_amount(&c.total),
                share(c.total, d.total),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Category", "Spent", "Share"], cats));
    let recent = d
        .recent
        .iter()
        .map(|e| {
            vec![
                e.date.format("%b %d, %Y").to_string(),
                e.description.clone(),
                category_name(store, e.category_id),
                settings.fmt_amount(&e.amount),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Description", "Category", "Amount"], recent)
    );
    Ok(())
}

fn month(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<()> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => today().format("%Y-%m").to_string(),
    };
    let report = MonthReport::build(store, &month)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    let settings = store.settings();
    println!(
        "{} - {}",
        report.start.format("%b %-d"),
        report.end.format("%b %-d, %Y")
    );
    let overview = vec![
        vec![
            "Total expenses".into(),
            settings.fmt_amount(&report.total),
            format!("{} transactions", report.count),
        ],
        vec![
            "Average daily".into(),
            settings.fmt_amount(&report.average_daily),
            format!("{} days with expenses", report.daily.len()),
        ],
        vec![
            "Days with spending".into(),
            format!("{}%", report.coverage_pct),
            format!("of {} days", report.end.format("%-d")),
        ],
    ];
    println!("{}", pretty_table(&["Metric", "Value", "Detail"], overview));

    if report.count == 0 {
        println!("No expenses in {}.", report.month);
        return Ok(());
    }
    let cats = report
        .by_category
        .iter()
        .map(|c| {
            vec![
                c.name.clone(),
                c.hex.to_string(),
                settings.fmt_amount(&c.amount),
                share(c.amount, report.total),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Category", "Color", "Spent", "Share"], cats));

    let top = report
        .top
        .iter()
        .map(|e| {
            vec![
                e.date.format("%b %d, %Y").to_string(),
                e.description.clone(),
                category_name(store, e.category_id),
                settings.fmt_amount(&e.amount),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Top expense", "Category", "Amount"], top)
    );
    Ok(())
}

fn share(part: Decimal, total: Decimal) -> String {
    if total.is_zero() {
        return "0%".into();
    }
    format!("{:.0}%", part / total * Decimal::ONE_HUNDRED)
}
