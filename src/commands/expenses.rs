// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Expense, ExpensePatch, NewExpense};
use crate::query::{ExpenseFilter, SortDirection, SortField};
use crate::store::ExpenseStore;
use crate::utils::{category_name, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{anyhow, Context, Result};
use serde::Serialize;

pub fn handle(store: &mut ExpenseStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("recent", sub)) => recent(store, sub)?,
        Some(("range", sub)) => range(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut ExpenseStore, sub: &clap::ArgMatches) -> Result<()> {
    let description = sub
        .get_one::<String>("description")
        .cloned()
        .unwrap_or_default();
    let amount = parse_decimal(
        sub.get_one::<String>("amount")
            .map(String::as_str)
            .unwrap_or_default(),
    )?;
    let category_id = *sub
        .get_one::<i64>("category")
        .context("category is required")?;
    let date = sub
        .get_one::<String>("date")
        .map(|s| parse_date(s))
        .transpose()?;
    let notes = sub.get_one::<String>("notes").cloned();

    let e = store
        .add_expense(NewExpense {
            description,
            amount,
            date,
            category_id,
            notes,
        })
        .context("Could not add expense")?;
    println!("Recorded expense #{} on {}", e.id, e.date);
    Ok(())
}

fn edit(store: &mut ExpenseStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("id is required")?;
    let patch = ExpensePatch {
        description: sub.get_one::<String>("description").cloned(),
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_decimal(s))
            .transpose()?,
        date: sub
            .get_one::<String>("date")
            .map(|s| parse_date(s))
            .transpose()?,
        category_id: sub.get_one::<i64>("category").copied(),
        notes: sub.get_one::<String>("notes").cloned(),
    };
    match store
        .update_expense(id, patch)
        .with_context(|| format!("Could not update expense #{}", id))?
    {
        Some(_) => {}
        None => println!("No expense with id {}", id),
    }
    Ok(())
}

fn rm(store: &mut ExpenseStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("id is required")?;
    if !store.delete_expense(id)? {
        println!("No expense with id {}", id);
    }
    Ok(())
}

#[derive(Serialize)]
pub struct ExpenseRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub amount: String,
    pub category: String,
    pub notes: String,
}

fn to_rows(store: &ExpenseStore, expenses: &[&Expense]) -> Vec<ExpenseRow> {
    expenses
        .iter()
        .map(|e| ExpenseRow {
            id: e.id,
            date: e.date.to_string(),
            description: e.description.clone(),
            amount: format!("{:.2}", e.amount),
            category: category_name(store, e.category_id),
            notes: e.notes.clone().unwrap_or_default(),
        })
        .collect()
}

fn print_rows(store: &ExpenseStore, sub: &clap::ArgMatches, data: &[ExpenseRow]) -> Result<()> {
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let symbol = store.settings().currency_symbol();
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.date.clone(),
                r.description.clone(),
                format!("{}{}", symbol, r.amount),
                r.category.clone(),
                r.notes.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Date", "Description", "Amount", "Category", "Notes"],
            rows
        )
    );
    Ok(())
}

pub fn filter_from_args(sub: &clap::ArgMatches) -> Result<ExpenseFilter> {
    let sort = sub
        .get_one::<String>("sort")
        .map(|s| s.parse::<SortField>())
        .transpose()
        .map_err(|e| anyhow!(e))?
        .unwrap_or_default();
    Ok(ExpenseFilter {
        search: sub.get_one::<String>("search").cloned(),
        category_id: sub.get_one::<i64>("category").copied(),
        from: sub
            .get_one::<String>("from")
            .map(|s| parse_date(s))
            .transpose()?,
        to: sub
            .get_one::<String>("to")
            .map(|s| parse_date(s))
            .transpose()?,
        sort,
        direction: if sub.get_flag("asc") {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        },
        limit: sub.get_one::<usize>("limit").copied(),
    })
}

pub fn query_rows(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<Vec<ExpenseRow>> {
    let filter = filter_from_args(sub)?;
    let selected = filter.apply(store.expenses());
    Ok(to_rows(store, &selected))
}

fn list(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(store, sub)?;
    print_rows(store, sub, &data)
}

fn recent(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<()> {
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(5);
    let data = to_rows(store, &store.recent_expenses(limit));
    print_rows(store, sub, &data)
}

fn range(store: &ExpenseStore, sub: &clap::ArgMatches) -> Result<()> {
    let from = parse_date(sub.get_one::<String>("from").context("--from is required")?)?;
    let to = parse_date(sub.get_one::<String>("to").context("--to is required")?)?;
    let data = to_rows(store, &store.expenses_by_date_range(from, to));
    print_rows(store, sub, &data)
}
