// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{CategoryPatch, Color, Icon, NewCategory};
use crate::store::ExpenseStore;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{anyhow, bail, Context, Result};

pub fn handle(store: &mut ExpenseStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").cloned().unwrap_or_default();
            let icon = parse_icon(sub.get_one::<String>("icon"))?.unwrap_or(Icon::DollarSign);
            let color = parse_color(sub.get_one::<String>("color"))?.unwrap_or(Color::Blue);
            let c = store
                .add_category(NewCategory { name, icon, color })
                .context("Could not add category")?;
            println!("Added category #{} '{}'", c.id, c.name);
        }
        Some(("edit", sub)) => {
            let id = *sub.get_one::<i64>("id").context("id is required")?;
            let patch = CategoryPatch {
                name: sub.get_one::<String>("name").cloned(),
                icon: parse_icon(sub.get_one::<String>("icon"))?,
                color: parse_color(sub.get_one::<String>("color"))?,
            };
            if store.update_category(id, patch)?.is_none() {
                println!("No category with id {}", id);
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("id is required")?;
            if !store.delete_category(id)? {
                bail!(
                    "Category #{} is being used by existing expenses and cannot be deleted",
                    id
                );
            }
        }
        Some(("list", sub)) => {
            let data = store.expenses_by_category();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let settings = store.settings();
                let rows = data
                    .iter()
                    .map(|c| {
                        vec![
                            c.category.id.to_string(),
                            c.category.name.clone(),
                            c.category.icon.to_string(),
                            c.category.color.to_string(),
                            c.count.to_string(),
                            settings.fmt_amount(&c.total),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Id", "Category", "Icon", "Color", "Expenses", "Total"], rows)
                );
            }
        }
        Some(("show", sub)) => {
            let id = *sub.get_one::<i64>("id").context("id is required")?;
            let entry = store
                .expenses_by_category()
                .into_iter()
                .find(|c| c.category.id == id)
                .ok_or_else(|| anyhow!("Category {} not found", id))?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &entry)? {
                let settings = store.settings();
                let rows = vec![
                    vec!["Name".into(), entry.category.name.clone()],
                    vec!["Icon".into(), entry.category.icon.to_string()],
                    vec![
                        "Color".into(),
                        format!("{} ({})", entry.category.color, entry.category.color.hex()),
                    ],
                    vec!["Expenses".into(), entry.count.to_string()],
                    vec!["Total".into(), settings.fmt_amount(&entry.total)],
                ];
                println!("{}", pretty_table(&["Field", "Value"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}

fn parse_icon(raw: Option<&String>) -> Result<Option<Icon>> {
    raw.map(|s| s.parse::<Icon>().map_err(|e| anyhow!(e)))
        .transpose()
}

fn parse_color(raw: Option<&String>) -> Result<Option<Color>> {
    raw.map(|s| s.parse::<Color>().map_err(|e| anyhow!(e)))
        .transpose()
}
