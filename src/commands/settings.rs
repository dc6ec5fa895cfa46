// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::ExpenseStore;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(store: &mut ExpenseStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let s = store.settings();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
                let rows = vec![
                    vec!["name".into(), s.name.clone()],
                    vec![
                        "currency".into(),
                        format!("{} ({})", s.currency, s.currency_symbol().trim()),
                    ],
                    vec!["notifications".into(), s.notifications.to_string()],
                ];
                println!("{}", pretty_table(&["Setting", "Value"], rows));
            }
        }
        Some(("set", sub)) => {
            let mut s = store.settings();
            if let Some(name) = sub.get_one::<String>("name") {
                s.name = name.clone();
            }
            if let Some(ccy) = sub.get_one::<String>("currency") {
                s.currency = ccy.to_uppercase();
            }
            if let Some(on) = sub.get_one::<bool>("notifications") {
                s.notifications = *on;
            }
            store.save_settings(&s)?;
        }
        _ => {}
    }
    Ok(())
}
