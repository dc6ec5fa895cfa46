// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// User preferences, stored under the `settings` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub name: String,
    pub currency: String,
    /// When false the CLI stops printing notices (they are still logged).
    pub notifications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: "User".to_string(),
            currency: "USD".to_string(),
            notifications: true,
        }
    }
}

impl Settings {
    pub fn currency_symbol(&self) -> String {
        match self.currency.to_uppercase().as_str() {
            "USD" => "$".to_string(),
            "EUR" => "€".to_string(),
            "GBP" => "£".to_string(),
            "JPY" => "¥".to_string(),
            other => format!("{} ", other),
        }
    }

    pub fn fmt_amount(&self, d: &Decimal) -> String {
        format!("{}{:.2}", self.currency_symbol(), d)
    }
}
