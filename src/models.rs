// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i64,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(deserialize_with = "de_category_id")]
    pub category_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Files written by form-based clients carry `categoryId` as a numeric string.
fn de_category_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Int(n) => Ok(n),
        RawId::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid category id '{}'", s))),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub icon: Icon,
    pub color: Color,
}

/// Input for a new expense. `date` defaults to today (UTC).
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub description: String,
    pub amount: Decimal,
    pub date: Option<NaiveDate>,
    pub category_id: i64,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ExpensePatch {
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub category_id: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub icon: Icon,
    pub color: Color,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub icon: Option<Icon>,
    pub color: Option<Color>,
}

/// A category with its aggregated spending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    #[serde(flatten)]
    pub category: Category,
    pub total: Decimal,
    pub count: usize,
}

impl Expense {
    pub fn apply(&mut self, patch: ExpensePatch) {
        if let Some(d) = patch.description {
            self.description = d;
        }
        if let Some(a) = patch.amount {
            self.amount = a;
        }
        if let Some(d) = patch.date {
            self.date = d;
        }
        if let Some(c) = patch.category_id {
            self.category_id = c;
        }
        if let Some(n) = patch.notes {
            self.notes = if n.is_empty() { None } else { Some(n) };
        }
    }
}

impl Category {
    pub fn apply(&mut self, patch: CategoryPatch) {
        if let Some(n) = patch.name {
            self.name = n;
        }
        if let Some(i) = patch.icon {
            self.icon = i;
        }
        if let Some(c) = patch.color {
            self.color = c;
        }
    }
}

pub fn default_categories() -> Vec<Category> {
    [
        (1, "Food & Dining", Icon::Utensils, Color::Orange),
        (2, "Transportation", Icon::Car, Color::Blue),
        (3, "Shopping", Icon::ShoppingBag, Color::Pink),
        (4, "Entertainment", Icon::Film, Color::Purple),
        (5, "Housing", Icon::Home, Color::Green),
        (6, "Utilities", Icon::Plug, Color::Yellow),
        (7, "Healthcare", Icon::Heart, Color::Red),
        (8, "Travel", Icon::Plane, Color::Indigo),
    ]
    .into_iter()
    .map(|(id, name, icon, color)| Category {
        id,
        name: name.to_string(),
        icon,
        color,
    })
    .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Home,
    Car,
    Utensils,
    ShoppingBag,
    Film,
    Plane,
    Heart,
    Gift,
    Book,
    Coffee,
    Briefcase,
    Plug,
    Wifi,
    Phone,
    Music,
    DollarSign,
}

impl Icon {
    pub const ALL: [Icon; 16] = [
        Icon::Home,
        Icon::Car,
        Icon::Utensils,
        Icon::ShoppingBag,
        Icon::Film,
        Icon::Plane,
        Icon::Heart,
        Icon::Gift,
        Icon::Book,
        Icon::Coffee,
        Icon::Briefcase,
        Icon::Plug,
        Icon::Wifi,
        Icon::Phone,
        Icon::Music,
        Icon::DollarSign,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::Home => "home",
            Icon::Car => "car",
            Icon::Utensils => "utensils",
            Icon::ShoppingBag => "shopping-bag",
            Icon::Film => "film",
            Icon::Plane => "plane",
            Icon::Heart => "heart",
            Icon::Gift => "gift",
            Icon::Book => "book",
            Icon::Coffee => "coffee",
            Icon::Briefcase => "briefcase",
            Icon::Plug => "plug",
            Icon::Wifi => "wifi",
            Icon::Phone => "phone",
            Icon::Music => "music",
            Icon::DollarSign => "dollar-sign",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Icon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Icon::ALL
            .into_iter()
            .find(|i| i.as_str() == s)
            .ok_or_else(|| format!("Unknown icon '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "bg-red-500")]
    Red,
    #[serde(rename = "bg-orange-500")]
    Orange,
    #[serde(rename = "bg-yellow-500")]
    Yellow,
    #[serde(rename = "bg-green-500")]
    Green,
    #[serde(rename = "bg-blue-500")]
    Blue,
    #[serde(rename = "bg-indigo-500")]
    Indigo,
    #[serde(rename = "bg-purple-500")]
    Purple,
    #[serde(rename = "bg-pink-500")]
    Pink,
}

impl Color {
    pub const ALL: [Color; 8] = [
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Indigo,
        Color::Purple,
        Color::Pink,
    ];

    /// Stored token, e.g. `bg-red-500`.
    pub fn token(&self) -> &'static str {
        match self {
            Color::Red => "bg-red-500",
            Color::Orange => "bg-orange-500",
            Color::Yellow => "bg-yellow-500",
            Color::Green => "bg-green-500",
            Color::Blue => "bg-blue-500",
            Color::Indigo => "bg-indigo-500",
            Color::Purple => "bg-purple-500",
            Color::Pink => "bg-pink-500",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Orange => "Orange",
            Color::Yellow => "Yellow",
            Color::Green => "Green",
            Color::Blue => "Blue",
            Color::Indigo => "Indigo",
            Color::Purple => "Purple",
            Color::Pink => "Pink",
        }
    }

    /// Chart color for this token.
    pub fn hex(&self) -> &'static str {
        match self {
            Color::Red => "#ef4444",
            Color::Orange => "#f97316",
            Color::Yellow => "#eab308",
            Color::Green => "#22c55e",
            Color::Blue => "#3b82f6",
            Color::Indigo => "#6366f1",
            Color::Purple => "#a855f7",
            Color::Pink => "#ec4899",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Color {
    type Err = String;

    /// Accepts the label (`red`, case-insensitive) or the token (`bg-red-500`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::ALL
            .into_iter()
            .find(|c| c.token() == s || c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown color '{}'", s))
    }
}
