// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Default,
    Destructive,
    Error,
}

/// User-facing signal emitted after a store mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notice {
    pub fn new(title: &str, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            severity,
        }
    }
}

pub type Subscriber = Box<dyn FnMut(&Notice)>;

#[derive(Default)]
pub struct Notifier {
    subscribers: Vec<Subscriber>,
}

impl Notifier {
    pub fn subscribe(&mut self, f: Subscriber) {
        self.subscribers.push(f);
    }

    pub fn emit(&mut self, notice: Notice) {
        match notice.severity {
            Severity::Error => {
                tracing::warn!(title = %notice.title, "{}", notice.description)
            }
            _ => tracing::info!(title = %notice.title, "{}", notice.description),
        }
        for s in self.subscribers.iter_mut() {
            s(&notice);
        }
    }
}
