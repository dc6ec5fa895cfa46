// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use expensetrackr::models::{
    CategoryPatch, Color, ExpensePatch, Icon, NewCategory, NewExpense,
};
use expensetrackr::notify::{Notice, Severity};
use expensetrackr::storage::{MemoryStorage, Storage, CATEGORIES_KEY, EXPENSES_KEY};
use expensetrackr::transfer::import_json;
use expensetrackr::{ExpenseStore, StoreError};
use rust_decimal::Decimal;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn new_expense(desc: &str, amount: &str, date: &str, category_id: i64) -> NewExpense {
    NewExpense {
        description: desc.into(),
        amount: dec(amount),
        date: Some(d(date)),
        category_id,
        notes: None,
    }
}

fn fresh() -> ExpenseStore {
    ExpenseStore::open(MemoryStorage::new()).unwrap()
}

#[test]
fn seeds_default_categories_and_no_expenses() {
    let store = fresh();
    assert!(store.expenses().is_empty());
    let names: Vec<&str> = store.categories().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "Food & Dining",
            "Transportation",
            "Shopping",
            "Entertainment",
            "Housing",
            "Utilities",
            "Healthcare",
            "Travel"
        ]
    );
    let ids: Vec<i64> = store.categories().iter().map(|c| c.id).collect();
    assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    assert_eq!(store.total_expenses(), Decimal::ZERO);
}

#[test]
fn coffee_scenario_totals_and_grouping() {
    let mut store = fresh();
    store
        .add_expense(new_expense("Coffee", "4.50", "2024-01-05", 1))
        .unwrap();

    assert_eq!(store.total_expenses(), dec("4.50"));
    let groups = store.expenses_by_category();
    assert_eq!(groups.len(), 8);
    let food = groups.iter().find(|g| g.category.id == 1).unwrap();
    assert_eq!(food.total, dec("4.50"));
    assert_eq!(food.count, 1);
    for g in groups.iter().filter(|g| g.category.id != 1) {
        assert_eq!(g.total, Decimal::ZERO);
        assert_eq!(g.count, 0);
    }
}

#[test]
fn total_is_sum_of_all_added_amounts() {
    let mut store = fresh();
    let amounts = ["1.10", "2.25", "100", "0.01", "19.99"];
    for (i, a) in amounts.iter().enumerate() {
        store
            .add_expense(new_expense("item", a, "2024-02-01", (i as i64 % 8) + 1))
            .unwrap();
    }
    let expected: Decimal = amounts.iter().map(|a| dec(a)).sum();
    assert_eq!(store.total_expenses(), expected);
}

#[test]
fn add_assigns_unique_ids_and_prepends() {
    let mut store = fresh();
    let a = store
        .add_expense(new_expense("first", "1", "2024-01-01", 1))
        .unwrap();
    let b = store
        .add_expense(new_expense("second", "2", "2024-01-01", 1))
        .unwrap();
    assert_ne!(a.id, b.id);
    assert!(b.id > a.id);
    assert_eq!(store.expenses()[0].id, b.id);
    assert_eq!(store.expenses()[1].id, a.id);
}

#[test]
fn add_defaults_date_to_today() {
    let mut store = fresh();
    let e = store
        .add_expense(NewExpense {
            description: "Lunch".into(),
            amount: dec("12"),
            date: None,
            category_id: 1,
            notes: Some("  ".into()),
        })
        .unwrap();
    let today = expensetrackr::store::today();
    let lag = (today - e.date).num_days();
    assert!((0..=1).contains(&lag));
    assert_eq!(e.notes, None);
}

#[test]
fn add_rejects_invalid_input_without_mutating() {
    let mut store = fresh();
    let cases = [
        new_expense("   ", "5", "2024-01-01", 1),
        new_expense("Taxi", "0", "2024-01-01", 2),
        new_expense("Taxi", "-3", "2024-01-01", 2),
        new_expense("Taxi", "3", "2024-01-01", 999),
    ];
    for input in cases {
        let err = store.add_expense(input).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }
    assert!(store.expenses().is_empty());
}

#[test]
fn update_merges_fields_and_ignores_unknown_id() {
    let mut store = fresh();
    let e = store
        .add_expense(new_expense("Bus", "2.75", "2024-03-01", 2))
        .unwrap();

    let updated = store
        .update_expense(
            e.id,
            ExpensePatch {
                amount: Some(dec("3.00")),
                notes: Some("monthly pass top-up".into()),
                ..Default::default()
            },
        )
        .unwrap()
        .unwrap();
    assert_eq!(updated.description, "Bus");
    assert_eq!(updated.amount, dec("3.00"));
    assert_eq!(updated.date, d("2024-03-01"));
    assert_eq!(updated.notes.as_deref(), Some("monthly pass top-up"));
    assert_eq!(store.expense_by_id(e.id), Some(&updated));

    let before = store.expenses().to_vec();
    let none = store
        .update_expense(
            e.id + 1000,
            ExpensePatch {
                amount: Some(dec("9")),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(none.is_none());
    assert_eq!(store.expenses(), before.as_slice());
}

#[test]
fn update_validates_merged_record() {
    let mut store = fresh();
    let e = store
        .add_expense(new_expense("Bus", "2.75", "2024-03-01", 2))
        .unwrap();
    let err = store
        .update_expense(
            e.id,
            ExpensePatch {
                category_id: Some(42),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(store.expense_by_id(e.id).unwrap().category_id, 2);
}

#[test]
fn delete_expense_is_idempotent() {
    let mut store = fresh();
    let e = store
        .add_expense(new_expense("Movie", "15", "2024-03-02", 4))
        .unwrap();
    assert!(store.delete_expense(e.id).unwrap());
    assert!(!store.delete_expense(e.id).unwrap());
    assert!(store.expenses().is_empty());
}

#[test]
fn delete_category_in_use_is_refused() {
    let mut store = fresh();
    store
        .add_expense(new_expense("Coffee", "4.50", "2024-01-05", 1))
        .unwrap();
    let expenses_before = store.expenses().to_vec();
    let categories_before = store.categories().to_vec();

    assert!(!store.delete_category(1).unwrap());
    assert!(store.category_by_id(1).is_some());
    assert_eq!(store.expenses(), expenses_before.as_slice());
    assert_eq!(store.categories(), categories_before.as_slice());
}

#[test]
fn delete_category_unused_succeeds() {
    let mut store = fresh();
    store
        .add_expense(new_expense("Coffee", "4.50", "2024-01-05", 1))
        .unwrap();
    assert!(store.delete_category(8).unwrap());
    assert!(store.category_by_id(8).is_none());
    assert_eq!(store.categories().len(), 7);
    assert_eq!(store.expenses_by_category().len(), 7);
}

#[test]
fn delete_category_checks_live_expenses() {
    let mut store = fresh();
    let e = store
        .add_expense(new_expense("Flight", "320", "2024-04-01", 8))
        .unwrap();
    assert!(!store.delete_category(8).unwrap());
    store
        .update_expense(
            e.id,
            ExpensePatch {
                category_id: Some(3),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(store.delete_category(8).unwrap());
}

#[test]
fn category_add_update_and_lookup() {
    let mut store = fresh();
    let c = store
        .add_category(NewCategory {
            name: "Books".into(),
            icon: Icon::Book,
            color: Color::Purple,
        })
        .unwrap();
    assert!(c.id > 8);
    assert_eq!(store.categories().last().unwrap().id, c.id);

    let updated = store
        .update_category(
            c.id,
            CategoryPatch {
                color: Some(Color::Red),
                ..Default::default()
            },
        )
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Books");
    assert_eq!(updated.color, Color::Red);
    assert_eq!(store.category_by_id(c.id), Some(&updated));
    assert!(store.category_by_id(-1).is_none());

    let err = store
        .add_category(NewCategory {
            name: " ".into(),
            icon: Icon::Gift,
            color: Color::Pink,
        })
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
}

#[test]
fn recent_expenses_sorted_and_limited() {
    let mut store = fresh();
    store
        .add_expense(new_expense("early", "1", "2024-01-01", 1))
        .unwrap();
    store
        .add_expense(new_expense("late", "2", "2024-01-10", 1))
        .unwrap();
    store
        .add_expense(new_expense("middle", "3", "2024-01-05", 1))
        .unwrap();

    let one = store.recent_expenses(1);
    assert_eq!(one.len(), 1);
    assert_eq!(one[0].date, d("2024-01-10"));

    let all = store.recent_expenses(50);
    let dates: Vec<NaiveDate> = all.iter().map(|e| e.date).collect();
    assert_eq!(dates, [d("2024-01-10"), d("2024-01-05"), d("2024-01-01")]);
}

#[test]
fn recent_expenses_keep_collection_order_on_equal_dates() {
    let mut store = fresh();
    store
        .add_expense(new_expense("first", "1", "2024-02-02", 1))
        .unwrap();
    store
        .add_expense(new_expense("older", "1", "2024-02-01", 1))
        .unwrap();
    store
        .add_expense(new_expense("second", "1", "2024-02-02", 1))
        .unwrap();

    let names: Vec<&str> = store
        .recent_expenses(10)
        .iter()
        .map(|e| e.description.as_str())
        .collect();
    assert_eq!(names, ["second", "first", "older"]);
}

#[test]
fn date_range_is_inclusive() {
    let mut store = fresh();
    for day in ["2024-01-01", "2024-01-15", "2024-01-31", "2024-02-01"] {
        store.add_expense(new_expense(day, "1", day, 1)).unwrap();
    }
    let hits = store.expenses_by_date_range(d("2024-01-01"), d("2024-01-31"));
    let mut days: Vec<String> = hits.iter().map(|e| e.date.to_string()).collect();
    days.sort();
    assert_eq!(days, ["2024-01-01", "2024-01-15", "2024-01-31"]);
    assert!(store
        .expenses_by_date_range(d("2024-03-01"), d("2024-03-31"))
        .is_empty());
}

#[test]
fn notices_reach_subscribers() {
    let seen: Rc<RefCell<Vec<Notice>>> = Rc::new(RefCell::new(Vec::new()));
    let mut store = fresh();
    let sink = Rc::clone(&seen);
    store.subscribe(move |n| sink.borrow_mut().push(n.clone()));

    store
        .add_expense(new_expense("Coffee", "4.5", "2024-01-05", 1))
        .unwrap();
    store.delete_category(1).unwrap();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].title, "Expense added");
    assert_eq!(seen[0].description, "$4.50 for Coffee");
    assert_eq!(seen[0].severity, Severity::Default);
    assert_eq!(seen[1].title, "Cannot delete category");
    assert_eq!(seen[1].severity, Severity::Error);
}

#[test]
fn corrupt_storage_falls_back_to_seed() {
    let mut storage = MemoryStorage::new();
    storage.set(EXPENSES_KEY, "{not json").unwrap();
    storage.set(CATEGORIES_KEY, "[{\"id\": 1}]").unwrap();
    let store = ExpenseStore::open(storage).unwrap();
    assert!(store.expenses().is_empty());
    assert_eq!(store.categories().len(), 8);
}

struct ReadOnlyStorage(MemoryStorage);

impl Storage for ReadOnlyStorage {
    fn get(&self, key: &str) -> expensetrackr::Result<Option<String>> {
        self.0.get(key)
    }

    fn set(&mut self, _key: &str, _value: &str) -> expensetrackr::Result<()> {
        Err(StoreError::Storage("disk full".into()))
    }

    fn remove(&mut self, _key: &str) -> expensetrackr::Result<()> {
        Err(StoreError::Storage("disk full".into()))
    }
}

#[test]
fn failed_write_leaves_state_unchanged() {
    let mut store = ExpenseStore::open(ReadOnlyStorage(MemoryStorage::new())).unwrap();
    let err = store
        .add_expense(new_expense("Coffee", "4.50", "2024-01-05", 1))
        .unwrap_err();
    assert!(matches!(err, StoreError::Storage(_)));
    assert!(store.expenses().is_empty());

    assert!(store.delete_category(2).is_err());
    assert_eq!(store.categories().len(), 8);
}

#[test]
fn add_after_importing_max_id_does_not_overflow() {
    let mut store = fresh();
    import_json(
        &mut store,
        &format!(
            r#"{{"expenses": [{{"id": {}, "description": "Edge", "amount": "1",
                "date": "2024-01-01", "categoryId": 1}}],
               "categories": [{{"id": {}, "name": "Edge", "icon": "gift", "color": "bg-pink-500"}}]}}"#,
            i64::MAX,
            i64::MAX
        ),
    )
    .unwrap();

    let e = store
        .add_expense(new_expense("After", "2", "2024-01-02", i64::MAX))
        .unwrap();
    assert_ne!(e.id, i64::MAX);
    assert_eq!(store.expenses().len(), 2);

    let c = store
        .add_category(NewCategory {
            name: "Pets".into(),
            icon: Icon::Heart,
            color: Color::Green,
        })
        .unwrap();
    assert_ne!(c.id, i64::MAX);
    assert_eq!(store.categories().len(), 2);
}

/// Removal of the categories key fails; everything else works.
struct StuckCategories(MemoryStorage);

impl Storage for StuckCategories {
    fn get(&self, key: &str) -> expensetrackr::Result<Option<String>> {
        self.0.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> expensetrackr::Result<()> {
        self.0.set(key, value)
    }

    fn remove(&mut self, key: &str) -> expensetrackr::Result<()> {
        if key == CATEGORIES_KEY {
            return Err(StoreError::Storage("locked".into()));
        }
        self.0.remove(key)
    }
}

#[test]
fn partial_reset_keeps_memory_in_step_with_storage() {
    let mut store = ExpenseStore::open(StuckCategories(MemoryStorage::new())).unwrap();
    store
        .add_expense(new_expense("Coffee", "4.50", "2024-01-05", 1))
        .unwrap();
    store.delete_category(8).unwrap();

    assert!(matches!(store.reset(), Err(StoreError::Storage(_))));
    assert!(store.expenses().is_empty());
    assert_eq!(store.categories().len(), 7);
}
