#![allow(dead_code)]

use std::collections::HashSet;

use chrono::NaiveDate;
use parking_lot::Mutex;
use prod_timeline::db::repositories::LocalRepository;
use prod_timeline::models::ScheduledItem;

/// Process environment is global; tests touching it take this lock.
static ENV_LOCK: Mutex<()> = Mutex::new(());

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub fn item(id: &str, start: NaiveDate, end: NaiveDate) -> ScheduledItem {
    ScheduledItem::scheduled(id, format!("Work order {}", id), start, end)
}

/// A small shop-floor week: two overlapping jobs, one follow-up that fits
/// after the first, an undated job and one far in the future.
pub fn shop_floor() -> Vec<ScheduledItem> {
    vec![
        item("wo-100", d(2024, 1, 2), d(2024, 1, 4)),
        item("wo-101", d(2024, 1, 3), d(2024, 1, 9)),
        item("wo-102", d(2024, 1, 5), d(2024, 1, 6)),
        ScheduledItem::unscheduled("wo-103", "Awaiting material"),
        item("wo-104", d(2024, 6, 3), d(2024, 6, 7)),
    ]
}

pub fn shop_floor_repo() -> LocalRepository {
    LocalRepository::with_items(shop_floor())
}

/// Run `f` with environment variables set (`Some`) or removed (`None`),
/// restoring the previous values afterwards, even on panic.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock();
    let _restore = EnvRestore::apply(changes);
    f()
}

struct EnvRestore {
    saved: Vec<(String, Option<String>)>,
}

impl EnvRestore {
    fn apply(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let saved = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect();

        for (key, value) in changes {
            set_or_remove(key, *value);
        }
        Self { saved }
    }
}

impl Drop for EnvRestore {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..) {
            set_or_remove(&key, value.as_deref());
        }
    }
}

fn set_or_remove(key: &str, value: Option<&str>) {
    match value {
        Some(v) => std::env::set_var(key, v),
        None => std::env::remove_var(key),
    }
}
