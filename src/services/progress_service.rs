use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::models::Track;
use crate::repositories::StateStore;

pub const VALUE_AXES: [&str; 6] = [
    "Integrity",
    "Service",
    "Curiosity",
    "Craft",
    "Community",
    "Sustainability",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBudgetItem {
    pub label: String,
    pub value: f64,
}

/// Three reflection prompts per track; free text, private to the learner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalPage {
    #[serde(default)]
    pub prompt1: String,
    #[serde(default)]
    pub prompt2: String,
    #[serde(default)]
    pub prompt3: String,
}

/// Learner state on top of a [`StateStore`]: completion flags, scratchpad
/// notes, the values radar, the time budget, and journal pages. Keys keep
/// the old app's `wp2.` family, now scoped per track where the old keys
/// collided across tracks.
#[derive(Clone)]
pub struct ProgressService {
    store: Arc<dyn StateStore>,
}

impl ProgressService {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    fn done_key(track: Track, module_key: &str) -> String {
        format!("wp2.done.{}.{}", track.as_str(), module_key)
    }

    pub fn set_lesson_done(
        &self,
        track: Track,
        module_key: &str,
        lesson_id: &str,
        done: bool,
    ) -> Result<()> {
        let key = Self::done_key(track, module_key);
        let mut flags: BTreeMap<String, bool> = match self.store.load(&key)? {
            Some(value) => serde_json::from_value(value)?,
            None => BTreeMap::new(),
        };
        flags.insert(lesson_id.to_string(), done);
        debug!(%key, lesson_id, done, "updated completion flag");
        self.store.save(&key, &serde_json::to_value(&flags)?)?;
        Ok(())
    }

    pub fn lesson_done(&self, track: Track, module_key: &str, lesson_id: &str) -> Result<bool> {
        let key = Self::done_key(track, module_key);
        let flags: BTreeMap<String, bool> = match self.store.load(&key)? {
            Some(value) => serde_json::from_value(value)?,
            None => return Ok(false),
        };
        Ok(flags.get(lesson_id).copied().unwrap_or(false))
    }

    pub fn notes(&self) -> Result<String> {
        match self.store.load("wp2.notes")? {
            Some(Value::String(text)) => Ok(text),
            _ => Ok(String::new()),
        }
    }

    pub fn save_notes(&self, notes: &str) -> Result<()> {
        self.store.save("wp2.notes", &json!(notes))?;
        Ok(())
    }

    /// Values radar for a track. Missing state yields the neutral default of
    /// 3 on every axis; stored values are clamped to 0..=5.
    pub fn values(&self, track: Track) -> Result<BTreeMap<String, u8>> {
        let key = format!("wp2.values.{}", track.as_str());
        let mut values: BTreeMap<String, u8> = match self.store.load(&key)? {
            Some(value) => serde_json::from_value(value)?,
            None => BTreeMap::new(),
        };
        for rating in values.values_mut() {
            *rating = (*rating).min(5);
        }
        for axis in VALUE_AXES {
            values.entry(axis.to_string()).or_insert(3);
        }
        Ok(values)
    }

    pub fn set_value(&self, track: Track, axis: &str, rating: u8) -> Result<()> {
        let key = format!("wp2.values.{}", track.as_str());
        let mut values = self.values(track)?;
        values.insert(axis.to_string(), rating.min(5));
        self.store.save(&key, &serde_json::to_value(&values)?)?;
        Ok(())
    }

    pub fn time_budget(&self) -> Result<Vec<TimeBudgetItem>> {
        match self.store.load("wp2.time")? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(vec![
                TimeBudgetItem { label: "Study".to_string(), value: 6.0 },
                TimeBudgetItem { label: "Field".to_string(), value: 4.0 },
                TimeBudgetItem { label: "Community".to_string(), value: 3.0 },
                TimeBudgetItem { label: "Rest".to_string(), value: 3.0 },
            ]),
        }
    }

    pub fn save_time_budget(&self, items: &[TimeBudgetItem]) -> Result<()> {
        self.store.save("wp2.time", &serde_json::to_value(items)?)?;
        Ok(())
    }

    /// Whole-percent share of each time budget item, with the total floored
    /// at 1 so an all-zero budget reads as 0% everywhere.
    pub fn time_budget_shares(items: &[TimeBudgetItem]) -> Vec<u32> {
        let total: f64 = items.iter().map(|item| item.value.max(0.0)).sum();
        let total = total.max(1.0);
        items
            .iter()
            .map(|item| ((item.value.max(0.0) / total) * 100.0).round() as u32)
            .collect()
    }

    pub fn journal(&self, track: Track) -> Result<JournalPage> {
        let key = format!("wp2.journal.{}", track.as_str());
        match self.store.load(&key)? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(JournalPage::default()),
        }
    }

    pub fn save_journal(&self, track: Track, page: &JournalPage) -> Result<()> {
        let key = format!("wp2.journal.{}", track.as_str());
        self.store.save(&key, &serde_json::to_value(page)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use serde_json::json;

    use crate::repositories::{MemoryStore, MockStateStore};

    use super::*;

    fn service() -> ProgressService {
        ProgressService::new(Arc::new(MemoryStore::default()))
    }

    #[test]
    fn lesson_flags_round_trip_and_scope_by_track() {
        let progress = service();
        progress
            .set_lesson_done(Track::Conservation, "core", "foundations", true)
            .unwrap();

        assert!(progress
            .lesson_done(Track::Conservation, "core", "foundations")
            .unwrap());
        // same module key, different track
        assert!(!progress
            .lesson_done(Track::Nonprofit, "core", "foundations")
            .unwrap());
        assert!(!progress
            .lesson_done(Track::Conservation, "core", "ethics")
            .unwrap());
    }

    #[test]
    fn notes_default_to_empty() {
        let progress = service();
        assert_eq!(progress.notes().unwrap(), "");
        progress.save_notes("check the riffle site").unwrap();
        assert_eq!(progress.notes().unwrap(), "check the riffle site");
    }

    #[test]
    fn values_default_to_three_and_clamp() {
        let progress = service();
        let values = progress.values(Track::Teen).unwrap();
        assert_eq!(values.len(), VALUE_AXES.len());
        assert!(values.values().all(|&v| v == 3));

        progress.set_value(Track::Teen, "Craft", 9).unwrap();
        assert_eq!(progress.values(Track::Teen).unwrap()["Craft"], 5);
    }

    #[test]
    fn persisted_custom_axis_is_clamped_on_load() {
        let store = Arc::new(MemoryStore::default());
        store
            .save("wp2.values.teen", &json!({"Stewardship": 9}))
            .unwrap();

        let progress = ProgressService::new(store);
        let values = progress.values(Track::Teen).unwrap();
        assert_eq!(values["Stewardship"], 5);
        // known axes still default to neutral
        assert_eq!(values["Integrity"], 3);
    }

    #[test]
    fn time_budget_shares_round_to_whole_percents() {
        let items = vec![
            TimeBudgetItem { label: "Study".to_string(), value: 6.0 },
            TimeBudgetItem { label: "Field".to_string(), value: 4.0 },
            TimeBudgetItem { label: "Community".to_string(), value: 3.0 },
            TimeBudgetItem { label: "Rest".to_string(), value: 3.0 },
        ];
        assert_eq!(ProgressService::time_budget_shares(&items), vec![38, 25, 19, 19]);
    }

    #[test]
    fn empty_time_budget_is_all_zero_shares() {
        let items = vec![TimeBudgetItem { label: "Study".to_string(), value: 0.0 }];
        assert_eq!(ProgressService::time_budget_shares(&items), vec![0]);
    }

    #[test]
    fn journal_pages_round_trip() {
        let progress = service();
        let page = JournalPage {
            prompt1: "the confluence downtown".to_string(),
            ..JournalPage::default()
        };
        progress.save_journal(Track::Conservation, &page).unwrap();
        assert_eq!(progress.journal(Track::Conservation).unwrap(), page);
    }

    #[test]
    fn notes_write_goes_to_the_store() {
        let mut store = MockStateStore::new();
        store
            .expect_save()
            .with(eq("wp2.notes"), eq(json!("hello")))
            .times(1)
            .returning(|_, _| Ok(()));

        let progress = ProgressService::new(Arc::new(store));
        progress.save_notes("hello").unwrap();
    }

    #[test]
    fn store_errors_propagate() {
        let mut store = MockStateStore::new();
        store.expect_load().returning(|_| {
            Err(crate::repositories::StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "backend offline",
            )))
        });

        let progress = ProgressService::new(Arc::new(store));
        assert!(progress.notes().is_err());
    }
}
