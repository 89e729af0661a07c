//! Durable storage for week plans
//!
//! All weeks live in a single JSON file: week key ("2025-KW07") to weekday
//! name to a list of `["HH:MM", "HH:MM", label]` entries. The whole store is
//! rewritten after every mutation; there are no incremental writes.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::types::{format_hhmm, parse_hhmm, TimeSpan, WeekId, WeekPlan, Weekday};

/// On-disk shape, before times are parsed
type RawStore = BTreeMap<String, BTreeMap<String, Vec<(String, String, String)>>>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read plan file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed plan file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid time {value:?} in week {week}")]
    BadTime { week: String, value: String },
    #[error("unknown weekday {name:?} in week {week}")]
    UnknownDay { week: String, name: String },
    #[error("failed to encode plan data")]
    Encode {
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write plan file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug)]
pub struct PlanStore {
    path: PathBuf,
    plans: BTreeMap<String, WeekPlan>,
}

impl PlanStore {
    /// Loads the store backing `path`. A missing file is an empty store;
    /// anything unreadable in an existing file is a fatal error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                plans: BTreeMap::new(),
            });
        }

        let contents = fs::read_to_string(&path).map_err(|source| StoreError::Read {
            path: path.clone(),
            source,
        })?;
        let raw: RawStore = serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
            path: path.clone(),
            source,
        })?;

        let mut plans = BTreeMap::new();
        for (week, days) in raw {
            let mut plan = WeekPlan::new();
            for (name, tasks) in days {
                let day = Weekday::from_name(&name).ok_or_else(|| StoreError::UnknownDay {
                    week: week.clone(),
                    name: name.clone(),
                })?;
                for (start, end, label) in tasks {
                    let start = parse_hhmm(&start).map_err(|_| StoreError::BadTime {
                        week: week.clone(),
                        value: start.clone(),
                    })?;
                    let end = parse_hhmm(&end).map_err(|_| StoreError::BadTime {
                        week: week.clone(),
                        value: end.clone(),
                    })?;
                    plan.add(day, TimeSpan::from_stored(start, end, label));
                }
            }
            plans.insert(week, plan);
        }

        Ok(Self { path, plans })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The plan for `id`, created with seven empty days if absent
    pub fn get_or_create(&mut self, id: WeekId) -> &mut WeekPlan {
        self.plans.entry(id.key()).or_default()
    }

    pub fn plan(&self, id: WeekId) -> Option<&WeekPlan> {
        self.plans.get(&id.key())
    }

    pub fn week_keys(&self) -> impl Iterator<Item = &str> {
        self.plans.keys().map(String::as_str)
    }

    /// Serializes the full store back to disk. Every stored week is written
    /// with all seven weekday keys and "HH:MM" time strings. The JSON goes
    /// to a sibling temp file first and is renamed over the target, so an
    /// interrupted write cannot truncate the previous contents.
    pub fn save(&self) -> Result<(), StoreError> {
        let mut raw: RawStore = BTreeMap::new();
        for (week, plan) in &self.plans {
            let mut days = BTreeMap::new();
            for day in Weekday::ALL {
                let tasks = plan
                    .day(day)
                    .iter()
                    .map(|span| {
                        (
                            format_hhmm(span.start()),
                            format_hhmm(span.end()),
                            span.label().to_string(),
                        )
                    })
                    .collect();
                days.insert(day.name().to_string(), tasks);
            }
            raw.insert(week.clone(), days);
        }

        let json =
            serde_json::to_string_pretty(&raw).map_err(|source| StoreError::Encode { source })?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| StoreError::Write {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::parse_hhmm;

    fn span(start: &str, end: &str, label: &str) -> TimeSpan {
        TimeSpan::new(parse_hhmm(start).unwrap(), parse_hhmm(end).unwrap(), label).unwrap()
    }

    #[test]
    fn missing_file_loads_as_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlanStore::load(dir.path().join("weekplans.json")).unwrap();
        assert_eq!(store.week_keys().count(), 0);
    }

    #[test]
    fn get_or_create_returns_all_empty_week() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = PlanStore::load(dir.path().join("weekplans.json")).unwrap();
        let plan = store.get_or_create(WeekId::new(2025, 12));
        for day in Weekday::ALL {
            assert!(plan.day(day).is_empty());
        }
        assert!(store.plan(WeekId::new(2025, 12)).is_some());
    }

    #[test]
    fn save_then_load_round_trips_to_the_minute() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weekplans.json");
        let id = WeekId::new(2025, 30);

        let mut store = PlanStore::load(&path).unwrap();
        let plan = store.get_or_create(id);
        plan.add(Weekday::Monday, span("08:30", "09:45", "dentist"));
        plan.add(Weekday::Monday, span("08:30", "10:00", "call mom"));
        plan.add(Weekday::Sunday, span("19:00", "20:30", "laundry"));
        store.save().unwrap();

        let reloaded = PlanStore::load(&path).unwrap();
        assert_eq!(reloaded.plan(id), store.plan(id));
        let monday: Vec<_> = reloaded
            .plan(id)
            .unwrap()
            .day(Weekday::Monday)
            .iter()
            .map(|s| (s.start_hhmm(), s.end_hhmm(), s.label().to_string()))
            .collect();
        assert_eq!(
            monday,
            [
                ("08:30".to_string(), "09:45".to_string(), "dentist".to_string()),
                ("08:30".to_string(), "10:00".to_string(), "call mom".to_string()),
            ]
        );
    }

    #[test]
    fn save_writes_every_weekday_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weekplans.json");

        let mut store = PlanStore::load(&path).unwrap();
        store.get_or_create(WeekId::new(2026, 1));
        store.save().unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let week = raw.get("2026-KW01").unwrap().as_object().unwrap();
        assert_eq!(week.len(), 7);
        for day in Weekday::ALL {
            assert!(week.get(day.name()).unwrap().as_array().unwrap().is_empty());
        }
    }

    #[test]
    fn save_does_not_leave_a_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weekplans.json");

        let mut store = PlanStore::load(&path).unwrap();
        store.get_or_create(WeekId::new(2025, 2));
        store.save().unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weekplans.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            PlanStore::load(&path),
            Err(StoreError::Parse { .. })
        ));
    }

    #[test]
    fn bad_time_value_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weekplans.json");
        std::fs::write(
            &path,
            r#"{"2025-KW07": {"Monday": [["8 o'clock", "09:00", "vague"]]}}"#,
        )
        .unwrap();

        match PlanStore::load(&path) {
            Err(StoreError::BadTime { week, value }) => {
                assert_eq!(week, "2025-KW07");
                assert_eq!(value, "8 o'clock");
            }
            other => panic!("expected BadTime, got {other:?}"),
        }
    }

    #[test]
    fn unknown_weekday_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weekplans.json");
        std::fs::write(
            &path,
            r#"{"2025-KW07": {"Funday": [["08:00", "09:00", "party"]]}}"#,
        )
        .unwrap();

        assert!(matches!(
            PlanStore::load(&path),
            Err(StoreError::UnknownDay { .. })
        ));
    }

    #[test]
    fn stored_spans_are_not_revalidated_on_load() {
        // Hand-edited files with inverted ranges still load; validation only
        // guards the add path.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weekplans.json");
        std::fs::write(
            &path,
            r#"{"2025-KW07": {"Monday": [["10:00", "09:00", "inverted"]]}}"#,
        )
        .unwrap();

        let store = PlanStore::load(&path).unwrap();
        let plan = store.plan(WeekId::new(2025, 7)).unwrap();
        assert_eq!(plan.day(Weekday::Monday)[0].label(), "inverted");
    }
}
