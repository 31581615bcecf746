//! JSON-file repositories for profile, daily logs, and planned days.
//!
//! The wire format lives entirely in this module: dates are serialized as
//! ISO `YYYY-MM-DD` strings and rehydrated into `NaiveDate` here, so the
//! calculation modules only ever see materialized date values. The
//! planned-days store additionally prunes entries whose date has passed and
//! entries with no metric set, on every load.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::warn;

use crate::domain::{DailyLog, LogBook, PlannedDay, UserProfile};
use crate::error::StoreError;
use crate::metabolism::MAX_SLIDER_STEPS;

fn read_file(path: &Path) -> Result<String, StoreError> {
    if !path.exists() {
        return Err(StoreError::FileNotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_json<T: serde::de::DeserializeOwned>(path: &Path, raw: &str) -> Result<T, StoreError> {
    serde_json::from_str(raw).map_err(|source| StoreError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads and validates the user profile.
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<UserProfile, StoreError> {
    let path = path.as_ref();
    let raw = read_file(path)?;
    let profile: UserProfile = parse_json(path, &raw)?;
    profile.validate()?;
    Ok(profile)
}

/// Loads the full set of daily logs into a [`LogBook`].
///
/// The file is an unordered JSON array; ordering and duplicate-date
/// resolution happen in the book. Entries with no metric at all are dropped
/// with a warning.
pub fn load_logs<P: AsRef<Path>>(path: P) -> Result<LogBook, StoreError> {
    let path = path.as_ref();
    let raw = read_file(path)?;
    let entries: Vec<DailyLog> = parse_json(path, &raw)?;

    let mut kept = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry.is_empty() {
            warn!("skipping log for {} with no metrics", entry.date);
            continue;
        }
        // Values beyond the slider range can only come from hand-edited
        // files; keep them, but flag them.
        if entry.steps.is_some_and(|s| s > MAX_SLIDER_STEPS) {
            warn!(
                "log for {} has {} steps, above the input range of {}",
                entry.date,
                entry.steps.unwrap_or(0),
                MAX_SLIDER_STEPS
            );
        }
        kept.push(entry);
    }
    Ok(LogBook::from_entries(kept))
}

/// Repository for the ephemeral planned-days forecast list.
pub struct PlannedDayStore {
    path: PathBuf,
}

impl PlannedDayStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Loads planned days, pruning past-dated and empty entries.
    ///
    /// A missing file is an empty plan, not an error: the list is an
    /// ephemeral client-side forecast.
    pub fn load(&self, today: NaiveDate) -> Result<Vec<PlannedDay>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = read_file(&self.path)?;
        let entries: Vec<PlannedDay> = parse_json(&self.path, &raw)?;

        let mut kept = Vec::with_capacity(entries.len());
        for entry in entries {
            if entry.date < today {
                warn!("pruning planned day in the past: {}", entry.date);
                continue;
            }
            if entry.is_empty() {
                warn!("pruning empty planned day: {}", entry.date);
                continue;
            }
            kept.push(entry);
        }
        Ok(kept)
    }

    /// Persists the planned-day list, overwriting the previous contents.
    pub fn save(&self, planned: &[PlannedDay]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(planned).map_err(|source| {
            StoreError::InvalidJson {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProfileError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_profile_ok() {
        let file = write_temp(
            r#"{
                "gender": "male",
                "age": 30,
                "height_cm": 180.0,
                "current_weight_kg": 80.0,
                "daily_calories_target": 2000.0,
                "daily_steps_goal": 8000
            }"#,
        );
        let profile = load_profile(file.path()).unwrap();
        assert_eq!(profile.age, 30);
        assert_eq!(profile.body_fat_pct, None);
    }

    #[test]
    fn test_load_profile_rejects_invalid_values() {
        let file = write_temp(
            r#"{
                "gender": "female",
                "age": 30,
                "height_cm": -5.0,
                "current_weight_kg": 60.0,
                "daily_calories_target": 1800.0,
                "daily_steps_goal": 9000
            }"#,
        );
        let err = load_profile(file.path()).unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidProfile(ProfileError::BadHeight(_))
        ));
    }

    #[test]
    fn test_load_profile_missing_file() {
        let err = load_profile("/nonexistent/profile.json").unwrap_err();
        assert!(matches!(err, StoreError::FileNotFound(_)));
    }

    #[test]
    fn test_load_logs_drops_empty_entries() {
        let file = write_temp(
            r#"[
                {"date": "2024-06-03", "calories": 2100.0, "steps": 8000},
                {"date": "2024-06-04"},
                {"date": "2024-06-05", "weight_kg": 79.5}
            ]"#,
        );
        let book = load_logs(file.path()).unwrap();
        assert_eq!(book.len(), 2);
        assert!(book.entry_for(date(2024, 6, 4)).is_none());
        assert_eq!(
            book.entry_for(date(2024, 6, 3)).unwrap().calories,
            Some(2100.0)
        );
    }

    #[test]
    fn test_load_logs_malformed_json() {
        let file = write_temp("not json");
        assert!(matches!(
            load_logs(file.path()).unwrap_err(),
            StoreError::InvalidJson { .. }
        ));
    }

    #[test]
    fn test_planned_store_missing_file_is_empty_plan() {
        let store = PlannedDayStore::new("/nonexistent/planned.json");
        assert!(store.load(date(2024, 6, 6)).unwrap().is_empty());
    }

    #[test]
    fn test_planned_store_prunes_past_and_empty() {
        let file = write_temp(
            r#"[
                {"date": "2024-06-01", "calories": 1800.0},
                {"date": "2024-06-06"},
                {"date": "2024-06-07", "steps": 12000}
            ]"#,
        );
        let store = PlannedDayStore::new(file.path());
        let planned = store.load(date(2024, 6, 6)).unwrap();

        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].date, date(2024, 6, 7));
        assert_eq!(planned[0].steps, Some(12000));
    }

    #[test]
    fn test_planned_store_round_trip_preserves_dates() {
        let file = NamedTempFile::new().unwrap();
        let store = PlannedDayStore::new(file.path());
        let planned = vec![
            PlannedDay {
                date: date(2024, 6, 7),
                calories: Some(1900.0),
                steps: None,
            },
            PlannedDay {
                date: date(2024, 6, 8),
                calories: None,
                steps: Some(11_000),
            },
        ];

        store.save(&planned).unwrap();
        let loaded = store.load(date(2024, 6, 6)).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].date, date(2024, 6, 7));
        assert_eq!(loaded[0].calories, Some(1900.0));
        assert_eq!(loaded[1].steps, Some(11_000));
    }
}
