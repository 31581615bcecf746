//! Domain types for health-metrics tracking.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ProfileError;
use crate::week::WeekWindow;

/// Biological sex used by the BMR formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            _ => Err(format!("unknown gender: {}", s)),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

/// User profile: physical stats and weekly goal inputs.
///
/// Owned by the profile store; read-only to the calculation modules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub gender: Gender,
    /// Age in years.
    pub age: u32,
    /// Height in centimeters.
    pub height_cm: f64,
    /// Current bodyweight in kilograms.
    pub current_weight_kg: f64,
    /// Body fat percentage, when known from a measurement.
    #[serde(default)]
    pub body_fat_pct: Option<f64>,
    /// Daily calorie intake target in kcal.
    pub daily_calories_target: f64,
    /// Daily step count goal.
    pub daily_steps_goal: u32,
    /// Goal bodyweight in kilograms.
    #[serde(default)]
    pub target_weight_kg: Option<f64>,
}

impl UserProfile {
    /// Checks the numeric contract on profile values.
    ///
    /// Calculation modules assume a validated profile; callers must check
    /// this at the load boundary.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.age == 0 {
            return Err(ProfileError::BadAge(self.age));
        }
        if self.height_cm <= 0.0 {
            return Err(ProfileError::BadHeight(self.height_cm));
        }
        if self.current_weight_kg <= 0.0 {
            return Err(ProfileError::BadWeight(self.current_weight_kg));
        }
        if let Some(bf) = self.body_fat_pct {
            if bf <= 0.0 || bf >= 100.0 {
                return Err(ProfileError::BadBodyFat(bf));
            }
        }
        if self.daily_calories_target < 0.0 {
            return Err(ProfileError::BadCaloriesTarget(self.daily_calories_target));
        }
        if let Some(tw) = self.target_weight_kg {
            if tw <= 0.0 {
                return Err(ProfileError::BadTargetWeight(tw));
            }
        }
        Ok(())
    }

    /// Weekly calorie target: daily target over a 7-day week.
    pub fn weekly_calories_target(&self) -> f64 {
        self.daily_calories_target * 7.0
    }

    /// Weekly step goal: daily goal over a 7-day week.
    pub fn weekly_steps_goal(&self) -> u32 {
        self.daily_steps_goal * 7
    }
}

/// One day's log entry. Each metric is independently optional: a day may
/// have zero, one, two, or all three logged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyLog {
    pub date: NaiveDate,
    /// Morning bodyweight in kilograms.
    #[serde(default)]
    pub weight_kg: Option<f64>,
    /// Calorie intake in kcal.
    #[serde(default)]
    pub calories: Option<f64>,
    /// Step count.
    #[serde(default)]
    pub steps: Option<u32>,
    /// Last-modified timestamp, for display only; aggregation works at day
    /// granularity.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DailyLog {
    /// True when no metric is logged at all.
    pub fn is_empty(&self) -> bool {
        self.weight_kg.is_none() && self.calories.is_none() && self.steps.is_none()
    }
}

/// A user-entered forecast for a future day: explicit calorie/step
/// pre-commitments for dates not yet reached. Not a recorded actual log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedDay {
    pub date: NaiveDate,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub steps: Option<u32>,
}

impl PlannedDay {
    /// A planned day with neither metric set is semantically empty and
    /// should be removed, not retained.
    pub fn is_empty(&self) -> bool {
        self.calories.is_none() && self.steps.is_none()
    }
}

/// Container over daily logs, keyed by date.
///
/// Accepts a chronologically unordered collection and keeps at most one
/// entry per date (last write wins). All date filtering and ordering happens
/// here; callers never sort.
#[derive(Debug, Clone, Default)]
pub struct LogBook {
    entries: BTreeMap<NaiveDate, DailyLog>,
}

impl LogBook {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Builds a log book from an unordered list of entries.
    ///
    /// Duplicate dates should not occur (the log store enforces one entry
    /// per day), but are tolerated defensively: the later entry in the input
    /// replaces the earlier one.
    pub fn from_entries(entries: Vec<DailyLog>) -> Self {
        let mut map = BTreeMap::new();
        for entry in entries {
            map.insert(entry.date, entry);
        }
        Self { entries: map }
    }

    /// Looks up the entry for a specific date.
    pub fn entry_for(&self, date: NaiveDate) -> Option<&DailyLog> {
        self.entries.get(&date)
    }

    /// Entries within a week window, ascending by date.
    pub fn entries_in(&self, window: &WeekWindow) -> Vec<&DailyLog> {
        self.entries
            .range(window.start..=window.end)
            .map(|(_, e)| e)
            .collect()
    }

    /// All entries, ascending by date.
    pub fn iter(&self) -> impl Iterator<Item = &DailyLog> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First and last logged dates, when any entry exists.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.entries.keys().next()?;
        let last = self.entries.keys().next_back()?;
        Some((*first, *last))
    }
}
