//! Per-day derived metrics and weekly aggregation.
//!
//! Averages are computed only over logs where the specific field is present:
//! a day without a weigh-in does not drag the weekly average toward zero,
//! and a week with no weigh-ins reports no average at all rather than a
//! silently wrong 0. Summation contexts (maintenance, total balance) treat a
//! missing step count as 0 steps.

use serde::Serialize;

use crate::domain::{DailyLog, UserProfile};
use crate::metabolism::{base_maintenance, calculate_bmr, neat, KCAL_PER_KG};

/// One day's derived metrics. Produced only when a log exists for the day;
/// absence of a log yields no `DayMetrics`, not a zero-valued one.
#[derive(Debug, Clone, Serialize)]
pub struct DayMetrics {
    pub weight_kg: Option<f64>,
    pub calories: Option<f64>,
    pub steps: Option<u32>,
    /// Intake minus maintenance: positive = surplus, negative = deficit.
    pub calorie_balance: f64,
}

/// Aggregated view of one week of logs.
#[derive(Debug, Clone, Serialize)]
pub struct WeekSummary {
    /// Count of logs with any field present this week.
    pub total_days: usize,
    /// Average over days with a weigh-in; `None` when there are none.
    pub avg_weight: Option<f64>,
    /// This week's average weight minus the previous week's, when both
    /// weeks have weigh-ins.
    pub weight_change: Option<f64>,
    pub avg_calories: Option<f64>,
    pub avg_steps: Option<f64>,
    /// Sum of per-day calorie balances over days with logged calories.
    pub total_balance: f64,
    /// Bodyweight change implied by the total balance, in kg.
    pub estimated_weight_change: f64,
}

/// A day's maintenance calories: sedentary baseline plus NEAT from the
/// logged steps (missing steps count as 0 steps).
fn maintenance_for(log: &DailyLog, profile: &UserProfile) -> f64 {
    let bmr = calculate_bmr(
        profile.current_weight_kg,
        profile.height_cm,
        profile.age,
        profile.gender,
        profile.body_fat_pct,
    );
    base_maintenance(bmr) + neat(log.steps.unwrap_or(0))
}

/// Derives a single day's metrics from its log entry.
///
/// Returns `None` when no log exists for the day, distinguishing "no data"
/// from "zero calories logged".
pub fn day_metrics(log: Option<&DailyLog>, profile: &UserProfile) -> Option<DayMetrics> {
    let log = log?;
    let maintenance = maintenance_for(log, profile);
    Some(DayMetrics {
        weight_kg: log.weight_kg,
        calories: log.calories,
        steps: log.steps,
        calorie_balance: log.calories.unwrap_or(0.0) - maintenance,
    })
}

/// Average of a field over the logs where it is present; `None` when no log
/// carries the field.
fn average_of<F>(logs: &[&DailyLog], field: F) -> Option<f64>
where
    F: Fn(&DailyLog) -> Option<f64>,
{
    let values: Vec<f64> = logs.iter().filter_map(|log| field(log)).collect();
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Aggregates a week's logs into averages, week-over-week deltas, total
/// caloric balance, and an estimated bodyweight change.
pub fn week_summary(
    week_logs: &[&DailyLog],
    prev_week_logs: &[&DailyLog],
    profile: &UserProfile,
) -> WeekSummary {
    let avg_weight = average_of(week_logs, |log| log.weight_kg);
    let prev_avg_weight = average_of(prev_week_logs, |log| log.weight_kg);
    let weight_change = match (avg_weight, prev_avg_weight) {
        (Some(this), Some(prev)) => Some(this - prev),
        _ => None,
    };

    // Days without logged calories contribute nothing to the balance.
    let total_balance: f64 = week_logs
        .iter()
        .filter(|log| log.calories.is_some())
        .map(|log| log.calories.unwrap_or(0.0) - maintenance_for(log, profile))
        .sum();

    WeekSummary {
        total_days: week_logs.len(),
        avg_weight,
        weight_change,
        avg_calories: average_of(week_logs, |log| log.calories),
        avg_steps: average_of(week_logs, |log| log.steps.map(f64::from)),
        total_balance,
        estimated_weight_change: total_balance / KCAL_PER_KG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Gender;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn profile() -> UserProfile {
        UserProfile {
            gender: Gender::Male,
            age: 30,
            height_cm: 180.0,
            current_weight_kg: 80.0,
            body_fat_pct: None,
            daily_calories_target: 2000.0,
            daily_steps_goal: 8000,
            target_weight_kg: None,
        }
    }

    fn log(day: u32, weight: Option<f64>, calories: Option<f64>, steps: Option<u32>) -> DailyLog {
        DailyLog {
            date: date(2024, 6, day),
            weight_kg: weight,
            calories,
            steps,
            updated_at: None,
        }
    }

    // Profile above: BMR 1780, sedentary maintenance 2136.
    const MAINTENANCE: f64 = 2136.0;

    #[test]
    fn test_day_metrics_none_without_log() {
        assert!(day_metrics(None, &profile()).is_none());
    }

    #[test]
    fn test_day_metrics_balance() {
        let entry = log(3, Some(80.0), Some(2500.0), Some(8000));
        let metrics = day_metrics(Some(&entry), &profile()).unwrap();
        // Maintenance 2136 + NEAT 360 = 2496; balance 2500 - 2496 = 4.
        assert!((metrics.calorie_balance - 4.0).abs() < 0.001);
        assert_eq!(metrics.weight_kg, Some(80.0));
        assert_eq!(metrics.steps, Some(8000));
    }

    #[test]
    fn test_day_metrics_missing_fields_are_zero_for_sums() {
        // No steps, no calories: maintenance is the sedentary baseline and
        // the whole of it shows up as deficit.
        let entry = log(3, Some(80.0), None, None);
        let metrics = day_metrics(Some(&entry), &profile()).unwrap();
        assert!((metrics.calorie_balance - (0.0 - MAINTENANCE)).abs() < 0.001);
        assert_eq!(metrics.calories, None);
    }

    #[test]
    fn test_day_metrics_idempotent() {
        let entry = log(3, Some(80.0), Some(2500.0), Some(8000));
        let a = day_metrics(Some(&entry), &profile()).unwrap();
        let b = day_metrics(Some(&entry), &profile()).unwrap();
        assert_eq!(a.calorie_balance.to_bits(), b.calorie_balance.to_bits());
    }

    #[test]
    fn test_week_summary_empty() {
        let summary = week_summary(&[], &[], &profile());
        assert_eq!(summary.total_days, 0);
        assert_eq!(summary.avg_weight, None);
        assert_eq!(summary.weight_change, None);
        assert_eq!(summary.avg_calories, None);
        assert_eq!(summary.avg_steps, None);
        assert_eq!(summary.total_balance, 0.0);
        assert_eq!(summary.estimated_weight_change, 0.0);
    }

    #[test]
    fn test_week_summary_averages_skip_missing_fields() {
        let logs = vec![
            log(3, Some(80.0), Some(2000.0), Some(8000)),
            log(4, None, Some(2200.0), None),
            log(5, Some(79.0), None, Some(10_000)),
        ];
        let refs: Vec<&DailyLog> = logs.iter().collect();
        let summary = week_summary(&refs, &[], &profile());

        assert_eq!(summary.total_days, 3);
        assert!((summary.avg_weight.unwrap() - 79.5).abs() < 0.001);
        assert!((summary.avg_calories.unwrap() - 2100.0).abs() < 0.001);
        assert!((summary.avg_steps.unwrap() - 9000.0).abs() < 0.001);
    }

    #[test]
    fn test_week_summary_weight_change_needs_both_weeks() {
        let this_week = vec![log(10, Some(79.0), None, None)];
        let prev_week = vec![log(3, Some(80.0), None, None)];
        let this_refs: Vec<&DailyLog> = this_week.iter().collect();
        let prev_refs: Vec<&DailyLog> = prev_week.iter().collect();

        let summary = week_summary(&this_refs, &prev_refs, &profile());
        assert!((summary.weight_change.unwrap() - (-1.0)).abs() < 0.001);

        let summary = week_summary(&this_refs, &[], &profile());
        assert_eq!(summary.weight_change, None);
    }

    #[test]
    fn test_week_summary_total_balance_only_calorie_days() {
        let logs = vec![
            // 2496 maintenance (with 8000 steps), balance +4
            log(3, None, Some(2500.0), Some(8000)),
            // No calories: contributes nothing despite the steps.
            log(4, None, None, Some(12_000)),
            // 2136 maintenance, balance -136
            log(5, None, Some(2000.0), None),
        ];
        let refs: Vec<&DailyLog> = logs.iter().collect();
        let summary = week_summary(&refs, &[], &profile());

        assert!((summary.total_balance - (4.0 - 136.0)).abs() < 0.001);
        assert!((summary.estimated_weight_change - (-132.0 / 7700.0)).abs() < 1e-9);
    }
}
