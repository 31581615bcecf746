//! Remaining-day counting and goal projection for the live week.
//!
//! Calories and steps keep *independent* remaining-day counters: a user may
//! log or pre-plan one metric without the other on any given day, so the two
//! counts diverge and the projection math handles asymmetric counts per
//! metric.
//!
//! Everything here is anchored to an explicit `today` for the current
//! (live) week, regardless of which week a caller happens to be displaying.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{DailyLog, LogBook, PlannedDay, UserProfile};
use crate::metabolism::CALORIES_PER_STEP;
use crate::week::{remaining_dates, week_range};

/// A required daily average above this multiple of the daily target is
/// considered out of reach for the coarse weekly projection.
const ACHIEVABLE_FACTOR: f64 = 1.5;

/// Per-metric counts of days in the current week still needing a decision,
/// plus whether today's log already covers each metric.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RemainingDays {
    /// Days with no calorie log today and no calorie plan ahead.
    pub calorie_days: u32,
    /// Days with no step log today and no step plan ahead.
    pub step_days: u32,
    pub has_calories_log: bool,
    pub has_steps_log: bool,
}

/// Totals of the metrics logged so far in a week.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct WeekTotals {
    pub calories: f64,
    pub steps: f64,
}

impl WeekTotals {
    /// Sums the present metric values over a week's logs.
    pub fn from_logs(logs: &[&DailyLog]) -> Self {
        Self {
            calories: logs.iter().filter_map(|log| log.calories).sum(),
            steps: logs
                .iter()
                .filter_map(|log| log.steps)
                .map(f64::from)
                .sum(),
        }
    }
}

/// Record of a calorie overshoot converted into extra required steps.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DeficitAdjustment {
    /// Extra steps added to each remaining step day.
    pub additional_daily_steps: u32,
    /// The resulting total required daily steps.
    pub total_daily_steps: u32,
    /// Step days the conversion was spread over.
    pub days: u32,
}

/// Required daily averages for the rest of the current week.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionResult {
    /// Required average intake per unplanned day; `None` when no calorie
    /// days remain.
    pub required_daily_calories: Option<f64>,
    /// Required average steps per unplanned day; `None` when no step days
    /// remain.
    pub required_daily_steps: Option<u32>,
    pub unplanned_calorie_days: u32,
    pub unplanned_step_days: u32,
    /// Present when a calorie overshoot was converted into extra steps.
    pub deficit_adjustment: Option<DeficitAdjustment>,
    pub has_calories_log: bool,
    pub has_steps_log: bool,
}

/// Coarse whole-week projection that ignores planned days and per-metric
/// divergence. Used for non-current weeks and initial display; the
/// plan-aware [`remaining_targets`] is the fine-grained estimate for the
/// live week.
#[derive(Debug, Clone, Serialize)]
pub struct WeekProjection {
    pub required_daily_calories: f64,
    pub required_daily_steps: f64,
    /// Days from today through this Sunday, inclusive.
    pub remaining_days: u32,
    /// True when neither requirement exceeds 1.5× its daily target.
    pub is_achievable: bool,
}

/// Days from `today` through the Sunday of today's week, inclusive.
fn days_until_sunday(today: NaiveDate) -> i64 {
    remaining_dates(week_range(0, today).start, today).len() as i64
}

/// Planned entries still in scope for one metric: dated today through this
/// Sunday, minus a today-dated plan when today's log already resolved the
/// metric (a day is resolved once, by log or by plan, never both).
///
/// Both the day counting and the amount summing go through this filter so
/// the two can never disagree about which plans are in play.
fn planned_in_scope<'a>(
    planned: &'a [PlannedDay],
    today: NaiveDate,
    has_log_today: bool,
) -> impl Iterator<Item = &'a PlannedDay> {
    let window = week_range(0, today);
    planned.iter().filter(move |p| {
        p.date >= today && window.contains(p.date) && !(has_log_today && p.date == today)
    })
}

/// Counts, per metric, the days of the current week still needing a
/// decision.
///
/// Starting from the days left through this Sunday (today inclusive), each
/// metric's count drops by one when today's log already covers that metric,
/// and by one per in-scope planned entry that specifies it. A planned day
/// carrying only calories does not reduce the step count, and a today-dated
/// plan does not subtract a day today's log already resolved. Counts never
/// go negative.
pub fn remaining_days(logs: &LogBook, planned: &[PlannedDay], today: NaiveDate) -> RemainingDays {
    let days_left = days_until_sunday(today);

    let today_log = logs.entry_for(today);
    let has_calories_log = today_log.is_some_and(|log| log.calories.is_some());
    let has_steps_log = today_log.is_some_and(|log| log.steps.is_some());

    let planned_calorie_days = planned_in_scope(planned, today, has_calories_log)
        .filter(|p| p.calories.is_some())
        .count() as i64;
    let planned_step_days = planned_in_scope(planned, today, has_steps_log)
        .filter(|p| p.steps.is_some())
        .count() as i64;

    let calorie_days = days_left - i64::from(has_calories_log) - planned_calorie_days;
    let step_days = days_left - i64::from(has_steps_log) - planned_step_days;

    RemainingDays {
        calorie_days: calorie_days.max(0) as u32,
        step_days: step_days.max(0) as u32,
        has_calories_log,
        has_steps_log,
    }
}

/// Computes the required daily average for each remaining, unplanned day of
/// the current week.
///
/// Returns `None` when both remaining-day counts are zero: every day is
/// logged or planned and there is nothing left to decide.
///
/// When the weekly calorie budget is already exceeded (the required daily
/// intake would be negative) and step days remain, the overshoot is
/// neutralized by converting it into extra required daily steps at
/// [`CALORIES_PER_STEP`], and the calorie requirement is clamped to 0. The
/// conversion is one-way by design: a step shortfall is never turned into a
/// calorie allowance, because steps can still be caught up today while eaten
/// calories cannot be taken back.
///
/// Calorie results are exact; step results are `ceil`ed at the final output
/// only (fractional steps are not walkable). No other rounding happens here.
///
/// Planned amounts are summed over the same in-scope entries the
/// remaining-day counts subtract: today through this Sunday, skipping a
/// today-dated plan for a metric today's log already covers. A plan dated
/// beyond Sunday neither shrinks the budget nor the day count.
pub fn remaining_targets(
    planned: &[PlannedDay],
    remaining: &RemainingDays,
    weekly_calories_target: f64,
    weekly_steps_goal: u32,
    totals: &WeekTotals,
    today: NaiveDate,
) -> Option<ProjectionResult> {
    if remaining.calorie_days == 0 && remaining.step_days == 0 {
        return None;
    }

    let planned_calories: f64 = planned_in_scope(planned, today, remaining.has_calories_log)
        .filter_map(|p| p.calories)
        .sum();
    let planned_steps: f64 = planned_in_scope(planned, today, remaining.has_steps_log)
        .filter_map(|p| p.steps)
        .map(f64::from)
        .sum();

    let remaining_calories = weekly_calories_target - totals.calories - planned_calories;
    let remaining_steps = f64::from(weekly_steps_goal) - totals.steps - planned_steps;

    let mut required_daily_calories = if remaining.calorie_days > 0 {
        Some(remaining_calories / f64::from(remaining.calorie_days))
    } else {
        None
    };
    let mut required_daily_steps = if remaining.step_days > 0 {
        Some((remaining_steps / f64::from(remaining.step_days)).max(0.0))
    } else {
        None
    };

    let mut deficit_adjustment = None;
    if let (Some(required), Some(base_steps)) = (required_daily_calories, required_daily_steps) {
        if required < 0.0 && remaining.step_days > 0 {
            let total_deficit = required.abs() * f64::from(remaining.calorie_days);
            let additional_total_steps = (total_deficit / CALORIES_PER_STEP).ceil();
            let additional_daily_steps =
                (additional_total_steps / f64::from(remaining.step_days)).ceil() as u32;
            let total_daily_steps = base_steps.ceil() as u32 + additional_daily_steps;

            log::debug!(
                "calorie budget exceeded by {:.0} kcal, adding {} steps/day over {} days",
                total_deficit,
                additional_daily_steps,
                remaining.step_days
            );

            deficit_adjustment = Some(DeficitAdjustment {
                additional_daily_steps,
                total_daily_steps,
                days: remaining.step_days,
            });
            required_daily_calories = Some(0.0);
            required_daily_steps = Some(f64::from(total_daily_steps));
        }
    }

    Some(ProjectionResult {
        required_daily_calories,
        required_daily_steps: required_daily_steps.map(|s| s.ceil() as u32),
        unplanned_calorie_days: remaining.calorie_days,
        unplanned_step_days: remaining.step_days,
        deficit_adjustment,
        has_calories_log: remaining.has_calories_log,
        has_steps_log: remaining.has_steps_log,
    })
}

/// Coarse whole-week projection: one shared remaining-day count, no planned
/// days, no per-metric divergence.
///
/// Returns `None` when no day of the week remains to project over.
pub fn week_projection(
    week_logs: &[&DailyLog],
    profile: &UserProfile,
    today: NaiveDate,
) -> Option<WeekProjection> {
    let days_left = days_until_sunday(today);
    if days_left <= 0 {
        return None;
    }

    let totals = WeekTotals::from_logs(week_logs);
    let required_daily_calories =
        (profile.weekly_calories_target() - totals.calories) / days_left as f64;
    let required_daily_steps =
        (f64::from(profile.weekly_steps_goal()) - totals.steps) / days_left as f64;

    let is_achievable = required_daily_calories
        <= profile.daily_calories_target * ACHIEVABLE_FACTOR
        && required_daily_steps <= f64::from(profile.daily_steps_goal) * ACHIEVABLE_FACTOR;

    Some(WeekProjection {
        required_daily_calories,
        required_daily_steps,
        remaining_days: days_left as u32,
        is_achievable,
    })
}
