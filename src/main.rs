mod domain;
mod error;
mod gflux;
mod metabolism;
mod metrics;
mod projection;
mod store;
mod week;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;

use crate::domain::{DailyLog, LogBook, PlannedDay, UserProfile};
use crate::gflux::{education, g_flux, recommendations, GFluxLevel};
use crate::metrics::week_summary;
use crate::projection::{remaining_days, remaining_targets, week_projection, WeekTotals};
use crate::store::{load_logs, load_profile, PlannedDayStore};
use crate::week::{week_dates, week_range};

/// Weekly health-metrics report: summaries, goal projections, G-Flux.
#[derive(Parser, Debug)]
#[command(name = "weekfit")]
#[command(about = "Personal weekly health-metrics tracking and goal projection")]
#[command(version)]
struct Args {
    /// Directory containing profile.json, logs.json and planned.json.
    /// Can also be set via WEEKFIT_DATA_DIR.
    #[arg(value_name = "DATA_DIR", env = "WEEKFIT_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Week to report on: 0 = current week, negative = weeks back.
    /// Can also be set via WEEKFIT_WEEK_OFFSET.
    #[arg(
        short = 'w',
        long = "week",
        env = "WEEKFIT_WEEK_OFFSET",
        default_value = "0",
        allow_hyphen_values = true
    )]
    week_offset: i64,

    /// Print background reading on the G-Flux score.
    #[arg(long)]
    explain: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    if args.week_offset > 0 {
        bail!("week offset must be 0 (current week) or negative (past weeks)");
    }

    let profile = load_profile(args.data_dir.join("profile.json"))
        .context("failed to load user profile")?;
    let book = load_logs(args.data_dir.join("logs.json")).context("failed to load daily logs")?;

    if book.is_empty() {
        println!("No daily logs yet.");
    } else if let Some((first, last)) = book.date_range() {
        println!("{} logged days, {} to {}", book.len(), first, last);
        println!();
    }

    let today = Local::now().date_naive();
    print_week_report(&profile, &book, args.week_offset, today)?;

    if args.week_offset == 0 {
        let planned_store = PlannedDayStore::new(args.data_dir.join("planned.json"));
        let planned = planned_store
            .load(today)
            .context("failed to load planned days")?;
        // Loading prunes past-dated and empty entries; persist the pruning.
        planned_store
            .save(&planned)
            .context("failed to save planned days")?;
        print_remaining_targets(&profile, &book, &planned, today);
        print_g_flux(&book, args.explain);
    }

    Ok(())
}

/// Prints per-day lines and the weekly summary for the selected week.
fn print_week_report(
    profile: &UserProfile,
    book: &LogBook,
    week_offset: i64,
    today: NaiveDate,
) -> Result<()> {
    let window = week_range(week_offset, today);
    let prev_window = week_range(week_offset - 1, today);
    let week_logs = book.entries_in(&window);
    let prev_week_logs = book.entries_in(&prev_window);

    println!("=== Week {} to {} ===", window.start, window.end);
    println!();

    for date in week_dates(window.start) {
        let entry = book.entry_for(date);
        match metrics::day_metrics(entry, profile) {
            Some(day) => println!(
                "{}  weight {:>6}  calories {:>7}  steps {:>6}  balance {:>+8.0}",
                date,
                day.weight_kg.map_or("-".into(), |w| format!("{:.1}", w)),
                day.calories.map_or("-".into(), |c| format!("{:.0}", c)),
                day.steps.map_or("-".into(), |s| s.to_string()),
                day.calorie_balance,
            ),
            None => println!("{}  no log", date),
        }
    }

    let summary = week_summary(&week_logs, &prev_week_logs, profile);
    println!();
    println!("Logged days:        {}", summary.total_days);
    if let Some(avg) = summary.avg_weight {
        println!("Average weight:     {:.1} kg", avg);
    }
    if let Some(change) = summary.weight_change {
        println!("Week-over-week:     {:+.2} kg", change);
    }
    if let Some(avg) = summary.avg_calories {
        println!("Average calories:   {:.0} kcal", avg);
    }
    if let Some(avg) = summary.avg_steps {
        println!("Average steps:      {:.0}", avg);
    }
    println!("Total balance:      {:+.0} kcal", summary.total_balance);
    println!(
        "Estimated change:   {:+.2} kg",
        summary.estimated_weight_change
    );

    if week_offset == 0 {
        if let Some(projection) = week_projection(&week_logs, profile, today) {
            println!();
            println!("=== Week Projection ({} days left) ===", projection.remaining_days);
            println!(
                "Required daily calories: {:.0} kcal",
                projection.required_daily_calories
            );
            println!(
                "Required daily steps:    {:.0}",
                projection.required_daily_steps
            );
            println!(
                "Achievable:              {}",
                if projection.is_achievable { "yes" } else { "no" }
            );
        }
    }

    Ok(())
}

/// Prints the plan-aware remaining targets for the live week.
fn print_remaining_targets(
    profile: &UserProfile,
    book: &LogBook,
    planned: &[PlannedDay],
    today: NaiveDate,
) {
    let window = week_range(0, today);
    let week_logs = book.entries_in(&window);
    let totals = WeekTotals::from_logs(&week_logs);
    let counts = remaining_days(book, planned, today);

    let Some(result) = remaining_targets(
        planned,
        &counts,
        profile.weekly_calories_target(),
        profile.weekly_steps_goal(),
        &totals,
        today,
    ) else {
        println!();
        println!("Every remaining day is logged or planned; nothing left to project.");
        return;
    };

    println!();
    println!("=== Remaining Targets ===");
    if !planned.is_empty() {
        println!("Planned days:            {}", planned.len());
    }
    match result.required_daily_calories {
        Some(calories) => println!(
            "Daily calories:          {:.0} kcal over {} day(s)",
            calories, result.unplanned_calorie_days
        ),
        None => println!("Daily calories:          all days logged or planned"),
    }
    match result.required_daily_steps {
        Some(steps) => println!(
            "Daily steps:             {} over {} day(s)",
            steps, result.unplanned_step_days
        ),
        None => println!("Daily steps:             all days logged or planned"),
    }
    if let Some(adjustment) = result.deficit_adjustment {
        println!(
            "Calorie budget exceeded: +{} steps/day over {} day(s) to compensate",
            adjustment.additional_daily_steps, adjustment.days
        );
    }
}

/// Prints the G-Flux score for the most recent fully-logged day.
fn print_g_flux(book: &LogBook, explain: bool) {
    let mut latest: Option<(&DailyLog, f64, u32)> = None;
    for entry in book.iter() {
        if let (Some(calories), Some(steps)) = (entry.calories, entry.steps) {
            latest = Some((entry, calories, steps));
        }
    }
    let Some((entry, calories, steps)) = latest else {
        return;
    };

    let score = g_flux(calories, steps);
    let level = GFluxLevel::from_score(score);

    println!();
    println!("=== G-Flux ({}) ===", entry.date);
    println!("Score: {} ({})", score, level);
    println!("{}", level.message());
    for line in recommendations(level, calories, steps) {
        println!("- {}", line);
    }

    if explain {
        println!();
        for line in education() {
            println!("{}", line);
        }
    }
}
