//! Metabolic baseline calculations: BMR, sedentary maintenance, and NEAT.
//!
//! NEAT (Non-Exercise Activity Thermogenesis) is modeled as a linear
//! function of step count. The maintenance baseline is deliberately
//! sedentary so that step-driven expenditure enters exactly once, through
//! NEAT.

use crate::domain::Gender;

// === Constants ===

/// Energy burned per step (kcal). Shared by NEAT, the G-Flux score, and the
/// projection rebalancing rule so cross-metric conversions stay consistent.
pub const CALORIES_PER_STEP: f64 = 0.045;

/// Energy density of body mass (kcal per kg).
pub const KCAL_PER_KG: f64 = 7700.0;

/// Non-step baseline activity used by the G-Flux score (kcal).
pub const BASE_ACTIVITY_CALORIES: f64 = 300.0;

/// Sedentary activity multiplier applied to BMR. Step activity is added
/// separately via NEAT and must not be double-counted here.
pub const SEDENTARY_MULTIPLIER: f64 = 1.2;

/// Upper bound for step-count input sliders. A UI hint only, not a ceiling
/// on the formulas.
pub const MAX_SLIDER_STEPS: u32 = 30_000;

// === Formulas ===

/// Calculates Basal Metabolic Rate in kcal/day.
///
/// When body fat percentage is known, uses Katch-McArdle
/// (`370 + 21.6 × LBM`), which is lean-mass sensitive; otherwise
/// Mifflin-St Jeor (`10 × weight + 6.25 × height − 5 × age + 5 / − 161`).
/// Monotonically increasing in weight, decreasing in age.
pub fn calculate_bmr(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    gender: Gender,
    body_fat_pct: Option<f64>,
) -> f64 {
    if let Some(bf) = body_fat_pct {
        let lean_body_mass = weight_kg * (1.0 - bf / 100.0);
        return 370.0 + 21.6 * lean_body_mass;
    }

    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age as f64;
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

/// Maintenance calories before step activity: BMR scaled by the sedentary
/// multiplier.
pub fn base_maintenance(bmr: f64) -> f64 {
    bmr * SEDENTARY_MULTIPLIER
}

/// Energy expenditure from steps (kcal).
pub fn neat(steps: u32) -> f64 {
    steps as f64 * CALORIES_PER_STEP
}
