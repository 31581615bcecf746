//! G-Flux (energy flux) scoring: total energy turnover per day.
//!
//! G-Flux sums intake and expenditure instead of netting them, as a
//! secondary wellness indicator independent of caloric balance: eating more
//! while moving more keeps metabolism high even at the same net balance.

use serde::Serialize;

use crate::metabolism::{BASE_ACTIVITY_CALORIES, CALORIES_PER_STEP};

/// Qualitative G-Flux band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GFluxLevel {
    Low,
    Moderate,
    High,
    Optimal,
}

impl GFluxLevel {
    /// Band thresholds: `< 2000` low, `< 3000` moderate, `< 4000` high,
    /// otherwise optimal.
    pub fn from_score(g_flux: i64) -> Self {
        match g_flux {
            s if s < 2000 => GFluxLevel::Low,
            s if s < 3000 => GFluxLevel::Moderate,
            s if s < 4000 => GFluxLevel::High,
            _ => GFluxLevel::Optimal,
        }
    }

    /// Canned description for the band.
    pub fn message(&self) -> &'static str {
        match self {
            GFluxLevel::Low => {
                "Low energy flux. Intake and activity are both modest; \
                 metabolism runs at a low idle."
            }
            GFluxLevel::Moderate => {
                "Moderate energy flux. A solid base, with room to raise \
                 both activity and intake together."
            }
            GFluxLevel::High => {
                "High energy flux. Plenty of energy moving through the \
                 system; recovery and nutrient timing start to matter."
            }
            GFluxLevel::Optimal => {
                "Optimal energy flux. High turnover of intake and \
                 expenditure supports body composition and appetite signals."
            }
        }
    }
}

impl std::fmt::Display for GFluxLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GFluxLevel::Low => write!(f, "low"),
            GFluxLevel::Moderate => write!(f, "moderate"),
            GFluxLevel::High => write!(f, "high"),
            GFluxLevel::Optimal => write!(f, "optimal"),
        }
    }
}

/// Calculates the G-Flux score from a day's intake and step count.
///
/// `round(calories + steps × CALORIES_PER_STEP + BASE_ACTIVITY_CALORIES)`,
/// where the base term covers non-step daily activity.
pub fn g_flux(daily_calories: f64, daily_steps: u32) -> i64 {
    (daily_calories + f64::from(daily_steps) * CALORIES_PER_STEP + BASE_ACTIVITY_CALORIES).round()
        as i64
}

/// Advice strings for a level, adjusted by the raw inputs that produced it.
pub fn recommendations(level: GFluxLevel, daily_calories: f64, daily_steps: u32) -> Vec<&'static str> {
    let mut out = Vec::new();
    match level {
        GFluxLevel::Low => {
            out.push("Raise activity first, then feed the extra movement.");
            if daily_steps < 6000 {
                out.push("Add a daily walk; 6000+ steps is the near-term mark.");
            }
            if daily_calories < 1800.0 {
                out.push("Intake is low; increase it alongside activity, not instead of it.");
            }
        }
        GFluxLevel::Moderate => {
            out.push("Nudge steps and intake up together to climb the flux bands.");
            if daily_steps < 10_000 {
                out.push("Work toward 10000 steps on most days.");
            }
        }
        GFluxLevel::High => {
            out.push("Hold this turnover; prioritize protein and sleep to support it.");
        }
        GFluxLevel::Optimal => {
            out.push("Maintain the current rhythm; consistency beats further increases.");
            if daily_steps > 20_000 {
                out.push("Step volume is very high; watch for accumulating fatigue.");
            }
        }
    }
    out
}

/// Background reading on the G-Flux concept, independent of any score.
pub fn education() -> &'static [&'static str] {
    &[
        "G-Flux (energy flux) is the total energy moving through the body: \
         intake plus expenditure, not the difference between them.",
        "Two people at the same caloric balance can sit at very different \
         flux levels; the higher-flux one eats and moves more.",
        "Higher flux tends to support appetite regulation, nutrient \
         partitioning, and training quality.",
        "Raise flux by adding movement first and matching it with intake, \
         keeping the balance you were already targeting.",
    ]
}
