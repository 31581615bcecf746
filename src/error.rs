//! Error types for the weekfit application.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised when a user profile violates its numeric contract.
///
/// Presence of required attributes is enforced by the type system; these
/// variants cover value sanity only. A profile failing validation must never
/// reach the calculation modules.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("age must be positive: {0}")]
    BadAge(u32),

    #[error("height must be positive: {0} cm")]
    BadHeight(f64),

    #[error("current weight must be positive: {0} kg")]
    BadWeight(f64),

    #[error("body fat percentage must be within (0, 100): {0}")]
    BadBodyFat(f64),

    #[error("daily calories target must be non-negative: {0}")]
    BadCaloriesTarget(f64),

    #[error("target weight must be positive: {0} kg")]
    BadTargetWeight(f64),
}

/// Errors that can occur when loading or saving data files.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    InvalidJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    InvalidProfile(#[from] ProfileError),
}
