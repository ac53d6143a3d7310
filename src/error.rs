//! Errors for input validation and numerical failures

use thiserror::Error;

use crate::Float;

/// Errors returned by the integrators and the mixing entry points.
///
/// Validation variants are reported before any integration work starts.
/// Numerical variants carry the index of the first grid time that could
/// not be sampled.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("nmax must be positive (got {0})")]
    NMaxMustBePositive(usize),
    #[error("uround must be in (1e-35, 1.0) (got {0})")]
    URoundOutOfRange(Float),
    #[error("safety_factor must be in (1e-4, 1.0) (got {0})")]
    SafetyFactorOutOfRange(Float),
    #[error("beta must be <= 0.2 (got {0})")]
    BetaTooLarge(Float),
    #[error("step size must be finite and positive (got {0})")]
    InvalidStepSize(Float),
    #[error("step size bounds must satisfy 0 < scale_min <= 1 <= scale_max (got {0}, {1})")]
    InvalidScaleBounds(Float, Float),
    #[error("tolerances must be finite and positive (got {0})")]
    InvalidTolerance(Float),
    #[error("tolerance vector has {got} entries, state has {expected}")]
    ToleranceLength { expected: usize, got: usize },
    #[error("invalid integrator settings: {}", join(.0))]
    InvalidSettings(Vec<Error>),

    #[error("mixing time must be finite and positive (got {0})")]
    InvalidMixingTime(Float),
    #[error("sampling interval must be finite and positive (got {0})")]
    InvalidSamplingInterval(Float),
    #[error("mixing time {mixing_time} is shorter than one sampling interval {interval}")]
    EmptyGrid { mixing_time: Float, interval: Float },
    #[error("grid of {rows} rows exceeds the limit of {max} rows")]
    GridTooLarge { rows: Float, max: usize },
    #[error("parameter {name} must be finite (got {value})")]
    NonFiniteParameter { name: &'static str, value: Float },
    #[error("initial magnetization component {index} must be finite (got {value})")]
    NonFiniteInitialState { index: usize, value: Float },
    #[error("invalid output times: {0}")]
    InvalidTimes(String),

    #[error("solution became non-finite before grid point {index} (t = {t})")]
    Divergence { index: usize, t: Float },
    #[error("step size collapsed to {h} before grid point {index} (t = {t})")]
    StepSizeCollapse { index: usize, t: Float, h: Float },
    #[error("more than {nmax} steps needed before grid point {index} (t = {t})")]
    StepLimitExceeded { index: usize, t: Float, nmax: usize },
    #[error("trajectory incomplete: {written} of {expected} rows written")]
    IncompleteTrajectory { written: usize, expected: usize },
}

impl Error {
    /// True for failures discovered while integrating, false for input
    /// validation failures.
    pub fn is_numerical(&self) -> bool {
        matches!(
            self,
            Error::Divergence { .. }
                | Error::StepSizeCollapse { .. }
                | Error::StepLimitExceeded { .. }
                | Error::IncompleteTrajectory { .. }
        )
    }
}

fn join(errors: &[Error]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
