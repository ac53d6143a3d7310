//! Settings and tolerances for the numerical integrators

use std::ops::Index;

use bon::Builder;

use crate::{Float, error::Error};

#[derive(Builder, Clone, Debug, Default)]
/// Settings for the numerical integrators.
///
/// Every field is optional; `None` selects the integrator's default.
pub struct Settings {
    /// The rounding unit, typically machine epsilon
    pub uround: Option<Float>,
    /// safety factor in step-size prediction.
    pub safety_factor: Option<Float>,
    /// Parameter for step size selection where scale_min <= hnew/hold <= scale_max
    pub scale_min: Option<Float>,
    /// Parameter for step size selection where scale_min <= hnew/hold <= scale_max
    pub scale_max: Option<Float>,
    /// Beta factor for stabilized step size control. Positive values of Beta
    /// ( <= 0.04 ) make the step size control more stable. Negative values
    /// are treated as zero.
    pub beta: Option<Float>,
    /// Maximal step size.
    pub hmax: Option<Float>,
    /// Minimum step size. Falling below it aborts the run.
    pub hmin: Option<Float>,
    /// Initial step size. None will result in an initial guess
    /// provided by the [`hinit`](super::hinit::hinit) heuristic.
    pub h0: Option<Float>,
    /// Maximum number of allowed steps.
    pub nmax: Option<usize>,
}

/// Tolerance enum to allow scalar or vector tolerances
/// using [`Into`] trait for easy conversion from `Float`, `[Float; N]`, or `Vec<Float>`
/// users do not need to know or worry this simply allows both
/// `Float` and `[Float; N]` to be passed in as arguments.
#[derive(Clone, Debug, PartialEq)]
pub enum Tolerance {
    Scalar(Float),
    Vector(Vec<Float>),
}

impl Tolerance {
    /// Push an error for every non-finite or non-positive entry, and for a
    /// vector whose length does not match the state.
    pub(crate) fn validate(&self, n: usize, errors: &mut Vec<Error>) {
        match self {
            Tolerance::Scalar(v) => {
                if !(v.is_finite() && *v > 0.0) {
                    errors.push(Error::InvalidTolerance(*v));
                }
            }
            Tolerance::Vector(vs) => {
                if vs.len() != n {
                    errors.push(Error::ToleranceLength {
                        expected: n,
                        got: vs.len(),
                    });
                }
                if let Some(v) = vs.iter().find(|v| !(v.is_finite() && **v > 0.0)) {
                    errors.push(Error::InvalidTolerance(*v));
                }
            }
        }
    }
}

impl From<Float> for Tolerance {
    fn from(val: Float) -> Self {
        Tolerance::Scalar(val)
    }
}

impl From<&[Float]> for Tolerance {
    fn from(val: &[Float]) -> Self {
        Tolerance::Vector(val.to_vec())
    }
}

impl<const N: usize> From<[Float; N]> for Tolerance {
    fn from(val: [Float; N]) -> Self {
        Tolerance::Vector(val.to_vec())
    }
}

impl From<Vec<Float>> for Tolerance {
    fn from(val: Vec<Float>) -> Self {
        Tolerance::Vector(val)
    }
}

impl Index<usize> for Tolerance {
    type Output = Float;

    fn index(&self, index: usize) -> &Self::Output {
        match self {
            Tolerance::Scalar(v) => v,
            Tolerance::Vector(vs) => &vs[index],
        }
    }
}
