//! Callback hook executed after each accepted step.

use crate::{Float, core::interpolate::Interpolate};

/// Return flags for [`SolOut`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlag {
    /// Proceed with integration as normal.
    Continue,
    /// Stop integration and return control to the caller.
    Interrupt,
}

/// Callback hook executed after each accepted step.
///
/// The callback is invoked once before the main loop (with `xold == x` and
/// no interpolant) and after every accepted step. The arguments are:
/// - `xold`: left end of the last accepted step,
/// - `x`: the new abscissa after the accepted step,
/// - `y`: the integrator's current solution at `x`,
/// - `interpolator`: dense output valid on `[xold, x]`.
///
/// Observing the solution never changes the step sequence chosen by the
/// integrator.
pub trait SolOut {
    fn solout<I: Interpolate>(
        &mut self,
        xold: Float,
        x: Float,
        y: &[Float],
        interpolator: Option<&I>,
    ) -> ControlFlag;
}

/// A [`SolOut`] that ignores every step, for runs where only the final
/// state is of interest.
#[derive(Debug, Default, Clone, Copy)]
pub struct DummySolOut;

impl SolOut for DummySolOut {
    fn solout<I: Interpolate>(
        &mut self,
        _xold: Float,
        _x: Float,
        _y: &[Float],
        _interpolator: Option<&I>,
    ) -> ControlFlag {
        ControlFlag::Continue
    }
}
