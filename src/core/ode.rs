//! Right-hand side of an ODE system.

use crate::Float;

/// Right-hand side `y' = f(x, y)` of a first order system.
///
/// The integrator repeatedly calls `ode` with the current abscissa `x` and
/// state `y` and expects `dydx` to be filled with the derivative values.
/// Implementations are expected to be free of side effects.
///
/// # Example
///
/// ```
/// use nmr_utils::core::ode::ODE;
///
/// struct Decay { rate: f64 }
///
/// impl ODE for Decay {
///     fn ode(&self, _x: f64, y: &[f64], dydx: &mut [f64]) {
///         dydx[0] = -self.rate * y[0];
///     }
/// }
/// ```
pub trait ODE {
    fn ode(&self, x: Float, y: &[Float], dydx: &mut [Float]);
}
