//! Starting step size for explicit Runge–Kutta methods
//!
//! Hairer, Nørsett and Wanner, "Solving Ordinary Differential Equations I",
//! Sec. II.4.

use crate::{Float, core::ode::ODE, methods::settings::Tolerance};

/// Guess a first step for a method of order `iord` when none is supplied.
///
/// A trial step `h0 = 0.01 ‖y‖ / ‖f(x, y)‖` is refined with one explicit
/// Euler step, which estimates the second derivative; the guess is then
/// `h1 = (0.01 / max(‖f‖, ‖f'‖))^(1/iord)`, bounded by `100 h0` and `hmax`.
/// Norms are Euclidean with components weighted by `atol + rtol |y|`.
///
/// `f0` holds `f(x, y)`; `f1` and `y1` are overwritten as scratch. One
/// evaluation of `f`. The result carries the sign of `posneg`.
pub fn hinit<F>(
    f: &F,
    x: Float,
    y: &[Float],
    posneg: Float,
    f0: &[Float],
    f1: &mut [Float],
    y1: &mut [Float],
    iord: usize,
    hmax: Float,
    atol: &Tolerance,
    rtol: &Tolerance,
) -> Float
where
    F: ODE,
{
    let scale = |i: usize| atol[i] + rtol[i] * y[i].abs();
    let hmax = hmax.abs();
    let dir = posneg.signum();

    let (dnf, dny) = (0..y.len()).fold((0.0, 0.0), |(dnf, dny): (Float, Float), i| {
        let sk = scale(i);
        (dnf + (f0[i] / sk).powi(2), dny + (y[i] / sk).powi(2))
    });

    let h0 = if dnf <= 1e-10 || dny <= 1e-10 {
        1.0e-6
    } else {
        (dny / dnf).sqrt() * 0.01
    };
    let h0 = h0.min(hmax) * dir;

    for ((y1, &y), &f0) in y1.iter_mut().zip(y).zip(f0) {
        *y1 = y + h0 * f0;
    }
    f.ode(x + h0, y1, f1);

    let der2 = (0..y.len())
        .map(|i| ((f1[i] - f0[i]) / scale(i)).powi(2))
        .sum::<Float>()
        .sqrt()
        / h0.abs();

    let der12 = der2.max(dnf.sqrt());
    let h1 = if der12 <= 1.0e-15 {
        (1.0e-6 as Float).max(h0.abs() * 1.0e-3)
    } else {
        (0.01 / der12).powf(1.0 / iord as Float)
    };

    (100.0 * h0.abs()).min(h1).min(hmax) * dir
}
