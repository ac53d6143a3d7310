//! DOPRI5 - Dormand–Prince 5(4) explicit Runge–Kutta integrator
//!
//! Original authors
//! - E. Hairer and G. Wanner
//!   Université de Genève - Dept. de Mathématiques
//!
//! Reference
//! - E. Hairer, S. P. Nørsett, and G. Wanner, "Solving Ordinary Differential
//!   Equations I. Nonstiff Problems", 2nd ed., Springer (1993).
//! - J. R. Dormand and P. J. Prince, "A family of embedded Runge-Kutta
//!   formulae", J. Comput. Appl. Math. 6 (1980).
//!

use crate::{
    Float,
    core::{
        interpolate::Interpolate,
        ode::ODE,
        solout::{ControlFlag, SolOut},
        status::Status,
    },
    error::Error,
    methods::{
        hinit::hinit,
        result::IntegrationResult,
        settings::{Settings, Tolerance},
    },
};

/// Dormand–Prince DOPRI5: explicit embedded Runge–Kutta 5(4) solver with
/// adaptive step-size control and dense output.
///
/// Integrates `y' = f(x, y)` from `x` to `xend`, advancing `y` in place.
/// The local error of every step is estimated from the embedded 4th order
/// solution and measured as the RMS over components of
/// `err_i / (atol_i + rtol_i * max(|y_i|, |y1_i|))`; a step is accepted when
/// that norm is at most one.
///
/// # Arguments
///
/// - `f`: Right‑hand side implementing `ODE`.
/// - `x`, `xend`: Integration interval (backward integration is allowed).
/// - `y`: Initial state; on return the state at the final abscissa.
/// - `rtol`, `atol`: Relative and absolute tolerances (see [`Tolerance`]).
/// - `solout`: Optional callback invoked before the first step and after
///   every accepted step with a dense interpolant for that step.
/// - `settings`: see below.
///
/// ## Settings
///
/// - `uround` (default `Float::EPSILON`)
/// - `safety_factor` (default `0.9`)
/// - `scale_min` / `scale_max` (defaults `0.2` / `5.0`): bounds on `hnew / h`
/// - `beta` (default `0.0`, plain `err^(-1/5)` control)
/// - `hmax` (default `|xend - x|`)
/// - `hmin` (default `0.0`): the run stops with
///   [`Status::StepSizeTooSmall`] when `|h|` drops below it or below the
///   rounding limit
/// - `h0` (initial step; [`hinit`] heuristic if `None`)
/// - `nmax` (default `100_000`)
///
/// # Returns
/// `IntegrationResult` with a [`Status`] describing how the run ended, or
/// the list of every invalid setting.
pub fn dopri5<F, S>(
    f: &F,
    mut x: Float,
    xend: Float,
    y: &mut [Float],
    rtol: &Tolerance,
    atol: &Tolerance,
    mut solout: Option<&mut S>,
    settings: &Settings,
) -> Result<IntegrationResult, Vec<Error>>
where
    F: ODE,
    S: SolOut,
{
    let n = y.len();

    // --- Input Validation ---
    let mut errors: Vec<Error> = Vec::new();

    rtol.validate(n, &mut errors);
    atol.validate(n, &mut errors);

    // Rounding Unit
    let uround = match settings.uround {
        Some(u) => {
            if !(u > 1e-35 && u < 1.0) {
                errors.push(Error::URoundOutOfRange(u));
            }
            u
        }
        None => Float::EPSILON,
    };

    // Safety Factor
    let safety_factor = match settings.safety_factor {
        Some(f) => {
            if !(f > 1e-4 && f < 1.0) {
                errors.push(Error::SafetyFactorOutOfRange(f));
            }
            f
        }
        None => 0.9,
    };

    // Parameters for step size selection
    let scale_min = settings.scale_min.unwrap_or(0.2);
    let scale_max = settings.scale_max.unwrap_or(5.0);
    if !(scale_min > 0.0 && scale_min <= 1.0 && scale_max >= 1.0 && scale_max.is_finite()) {
        errors.push(Error::InvalidScaleBounds(scale_min, scale_max));
    }
    let facc1 = 1.0 / scale_min;
    let facc2 = 1.0 / scale_max;

    // Beta for step control stabilization
    let beta = match settings.beta {
        Some(b) => {
            if !(b <= 0.2) {
                errors.push(Error::BetaTooLarge(b));
            }
            b.max(0.0)
        }
        None => 0.0,
    };

    // Step size limits
    let h_max = match settings.hmax {
        Some(h) => {
            if !(h.is_finite() && h > 0.0) {
                errors.push(Error::InvalidStepSize(h));
            }
            h.abs()
        }
        None => (xend - x).abs(),
    };
    let h_min = match settings.hmin {
        Some(h) => {
            if !(h.is_finite() && h >= 0.0) {
                errors.push(Error::InvalidStepSize(h));
            }
            h.abs()
        }
        None => 0.0,
    };
    if let Some(h) = settings.h0 {
        if !(h.is_finite() && h > 0.0) {
            errors.push(Error::InvalidStepSize(h));
        }
    }

    // Maximum Number of Steps
    let nmax = match settings.nmax {
        Some(n) => {
            if n == 0 {
                errors.push(Error::NMaxMustBePositive(n));
            }
            n
        }
        None => 100_000,
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    // --- Declarations ---
    let mut k1 = vec![0.0; n];
    let mut k2 = vec![0.0; n];
    let mut k3 = vec![0.0; n];
    let mut k4 = vec![0.0; n];
    let mut k5 = vec![0.0; n];
    let mut k6 = vec![0.0; n];
    let mut y1 = vec![0.0; n];
    let mut cont = vec![0.0; n * 5];
    let mut facold: Float = 1e-4;
    let mut last = false;
    let mut reject = false;
    let mut nfev = 0;
    let mut nstep = 0;
    let mut naccpt = 0;
    let mut nrejct = 0;
    let mut fac11;
    let mut fac;
    let mut hnew;
    let mut xph;
    let mut xold = x;
    let status;
    let expo1 = 0.2 - beta * 0.75;
    let posneg = if xend < x { -1.0 } else { 1.0 };
    let dense = solout.is_some();

    // --- Initializations ---
    f.ode(x, y, &mut k1);
    nfev += 1;
    let mut h = match settings.h0 {
        Some(h0) => h0.min(h_max) * posneg,
        None => {
            nfev += 1;
            hinit(
                f, x, y, posneg, &k1, &mut k2, &mut y1, 5, h_max, atol, rtol,
            )
        }
    };

    // Initial SolOut call
    if let Some(solout) = solout.as_mut() {
        if solout.solout::<DenseOutput>(xold, x, y, None) == ControlFlag::Interrupt {
            return Ok(IntegrationResult::new(
                x,
                h,
                Status::UserInterrupt,
                nfev,
                nstep,
                naccpt,
                nrejct,
            ));
        }
    }

    if x == xend {
        return Ok(IntegrationResult::new(
            x,
            h,
            Status::Success,
            nfev,
            nstep,
            naccpt,
            nrejct,
        ));
    }

    // --- Main integration loop ---
    loop {
        // Check for maximum number of steps
        if nstep >= nmax {
            status = Status::NeedLargerNMax;
            break;
        }

        // Check for step size collapse and underflow due to machine rounding
        if h.abs() < h_min || 0.1 * h.abs() <= x.abs().max(xend.abs()) * uround {
            status = Status::StepSizeTooSmall;
            break;
        }

        // Adjust last step to land on xend
        if (x + 1.01 * h - xend) * posneg > 0.0 {
            h = xend - x;
            last = true;
        }

        nstep += 1;

        // Stage 2
        for i in 0..n {
            y1[i] = y[i] + h * A21 * k1[i];
        }
        f.ode(x + C2 * h, &y1, &mut k2);

        // Stage 3
        for i in 0..n {
            y1[i] = y[i] + h * (A31 * k1[i] + A32 * k2[i]);
        }
        f.ode(x + C3 * h, &y1, &mut k3);

        // Stage 4
        for i in 0..n {
            y1[i] = y[i] + h * (A41 * k1[i] + A42 * k2[i] + A43 * k3[i]);
        }
        f.ode(x + C4 * h, &y1, &mut k4);

        // Stage 5
        for i in 0..n {
            y1[i] = y[i] + h * (A51 * k1[i] + A52 * k2[i] + A53 * k3[i] + A54 * k4[i]);
        }
        f.ode(x + C5 * h, &y1, &mut k5);

        // Stage 6
        for i in 0..n {
            y1[i] =
                y[i] + h * (A61 * k1[i] + A62 * k2[i] + A63 * k3[i] + A64 * k4[i] + A65 * k5[i]);
        }
        xph = x + h;
        f.ode(xph, &y1, &mut k6);

        // Final stage, 5th order solution
        for i in 0..n {
            y1[i] =
                y[i] + h * (A71 * k1[i] + A73 * k3[i] + A74 * k4[i] + A75 * k5[i] + A76 * k6[i]);
        }
        f.ode(xph, &y1, &mut k2);
        nfev += 6;

        // Last segment of dense output needs k4 before it is overwritten
        if dense {
            for i in 0..n {
                cont[4 * n + i] = h
                    * (D1 * k1[i] + D3 * k3[i] + D4 * k4[i] + D5 * k5[i] + D6 * k6[i] + D7 * k2[i]);
            }
        }

        // K4 scaled for error estimate
        for i in 0..n {
            k4[i] =
                (E1 * k1[i] + E3 * k3[i] + E4 * k4[i] + E5 * k5[i] + E6 * k6[i] + E7 * k2[i]) * h;
        }

        // Error estimation
        let mut err: Float = 0.0;
        for i in 0..n {
            let sk = atol[i] + rtol[i] * y[i].abs().max(y1[i].abs());
            err += (k4[i] / sk) * (k4[i] / sk);
        }
        err = (err / n as Float).sqrt();

        if !err.is_finite() {
            status = Status::NonFinite;
            break;
        }

        // Computation of hnew
        fac11 = err.powf(expo1);
        // Lund-Stabilization
        fac = fac11 / facold.powf(beta);
        // We require scale_min <= hnew/h <= scale_max
        fac = facc2.max(facc1.min(fac / safety_factor));
        hnew = h / fac;

        if err <= 1.0 {
            // Step accepted
            if y1.iter().any(|v| !v.is_finite()) {
                status = Status::NonFinite;
                break;
            }
            facold = err.max(1.0e-4);
            naccpt += 1;

            if dense {
                for i in 0..n {
                    let ydiff = y1[i] - y[i];
                    let bspl = h * k1[i] - ydiff;
                    cont[i] = y[i];
                    cont[n + i] = ydiff;
                    cont[2 * n + i] = bspl;
                    cont[3 * n + i] = -h * k2[i] + ydiff - bspl;
                }
            }

            // Update state variables
            k1.copy_from_slice(&k2);
            y.copy_from_slice(&y1);
            xold = x;
            x = xph;
            log::trace!("dopri5: accepted step to x = {x:e} with h = {h:e}, err = {err:.3e}");

            if let Some(solout) = solout.as_mut() {
                let interpolator = DenseOutput::new(&cont, xold, h);
                if solout.solout(xold, x, y, Some(&interpolator)) == ControlFlag::Interrupt {
                    status = Status::UserInterrupt;
                    break;
                }
            }

            // Normal exit
            if last {
                h = hnew;
                status = Status::Success;
                break;
            }

            // Check for step size limits
            if hnew.abs() > h_max {
                hnew = posneg * h_max;
            }

            // Prevent oscillations due to previous rejected step
            if reject {
                hnew = posneg * hnew.abs().min(h.abs());
                reject = false;
            }
        } else {
            // Step rejected
            hnew = h / facc1.min(fac11 / safety_factor);
            reject = true;
            nrejct += 1;
            last = false;
            log::trace!("dopri5: rejected step at x = {x:e} with h = {h:e}, err = {err:.3e}");
        }
        h = hnew;
    }

    log::debug!(
        "dopri5 finished at x = {x:e} with {status:?}: {nstep} steps ({naccpt} accepted, {nrejct} rejected), {nfev} evaluations"
    );

    Ok(IntegrationResult::new(
        x, h, status, nfev, nstep, naccpt, nrejct,
    ))
}

/// Continuous output function for DOPRI5
pub fn contdp5(xi: Float, yi: &mut [Float], cont: &[Float], xold: Float, h: Float) {
    let n = cont.len() / 5;
    let theta = (xi - xold) / h;
    let theta1 = 1.0 - theta;
    for i in 0..n {
        yi[i] = cont[i]
            + theta
                * (cont[n + i]
                    + theta1
                        * (cont[2 * n + i] + theta * (cont[3 * n + i] + theta1 * cont[4 * n + i])));
    }
}

/// Dense output interpolator for the last accepted DOPRI5 step.
#[derive(Debug, Clone, Copy)]
pub struct DenseOutput<'a> {
    cont: &'a [Float],
    xold: Float,
    h: Float,
}

impl<'a> DenseOutput<'a> {
    pub fn new(cont: &'a [Float], xold: Float, h: Float) -> Self {
        Self { cont, xold, h }
    }
}

impl Interpolate for DenseOutput<'_> {
    fn interpolate(&self, xi: Float, yi: &mut [Float]) {
        contdp5(xi, yi, self.cont, self.xold, self.h);
    }
}

// DOPRI5 Butcher tableau coefficients
const C2: Float = 0.2;
const C3: Float = 0.3;
const C4: Float = 0.8;
const C5: Float = 8.0 / 9.0;

const A21: Float = 0.2;
const A31: Float = 3.0 / 40.0;
const A32: Float = 9.0 / 40.0;
const A41: Float = 44.0 / 45.0;
const A42: Float = -56.0 / 15.0;
const A43: Float = 32.0 / 9.0;
const A51: Float = 19372.0 / 6561.0;
const A52: Float = -25360.0 / 2187.0;
const A53: Float = 64448.0 / 6561.0;
const A54: Float = -212.0 / 729.0;
const A61: Float = 9017.0 / 3168.0;
const A62: Float = -355.0 / 33.0;
const A63: Float = 46732.0 / 5247.0;
const A64: Float = 49.0 / 176.0;
const A65: Float = -5103.0 / 18656.0;
const A71: Float = 35.0 / 384.0;
const A73: Float = 500.0 / 1113.0;
const A74: Float = 125.0 / 192.0;
const A75: Float = -2187.0 / 6784.0;
const A76: Float = 11.0 / 84.0;

const E1: Float = 71.0 / 57600.0;
const E3: Float = -71.0 / 16695.0;
const E4: Float = 71.0 / 1920.0;
const E5: Float = -17253.0 / 339200.0;
const E6: Float = 22.0 / 525.0;
const E7: Float = -1.0 / 40.0;

const D1: Float = -12715105075.0 / 11282082432.0;
const D3: Float = 87487479700.0 / 32700410799.0;
const D4: Float = -10690763975.0 / 1880347072.0;
const D5: Float = 701980252875.0 / 199316789632.0;
const D6: Float = -1453857185.0 / 822651844.0;
const D7: Float = 69997945.0 / 29380423.0;
