//! Sampling of an adaptive integration at a given, strictly increasing
//! sequence of output times.

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
        dp::dopri5,
        result::IntegrationResult,
        settings::{Settings, Tolerance},
    },
};

/// Output times within this many ulps of a step end are treated as lying on it.
const TIME_ULPS: Float = 4.0;

/// Slack for comparing an output time `t` against the step end `x`.
fn time_slack(x: Float, t: Float) -> Float {
    TIME_ULPS * Float::EPSILON * x.abs().max(t.abs())
}

/// Sink receiving the sampled solution, once per requested time and in
/// increasing time order.
pub trait Observer {
    /// Receive the state `y` at time `t`. Returning
    /// [`ControlFlag::Interrupt`] refuses the sample and stops the run.
    fn observe(&mut self, t: Float, y: &[Float]) -> ControlFlag;
}

/// Integrate `f` from `x0` with DOPRI5 and hand the solution at every entry
/// of `times` to `observer`.
///
/// The integrator chooses its own steps; samples inside a step come from the
/// dense output of that step, so their accuracy matches the method order.
/// Exactly one sample is emitted per requested time. A time equal to `x0`
/// is emitted with the initial state.
///
/// Numerical failures are reported with the index of the first time that
/// could not be sampled.
pub fn integrate_times<F, O>(
    f: &F,
    x0: Float,
    y0: &[Float],
    times: &[Float],
    observer: &mut O,
    rtol: &Tolerance,
    atol: &Tolerance,
    settings: &Settings,
) -> Result<IntegrationResult, Error>
where
    F: ODE,
    O: Observer,
{
    validate_times(x0, times)?;
    let xend = times[times.len() - 1];

    let mut y = y0.to_vec();
    let mut sampler = TimesSolOut::new(times, observer, y0.len());
    let result = dopri5(
        f,
        x0,
        xend,
        &mut y,
        rtol,
        atol,
        Some(&mut sampler),
        settings,
    )
    .map_err(Error::InvalidSettings)?;

    let index = sampler.next;
    if result.status.is_success() && index == times.len() {
        return Ok(result);
    }

    let t = times.get(index).copied().unwrap_or(xend);
    let err = match result.status {
        Status::NeedLargerNMax => Error::StepLimitExceeded {
            index,
            t,
            nmax: result.nstep,
        },
        Status::StepSizeTooSmall => Error::StepSizeCollapse {
            index,
            t,
            h: result.h,
        },
        Status::NonFinite => Error::Divergence { index, t },
        Status::Success | Status::UserInterrupt => Error::IncompleteTrajectory {
            written: index,
            expected: times.len(),
        },
    };
    log::warn!("integration stopped at x = {:e}: {err}", result.x);
    Err(err)
}

fn validate_times(x0: Float, times: &[Float]) -> Result<(), Error> {
    let Some(&first) = times.first() else {
        return Err(Error::InvalidTimes("at least one output time is required".into()));
    };
    if let Some(t) = times.iter().find(|t| !t.is_finite()) {
        return Err(Error::InvalidTimes(format!("output time {t} is not finite")));
    }
    if first < x0 {
        return Err(Error::InvalidTimes(format!(
            "first output time {first} precedes the initial time {x0}"
        )));
    }
    if let Some(i) = times.windows(2).position(|w| w[1] <= w[0]) {
        return Err(Error::InvalidTimes(format!(
            "output times must be strictly increasing (index {})",
            i + 1
        )));
    }
    Ok(())
}

/// Forwards the pending output times covered by each accepted step to the
/// observer.
struct TimesSolOut<'a, O: Observer> {
    times: &'a [Float],
    next: usize,
    observer: &'a mut O,
    yi: Vec<Float>,
}

impl<'a, O: Observer> TimesSolOut<'a, O> {
    fn new(times: &'a [Float], observer: &'a mut O, n: usize) -> Self {
        Self {
            times,
            next: 0,
            observer,
            yi: vec![0.0; n],
        }
    }
}

impl<O: Observer> SolOut for TimesSolOut<'_, O> {
    fn solout<I: Interpolate>(
        &mut self,
        _xold: Float,
        x: Float,
        y: &[Float],
        interpolator: Option<&I>,
    ) -> ControlFlag {
        while let Some(&t) = self.times.get(self.next) {
            if t > x + time_slack(x, t) {
                break;
            }
            let sample = match interpolator {
                Some(interp) if t != x => {
                    interp.interpolate(t, &mut self.yi);
                    &self.yi[..]
                }
                _ => y,
            };
            if self.observer.observe(t, sample) == ControlFlag::Interrupt {
                return ControlFlag::Interrupt;
            }
            self.next += 1;
        }
        ControlFlag::Continue
    }
}
