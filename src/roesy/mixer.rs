//! ROESY mixing: integrate the two-site model over the mixing time and
//! tabulate the magnetization on a uniform grid.

use bon::Builder;

use crate::{
    Float,
    error::Error,
    methods::settings::{Settings, Tolerance},
    roesy::{
        grid::{SAMPLING_INTERVAL, SampleOrigin, TimeGrid},
        params::{SpinLockParams, State, validate_state},
        system::Allard97,
        trajectory::{ColumnLayout, Trajectory, TrajectoryWriter},
    },
    solve::times::integrate_times,
};

/// Initial step handed to the integrator (s).
pub const INITIAL_STEP: Float = 1e-3;

#[derive(Builder, Clone, Debug)]
/// Numerical options of a mixing run.
pub struct MixingOptions {
    /// Spacing of the output rows. Default: [`SAMPLING_INTERVAL`].
    #[builder(default = SAMPLING_INTERVAL)]
    pub interval: Float,
    /// Relative tolerance for error estimation.
    #[builder(default = 1e-6, into)]
    pub rtol: Tolerance,
    /// Absolute tolerance for error estimation.
    #[builder(default = 1e-6, into)]
    pub atol: Tolerance,
    /// Initial step suggestion. Default: [`INITIAL_STEP`].
    #[builder(default = INITIAL_STEP)]
    pub first_step: Float,
    /// Maximum step size (maps to `settings.hmax`).
    pub max_step: Option<Float>,
    /// Minimum step size; the run fails once the controller goes below it.
    pub min_step: Option<Float>,
    /// Maximum number of integrator steps.
    #[builder(default = 100_000)]
    pub nmax: usize,
    #[builder(default)]
    pub origin: SampleOrigin,
    #[builder(default)]
    pub layout: ColumnLayout,
}

impl Default for MixingOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl MixingOptions {
    fn settings(&self) -> Settings {
        Settings::builder()
            .h0(self.first_step)
            .maybe_hmax(self.max_step)
            .maybe_hmin(self.min_step)
            .nmax(self.nmax)
            .build()
    }
}

/// Integrate the Allard 1997 cross relaxation model from `initial` at
/// `t = 0` over `mixing_time` seconds.
///
/// Returns one row `[t, MAx, MAy, MAz, MBx, MBy, MBz]` per grid time (see
/// [`TimeGrid`]). Every input is checked before any storage is allocated,
/// and a failed integration yields an error rather than a partial table.
pub fn mix(
    params: &SpinLockParams,
    initial: State,
    mixing_time: Float,
    options: &MixingOptions,
) -> Result<Trajectory, Error> {
    params.validate()?;
    validate_state(&initial)?;
    let grid = TimeGrid::new(mixing_time, options.interval, options.origin)?;

    log::debug!(
        "mixing {} rows over {:e} s (interval {:e}, {:?})",
        grid.len(),
        mixing_time,
        grid.interval(),
        grid.origin()
    );

    let system = Allard97::new(*params);
    let mut writer = TrajectoryWriter::new(grid.len(), options.layout);
    let result = integrate_times(
        &system,
        0.0,
        &initial,
        grid.as_slice(),
        &mut writer,
        &options.rtol,
        &options.atol,
        &options.settings(),
    )?;

    log::debug!(
        "mixing finished: {} steps ({} accepted, {} rejected), {} evaluations",
        result.nstep,
        result.naccpt,
        result.nrejct,
        result.nfev
    );
    writer.finish()
}

/// Mixing run with the historical fixed numerics: tolerances `1e-6`, an
/// initial step of `1e-3` s and rows every `1e-4` s.
pub fn allard97_roesy_mixer(
    mixing_time: Float,
    params: &SpinLockParams,
    initial: State,
) -> Result<Trajectory, Error> {
    mix(params, initial, mixing_time, &MixingOptions::default())
}
