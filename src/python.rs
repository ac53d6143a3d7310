//! Python bindings for the `NMR_utils` extension module.

use numpy::{PyArray1, PyArray2, PyArrayMethods};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::{
    Float,
    error::Error,
    roesy::{ColumnLayout, MixingOptions, SampleOrigin, SpinLockParams, Trajectory, mix},
};

impl From<Error> for PyErr {
    fn from(err: Error) -> Self {
        if err.is_numerical() {
            PyRuntimeError::new_err(err.to_string())
        } else {
            PyValueError::new_err(err.to_string())
        }
    }
}

#[pyfunction]
#[pyo3(signature = (
    mixing_time, w_a, r1_a, r2_a, w_b, r1_b, r2_b, w1, s, u,
    max, may, maz, mbx, mby, mbz,
    *, rtol=1e-6, atol=1e-6, first_step=1e-3, max_steps=100_000,
    include_initial=false, legacy_layout=false
))]
/// Simulate cross relaxation between spins A and B during a ROESY spin-lock.
///
/// Parameters
/// ----------
/// mixing_time : float
///     Length of the spin-lock in seconds.
/// w_a, w_b : float
///     Offsets of spins A and B from the carrier (Hz).
/// r1_a, r2_a, r1_b, r2_b : float
///     Longitudinal and transverse relaxation rates (1/s).
/// w1 : float
///     Spin-lock field strength (Hz), applied along y.
/// s, u : float
///     Longitudinal and transverse cross-relaxation rates (1/s).
/// max, may, maz, mbx, mby, mbz : float
///     Initial magnetization.
/// rtol, atol : float, optional
///     Integrator tolerances. Default 1e-6.
/// first_step : float, optional
///     Initial integrator step. Default 1e-3.
/// max_steps : int, optional
///     Step budget of the integrator.
/// include_initial : bool, optional
///     Start the rows at t = 0 instead of t = 1e-4.
/// legacy_layout : bool, optional
///     Reproduce the historical column layout (MBz in column 1, column 6 NaN).
///
/// Returns
/// -------
/// ndarray, shape (N, 7)
///     Rows ``[t, MAx, MAy, MAz, MBx, MBy, MBz]`` every 1e-4 s.
///
/// Raises
/// ------
/// ValueError
///     For invalid inputs.
/// RuntimeError
///     When the integration fails.
fn allard97_roesy_mixer<'py>(
    py: Python<'py>,
    mixing_time: Float,
    w_a: Float,
    r1_a: Float,
    r2_a: Float,
    w_b: Float,
    r1_b: Float,
    r2_b: Float,
    w1: Float,
    s: Float,
    u: Float,
    max: Float,
    may: Float,
    maz: Float,
    mbx: Float,
    mby: Float,
    mbz: Float,
    rtol: Float,
    atol: Float,
    first_step: Float,
    max_steps: usize,
    include_initial: bool,
    legacy_layout: bool,
) -> PyResult<Bound<'py, PyArray2<Float>>> {
    let params = SpinLockParams::new(w_a, r1_a, r2_a, w_b, r1_b, r2_b, w1, s, u);
    let initial = [max, may, maz, mbx, mby, mbz];
    let options = MixingOptions::builder()
        .rtol(rtol)
        .atol(atol)
        .first_step(first_step)
        .nmax(max_steps)
        .origin(if include_initial {
            SampleOrigin::Initial
        } else {
            SampleOrigin::FirstInterval
        })
        .layout(if legacy_layout {
            ColumnLayout::Legacy
        } else {
            ColumnLayout::Standard
        })
        .build();

    let trajectory = py.detach(|| mix(&params, initial, mixing_time, &options))?;
    let (rows, data) = trajectory.into_parts();
    let array = PyArray1::from_vec(py, data).reshape((rows, Trajectory::COLUMNS))?;
    Ok(array)
}

#[pymodule]
#[pyo3(name = "NMR_utils")]
fn nmr_utils(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(allard97_roesy_mixer, m)?)?;
    m.setattr(
        "__doc__",
        "Cross relaxation simulations for ROESY spin-lock experiments.",
    )?;
    Ok(())
}
