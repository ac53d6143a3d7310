//! Right-hand side of the two-site cross relaxation equations

use crate::{Float, core::ode::ODE, roesy::params::SpinLockParams};

const TWO_PI: Float = 2.0 * std::f64::consts::PI as Float;

/// Equilibrium z-magnetization of spin A.
pub const MAZ_ZERO: Float = 1.0;
/// Equilibrium z-magnetization of spin B.
pub const MBZ_ZERO: Float = 1.0;

/// Bloch–McConnell type equations with cross relaxation during a spin-lock
/// along y (Allard, Helgstrand and Härd 1997, eq. 5):
///
/// ```text
/// dMAx/dt = -R2a MAx - 2π wA MAy + 2π w1 MAz - u MBx
/// dMAy/dt =  2π wA MAx - R2a MAy - u MBy
/// dMAz/dt =  cA - 2π w1 MAx - R1a MAz - s MBz
/// dMBx/dt = -R2b MBx - 2π wB MBy + 2π w1 MBz - u MAx
/// dMBy/dt =  2π wB MBx - R2b MBy - u MAy
/// dMBz/dt =  cB - 2π w1 MBx - R1b MBz - s MAz
/// ```
///
/// with `cA = R1a MAz0 + s MBz0` and `cB = R1b MBz0 + s MAz0`. Both sites
/// are evaluated with the same term order, so relabeling A and B permutes
/// the derivative exactly.
#[derive(Clone, Debug, PartialEq)]
pub struct Allard97 {
    params: SpinLockParams,
    // angular frequencies (rad/s)
    omega_a: Float,
    omega_b: Float,
    omega_1: Float,
    corr_a: Float,
    corr_b: Float,
}

impl Allard97 {
    /// Convert frequencies to rad/s and compute the equilibrium correction
    /// terms once from the complete parameter set.
    pub fn new(params: SpinLockParams) -> Self {
        let corr_a = params.r1_a * MAZ_ZERO + params.s * MBZ_ZERO;
        let corr_b = params.r1_b * MBZ_ZERO + params.s * MAZ_ZERO;
        Self {
            omega_a: TWO_PI * params.w_a,
            omega_b: TWO_PI * params.w_b,
            omega_1: TWO_PI * params.w1,
            corr_a,
            corr_b,
            params,
        }
    }

    pub fn params(&self) -> &SpinLockParams {
        &self.params
    }

    /// The constant terms `(cA, cB)` driving z-magnetization back to equilibrium.
    pub fn corrections(&self) -> (Float, Float) {
        (self.corr_a, self.corr_b)
    }

    /// Matrix `M` and offset `b` such that the derivative is `M y + b`.
    pub fn linear_form(&self) -> ([[Float; 6]; 6], [Float; 6]) {
        let p = &self.params;
        let (wa, wb, w1) = (self.omega_a, self.omega_b, self.omega_1);
        let m = [
            [-p.r2_a, -wa, w1, -p.u, 0.0, 0.0],
            [wa, -p.r2_a, 0.0, 0.0, -p.u, 0.0],
            [-w1, 0.0, -p.r1_a, 0.0, 0.0, -p.s],
            [-p.u, 0.0, 0.0, -p.r2_b, -wb, w1],
            [0.0, -p.u, 0.0, wb, -p.r2_b, 0.0],
            [0.0, 0.0, -p.s, -w1, 0.0, -p.r1_b],
        ];
        let b = [0.0, 0.0, self.corr_a, 0.0, 0.0, self.corr_b];
        (m, b)
    }
}

impl ODE for Allard97 {
    fn ode(&self, _x: Float, m: &[Float], dmdt: &mut [Float]) {
        let p = &self.params;
        let [max, may, maz, mbx, mby, mbz] = [m[0], m[1], m[2], m[3], m[4], m[5]];

        dmdt[0] = -p.r2_a * max - self.omega_a * may + self.omega_1 * maz - p.u * mbx;
        dmdt[1] = self.omega_a * max - p.r2_a * may - p.u * mby;
        dmdt[2] = self.corr_a - self.omega_1 * max - p.r1_a * maz - p.s * mbz;

        dmdt[3] = -p.r2_b * mbx - self.omega_b * mby + self.omega_1 * mbz - p.u * max;
        dmdt[4] = self.omega_b * mbx - p.r2_b * mby - p.u * may;
        dmdt[5] = self.corr_b - self.omega_1 * mbx - p.r1_b * mbz - p.s * maz;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roesy::params::swap_sites;
    use approx::assert_relative_eq;

    fn params() -> SpinLockParams {
        SpinLockParams::new(150.0, 1.2, 3.4, -90.0, 1.6, 2.8, 4000.0, 0.35, -0.7)
    }

    #[test]
    fn equilibrium_is_stationary_without_drive() {
        let f = Allard97::new(SpinLockParams::new(0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0));
        let mut dmdt = [1.0; 6];
        f.ode(0.0, &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0], &mut dmdt);
        assert_eq!(dmdt, [0.0; 6]);
    }

    #[test]
    fn corrections_use_equilibrium_magnetization() {
        let f = Allard97::new(params());
        let (ca, cb) = f.corrections();
        assert_relative_eq!(ca, 1.2 + 0.35);
        assert_relative_eq!(cb, 1.6 + 0.35);
    }

    #[test]
    fn linear_form_matches_evaluation() {
        let f = Allard97::new(params());
        let (m, b) = f.linear_form();
        let y = [0.3, -0.2, 0.9, 0.1, 0.05, -0.4];
        let mut dydt = [0.0; 6];
        f.ode(0.0, &y, &mut dydt);
        for i in 0..6 {
            let expected: Float = b[i] + (0..6).map(|j| m[i][j] * y[j]).sum::<Float>();
            assert_relative_eq!(dydt[i], expected, max_relative = 1e-12, epsilon = 1e-9);
        }
    }

    #[test]
    fn relabeling_permutes_derivative_exactly() {
        let f = Allard97::new(params());
        let g = Allard97::new(params().swapped());
        let y = [0.3, -0.2, 0.9, 0.1, 0.05, -0.4];
        let mut dy = [0.0; 6];
        let mut dy_swapped = [0.0; 6];
        f.ode(0.0, &y, &mut dy);
        g.ode(0.0, &swap_sites(&y), &mut dy_swapped);
        assert_eq!(swap_sites(&dy), dy_swapped);
    }

    #[test]
    fn spin_lock_is_the_only_transverse_longitudinal_coupling() {
        let f = Allard97::new(SpinLockParams { w1: 0.0, ..params() });
        let (m, _) = f.linear_form();
        let transverse = [0, 1, 3, 4];
        let longitudinal = [2, 5];
        for &i in &transverse {
            for &j in &longitudinal {
                assert_eq!(m[i][j], 0.0);
                assert_eq!(m[j][i], 0.0);
            }
        }
    }
}
