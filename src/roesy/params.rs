//! Magnetization state and physical parameters of a mixing run

use bon::Builder;

use crate::{Float, error::Error};

/// Magnetization (MAx, MAy, MAz, MBx, MBy, MBz).
pub type State = [Float; 6];

pub const MAX: usize = 0;
pub const MAY: usize = 1;
pub const MAZ: usize = 2;
pub const MBX: usize = 3;
pub const MBY: usize = 4;
pub const MBZ: usize = 5;

/// Exchange the A and B halves of a state.
pub fn swap_sites(state: &State) -> State {
    [
        state[MBX], state[MBY], state[MBZ], state[MAX], state[MAY], state[MAZ],
    ]
}

/// Constants of the two-site model, fixed for one integration run.
///
/// Offsets and the spin-lock strength are given in Hz and converted to
/// rad/s by the right-hand side; rates are in 1/s. Unset builder fields
/// default to zero.
#[derive(Builder, Clone, Copy, Debug, Default, PartialEq)]
pub struct SpinLockParams {
    /// Offset of spin A relative to the spin-lock carrier (Hz).
    #[builder(default)]
    pub w_a: Float,
    /// Longitudinal relaxation rate of A.
    #[builder(default)]
    pub r1_a: Float,
    /// Transverse relaxation rate of A.
    #[builder(default)]
    pub r2_a: Float,
    /// Offset of spin B relative to the spin-lock carrier (Hz).
    #[builder(default)]
    pub w_b: Float,
    /// Longitudinal relaxation rate of B.
    #[builder(default)]
    pub r1_b: Float,
    /// Transverse relaxation rate of B.
    #[builder(default)]
    pub r2_b: Float,
    /// Spin-lock field strength (Hz), applied along y.
    #[builder(default)]
    pub w1: Float,
    /// Longitudinal cross-relaxation rate.
    #[builder(default)]
    pub s: Float,
    /// Transverse cross-relaxation rate.
    #[builder(default)]
    pub u: Float,
}

impl SpinLockParams {
    /// Parameters in the positional order of the mixer call:
    /// offset A, R1a, R2a, offset B, R1b, R2b, spin-lock strength, s, u.
    pub fn new(
        w_a: Float,
        r1_a: Float,
        r2_a: Float,
        w_b: Float,
        r1_b: Float,
        r2_b: Float,
        w1: Float,
        s: Float,
        u: Float,
    ) -> Self {
        Self {
            w_a,
            r1_a,
            r2_a,
            w_b,
            r1_b,
            r2_b,
            w1,
            s,
            u,
        }
    }

    /// The same system with spins A and B relabeled.
    pub fn swapped(&self) -> Self {
        Self {
            w_a: self.w_b,
            r1_a: self.r1_b,
            r2_a: self.r2_b,
            w_b: self.w_a,
            r1_b: self.r1_a,
            r2_b: self.r2_a,
            ..*self
        }
    }

    /// Fail on the first parameter that is NaN or infinite.
    pub fn validate(&self) -> Result<(), Error> {
        let named = [
            ("w_a", self.w_a),
            ("r1_a", self.r1_a),
            ("r2_a", self.r2_a),
            ("w_b", self.w_b),
            ("r1_b", self.r1_b),
            ("r2_b", self.r2_b),
            ("w1", self.w1),
            ("s", self.s),
            ("u", self.u),
        ];
        match named.into_iter().find(|(_, v)| !v.is_finite()) {
            Some((name, value)) => Err(Error::NonFiniteParameter { name, value }),
            None => Ok(()),
        }
    }
}

/// Fail on the first initial magnetization component that is NaN or infinite.
pub fn validate_state(state: &State) -> Result<(), Error> {
    match state.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(Error::NonFiniteInitialState {
            index,
            value: state[index],
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_order() {
        let p = SpinLockParams::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
        let q = SpinLockParams::builder()
            .w_a(1.0)
            .r1_a(2.0)
            .r2_a(3.0)
            .w_b(4.0)
            .r1_b(5.0)
            .r2_b(6.0)
            .w1(7.0)
            .s(8.0)
            .u(9.0)
            .build();
        assert_eq!(p, q);
    }

    #[test]
    fn swapping_twice_is_identity() {
        let p = SpinLockParams::new(120.0, 1.1, 3.2, -80.0, 1.4, 2.9, 5000.0, 0.3, -0.6);
        assert_eq!(p.swapped().swapped(), p);
        assert_eq!(p.swapped().w_a, -80.0);
        assert_eq!(p.swapped().s, 0.3);

        let state = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert_eq!(swap_sites(&state), [4.0, 5.0, 6.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn non_finite_values_are_named() {
        let p = SpinLockParams::builder().r2_b(Float::NAN).build();
        assert!(matches!(
            p.validate(),
            Err(Error::NonFiniteParameter { name: "r2_b", .. })
        ));
        assert!(SpinLockParams::default().validate().is_ok());

        let err = validate_state(&[0.0, 0.0, 1.0, Float::INFINITY, 0.0, 1.0]).unwrap_err();
        assert_eq!(
            err,
            Error::NonFiniteInitialState {
                index: 3,
                value: Float::INFINITY
            }
        );
    }
}
