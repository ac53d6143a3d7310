//! Simulation of cross relaxation between two spin systems during a ROESY
//! spin-lock, integrated with an adaptive Dormand-Prince 5(4) method and
//! sampled on a uniform time grid through dense output.
//!
//! # Example
//!
//! ```rust
//! use nmr_utils::prelude::*;
//!
//! let params = SpinLockParams::builder()
//!     .r1_a(1.5).r2_a(4.0)
//!     .r1_b(1.5).r2_b(4.0)
//!     .w1(5000.0)
//!     .s(0.4).u(-0.8)
//!     .build();
//! let initial = [0.0, 0.0, 1.0, 0.0, 0.0, 0.0];
//!
//! let trajectory = mix(&params, initial, 0.05, &MixingOptions::default()).unwrap();
//! assert_eq!(trajectory.rows(), 500);
//! ```

pub mod core;
pub mod error;
pub mod methods;
pub mod prelude;
pub mod roesy;
pub mod solve;

#[cfg(feature = "python")]
mod python;

pub use error::Error;

// Prevent selecting two incompatible float precision features at once.
#[cfg(all(feature = "f32", feature = "f64"))]
compile_error!(
    "features 'f32' and 'f64' cannot both be enabled; pick exactly one Float precision feature"
);

/// Floating point type used throughout the crate.
#[cfg(feature = "f32")]
pub type Float = f32;
#[cfg(feature = "f64")]
pub type Float = f64;
