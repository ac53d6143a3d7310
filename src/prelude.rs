//! Convenient prelude: import the most commonly used traits, types, and functions.
//!
//! Bring this into scope with:
//!
//! ```rust
//! use nmr_utils::prelude::*;
//! ```
//!
//! Re-exports included:
//! - Core traits and types: `ODE`, `Interpolate`, `SolOut`, `ControlFlag`, `Status`.
//! - Integrator: `dopri5`, `Settings`, `Tolerance`, `integrate_times`, `Observer`.
//! - Mixing: `mix`, `allard97_roesy_mixer`, `MixingOptions`, `SpinLockParams`,
//!   `Trajectory` and friends.
//!

pub use crate::core::{
    interpolate::Interpolate,
    ode::ODE,
    solout::{ControlFlag, SolOut},
    status::Status,
};
pub use crate::methods::{
    dp::dopri5,
    result::IntegrationResult,
    settings::{Settings, Tolerance},
};
pub use crate::roesy::{
    Allard97, ColumnLayout, MixingOptions, SAMPLING_INTERVAL, SampleOrigin, SpinLockParams,
    State, TimeGrid, Trajectory, allard97_roesy_mixer, mix,
};
pub use crate::solve::{Observer, integrate_times};
pub use crate::{Error, Float};
