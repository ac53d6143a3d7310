//! Drivers that run an integrator and report the solution at requested times.

pub mod times;

pub use times::{Observer, integrate_times};
