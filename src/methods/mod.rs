//! Numerical methods

pub mod dp;
pub mod hinit;
pub mod result;
pub mod settings;
