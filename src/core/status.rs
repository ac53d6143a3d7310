//! Status codes for integrators

/// Reason an integration run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Reached `xend`.
    Success,
    /// The [`SolOut`](super::solout::SolOut) callback asked to stop.
    UserInterrupt,
    /// More than `nmax` steps were needed.
    NeedLargerNMax,
    /// The step size dropped below the allowed minimum.
    StepSizeTooSmall,
    /// The error estimate or the accepted state became NaN or infinite.
    NonFinite,
}

impl Status {
    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success)
    }
}
