//! Uniform output grid of a mixing run

use crate::{Float, error::Error};

/// Default spacing of the output rows (s).
pub const SAMPLING_INTERVAL: Float = 1e-4;

/// Largest number of rows a grid may have (`7 * 8` bytes each in `f64`).
pub const MAX_ROWS: usize = 100_000_000;

// Relative slack for a last row landing on the mixing time up to rounding.
const END_SLACK: Float = 4.0 * Float::EPSILON;

/// Where the first output row sits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SampleOrigin {
    /// Rows at `Δt, 2Δt, …, NΔt`; the initial state is not reported.
    #[default]
    FirstInterval,
    /// Rows at `0, Δt, …, (N-1)Δt`, starting with the initial state.
    Initial,
}

/// Output times `τ_i = (i + k) Δt` for `i = 0..N`, with `N = ⌊T/Δt⌋` and
/// `k` given by the [`SampleOrigin`].
///
/// Times are computed by multiplication, never by accumulating `Δt`.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeGrid {
    interval: Float,
    origin: SampleOrigin,
    times: Vec<Float>,
}

impl TimeGrid {
    pub fn new(mixing_time: Float, interval: Float, origin: SampleOrigin) -> Result<Self, Error> {
        if !(mixing_time.is_finite() && mixing_time > 0.0) {
            return Err(Error::InvalidMixingTime(mixing_time));
        }
        if !(interval.is_finite() && interval > 0.0) {
            return Err(Error::InvalidSamplingInterval(interval));
        }

        let quotient = (mixing_time / interval).floor();
        if quotient > MAX_ROWS as Float {
            return Err(Error::GridTooLarge {
                rows: quotient,
                max: MAX_ROWS,
            });
        }
        let count = row_count(quotient as usize, mixing_time, interval);
        if count == 0 {
            return Err(Error::EmptyGrid {
                mixing_time,
                interval,
            });
        }

        let offset = match origin {
            SampleOrigin::FirstInterval => 1,
            SampleOrigin::Initial => 0,
        };
        let times = (0..count)
            .map(|i| (i + offset) as Float * interval)
            .collect();

        Ok(Self {
            interval,
            origin,
            times,
        })
    }

    /// Number of rows `N`.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false; construction rejects empty grids.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn interval(&self) -> Float {
        self.interval
    }

    pub fn origin(&self) -> SampleOrigin {
        self.origin
    }

    pub fn as_slice(&self) -> &[Float] {
        &self.times
    }

    pub fn iter(&self) -> impl Iterator<Item = Float> + '_ {
        self.times.iter().copied()
    }

    /// Time of the last row.
    pub fn end(&self) -> Float {
        self.times.last().copied().unwrap_or(0.0)
    }
}

/// Largest `n` with `n * interval <= mixing_time`, starting from the
/// rounded quotient and allowing the last row a few ulps past the end.
fn row_count(mut n: usize, mixing_time: Float, interval: Float) -> usize {
    let end = mixing_time * (1.0 + END_SLACK);
    while n > 0 && n as Float * interval > end {
        n -= 1;
    }
    if n < MAX_ROWS && (n + 1) as Float * interval <= end {
        n += 1;
    }
    n
}
