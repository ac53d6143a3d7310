//! Row-major output table of a mixing run

use crate::{
    Float,
    core::solout::ControlFlag,
    error::Error,
    roesy::params::{MBZ, State},
    solve::times::Observer,
};

/// Column order of a [`Trajectory`] row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColumnLayout {
    /// `[t, MAx, MAy, MAz, MBx, MBy, MBz]`
    #[default]
    Standard,
    /// Reproduces the historical writer, which stored MBz in column 1
    /// over MAx and never filled column 6. Column 6 is NaN.
    Legacy,
}

/// Observer collecting one row per sample into a preallocated table.
#[derive(Debug)]
pub struct TrajectoryWriter {
    data: Vec<Float>,
    rows: usize,
    written: usize,
    layout: ColumnLayout,
}

impl TrajectoryWriter {
    pub fn new(rows: usize, layout: ColumnLayout) -> Self {
        Self {
            data: vec![0.0; rows * Trajectory::COLUMNS],
            rows,
            written: 0,
            layout,
        }
    }

    /// Rows filled so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// The finished table, provided every row was written.
    pub fn finish(self) -> Result<Trajectory, Error> {
        if self.written != self.rows {
            return Err(Error::IncompleteTrajectory {
                written: self.written,
                expected: self.rows,
            });
        }
        Ok(Trajectory {
            rows: self.rows,
            data: self.data,
        })
    }
}

impl Observer for TrajectoryWriter {
    fn observe(&mut self, t: Float, y: &[Float]) -> ControlFlag {
        if self.written == self.rows {
            return ControlFlag::Interrupt;
        }
        let start = self.written * Trajectory::COLUMNS;
        let row = &mut self.data[start..start + Trajectory::COLUMNS];
        row[0] = t;
        row[1..].copy_from_slice(&y[..Trajectory::COLUMNS - 1]);
        if self.layout == ColumnLayout::Legacy {
            row[1] = y[MBZ];
            row[Trajectory::COLUMNS - 1] = Float::NAN;
        }
        self.written += 1;
        ControlFlag::Continue
    }
}

/// `N × 7` table of time and magnetization, stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    rows: usize,
    data: Vec<Float>,
}

impl Trajectory {
    /// Time followed by the six magnetization components.
    pub const COLUMNS: usize = 7;

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn as_slice(&self) -> &[Float] {
        &self.data
    }

    /// Row `i` as `[t, MAx, MAy, MAz, MBx, MBy, MBz]`.
    pub fn row(&self, i: usize) -> &[Float] {
        &self.data[i * Self::COLUMNS..(i + 1) * Self::COLUMNS]
    }

    pub fn time(&self, i: usize) -> Float {
        self.row(i)[0]
    }

    /// Magnetization of row `i`.
    pub fn state(&self, i: usize) -> State {
        let mut state = [0.0; 6];
        state.copy_from_slice(&self.row(i)[1..]);
        state
    }

    /// Column `j` across all rows.
    pub fn column(&self, j: usize) -> Vec<Float> {
        self.data
            .chunks_exact(Self::COLUMNS)
            .map(|row| row[j])
            .collect()
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Float]> + '_ {
        self.data.chunks_exact(Self::COLUMNS)
    }

    pub fn into_vec(self) -> Vec<Float> {
        self.data
    }

    /// Row count and the flat row-major buffer.
    pub fn into_parts(self) -> (usize, Vec<Float>) {
        (self.rows, self.data)
    }
}
