//! Two-site cross relaxation during a ROESY spin-lock.
//!
//! Magnetization of spin systems A and B evolves under relaxation, the
//! spin-lock field and longitudinal/transverse cross relaxation following
//! eq. 5 of Allard, Helgstrand and Härd, J. Magn. Reson. 129, 19-29 (1997).

pub mod grid;
pub mod mixer;
pub mod params;
pub mod system;
pub mod trajectory;

pub use grid::{MAX_ROWS, SAMPLING_INTERVAL, SampleOrigin, TimeGrid};
pub use mixer::{INITIAL_STEP, MixingOptions, allard97_roesy_mixer, mix};
pub use params::{MAX, MAY, MAZ, MBX, MBY, MBZ, SpinLockParams, State, swap_sites};
pub use system::Allard97;
pub use trajectory::{ColumnLayout, Trajectory, TrajectoryWriter};
