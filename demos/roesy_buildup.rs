//! # Example: ROESY cross-peak build-up
//!
//! Invert spin A, spin-lock both spins for 200 ms and follow the transfer
//! of magnetization onto spin B.
//!
//! Equations: Allard, Helgstrand and Härd (1997), eq. 5.
//!
//! Initial condition: MAz = -1, MBz = 1, no transverse magnetization.
//!

use nmr_utils::prelude::*;
use nmr_utils::roesy::{MAY, MAZ, MBY, MBZ};

fn main() {
    let params = SpinLockParams::builder()
        .w_a(250.0)
        .r1_a(1.5)
        .r2_a(4.0)
        .w_b(-180.0)
        .r1_b(1.8)
        .r2_b(5.0)
        .w1(5000.0)
        .s(0.4)
        .u(-0.8)
        .build();
    let initial = [0.0, 0.0, -1.0, 0.0, 0.0, 1.0];

    match allard97_roesy_mixer(0.2, &params, initial) {
        Ok(traj) => {
            println!("Rows: {}", traj.rows());
            // Print every 10 ms
            for i in (99..traj.rows()).step_by(100) {
                let y = traj.state(i);
                println!(
                    "t = {:.3}, MAy = {:+.5}, MAz = {:+.5}, MBy = {:+.5}, MBz = {:+.5}",
                    traj.time(i),
                    y[MAY],
                    y[MAZ],
                    y[MBY],
                    y[MBZ]
                );
            }
        }
        Err(e) => eprintln!("Mixing failed: {}", e),
    }
}
