use approx::assert_abs_diff_eq;
use nmr_utils::prelude::*;
use nmr_utils::roesy::{MAX, MAZ, MBY, MBZ, swap_sites};

mod common;
use common::{A_INVERTED, EQUILIBRIUM, exact_state, roesy_params, tight_options};

#[test]
fn rows_sit_on_the_uniform_grid() {
    let traj = allard97_roesy_mixer(0.05, &roesy_params(), A_INVERTED).unwrap();
    assert_eq!(traj.rows(), 500);
    assert_eq!(traj.as_slice().len(), 500 * Trajectory::COLUMNS);
    for i in 0..traj.rows() {
        assert_eq!(traj.time(i), (i + 1) as Float * SAMPLING_INTERVAL);
    }
}

#[test]
fn equilibrium_without_drive_stays_put() {
    let params = SpinLockParams::builder()
        .r1_a(1.0)
        .r2_a(1.0)
        .r1_b(1.0)
        .r2_b(1.0)
        .build();
    let traj = allard97_roesy_mixer(0.01, &params, EQUILIBRIUM).unwrap();
    assert_eq!(traj.rows(), 100);
    for i in 0..traj.rows() {
        assert_eq!(traj.state(i), EQUILIBRIUM);
    }
}

#[test]
fn agrees_with_matrix_exponential() {
    let params = roesy_params();
    let system = Allard97::new(params);
    let traj = mix(&params, A_INVERTED, 0.02, &tight_options()).unwrap();

    for i in (0..traj.rows()).step_by(17) {
        let exact = exact_state(&system, A_INVERTED, traj.time(i));
        let state = traj.state(i);
        for k in 0..6 {
            assert_abs_diff_eq!(state[k], exact[k], epsilon = 1e-6);
        }
    }
}

#[test]
fn default_tolerances_track_the_exact_solution() {
    let params = roesy_params();
    let system = Allard97::new(params);
    let traj = allard97_roesy_mixer(0.02, &params, A_INVERTED).unwrap();

    let last = traj.rows() - 1;
    let exact = exact_state(&system, A_INVERTED, traj.time(last));
    let state = traj.state(last);
    for k in 0..6 {
        assert_abs_diff_eq!(state[k], exact[k], epsilon = 5e-3);
    }
}

#[test]
fn decoupled_spins_relax_independently() {
    let params = SpinLockParams::builder()
        .r1_a(2.0)
        .r2_a(7.0)
        .r1_b(0.5)
        .r2_b(3.0)
        .build();
    let initial = [0.6, 0.0, -1.0, 0.0, 0.2, 0.0];
    let traj = mix(&params, initial, 0.2, &MixingOptions::default()).unwrap();

    for i in (0..traj.rows()).step_by(50) {
        let t = traj.time(i);
        let y = traj.state(i);
        assert_abs_diff_eq!(y[MAX], 0.6 * (-7.0 * t).exp(), epsilon = 1e-5);
        assert_abs_diff_eq!(y[MAZ], 1.0 - 2.0 * (-2.0 * t).exp(), epsilon = 1e-5);
        assert_abs_diff_eq!(y[MBY], 0.2 * (-3.0 * t).exp(), epsilon = 1e-5);
        assert_abs_diff_eq!(y[MBZ], 1.0 - (-0.5 * t).exp(), epsilon = 1e-5);
    }
}

#[test]
fn without_spin_lock_transverse_magnetization_stays_zero() {
    let params = SpinLockParams {
        w1: 0.0,
        ..roesy_params()
    };
    let traj = allard97_roesy_mixer(0.05, &params, A_INVERTED).unwrap();
    for row in traj.iter_rows() {
        for &v in &[row[1], row[2], row[4], row[5]] {
            assert_eq!(v, 0.0);
        }
    }
    // cross relaxation still transfers the inversion of A onto B
    assert!(traj.state(traj.rows() - 1)[MBZ] > 1.0);
}

#[test]
fn relabeling_spins_swaps_the_trajectory() {
    let params = roesy_params();
    let traj = mix(&params, A_INVERTED, 0.03, &tight_options()).unwrap();
    let swapped = mix(
        &params.swapped(),
        swap_sites(&A_INVERTED),
        0.03,
        &tight_options(),
    )
    .unwrap();

    assert_eq!(traj.rows(), swapped.rows());
    for i in 0..traj.rows() {
        let expected = swap_sites(&traj.state(i));
        let got = swapped.state(i);
        for k in 0..6 {
            assert_abs_diff_eq!(got[k], expected[k], epsilon = 1e-8);
        }
    }
}

#[test]
fn response_is_affine_in_the_initial_state() {
    let params = roesy_params();
    let y = A_INVERTED;
    let z = [0.3, -0.1, 0.5, 0.0, 0.4, -0.2];
    let alpha = 0.25;
    let mixed: State = std::array::from_fn(|k| alpha * y[k] + (1.0 - alpha) * z[k]);

    let options = tight_options();
    let ty = mix(&params, y, 0.02, &options).unwrap();
    let tz = mix(&params, z, 0.02, &options).unwrap();
    let tm = mix(&params, mixed, 0.02, &options).unwrap();

    for i in 0..tm.rows() {
        let (sy, sz, sm) = (ty.state(i), tz.state(i), tm.state(i));
        for k in 0..6 {
            assert_abs_diff_eq!(sm[k], alpha * sy[k] + (1.0 - alpha) * sz[k], epsilon = 1e-7);
        }
    }
}

#[test]
fn including_the_initial_row_shifts_the_grid() {
    let options = MixingOptions::builder()
        .origin(SampleOrigin::Initial)
        .build();
    let traj = mix(&roesy_params(), A_INVERTED, 0.01, &options).unwrap();

    assert_eq!(traj.rows(), 100);
    assert_eq!(traj.row(0), &[0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 1.0]);
    assert_abs_diff_eq!(traj.time(99), 0.0099, epsilon = 1e-15);

    let standard = allard97_roesy_mixer(0.01, &roesy_params(), A_INVERTED).unwrap();
    // row i of the standard grid is row i + 1 here
    for k in 0..6 {
        assert_abs_diff_eq!(traj.state(1)[k], standard.state(0)[k], epsilon = 1e-10);
    }
}

#[test]
fn legacy_layout_reproduces_the_overwritten_column() {
    let options = MixingOptions::builder().layout(ColumnLayout::Legacy).build();
    let legacy = mix(&roesy_params(), A_INVERTED, 0.01, &options).unwrap();
    let standard = allard97_roesy_mixer(0.01, &roesy_params(), A_INVERTED).unwrap();

    for (l, s) in legacy.iter_rows().zip(standard.iter_rows()) {
        assert_eq!(l[0], s[0]);
        assert_eq!(l[1], s[1 + MBZ]);
        assert_eq!(&l[2..6], &s[2..6]);
        assert!(l[6].is_nan());
    }
}

#[test]
fn transverse_cross_relaxation_transfers_locked_magnetization() {
    // spin-locked A magnetization along y, B empty
    let params = SpinLockParams::builder()
        .r1_a(1.5)
        .r2_a(4.0)
        .r1_b(1.5)
        .r2_b(4.0)
        .w1(5000.0)
        .u(-0.8)
        .build();
    let initial = [0.0, 1.0, 0.0, 0.0, 0.0, 0.0];
    let traj = allard97_roesy_mixer(0.1, &params, initial).unwrap();
    let last = traj.state(traj.rows() - 1);
    assert!(last[MBY] > 0.0);
    assert!(last[MBY] < last[1]);
    assert!(last[1] < 1.0);
}
