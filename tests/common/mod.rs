#![allow(dead_code)]

use nmr_utils::prelude::*;

/// Unit z-magnetization on both spins.
pub const EQUILIBRIUM: State = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0];

/// z-magnetization on A only, the usual ROESY starting point.
pub const A_INVERTED: State = [0.0, 0.0, -1.0, 0.0, 0.0, 1.0];

/// A small molecule near the ROESY zero crossing of the NOE.
pub fn roesy_params() -> SpinLockParams {
    SpinLockParams::builder()
        .w_a(250.0)
        .r1_a(1.5)
        .r2_a(4.0)
        .w_b(-180.0)
        .r1_b(1.8)
        .r2_b(5.0)
        .w1(1000.0)
        .s(0.4)
        .u(-0.8)
        .build()
}

pub fn tight_options() -> MixingOptions {
    MixingOptions::builder().rtol(1e-11).atol(1e-11).build()
}

/// Exact solution of `y' = M y + b` at time `t` from the exponential of
/// the augmented 7x7 generator `[[M, b], [0, 0]]`.
pub fn exact_state(system: &Allard97, initial: State, t: Float) -> State {
    let (m, b) = system.linear_form();
    let mut a = [[0.0; 7]; 7];
    for i in 0..6 {
        for j in 0..6 {
            a[i][j] = m[i][j] * t;
        }
        a[i][6] = b[i] * t;
    }
    let e = expm(&a);

    let mut y = [0.0; 6];
    for i in 0..6 {
        y[i] = e[i][6] + (0..6).map(|j| e[i][j] * initial[j]).sum::<Float>();
    }
    y
}

type Mat = [[Float; 7]; 7];

fn matmul(a: &Mat, b: &Mat) -> Mat {
    let mut c = [[0.0; 7]; 7];
    for i in 0..7 {
        for k in 0..7 {
            for j in 0..7 {
                c[i][j] += a[i][k] * b[k][j];
            }
        }
    }
    c
}

/// Scaling and squaring with a truncated Taylor series.
fn expm(a: &Mat) -> Mat {
    let norm = a
        .iter()
        .map(|row| row.iter().map(|v| v.abs()).sum::<Float>())
        .fold(0.0, Float::max);
    let mut squarings = 0;
    let mut scale = 1.0;
    while norm * scale > 0.25 {
        scale *= 0.5;
        squarings += 1;
    }

    let mut scaled = *a;
    scaled.iter_mut().flatten().for_each(|v| *v *= scale);

    let mut result = [[0.0; 7]; 7];
    let mut term = [[0.0; 7]; 7];
    for i in 0..7 {
        result[i][i] = 1.0;
        term[i][i] = 1.0;
    }
    for k in 1..=18 {
        term = matmul(&term, &scaled);
        term.iter_mut().flatten().for_each(|v| *v /= k as Float);
        for i in 0..7 {
            for j in 0..7 {
                result[i][j] += term[i][j];
            }
        }
    }
    for _ in 0..squarings {
        result = matmul(&result, &result);
    }
    result
}
