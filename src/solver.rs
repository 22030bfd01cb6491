// Copyright (c) 2020-2021 Huang Qinjin (huangqinjin@gmail.com)
// Adapted to Rust for sim2d-align

// Distributed under the Boost Software License, Version 1.0.
// (See accompanying file LICENSE_1_0.txt or copy at
// https://www.boost.org/LICENSE_1_0.txt)

//! Closed-form weighted least-squares fit of a similarity transform.
//!
//! This is the 2D case of orthogonal Procrustes analysis extended with a
//! uniform scale, see
//! "Least-squares estimation of transformation parameters between two point patterns".
//! Umeyama, S. IEEE TPAMI 1991.

#[cfg(feature = "consensus")]
pub mod consensus;

use nalgebra::{Matrix2, Vector2};

use crate::sim2d::{Point, Sim2D};

/// Return the similarity transform $T$ minimizing
/// $$
/// \sum_i w_i \ \lVert T(\bm{s_i}) - \bm{d_i} \rVert^2
/// $$
///
/// - $\bm{s_i}$ are the source points `src`.
/// - $\bm{d_i}$ are the destination points `dst`.
/// - $w_i$ are the non-negative weights `w`.
///
/// The three slices must have the same length and the weights a positive sum.
/// This is not checked: violating it, or giving source points that all
/// coincide once weighted, yields non finite parameters (see [`Sim2D::is_finite`]).
pub fn solve(src: &[Point], dst: &[Point], w: &[f64]) -> Sim2D {
    debug_assert_eq!(src.len(), dst.len());
    debug_assert_eq!(src.len(), w.len());

    let ws: f64 = w.iter().sum();
    let (cs, cd) = src.iter().zip(dst).zip(w).fold(
        (Vector2::<f64>::zeros(), Vector2::<f64>::zeros()),
        |(cs, cd), ((s, d), &wi)| (cs + wi * s.coords, cd + wi * d.coords),
    );
    let cs = Point::from(cs / ws);
    let cd = Point::from(cd / ws);

    // Weighted cross-covariance and source variance around the centroids.
    let mut cov = Matrix2::<f64>::zeros();
    let mut var = 0.0;
    for ((s, d), &wi) in src.iter().zip(dst).zip(w) {
        let ds = s - cs;
        let dd = d - cd;
        cov += wi * ds * dd.transpose();
        var += wi * ds.norm_squared();
    }

    let t = Vector2::new(cov.m11 + cov.m22, cov.m12 - cov.m21);
    let mut sim = Sim2D::new(t.norm() / var, t.y.atan2(t.x), 0.0, 0.0);

    // Translation sending the source centroid onto the destination centroid.
    let moved = sim.transform_point(&cs);
    sim.x = cd.x - moved.x;
    sim.y = cd.y - moved.y;
    sim
}

/// Weighted squared residual of a transform:
/// $$
/// \sum_i \frac{1}{2} \ w_i \ \lVert T(\bm{s_i}) - \bm{d_i} \rVert^2
/// $$
///
/// This is the cost [`solve`] minimizes. Zero weights contribute nothing,
/// so the weights need not have a positive sum here.
pub fn error(sim: &Sim2D, src: &[Point], dst: &[Point], w: &[f64]) -> f64 {
    debug_assert_eq!(src.len(), dst.len());
    debug_assert_eq!(src.len(), w.len());

    src.iter()
        .zip(dst)
        .zip(w)
        .map(|((s, d), &wi)| 0.5 * wi * (sim.transform_point(s) - d).norm_squared())
        .sum()
}

// Tests #######################################################################
