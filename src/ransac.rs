//! Robust similarity fit rejecting outlier correspondences.
//!
//! Each trial fits a transform on a minimal sample of two correspondences,
//! classifies every correspondence as inlier or outlier against it, refits on
//! the inliers only and scores the refit. When the number of distinct minimal
//! samples does not exceed the iteration budget, every sample is tried once
//! ([`OrderedSampler`]); otherwise samples are drawn at random
//! ([`RandomSampler`]).

use log::{debug, trace};

use crate::error::Error;
use crate::sampler::{population, OrderedSampler, RandomSampler, Sampler};
use crate::sim2d::{Point, Sim2D};
use crate::solver::{error, solve};

/// Correspondences needed to determine scale, rotation and translation.
const MIN_SAMPLES: usize = 2;

/// Parameters of a [`Ransac`] run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RansacConfig {
    /// Upper bound on the number of trials.
    pub num_max_iterations: usize,
    /// Correspondences whose weighted squared residual reaches the square
    /// of this distance are outliers.
    pub inlier_distance_threshold: f64,
    /// Trials with fewer inliers are discarded.
    pub num_min_inliers: usize,
}

impl RansacConfig {
    /// Create a configuration.
    pub fn new(
        num_max_iterations: usize,
        inlier_distance_threshold: f64,
        num_min_inliers: usize,
    ) -> Self {
        Self {
            num_max_iterations,
            inlier_distance_threshold,
            num_min_inliers,
        }
    }
}

impl Default for RansacConfig {
    fn default() -> Self {
        Self::new(1000, 1.0, 3)
    }
}

/// Best model found by a [`Ransac`] run.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Estimate {
    /// Fitted transform.
    pub model: Sim2D,
    /// Normalized score, at most 1 (a perfect fit).
    pub score: f64,
    /// Inliers supporting `model`.
    pub num_inliers: usize,
}

impl Default for Estimate {
    /// The "no fit attempted" result: identity with score 0.
    fn default() -> Self {
        Self {
            model: Sim2D::identity(),
            score: 0.0,
            num_inliers: 0,
        }
    }
}

/// RANSAC estimator of a similarity transform between index-correlated
/// point sets.
#[derive(Debug, Clone, Default)]
pub struct Ransac {
    config: RansacConfig,
}

impl Ransac {
    /// Create an estimator.
    pub fn new(config: RansacConfig) -> Self {
        Self { config }
    }

    /// Configuration of this estimator.
    pub fn config(&self) -> &RansacConfig {
        &self.config
    }

    /// Fit a similarity transform from `src` to `dst` robust to outliers.
    ///
    /// Degenerate configurations (no iteration, non positive threshold, no
    /// correspondence) return [`Estimate::default`]. A single correspondence
    /// is fitted directly with score 1. If no trial gathers enough inliers,
    /// the default estimate is returned as well.
    ///
    /// Fails if the three slices differ in length or if the sampler cannot
    /// be created.
    pub fn estimate(&self, src: &[Point], dst: &[Point], w: &[f64]) -> Result<Estimate, Error> {
        if src.len() != dst.len() || src.len() != w.len() {
            return Err(Error::LengthMismatch {
                src: src.len(),
                dst: dst.len(),
                weights: w.len(),
            });
        }

        let config = &self.config;
        let n = src.len();
        let mut best = Estimate::default();

        if config.num_max_iterations == 0 || !(config.inlier_distance_threshold > 0.0) || n == 0 {
            debug!("degenerate configuration, nothing to fit");
            return Ok(best);
        }
        if n == 1 {
            best.model = solve(src, dst, w);
            best.score = 1.0;
            best.num_inliers = 1;
            return Ok(best);
        }

        let threshold = config.inlier_distance_threshold * config.inlier_distance_threshold;
        let maximum = n - 1;
        let combinations = population(MIN_SAMPLES, maximum);
        let exhaustive = combinations <= config.num_max_iterations;
        let mut sampler: Box<dyn Sampler> = if exhaustive {
            debug!("trying all {} minimal samples", combinations);
            Box::new(OrderedSampler::new(MIN_SAMPLES, maximum)?)
        } else {
            debug!(
                "drawing {} random minimal samples out of {}",
                config.num_max_iterations, combinations
            );
            Box::new(RandomSampler::new(MIN_SAMPLES, maximum)?)
        };
        let iterations = if exhaustive {
            combinations
        } else {
            config.num_max_iterations
        };

        let mut indices = [0; MIN_SAMPLES];
        let mut sample_src = [Point::origin(); MIN_SAMPLES];
        let mut sample_dst = [Point::origin(); MIN_SAMPLES];
        let mut sample_w = [0.0; MIN_SAMPLES];
        let mut inlier_w = w.to_vec();

        for iteration in 0..iterations {
            sampler.sample(&mut indices);
            for (k, &i) in indices.iter().enumerate() {
                sample_src[k] = src[i];
                sample_dst[k] = dst[i];
                sample_w[k] = w[i];
            }

            let trial = solve(&sample_src, &sample_dst, &sample_w);
            if !trial.is_finite() {
                trace!("iteration {}: degenerate sample {:?}", iteration, indices);
                continue;
            }

            let num_inliers = classify(&trial, src, dst, w, threshold, &mut inlier_w);
            if num_inliers == 0 || num_inliers < config.num_min_inliers {
                trace!("iteration {}: only {} inliers", iteration, num_inliers);
                continue;
            }

            let refit = solve(src, dst, &inlier_w);
            if !refit.is_finite() {
                trace!("iteration {}: degenerate inlier set", iteration);
                continue;
            }

            let cost = error(&refit, src, dst, &inlier_w);
            let score = normalized_score(cost, num_inliers, threshold);
            // Later trials win ties.
            if score >= best.score {
                debug!(
                    "iteration {}: {} inliers, score {}, model {}",
                    iteration, num_inliers, score, refit
                );
                best = Estimate {
                    model: refit,
                    score,
                    num_inliers,
                };
            }
        }

        debug!(
            "best model {} with score {} and {} inliers",
            best.model, best.score, best.num_inliers
        );
        Ok(best)
    }
}

/// Shorthand for `Ransac::new(config.clone()).estimate(src, dst, w)`.
pub fn ransac(
    src: &[Point],
    dst: &[Point],
    w: &[f64],
    config: &RansacConfig,
) -> Result<Estimate, Error> {
    Ransac::new(config.clone()).estimate(src, dst, w)
}

// Private functions ###########################################################

/// Copy `w` into `inlier_w`, zeroing the weights of outliers of `sim`.
/// Return the number of inliers.
///
/// Correspondence `i` is an outlier when `w_i * residual_i^2 >= threshold`.
fn classify(
    sim: &Sim2D,
    src: &[Point],
    dst: &[Point],
    w: &[f64],
    threshold: f64,
    inlier_w: &mut [f64],
) -> usize {
    let mut num_inliers = 0;
    for (((s, d), &wi), out) in src.iter().zip(dst).zip(w).zip(inlier_w.iter_mut()) {
        let residual = (sim.transform_point(s) - d).norm_squared();
        if residual * wi >= threshold {
            *out = 0.0;
        } else {
            *out = wi;
            num_inliers += 1;
        }
    }
    num_inliers
}

/// Score of a refit: 1 for a perfect fit, 0 when every inlier sits on the
/// threshold. `threshold` is the squared inlier distance.
fn normalized_score(cost: f64, num_inliers: usize, threshold: f64) -> f64 {
    1.0 - cost / (0.5 * num_inliers as f64 * threshold)
}

// Tests #######################################################################

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn line(n: usize) -> Vec<Point> {
        (0..n).map(|i| Point::new(i as f64, 0.5 * i as f64)).collect()
    }

    #[test]
    fn classify_zeroes_outliers() {
        let src = line(4);
        let mut dst = src.clone();
        dst[2].x += 3.0;
        let w = [1.0, 1.0, 1.0, 0.0];
        let mut inlier_w = [7.0; 4];
        let count = classify(&Sim2D::identity(), &src, &dst, &w, 1.0, &mut inlier_w);
        assert_eq!(count, 3);
        assert_eq!(inlier_w, [1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn residual_on_threshold_is_outlier() {
        let src = line(2);
        let mut dst = src.clone();
        dst[1].y += 2.0;
        let mut inlier_w = [0.0; 2];
        let count = classify(&Sim2D::identity(), &src, &dst, &[1.0, 1.0], 4.0, &mut inlier_w);
        assert_eq!(count, 1);
        assert_eq!(inlier_w, [1.0, 0.0]);
    }

    #[test]
    fn score_bounds() {
        assert_relative_eq!(normalized_score(0.0, 5, 0.25), 1.0);
        assert_relative_eq!(normalized_score(0.5 * 5.0 * 0.25, 5, 0.25), 0.0);
    }

    #[test]
    fn score_decreases_with_error() {
        let src = line(5);
        let dst: Vec<_> = src.iter().map(|p| Point::new(p.x + 0.1, p.y - 0.05)).collect();
        let w = [1.0; 5];
        let threshold = 0.04;

        let good = Sim2D::new(1.0, 0.0, 0.1, -0.05);
        let rough = Sim2D::new(1.0, 0.0, 0.1, 0.0);
        let good_error = error(&good, &src, &dst, &w);
        let rough_error = error(&rough, &src, &dst, &w);
        assert!(good_error < rough_error);
        assert!(
            normalized_score(good_error, 5, threshold) > normalized_score(rough_error, 5, threshold)
        );
    }

    #[test]
    fn default_config() {
        let ransac = Ransac::default();
        assert_eq!(ransac.config(), &RansacConfig::new(1000, 1.0, 3));
    }

    #[test]
    fn zero_weights_fit_nothing() {
        let src = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)];
        let dst = src.clone();
        let w = [0.0, 0.0, 0.0];
        let estimate = Ransac::new(RansacConfig::new(10, 1.0, 0))
            .estimate(&src, &dst, &w)
            .unwrap();
        assert!(estimate.score.is_finite());
        assert_eq!(estimate, Estimate::default());
    }
}
