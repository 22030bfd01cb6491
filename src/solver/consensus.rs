//! Integration with the [`sample_consensus`] traits, so the closed-form fit
//! can be driven by any consensus algorithm built on them.

use crate::sim2d::{Point, Sim2D};
use crate::solver::solve;
use sample_consensus::{Estimator, Model};

/// A source point paired with its destination.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Correspondence {
    /// Point before the transform.
    pub src: Point,
    /// Point after the transform.
    pub dst: Point,
}

impl Model<Correspondence> for Sim2D {
    /// Euclidean distance between the transformed source and the destination.
    fn residual(&self, data: &Correspondence) -> f64 {
        (self.transform_point(&data.src) - data.dst).norm()
    }
}

/// This implements the [`sample_consensus::Estimator`] trait.
///
/// Each minimal sample of two correspondences is fitted in closed form with
/// unit weights. Samples with coincident source points yield no model.
#[derive(Debug, Copy, Clone, Default)]
pub struct SimilarityEstimator;

impl Estimator<Correspondence> for SimilarityEstimator {
    type Model = Sim2D;
    type ModelIter = Option<Sim2D>;
    const MIN_SAMPLES: usize = 2;

    fn estimate<I>(&self, data: I) -> Self::ModelIter
    where
        I: Iterator<Item = Correspondence> + Clone,
    {
        let (src, dst): (Vec<Point>, Vec<Point>) = data
            .take(Self::MIN_SAMPLES)
            .map(|c| (c.src, c.dst))
            .unzip();
        if src.len() < Self::MIN_SAMPLES {
            return None;
        }
        let sim = solve(&src, &dst, &[1.0; 2]);
        Some(sim).filter(Sim2D::is_finite)
    }
}
