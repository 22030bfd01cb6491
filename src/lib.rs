#![warn(missing_docs)]

//! This package fits a 2D similarity transform (uniform scale, rotation,
//! translation) between two index-correlated point sets with per-point weights.
//!
//! The fit has a closed form, it is the 2D case of
//! [orthogonal Procrustes analysis][procrustes] with a uniform scale.
//! To cope with wrong correspondences, the fit is wrapped in a
//! [RANSAC][ransac] estimator which samples pairs of correspondences
//! either exhaustively, when there are few enough of them, or at random.
//!
//! Finding the correspondences themselves, as the outer loop of
//! "Iterative Closest Point" does, is left to the caller.
//!
//! ```
//! use sim2d_align::{ransac, Point, RansacConfig, Sim2D};
//!
//! let truth = Sim2D::new(2.0, 0.5, 1.0, -1.0);
//! let src = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(1.0, 0.0),
//!     Point::new(1.0, 1.0),
//!     Point::new(0.0, 1.0),
//! ];
//! let mut dst: Vec<Point> = src.iter().map(|p| truth.transform_point(p)).collect();
//! dst[3].x += 50.0; // A wrong correspondence.
//! let w = vec![1.0; src.len()];
//!
//! let estimate = ransac(&src, &dst, &w, &RansacConfig::new(100, 0.1, 3)).unwrap();
//! assert_eq!(estimate.num_inliers, 3);
//! assert!((estimate.model.s - 2.0).abs() < 1e-9);
//! ```
//!
//! [procrustes]: https://en.wikipedia.org/wiki/Procrustes_analysis
//! [ransac]: https://en.wikipedia.org/wiki/Random_sample_consensus

pub mod error;
pub mod ransac;
pub mod sampler;
pub mod sim2d;
pub mod solver;
pub mod svg;

pub use error::Error;
pub use ransac::{ransac, Estimate, Ransac, RansacConfig};
pub use sim2d::{Point, PointSet, Sim2D, WeightVector};
pub use solver::{error, solve};
