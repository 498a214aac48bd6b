//! # Drishti
//!
//! Image similarity by optimal-transport alignment.
//!
//! ## Overview
//!
//! Two grayscale bitmaps are turned into weighted point clouds (one point
//! per pixel, ink as mass). A particle swarm searches transform parameters
//! `(dx, dy, theta)` for the candidate; each parameter vector is scored by
//! the minimum transport work needed to move the reference's mass onto the
//! transformed candidate, plus a rotation penalty. The best score is the
//! dissimilarity of the pair.
//!
//! ## Features
//!
//! - **Transport**: exact transportation simplex (least-cost start, MODI pivots)
//! - **Swarm**: const-generic PSO with complete/ring topologies and
//!   random/grid placement
//! - **Objective**: translate, then rotate about the translated center of mass
//! - **Classification**: worker pool comparing every candidate to every
//!   reference
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use drishti::{ObjectiveConfig, PointCloud, SwarmConfig, TransformObjective,
//!               TransportConfig, Vector, run_once};
//!
//! let reference = PointCloud::from_triples(&[(0.0, 0.0, 1.0), (1.0, 0.0, 1.0)]);
//! let candidate = reference.translated(2.0, -1.0);
//!
//! let objective = TransformObjective::new(
//!     reference, candidate, ObjectiveConfig::default(), TransportConfig::default())?;
//! let swarm = SwarmConfig::new(Vector::new([10.0, 10.0, 3.0]));
//! let solution = run_once(&swarm, &objective, 42)?;
//!
//! println!("fitness {:.4} at {:?}", solution.fitness, solution.vector);
//! ```
//!
//! ## Coordinate System
//!
//! - X: image column, increasing to the right
//! - Y: image row flipped, increasing upwards
//! - Theta: rotation in radians, CCW positive

#![warn(missing_docs)]

// Core types
pub mod core;

// Error types
pub mod error;

// Optimal transport solver
pub mod transport;

// Particle swarm optimization
pub mod swarm;

// Alignment objective
pub mod objective;

// Bitmap input and point cloud dumps
pub mod io;

// Batch classification
pub mod classify;

// Unified configuration
pub mod config;

// Re-export commonly used types
pub use core::{PointCloud, Vector, WeightedPoint};
pub use error::{DrishtiError, Result};

pub use classify::{BatchClassifier, Classification, ClassificationConfig, PairJob, PairResult};
pub use config::{DrishtiConfig, SwarmSection};
pub use io::{ImageConfig, ImageConverter, ImageLoader, InkPolarity};
pub use objective::{Evaluation, ObjectiveConfig, TransformModel, TransformObjective};
pub use swarm::{
    Objective, ParticleSwarm, Placement, Solution, SwarmConfig, Termination, Topology, run_once,
};
pub use transport::{
    CostMatrix, DistanceMetric, ImbalancePolicy, TransportConfig, TransportSolution,
    TransportSolver, transport_cost,
};
