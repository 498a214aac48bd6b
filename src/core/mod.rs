//! Core types for the Drishti library.
//!
//! - [`Vector`]: fixed-dimension real vector (particle positions, velocities, bounds)
//! - [`WeightedPoint`]: 2D point with ink mass and a placeholder flag
//! - [`PointCloud`]: ordered sequence of weighted points
//!
//! Coordinates are y-up with counter-clockwise positive rotation, in pixel
//! units.

mod cloud;
mod point;
mod vector;

pub use cloud::PointCloud;
pub use point::WeightedPoint;
pub use vector::Vector;
