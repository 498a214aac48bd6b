//! Image alignment objective.
//!
//! ```text
//! params ──► translate(dx, dy) ──► rotate θ about COM ──► cost matrix
//!                                                            │
//!            fitness = transport cost + λ·θ²  ◄── simplex ◄──┘
//! ```
//!
//! [`TransformObjective`] implements [`crate::swarm::Objective`] for any
//! dimension; a parameter vector whose length does not match the
//! [`TransformModel`] aborts the run with a dimension mismatch.

mod config;
mod transform;

pub use config::{ObjectiveConfig, TransformModel};
pub use transform::{Evaluation, TransformObjective};
