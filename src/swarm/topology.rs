//! Neighborhood topologies.

use serde::{Deserialize, Serialize};

use super::particle::Swarm;
use crate::core::Vector;

/// Which particles a particle is attracted towards.
///
/// | Topology | Neighborhood of particle `i` |
/// |----------|------------------------------|
/// | `Complete` | every particle (global best) |
/// | `Ring { radius }` | `i - radius ..= i + radius`, wrapping |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Topology {
    /// Fully connected: everyone follows the global best.
    #[default]
    Complete,
    /// Ring lattice over particle indices.
    Ring {
        /// Neighbors on each side.
        radius: usize,
    },
}

impl Topology {
    /// Best known position in the neighborhood of particle `index`.
    ///
    /// Ring ties go to the first particle in scan order, starting at
    /// `index - radius`.
    pub fn neighborhood_best_for<const N: usize>(&self, index: usize, swarm: &Swarm<N>) -> Vector<N> {
        match *self {
            Topology::Complete => swarm.global_best_position,
            Topology::Ring { radius } => {
                let particles = &swarm.particles;
                let n = particles.len();
                let span = radius.saturating_mul(2).saturating_add(1).min(n);
                let start = (index + n - radius % n) % n;

                let mut best = &particles[start];
                for step in 1..span {
                    let candidate = &particles[(start + step) % n];
                    if candidate.best_fitness < best.best_fitness {
                        best = candidate;
                    }
                }
                best.best_position
            }
        }
    }
}
