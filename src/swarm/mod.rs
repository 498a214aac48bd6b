//! Particle swarm optimization over fixed-dimension search spaces.
//!
//! Each particle moves under three pulls:
//!
//! ```text
//! v ← w·v + c1·r1·(pbest − x) + c2·r2·(nbest − x)     r1, r2 ~ U[0,1) per dimension
//! v ← clamp(v, ±velocity_clamp)
//! x ← x + v
//! ```
//!
//! | Type | Role |
//! |------|------|
//! | [`ParticleSwarm`] | Engine; `run` consumes it with its random source |
//! | [`SwarmConfig`] | Coefficients, bounds, budget |
//! | [`Topology`] | Which neighborhood best a particle follows |
//! | [`Placement`] | Initial positions and velocities |
//! | [`Objective`] | Function being minimized |
//! | [`Solution`] | Best vector, fitness, counters, history |

mod config;
mod engine;
mod particle;
mod placement;
mod topology;

pub use config::SwarmConfig;
pub use engine::{Objective, ParticleSwarm, Solution, Termination, run_once};
pub use particle::{Particle, Swarm};
pub use placement::Placement;
pub use topology::Topology;
