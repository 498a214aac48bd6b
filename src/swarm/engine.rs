//! Particle swarm engine.
//!
//! ```text
//! place ──► evaluate ──► ┌──────────────── iteration ────────────────┐
//!                        │ snapshot neighborhood bests               │
//!                        │ per particle: update v, clamp, move, eval │
//!                        │ update global best, record history        │
//!                        └────────────── until budget or stall ──────┘
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::SwarmConfig;
use super::particle::{Particle, Swarm};
use crate::core::Vector;
use crate::error::{DrishtiError, Result};

/// Function minimized by the swarm.
///
/// Errors for which [`DrishtiError::is_recoverable`] holds mark only that
/// evaluation as infinitely bad; any other error aborts the run.
pub trait Objective<const N: usize> {
    /// Fitness at `position`; lower is better.
    fn evaluate(&self, position: &Vector<N>) -> Result<f64>;
}

impl<const N: usize, F> Objective<N> for F
where
    F: Fn(&Vector<N>) -> f64,
{
    fn evaluate(&self, position: &Vector<N>) -> Result<f64> {
        Ok(self(position))
    }
}

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// Iteration budget used up.
    MaxIterations,
    /// No improvement over the stagnation window.
    Stagnated,
}

/// Outcome of a swarm run.
#[derive(Clone, Debug)]
pub struct Solution<const N: usize> {
    /// Best position found.
    pub vector: Vector<N>,
    /// Fitness at `vector`.
    pub fitness: f64,
    /// Iterations completed.
    pub iterations: usize,
    /// Objective evaluations performed.
    pub evaluations: usize,
    /// Evaluations that failed recoverably or were not finite.
    pub failed_evaluations: usize,
    /// Why the run stopped.
    pub termination: Termination,
    /// Global best fitness after initialization and after every iteration.
    pub history: Vec<f64>,
}

#[derive(Default)]
struct EvaluationStats {
    evaluations: usize,
    failed: usize,
}

impl EvaluationStats {
    fn score<const N: usize, O: Objective<N> + ?Sized>(
        &mut self,
        objective: &O,
        position: &Vector<N>,
    ) -> Result<f64> {
        self.evaluations += 1;
        match objective.evaluate(position) {
            Ok(fitness) if fitness.is_finite() => Ok(fitness),
            Ok(fitness) => {
                self.failed += 1;
                log::debug!("Non-finite fitness {} at {:?}", fitness, position.as_slice());
                Ok(f64::INFINITY)
            }
            Err(e) if e.is_recoverable() => {
                self.failed += 1;
                log::debug!("Evaluation at {:?} skipped: {}", position.as_slice(), e);
                Ok(f64::INFINITY)
            }
            Err(e) => Err(e),
        }
    }
}

/// Particle swarm optimizer.
///
/// A run consumes the engine together with its random source, so each run
/// owns its state outright.
///
/// # Example
///
/// ```rust,ignore
/// let config = SwarmConfig::new(Vector::new([10.0, 10.0]));
/// let solution = ParticleSwarm::with_seed(config, 42)
///     .run(&|v: &Vector<2>| (v[0] - 1.0).powi(2) + v[1].powi(2))?;
/// ```
pub struct ParticleSwarm<const N: usize, R: Rng = StdRng> {
    config: SwarmConfig<N>,
    rng: R,
}

impl<const N: usize> ParticleSwarm<N, StdRng> {
    /// Create an engine seeded from the operating system.
    pub fn new(config: SwarmConfig<N>) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Create a reproducible engine.
    pub fn with_seed(config: SwarmConfig<N>, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<const N: usize, R: Rng> ParticleSwarm<N, R> {
    /// Create an engine drawing from `rng`.
    pub fn with_rng(config: SwarmConfig<N>, rng: R) -> Self {
        Self { config, rng }
    }

    /// Get configuration.
    pub fn config(&self) -> &SwarmConfig<N> {
        &self.config
    }

    /// Minimize `objective`.
    ///
    /// # Errors
    /// - [`DrishtiError::InvalidConfig`] for an invalid configuration
    /// - any non-recoverable error raised by the objective
    /// - [`DrishtiError::NoFeasibleSolution`] when no evaluation produced a
    ///   finite fitness
    pub fn run<O: Objective<N> + ?Sized>(self, objective: &O) -> Result<Solution<N>> {
        let Self { config, mut rng } = self;
        config.validate()?;

        let mut stats = EvaluationStats::default();

        let placed = config.placement.place(
            config.swarm_size,
            &config.bounds,
            config.initial_velocity_fraction,
            &mut rng,
        );
        let mut particles = Vec::with_capacity(placed.len());
        for (position, velocity) in placed {
            let fitness = stats.score(objective, &position)?;
            particles.push(Particle::new(position, velocity, fitness));
        }
        let mut swarm = Swarm::new(particles);

        let mut history = Vec::with_capacity(config.iterations + 1);
        history.push(swarm.global_best_fitness);

        let mut termination = Termination::MaxIterations;
        let mut iterations = 0;
        let mut reference_fitness = swarm.global_best_fitness;
        let mut stalled = 0;

        let w = config.inertia;
        let c1 = config.cognitive;
        let c2 = config.social;

        for _ in 0..config.iterations {
            let neighborhood: Vec<Vector<N>> = (0..swarm.len())
                .map(|i| config.topology.neighborhood_best_for(i, &swarm))
                .collect();

            for (particle, nbest) in swarm.particles.iter_mut().zip(&neighborhood) {
                let r1: Vector<N> = Vector::from_fn(|_| rng.random::<f64>());
                let r2: Vector<N> = Vector::from_fn(|_| rng.random::<f64>());
                let x = particle.position;
                let pbest = particle.best_position;

                particle.velocity = Vector::from_fn(|d| {
                    w * particle.velocity[d]
                        + c1 * r1[d] * (pbest[d] - x[d])
                        + c2 * r2[d] * (nbest[d] - x[d])
                })
                .clamp_magnitude(config.velocity_clamp);
                particle.position = x + particle.velocity;

                let fitness = stats.score(objective, &particle.position)?;
                particle.record(fitness);
            }

            swarm.update_global_best();
            history.push(swarm.global_best_fitness);
            iterations += 1;

            if let Some(window) = config.stagnation_window {
                if swarm.global_best_fitness < reference_fitness - config.stagnation_tolerance {
                    reference_fitness = swarm.global_best_fitness;
                    stalled = 0;
                } else {
                    stalled += 1;
                    if stalled >= window {
                        termination = Termination::Stagnated;
                        break;
                    }
                }
            }
        }

        if !swarm.global_best_fitness.is_finite() {
            return Err(DrishtiError::NoFeasibleSolution {
                evaluations: stats.evaluations,
            });
        }

        log::debug!(
            "Swarm finished: fitness {:.6} at {:?} after {} iterations ({} evaluations, {} failed, {:?})",
            swarm.global_best_fitness,
            swarm.global_best_position.as_slice(),
            iterations,
            stats.evaluations,
            stats.failed,
            termination
        );

        Ok(Solution {
            vector: swarm.global_best_position,
            fitness: swarm.global_best_fitness,
            iterations,
            evaluations: stats.evaluations,
            failed_evaluations: stats.failed,
            termination,
            history,
        })
    }
}

/// Run one seeded optimization with a copy of `config`.
pub fn run_once<const N: usize, O: Objective<N> + ?Sized>(
    config: &SwarmConfig<N>,
    objective: &O,
    seed: u64,
) -> Result<Solution<N>> {
    ParticleSwarm::with_seed(config.clone(), seed).run(objective)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swarm::{Placement, Topology};
    use approx::assert_relative_eq;

    fn sphere(v: &Vector<2>) -> f64 {
        (v[0] - 1.0).powi(2) + (v[1] + 2.0).powi(2)
    }

    fn config() -> SwarmConfig<2> {
        SwarmConfig::new(Vector::new([10.0, 10.0]))
            .with_swarm_size(20)
            .with_iterations(150)
    }

    #[test]
    fn test_finds_sphere_minimum() {
        let solution = run_once(&config(), &sphere, 11).unwrap();
        assert_relative_eq!(solution.vector[0], 1.0, epsilon = 5e-2);
        assert_relative_eq!(solution.vector[1], -2.0, epsilon = 5e-2);
        assert!(solution.fitness < 5e-3);
        assert_eq!(solution.termination, Termination::MaxIterations);
        assert_eq!(solution.iterations, 150);
        assert_eq!(solution.evaluations, 20 * 151);
        assert_eq!(solution.history.len(), 151);
    }

    #[test]
    fn test_history_is_monotone() {
        let solution = run_once(&config(), &sphere, 3).unwrap();
        for pair in solution.history.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
        assert_eq!(solution.history.last().copied(), Some(solution.fitness));
    }

    #[test]
    fn test_seeded_runs_are_deterministic() {
        let a = run_once(&config(), &sphere, 99).unwrap();
        let b = run_once(&config(), &sphere, 99).unwrap();
        assert_eq!(a.vector, b.vector);
        assert_eq!(a.fitness, b.fitness);
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_ring_and_grid() {
        let config = config()
            .with_topology(Topology::Ring { radius: 2 })
            .with_placement(Placement::Grid)
            .with_iterations(300);
        let solution = run_once(&config, &sphere, 5).unwrap();
        assert!(solution.fitness < 1e-2);
    }

    #[test]
    fn test_single_particle() {
        let config = config().with_swarm_size(1).with_iterations(50);
        let solution = run_once(&config, &sphere, 8).unwrap();
        assert!(solution.fitness.is_finite());
        assert_eq!(solution.evaluations, 51);
    }

    #[test]
    fn test_stagnation_stops_early() {
        let flat = |_: &Vector<2>| 1.0;
        let config = config().with_iterations(1000).with_stagnation(10, 1e-12);
        let solution = run_once(&config, &flat, 1).unwrap();
        assert_eq!(solution.termination, Termination::Stagnated);
        assert_eq!(solution.iterations, 10);
        assert_eq!(solution.fitness, 1.0);
    }

    #[test]
    fn test_recoverable_failures_are_skipped() {
        struct HalfPlane;
        impl Objective<2> for HalfPlane {
            fn evaluate(&self, v: &Vector<2>) -> Result<f64> {
                if v[0] < 0.0 {
                    Err(DrishtiError::DegenerateInput("candidate"))
                } else {
                    Ok(v[0] + v[1].abs())
                }
            }
        }
        let solution = run_once(&config(), &HalfPlane, 4).unwrap();
        assert!(solution.vector[0] >= 0.0);
        assert!(solution.failed_evaluations > 0);
    }

    #[test]
    fn test_all_failures_is_infeasible() {
        let nan = |_: &Vector<2>| f64::NAN;
        let err = run_once(&config().with_iterations(3), &nan, 2).unwrap_err();
        assert!(matches!(
            err,
            DrishtiError::NoFeasibleSolution { evaluations: 80 }
        ));
    }

    #[test]
    fn test_fatal_error_aborts() {
        struct Broken;
        impl Objective<2> for Broken {
            fn evaluate(&self, _: &Vector<2>) -> Result<f64> {
                Err(DrishtiError::DimensionMismatch {
                    expected: 3,
                    actual: 2,
                })
            }
        }
        let err = run_once(&config(), &Broken, 2).unwrap_err();
        assert!(matches!(err, DrishtiError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = run_once(&config().with_swarm_size(0), &sphere, 0).unwrap_err();
        assert!(matches!(err, DrishtiError::InvalidConfig(_)));
    }
}
