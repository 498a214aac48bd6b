//! Particle and swarm state.

use crate::core::Vector;

/// One candidate solution moving through the search space.
#[derive(Clone, Copy, Debug)]
pub struct Particle<const N: usize> {
    /// Current position.
    pub position: Vector<N>,
    /// Current velocity.
    pub velocity: Vector<N>,
    /// Best position this particle has visited.
    pub best_position: Vector<N>,
    /// Fitness at `best_position`.
    pub best_fitness: f64,
    /// Fitness at `position`.
    pub fitness: f64,
}

impl<const N: usize> Particle<N> {
    /// Create a particle whose personal best is its starting point.
    pub fn new(position: Vector<N>, velocity: Vector<N>, fitness: f64) -> Self {
        Self {
            position,
            velocity,
            best_position: position,
            best_fitness: fitness,
            fitness,
        }
    }

    /// Record a new evaluation; the personal best moves only on strict
    /// improvement.
    #[inline]
    pub fn record(&mut self, fitness: f64) -> bool {
        self.fitness = fitness;
        if fitness < self.best_fitness {
            self.best_fitness = fitness;
            self.best_position = self.position;
            true
        } else {
            false
        }
    }
}

/// Particles plus the best position any of them has found.
#[derive(Clone, Debug)]
pub struct Swarm<const N: usize> {
    /// Particles in index order.
    pub particles: Vec<Particle<N>>,
    /// Best position found by the swarm.
    pub global_best_position: Vector<N>,
    /// Fitness at `global_best_position`.
    pub global_best_fitness: f64,
}

impl<const N: usize> Swarm<N> {
    /// Create a swarm and take the global best from its particles.
    pub fn new(particles: Vec<Particle<N>>) -> Self {
        let mut swarm = Self {
            particles,
            global_best_position: Vector::zeros(),
            global_best_fitness: f64::INFINITY,
        };
        if let Some(first) = swarm.particles.first() {
            swarm.global_best_position = first.best_position;
            swarm.global_best_fitness = first.best_fitness;
        }
        swarm.update_global_best();
        swarm
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the swarm has no particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Adopt the lowest personal best if it beats the current global best.
    /// Ties keep the earlier particle.
    pub fn update_global_best(&mut self) -> bool {
        let mut improved = false;
        for particle in &self.particles {
            if particle.best_fitness < self.global_best_fitness {
                self.global_best_fitness = particle.best_fitness;
                self.global_best_position = particle.best_position;
                improved = true;
            }
        }
        improved
    }
}
