//! Swarm configuration.

use super::placement::Placement;
use super::topology::Topology;
use crate::core::Vector;
use crate::error::{DrishtiError, Result};

/// Configuration for a particle swarm run over an `N`-dimensional box
/// `[-bounds, +bounds]`.
///
/// ## Tuning Guide
///
/// | Parameter | Effect |
/// |-----------|--------|
/// | `inertia` | Higher keeps particles exploring, lower settles faster |
/// | `cognitive` | Pull towards each particle's own best |
/// | `social` | Pull towards the neighborhood best |
/// | `velocity_clamp` | Largest per-dimension step per iteration |
#[derive(Clone, Debug, PartialEq)]
pub struct SwarmConfig<const N: usize> {
    /// Number of particles (>= 1).
    pub swarm_size: usize,
    /// Inertia weight `w`.
    pub inertia: f64,
    /// Cognitive coefficient `c1`.
    pub cognitive: f64,
    /// Social coefficient `c2`.
    pub social: f64,
    /// Neighborhood structure.
    pub topology: Topology,
    /// Initial placement rule.
    pub placement: Placement,
    /// Per-dimension velocity limit.
    pub velocity_clamp: f64,
    /// Half-widths of the initial search box.
    pub bounds: Vector<N>,
    /// Iteration budget.
    pub iterations: usize,
    /// Stop early after this many iterations without improvement.
    pub stagnation_window: Option<usize>,
    /// Smallest global best decrease counted as improvement.
    pub stagnation_tolerance: f64,
    /// Initial velocity half-width as a fraction of `bounds`.
    pub initial_velocity_fraction: f64,
}

impl<const N: usize> SwarmConfig<N> {
    /// Default coefficients over the given bounds.
    pub fn new(bounds: Vector<N>) -> Self {
        Self {
            swarm_size: 15,
            inertia: 0.75,
            cognitive: 1.3,
            social: 1.5,
            topology: Topology::Complete,
            placement: Placement::Random,
            velocity_clamp: 5.0,
            bounds,
            iterations: 100,
            stagnation_window: None,
            stagnation_tolerance: 1e-9,
            initial_velocity_fraction: 1.0,
        }
    }

    /// Builder-style setter for the swarm size.
    pub fn with_swarm_size(mut self, swarm_size: usize) -> Self {
        self.swarm_size = swarm_size;
        self
    }

    /// Builder-style setter for the iteration budget.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Builder-style setter for the topology.
    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    /// Builder-style setter for the placement rule.
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Enable early stopping after `window` iterations without an
    /// improvement larger than `tolerance`.
    pub fn with_stagnation(mut self, window: usize, tolerance: f64) -> Self {
        self.stagnation_window = Some(window);
        self.stagnation_tolerance = tolerance;
        self
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if N == 0 {
            return Err(invalid("search space must have at least one dimension"));
        }
        if self.swarm_size == 0 {
            return Err(invalid("swarm_size must be >= 1"));
        }
        for (name, value) in [
            ("inertia", self.inertia),
            ("cognitive", self.cognitive),
            ("social", self.social),
        ] {
            if !value.is_finite() {
                return Err(invalid(&format!("{name} must be finite, got {value}")));
            }
        }
        if !(self.velocity_clamp.is_finite() && self.velocity_clamp > 0.0) {
            return Err(invalid(&format!(
                "velocity_clamp must be finite and > 0, got {}",
                self.velocity_clamp
            )));
        }
        if self.bounds.as_slice().iter().any(|b| !b.is_finite() || *b < 0.0) {
            return Err(invalid(&format!(
                "bounds must be finite and >= 0, got {:?}",
                self.bounds.as_slice()
            )));
        }
        if self.stagnation_window == Some(0) {
            return Err(invalid("stagnation_window must be >= 1 when set"));
        }
        if !(self.stagnation_tolerance.is_finite() && self.stagnation_tolerance >= 0.0) {
            return Err(invalid("stagnation_tolerance must be finite and >= 0"));
        }
        if !(self.initial_velocity_fraction.is_finite() && self.initial_velocity_fraction >= 0.0)
        {
            return Err(invalid("initial_velocity_fraction must be finite and >= 0"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> DrishtiError {
    DrishtiError::InvalidConfig(message.to_string())
}
