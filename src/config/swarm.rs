//! Swarm section of the configuration.

use serde::{Deserialize, Serialize};

use crate::core::Vector;
use crate::error::{DrishtiError, Result};
use crate::swarm::{Placement, SwarmConfig, Topology};

/// Swarm settings as they appear in YAML.
///
/// Bounds are a list; [`SwarmSection::to_swarm_config`] fixes the
/// dimension.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SwarmSection {
    /// Number of particles.
    #[serde(default = "default_swarm_size")]
    pub swarm_size: usize,

    /// Inertia weight.
    #[serde(default = "default_inertia")]
    pub inertia: f64,

    /// Cognitive coefficient.
    #[serde(default = "default_cognitive")]
    pub cognitive: f64,

    /// Social coefficient.
    #[serde(default = "default_social")]
    pub social: f64,

    /// Neighborhood topology.
    #[serde(default)]
    pub topology: Topology,

    /// Initial placement.
    #[serde(default)]
    pub placement: Placement,

    /// Per-dimension velocity limit.
    #[serde(default = "default_velocity_clamp")]
    pub velocity_clamp: f64,

    /// Search half-widths `[dx, dy, theta]`.
    #[serde(default = "default_bounds")]
    pub bounds: Vec<f64>,

    /// Iteration budget.
    #[serde(default = "default_iterations")]
    pub iterations: usize,

    /// Early stop window (disabled when absent).
    #[serde(default)]
    pub stagnation_window: Option<usize>,

    /// Smallest improvement that resets the stagnation window.
    #[serde(default = "default_stagnation_tolerance")]
    pub stagnation_tolerance: f64,

    /// Initial velocity half-width as a fraction of the bounds.
    #[serde(default = "default_initial_velocity_fraction")]
    pub initial_velocity_fraction: f64,
}

fn default_swarm_size() -> usize {
    15
}

fn default_inertia() -> f64 {
    0.75
}

fn default_cognitive() -> f64 {
    1.3
}

fn default_social() -> f64 {
    1.5
}

fn default_velocity_clamp() -> f64 {
    5.0
}

fn default_bounds() -> Vec<f64> {
    vec![10.0, 10.0, 3.0]
}

fn default_iterations() -> usize {
    100
}

fn default_stagnation_tolerance() -> f64 {
    1e-9
}

fn default_initial_velocity_fraction() -> f64 {
    1.0
}

impl Default for SwarmSection {
    fn default() -> Self {
        Self {
            swarm_size: default_swarm_size(),
            inertia: default_inertia(),
            cognitive: default_cognitive(),
            social: default_social(),
            topology: Topology::default(),
            placement: Placement::default(),
            velocity_clamp: default_velocity_clamp(),
            bounds: default_bounds(),
            iterations: default_iterations(),
            stagnation_window: None,
            stagnation_tolerance: default_stagnation_tolerance(),
            initial_velocity_fraction: default_initial_velocity_fraction(),
        }
    }
}

impl SwarmSection {
    /// Build an `N`-dimensional swarm configuration from the first `N`
    /// bounds. Extra bounds are ignored, so a translation-only run can share
    /// a file with a rotating one.
    ///
    /// # Errors
    /// [`DrishtiError::DimensionMismatch`] when fewer than `N` bounds are
    /// given, or [`DrishtiError::InvalidConfig`] for invalid values.
    pub fn to_swarm_config<const N: usize>(&self) -> Result<SwarmConfig<N>> {
        if self.bounds.len() < N {
            return Err(DrishtiError::DimensionMismatch {
                expected: N,
                actual: self.bounds.len(),
            });
        }
        let config = self.build(Vector::from_slice(&self.bounds[..N])?);
        config.validate()?;
        Ok(config)
    }

    /// Check every setting without fixing the dimension.
    ///
    /// Each bound is checked as a one-dimensional search space carrying the
    /// shared coefficients.
    pub fn validate(&self) -> Result<()> {
        if self.bounds.is_empty() {
            return Err(DrishtiError::InvalidConfig(
                "swarm bounds must not be empty".into(),
            ));
        }
        for &bound in &self.bounds {
            self.build(Vector::new([bound])).validate()?;
        }
        Ok(())
    }

    fn build<const N: usize>(&self, bounds: Vector<N>) -> SwarmConfig<N> {
        SwarmConfig {
            swarm_size: self.swarm_size,
            inertia: self.inertia,
            cognitive: self.cognitive,
            social: self.social,
            topology: self.topology,
            placement: self.placement,
            velocity_clamp: self.velocity_clamp,
            bounds,
            iterations: self.iterations,
            stagnation_window: self.stagnation_window,
            stagnation_tolerance: self.stagnation_tolerance,
            initial_velocity_fraction: self.initial_velocity_fraction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_engine() {
        let section = SwarmSection::default();
        let config = section.to_swarm_config::<3>().unwrap();
        assert_eq!(config, SwarmConfig::new(Vector::new([10.0, 10.0, 3.0])));
    }

    #[test]
    fn test_translation_uses_prefix() {
        let config = SwarmSection::default().to_swarm_config::<2>().unwrap();
        assert_eq!(config.bounds, Vector::new([10.0, 10.0]));
    }

    #[test]
    fn test_too_few_bounds() {
        let section = SwarmSection {
            bounds: vec![1.0],
            ..Default::default()
        };
        let err = section.to_swarm_config::<3>().unwrap_err();
        assert!(matches!(
            err,
            DrishtiError::DimensionMismatch {
                expected: 3,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_validate_without_dimension() {
        assert!(SwarmSection::default().validate().is_ok());

        let zero_size = SwarmSection {
            swarm_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            zero_size.validate(),
            Err(DrishtiError::InvalidConfig(_))
        ));

        let negative_bound = SwarmSection {
            bounds: vec![10.0, 10.0, -1.0],
            ..Default::default()
        };
        assert!(matches!(
            negative_bound.validate(),
            Err(DrishtiError::InvalidConfig(_))
        ));

        let no_bounds = SwarmSection {
            bounds: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(
            no_bounds.validate(),
            Err(DrishtiError::InvalidConfig(_))
        ));
    }
}
