//! Transport solver configuration.

use serde::{Deserialize, Serialize};

/// How a supply/demand imbalance beyond tolerance is resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImbalancePolicy {
    /// Scale the lighter side up so both totals match.
    #[default]
    ScaleToMatch,
    /// Route the shortfall through a zero-cost dummy row or column.
    DummyNode,
}

/// Configuration for the transportation simplex solver.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Optimality tolerance on reduced costs, and the largest supply/demand
    /// difference treated as numerical noise.
    /// Tighter values cost more pivots per evaluation.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Maximum simplex pivots before giving up with the best cost so far.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Imbalance handling beyond `tolerance`.
    #[serde(default)]
    pub imbalance: ImbalancePolicy,
}

fn default_tolerance() -> f64 {
    0.01
}

fn default_max_iterations() -> usize {
    10_000
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            imbalance: ImbalancePolicy::default(),
        }
    }
}

impl TransportConfig {
    /// Configuration for exact results in tests and offline scoring.
    pub fn precise() -> Self {
        Self {
            tolerance: 1e-9,
            max_iterations: 100_000,
            ..Default::default()
        }
    }

    /// Builder-style setter for the tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Builder-style setter for the imbalance policy.
    pub fn with_imbalance(mut self, policy: ImbalancePolicy) -> Self {
        self.imbalance = policy;
        self
    }

    /// Check value ranges.
    pub fn validate(&self) -> crate::Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(crate::DrishtiError::InvalidConfig(format!(
                "transport tolerance must be finite and >= 0, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(crate::DrishtiError::InvalidConfig(
                "transport max_iterations must be > 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TransportConfig::default();
        assert!((config.tolerance - 0.01).abs() < 1e-12);
        assert_eq!(config.imbalance, ImbalancePolicy::ScaleToMatch);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(TransportConfig::default().with_tolerance(-1.0).validate().is_err());
        assert!(
            TransportConfig::default()
                .with_tolerance(f64::NAN)
                .validate()
                .is_err()
        );
        let config = TransportConfig {
            max_iterations: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_policy_yaml_names() {
        let policy: ImbalancePolicy = serde_yaml::from_str("dummy_node").unwrap();
        assert_eq!(policy, ImbalancePolicy::DummyNode);
        let policy: ImbalancePolicy = serde_yaml::from_str("scale_to_match").unwrap();
        assert_eq!(policy, ImbalancePolicy::ScaleToMatch);
    }
}
