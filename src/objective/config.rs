//! Alignment objective configuration.

use serde::{Deserialize, Serialize};

use crate::transport::DistanceMetric;

/// Geometric transform applied to the candidate cloud.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformModel {
    /// Parameters `(dx, dy)`.
    Translation,
    /// Parameters `(dx, dy, theta)`; rotation about the translated center
    /// of mass.
    #[default]
    TranslationRotation,
}

impl TransformModel {
    /// Number of parameters the model takes.
    pub fn parameter_count(&self) -> usize {
        match self {
            TransformModel::Translation => 2,
            TransformModel::TranslationRotation => 3,
        }
    }
}

/// Objective settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObjectiveConfig {
    /// Transform model.
    #[serde(default)]
    pub model: TransformModel,

    /// Use squared Euclidean ground cost instead of Euclidean.
    #[serde(default)]
    pub squared_distance: bool,

    /// Weight `λ` of the rotation penalty `λ·θ²`.
    #[serde(default = "default_rotation_penalty_weight")]
    pub rotation_penalty_weight: f64,
}

fn default_rotation_penalty_weight() -> f64 {
    1.0
}

impl Default for ObjectiveConfig {
    fn default() -> Self {
        Self {
            model: TransformModel::default(),
            squared_distance: false,
            rotation_penalty_weight: default_rotation_penalty_weight(),
        }
    }
}

impl ObjectiveConfig {
    /// Translation-only objective.
    pub fn translation() -> Self {
        Self {
            model: TransformModel::Translation,
            ..Default::default()
        }
    }

    /// Ground distance metric.
    pub fn metric(&self) -> DistanceMetric {
        DistanceMetric::from_squared(self.squared_distance)
    }

    /// Check value ranges.
    pub fn validate(&self) -> crate::Result<()> {
        if !(self.rotation_penalty_weight.is_finite() && self.rotation_penalty_weight >= 0.0) {
            return Err(crate::DrishtiError::InvalidConfig(format!(
                "rotation_penalty_weight must be finite and >= 0, got {}",
                self.rotation_penalty_weight
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ObjectiveConfig::default();
        assert_eq!(config.model.parameter_count(), 3);
        assert_eq!(config.metric(), DistanceMetric::Euclidean);
        assert_eq!(ObjectiveConfig::translation().model.parameter_count(), 2);
    }

    #[test]
    fn test_partial_yaml() {
        let config: ObjectiveConfig = serde_yaml::from_str("squared_distance: true\n").unwrap();
        assert_eq!(config.metric(), DistanceMetric::SquaredEuclidean);
        assert_eq!(config.rotation_penalty_weight, 1.0);
        assert_eq!(config.model, TransformModel::TranslationRotation);
    }

    #[test]
    fn test_validate() {
        let config = ObjectiveConfig {
            rotation_penalty_weight: -0.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
