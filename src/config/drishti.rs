//! Main DrishtiConfig and loading methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::swarm::SwarmSection;
use crate::classify::ClassificationConfig;
use crate::error::{DrishtiError, Result};
use crate::io::ImageConfig;
use crate::objective::ObjectiveConfig;
use crate::transport::TransportConfig;

/// Full Drishti configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct DrishtiConfig {
    /// Particle swarm settings
    #[serde(default)]
    pub swarm: SwarmSection,

    /// Transport solver settings
    #[serde(default)]
    pub transport: TransportConfig,

    /// Alignment objective settings
    #[serde(default)]
    pub objective: ObjectiveConfig,

    /// Bitmap location and conversion
    #[serde(default)]
    pub image: ImageConfig,

    /// Batch classification settings
    #[serde(default)]
    pub classification: ClassificationConfig,
}

impl DrishtiConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DrishtiError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/config.yaml)
    pub fn load_default() -> Result<Self> {
        let path = Path::new("configs/config.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| DrishtiError::Config(e.to_string()))
    }

    /// Check every section
    pub fn validate(&self) -> Result<()> {
        self.swarm.validate()?;
        self.transport.validate()?;
        self.objective.validate()?;
        self.image.validate()?;
        self.classification.validate()?;
        Ok(())
    }
}
