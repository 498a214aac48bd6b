//! Batch classification settings.

use serde::{Deserialize, Serialize};

/// Classification section of the configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassificationConfig {
    /// Worker threads.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Digit labels `0..labels`, one reference and one candidate bitmap each.
    #[serde(default = "default_labels")]
    pub labels: usize,

    /// Base seed; job `i` uses `seed + i`. Unseeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Pending jobs buffered ahead of the workers.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

fn default_workers() -> usize {
    10
}

fn default_labels() -> usize {
    10
}

fn default_queue_capacity() -> usize {
    32
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            labels: default_labels(),
            seed: None,
            queue_capacity: default_queue_capacity(),
        }
    }
}

impl ClassificationConfig {
    /// Check value ranges.
    pub fn validate(&self) -> crate::Result<()> {
        if self.workers == 0 {
            return Err(crate::DrishtiError::InvalidConfig(
                "classification workers must be >= 1".into(),
            ));
        }
        if self.queue_capacity == 0 {
            return Err(crate::DrishtiError::InvalidConfig(
                "classification queue_capacity must be >= 1".into(),
            ));
        }
        Ok(())
    }
}
