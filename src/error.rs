//! Error types for Drishti

/// Result type alias
pub type Result<T> = std::result::Result<T, DrishtiError>;

/// Drishti error types
#[derive(Debug, thiserror::Error)]
pub enum DrishtiError {
    /// A point cloud or mass vector carries no mass at all
    #[error("Degenerate input: {0} has zero total mass")]
    DegenerateInput(&'static str),

    /// A mass is negative or not finite
    #[error("Invalid mass {value} at {side}[{index}]")]
    InvalidMass {
        /// Which side of the transport problem
        side: &'static str,
        /// Index of the offending entry
        index: usize,
        /// Offending value
        value: f64,
    },

    /// Vector or matrix dimensions disagree
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension
        actual: usize,
    },

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Every objective evaluation of a run failed
    #[error("No feasible solution after {evaluations} evaluations")]
    NoFeasibleSolution {
        /// Evaluations attempted
        evaluations: usize,
    },

    /// Configuration file could not be read or parsed
    #[error("Config error: {0}")]
    Config(String),

    /// Bitmap could not be decoded
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DrishtiError {
    /// Whether a single objective evaluation failing with this error may be
    /// skipped instead of aborting the whole run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DrishtiError::DegenerateInput(_) | DrishtiError::InvalidMass { .. }
        )
    }
}

impl From<image::ImageError> for DrishtiError {
    fn from(e: image::ImageError) -> Self {
        DrishtiError::Image(e.to_string())
    }
}
