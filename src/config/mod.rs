//! Unified configuration loading for Drishti.
//!
//! Loads all configuration from a single YAML file with sensible defaults.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use drishti::config::DrishtiConfig;
//!
//! // Load from default path (configs/config.yaml), or built-in defaults
//! let config = DrishtiConfig::load_default()?;
//!
//! // Fix the search dimension: 3 for (dx, dy, theta)
//! let swarm = config.swarm.to_swarm_config::<3>()?;
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`SwarmSection`] | Swarm size, coefficients, topology, bounds |
//! | [`TransportConfig`](crate::transport::TransportConfig) | Tolerance, pivot cap, imbalance policy |
//! | [`ObjectiveConfig`](crate::objective::ObjectiveConfig) | Transform model, ground distance, rotation penalty |
//! | [`ImageConfig`](crate::io::ImageConfig) | Bitmap directory, ink polarity, threshold |
//! | [`ClassificationConfig`](crate::classify::ClassificationConfig) | Workers, labels, seed |
//!
//! ## Example YAML
//!
//! ```yaml
//! swarm:
//!   swarm_size: 15
//!   bounds: [10.0, 10.0, 3.0]   # dx, dy (pixels), theta (radians)
//!   topology:
//!     kind: ring
//!     radius: 1
//! transport:
//!   tolerance: 0.01
//!   imbalance: scale_to_match
//! ```

mod drishti;
mod swarm;

pub use drishti::DrishtiConfig;
pub use swarm::SwarmSection;
