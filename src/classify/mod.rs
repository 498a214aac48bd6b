//! Batch image classification.
//!
//! Every candidate is aligned against every reference; the reference that
//! needs the least transport work is the predicted label.

mod batch;
mod config;

pub use batch::{BatchClassifier, Classification, PairJob, PairResult};
pub use config::ClassificationConfig;
