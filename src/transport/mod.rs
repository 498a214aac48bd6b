//! Optimal transport between weighted point sets.
//!
//! The transport cost is the minimum total work needed to move the mass of
//! one point set onto another, where moving `f` units between two points
//! costs `f · c(a, b)`:
//!
//! ```text
//!   reference (supplies)         candidate (demands)
//!        s0 ──┐                 ┌── d0
//!        s1 ──┼── f[i][j]·c ────┼── d1
//!        s2 ──┘                 └── d2
//! ```
//!
//! | Type | Role |
//! |------|------|
//! | [`CostMatrix`] | Pairwise `c(a, b)` under a [`DistanceMetric`] |
//! | [`TransportSolver`] | Exact transportation simplex |
//! | [`TransportConfig`] | Tolerance, pivot cap, [`ImbalancePolicy`] |
//!
//! Identical point sets cost exactly zero; the result does not depend on
//! the order points are listed in.

mod config;
mod cost;
mod simplex;

pub use config::{ImbalancePolicy, TransportConfig};
pub use cost::{CostMatrix, DistanceMetric};
pub use simplex::{TransportSolution, TransportSolver};

use crate::core::WeightedPoint;
use crate::error::Result;

/// Transport cost between two weighted point sets.
///
/// Invalid points and points with zero mass take no part.
pub fn transport_cost(
    reference: &[WeightedPoint],
    candidate: &[WeightedPoint],
    metric: DistanceMetric,
    config: &TransportConfig,
) -> Result<TransportSolution> {
    let reference: Vec<&WeightedPoint> = reference
        .iter()
        .filter(|p| p.effective_mass() > 0.0)
        .collect();
    let candidate: Vec<&WeightedPoint> = candidate
        .iter()
        .filter(|p| p.effective_mass() > 0.0)
        .collect();

    let supplies: Vec<f64> = reference.iter().map(|p| p.effective_mass()).collect();
    let demands: Vec<f64> = candidate.iter().map(|p| p.effective_mass()).collect();
    let costs = CostMatrix::between(
        reference.iter().copied(),
        candidate.iter().copied(),
        metric,
    );

    TransportSolver::new(config.clone()).solve(&supplies, &demands, &costs)
}
