//! Transport cost of a transformed candidate against a reference.

use crate::core::{PointCloud, Vector, WeightedPoint};
use crate::error::{DrishtiError, Result};
use crate::swarm::Objective;
use crate::transport::{CostMatrix, TransportConfig, TransportSolution, TransportSolver};

use super::config::{ObjectiveConfig, TransformModel};

/// Full breakdown of one objective evaluation.
#[derive(Clone, Debug)]
pub struct Evaluation {
    /// `transport_cost + rotation_penalty`.
    pub fitness: f64,
    /// Optimal transport cost from reference onto the transformed candidate.
    pub transport_cost: f64,
    /// `λ·θ²`.
    pub rotation_penalty: f64,
    /// Solver result.
    pub transport: TransportSolution,
    /// Candidate cloud after the transform.
    pub transformed: PointCloud,
}

/// Alignment objective: how far the candidate is from the reference after
/// applying transform parameters.
///
/// Parameters are `(dx, dy)` or `(dx, dy, theta)` per [`TransformModel`].
/// The candidate is translated first, then rotated counter-clockwise by
/// `theta` about the center of mass of the translated cloud.
///
/// The objective is immutable; concurrent evaluations are independent.
#[derive(Clone, Debug)]
pub struct TransformObjective {
    reference: PointCloud,
    candidate: PointCloud,
    config: ObjectiveConfig,
    solver: TransportSolver,
    /// Reference points with positive mass.
    reference_active: Vec<WeightedPoint>,
    supplies: Vec<f64>,
    /// Indices of candidate points with positive mass.
    candidate_active: Vec<usize>,
    demands: Vec<f64>,
}

impl TransformObjective {
    /// Create an objective.
    ///
    /// # Errors
    /// - [`DrishtiError::InvalidMass`] for a valid point whose mass is
    ///   negative or not finite
    /// - [`DrishtiError::DegenerateInput`] if either cloud has zero
    ///   effective mass
    /// - [`DrishtiError::InvalidConfig`] for invalid settings
    pub fn new(
        reference: PointCloud,
        candidate: PointCloud,
        config: ObjectiveConfig,
        transport: TransportConfig,
    ) -> Result<Self> {
        config.validate()?;
        transport.validate()?;
        check_masses("reference", &reference)?;
        check_masses("candidate", &candidate)?;

        if reference.total_mass() <= 0.0 {
            return Err(DrishtiError::DegenerateInput("reference"));
        }
        if candidate.total_mass() <= 0.0 {
            return Err(DrishtiError::DegenerateInput("candidate"));
        }

        let reference_active: Vec<WeightedPoint> = reference
            .iter()
            .filter(|p| p.effective_mass() > 0.0)
            .copied()
            .collect();
        let supplies = reference_active.iter().map(|p| p.mass).collect();

        let candidate_active: Vec<usize> = candidate
            .iter()
            .enumerate()
            .filter(|(_, p)| p.effective_mass() > 0.0)
            .map(|(i, _)| i)
            .collect();
        let demands = candidate_active
            .iter()
            .map(|&i| candidate.points()[i].mass)
            .collect();

        Ok(Self {
            reference,
            candidate,
            config,
            solver: TransportSolver::new(transport),
            reference_active,
            supplies,
            candidate_active,
            demands,
        })
    }

    /// Reference cloud.
    pub fn reference(&self) -> &PointCloud {
        &self.reference
    }

    /// Untransformed candidate cloud.
    pub fn candidate(&self) -> &PointCloud {
        &self.candidate
    }

    /// Get configuration.
    pub fn config(&self) -> &ObjectiveConfig {
        &self.config
    }

    /// Number of transform parameters.
    pub fn parameter_count(&self) -> usize {
        self.config.model.parameter_count()
    }

    /// Apply transform parameters to the candidate.
    pub fn transform(&self, params: &[f64]) -> Result<PointCloud> {
        let expected = self.parameter_count();
        if params.len() != expected {
            return Err(DrishtiError::DimensionMismatch {
                expected,
                actual: params.len(),
            });
        }

        let translated = self.candidate.translated(params[0], params[1]);
        match self.config.model {
            TransformModel::Translation => Ok(translated),
            TransformModel::TranslationRotation => {
                let (cx, cy) = translated
                    .center_of_mass()
                    .ok_or(DrishtiError::DegenerateInput("candidate"))?;
                Ok(translated.rotated_about(cx, cy, params[2]))
            }
        }
    }

    /// Fitness at `params`.
    pub fn compute(&self, params: &[f64]) -> Result<f64> {
        self.evaluate(params).map(|e| e.fitness)
    }

    /// Fitness at `params` with its components and the transformed cloud.
    pub fn evaluate(&self, params: &[f64]) -> Result<Evaluation> {
        let transformed = self.transform(params)?;

        let points = transformed.points();
        let costs = CostMatrix::between(
            self.reference_active.iter(),
            self.candidate_active.iter().map(|&i| &points[i]),
            self.config.metric(),
        );
        let transport = self.solver.solve(&self.supplies, &self.demands, &costs)?;

        let theta = match self.config.model {
            TransformModel::Translation => 0.0,
            TransformModel::TranslationRotation => params[2],
        };
        let rotation_penalty = self.config.rotation_penalty_weight * theta * theta;

        Ok(Evaluation {
            fitness: transport.total_cost + rotation_penalty,
            transport_cost: transport.total_cost,
            rotation_penalty,
            transport,
            transformed,
        })
    }
}

/// Reject negative or non-finite masses on valid points.
fn check_masses(side: &'static str, cloud: &PointCloud) -> Result<()> {
    for (index, p) in cloud.iter().enumerate() {
        if !p.invalid && !(p.mass.is_finite() && p.mass >= 0.0) {
            return Err(DrishtiError::InvalidMass {
                side,
                index,
                value: p.mass,
            });
        }
    }
    Ok(())
}

impl<const N: usize> Objective<N> for TransformObjective {
    fn evaluate(&self, position: &Vector<N>) -> Result<f64> {
        self.compute(position.as_slice())
    }
}
