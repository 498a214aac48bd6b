//! Worker pool running one alignment per (reference, candidate) pair.
//!
//! ```text
//!  caller ──► bounded job queue ──► worker 0..W ──► result channel ──► sort by index
//!               (crossbeam)          each job: objective + swarm run
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crossbeam_channel::{bounded, unbounded};

use super::config::ClassificationConfig;
use crate::core::PointCloud;
use crate::error::Result;
use crate::objective::{ObjectiveConfig, TransformObjective};
use crate::swarm::{ParticleSwarm, Solution, SwarmConfig};
use crate::transport::TransportConfig;

/// One alignment to run.
#[derive(Clone, Debug)]
pub struct PairJob {
    /// Label of the reference image.
    pub reference_label: usize,
    /// Label of the candidate image.
    pub candidate_label: usize,
    /// Reference cloud.
    pub reference: Arc<PointCloud>,
    /// Candidate cloud.
    pub candidate: Arc<PointCloud>,
}

/// Outcome of one [`PairJob`].
#[derive(Debug)]
pub struct PairResult<const N: usize> {
    /// Label of the reference image.
    pub reference_label: usize,
    /// Label of the candidate image.
    pub candidate_label: usize,
    /// Best alignment, or why the pair failed.
    pub outcome: Result<Solution<N>>,
}

/// Predicted label for one candidate.
#[derive(Clone, Debug)]
pub struct Classification {
    /// Candidate label.
    pub candidate_label: usize,
    /// Reference label with the lowest fitness, if any pair succeeded.
    pub predicted_label: Option<usize>,
    /// `(reference label, fitness)` of successful pairs, best first.
    pub ranking: Vec<(usize, f64)>,
    /// Pairs that failed.
    pub failures: usize,
}

impl Classification {
    /// Whether the prediction matches the candidate's own label.
    pub fn is_correct(&self) -> bool {
        self.predicted_label == Some(self.candidate_label)
    }
}

/// Runs alignment jobs on a fixed pool of worker threads.
pub struct BatchClassifier<const N: usize> {
    swarm: SwarmConfig<N>,
    objective: ObjectiveConfig,
    transport: TransportConfig,
    config: ClassificationConfig,
    cancelled: Arc<AtomicBool>,
}

impl<const N: usize> BatchClassifier<N> {
    /// Create a classifier.
    pub fn new(
        swarm: SwarmConfig<N>,
        objective: ObjectiveConfig,
        transport: TransportConfig,
        config: ClassificationConfig,
    ) -> Result<Self> {
        swarm.validate()?;
        objective.validate()?;
        transport.validate()?;
        config.validate()?;
        Ok(Self {
            swarm,
            objective,
            transport,
            config,
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Shared cancellation flag. Setting it stops jobs that have not started
    /// yet; running jobs complete.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Run every job and return results in submission order.
    ///
    /// Jobs skipped because of cancellation produce no result.
    pub fn run(&self, jobs: Vec<PairJob>) -> Vec<PairResult<N>> {
        self.run_indexed(jobs)
            .into_iter()
            .map(|(_, result)| result)
            .collect()
    }

    /// Run every job; results carry their submission index, ascending.
    fn run_indexed(&self, jobs: Vec<PairJob>) -> Vec<(usize, PairResult<N>)> {
        let total = jobs.len();
        let (job_tx, job_rx) = bounded::<(usize, PairJob)>(self.config.queue_capacity);
        let (result_tx, result_rx) = unbounded::<(usize, PairResult<N>)>();

        thread::scope(|scope| {
            let mut spawned = 0;
            for worker in 0..self.config.workers.min(total.max(1)) {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                let spawn = thread::Builder::new()
                    .name(format!("drishti-worker-{}", worker))
                    .spawn_scoped(scope, move || {
                        for (index, job) in job_rx.iter() {
                            if self.is_cancelled() {
                                log::debug!("Job {} skipped (cancelled)", index);
                                continue;
                            }
                            let result = self.run_job(index, job);
                            if result_tx.send((index, result)).is_err() {
                                break;
                            }
                        }
                    });
                match spawn {
                    Ok(_) => spawned += 1,
                    Err(e) => log::warn!("Failed to spawn worker {}: {}", worker, e),
                }
            }
            drop(job_rx);
            drop(result_tx);
            log::debug!("Running {} jobs on {} workers", total, spawned);

            for (index, job) in jobs.into_iter().enumerate() {
                if self.is_cancelled() {
                    log::info!("Batch cancelled after {} of {} jobs queued", index, total);
                    break;
                }
                if job_tx.send((index, job)).is_err() {
                    log::warn!("No workers left; {} jobs not run", total - index);
                    break;
                }
            }
            drop(job_tx);
        });

        let mut results: Vec<(usize, PairResult<N>)> = result_rx.iter().collect();
        results.sort_by_key(|(index, _)| *index);
        results
    }

    fn run_job(&self, index: usize, job: PairJob) -> PairResult<N> {
        let outcome = TransformObjective::new(
            PointCloud::clone(&job.reference),
            PointCloud::clone(&job.candidate),
            self.objective.clone(),
            self.transport.clone(),
        )
        .and_then(|objective| {
            let engine = match self.config.seed {
                Some(base) => {
                    ParticleSwarm::with_seed(self.swarm.clone(), base.wrapping_add(index as u64))
                }
                None => ParticleSwarm::new(self.swarm.clone()),
            };
            engine.run(&objective)
        });

        match &outcome {
            Ok(solution) => log::debug!(
                "Pair ({}, {}): fitness {:.6} at {:?}",
                job.reference_label,
                job.candidate_label,
                solution.fitness,
                solution.vector.as_slice()
            ),
            Err(e) => log::warn!(
                "Pair ({}, {}) failed: {}",
                job.reference_label,
                job.candidate_label,
                e
            ),
        }

        PairResult {
            reference_label: job.reference_label,
            candidate_label: job.candidate_label,
            outcome,
        }
    }

    /// Align every candidate against every reference and predict each
    /// candidate's label as the reference with the lowest fitness.
    ///
    /// Classifications follow the order of `candidates`; candidates sharing
    /// a label are ranked separately.
    pub fn classify_candidates(
        &self,
        references: &[(usize, Arc<PointCloud>)],
        candidates: &[(usize, Arc<PointCloud>)],
    ) -> Vec<Classification> {
        let jobs = candidates
            .iter()
            .flat_map(|(candidate_label, candidate)| {
                references
                    .iter()
                    .map(move |(reference_label, reference)| PairJob {
                        reference_label: *reference_label,
                        candidate_label: *candidate_label,
                        reference: Arc::clone(reference),
                        candidate: Arc::clone(candidate),
                    })
            })
            .collect();

        let mut classifications: Vec<Classification> = candidates
            .iter()
            .map(|&(candidate_label, _)| Classification {
                candidate_label,
                predicted_label: None,
                ranking: Vec::new(),
                failures: 0,
            })
            .collect();

        // Jobs are candidate-major, so the submission index locates the candidate
        let per_candidate = references.len().max(1);
        for (index, result) in self.run_indexed(jobs) {
            let classification = &mut classifications[index / per_candidate];
            match result.outcome {
                Ok(solution) => classification
                    .ranking
                    .push((result.reference_label, solution.fitness)),
                Err(_) => classification.failures += 1,
            }
        }

        for classification in &mut classifications {
            classification.ranking.sort_by(|a, b| a.1.total_cmp(&b.1));
            classification.predicted_label =
                classification.ranking.first().map(|&(label, _)| label);
        }
        classifications
    }
}
