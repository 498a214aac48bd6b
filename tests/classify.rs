//! Batch classification integration tests.

mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use drishti::io::{candidate_file_name, reference_file_name};
use drishti::{
    BatchClassifier, ClassificationConfig, DrishtiError, ImageConverter, ImageLoader,
    ObjectiveConfig, PairJob, PointCloud, SwarmConfig, TransportConfig, Vector,
};

fn classifier(workers: usize, seed: Option<u64>) -> BatchClassifier<2> {
    BatchClassifier::new(
        SwarmConfig::new(Vector::new([6.0, 6.0]))
            .with_swarm_size(20)
            .with_iterations(80),
        ObjectiveConfig::translation(),
        TransportConfig::default(),
        ClassificationConfig {
            workers,
            seed,
            ..Default::default()
        },
    )
    .unwrap()
}

fn shapes() -> Vec<(usize, Arc<PointCloud>)> {
    vec![
        (0, Arc::new(common::horizontal_bar(5))),
        (1, Arc::new(common::vertical_bar(5))),
        (2, Arc::new(common::diagonal(5))),
    ]
}

fn shifted(shapes: &[(usize, Arc<PointCloud>)]) -> Vec<(usize, Arc<PointCloud>)> {
    shapes
        .iter()
        .map(|(label, cloud)| (*label, Arc::new(cloud.translated(1.0, -2.0))))
        .collect()
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn test_shifted_shapes_are_recognized() {
    let references = shapes();
    let candidates = shifted(&references);

    let results = classifier(4, Some(1)).classify_candidates(&references, &candidates);

    assert_eq!(results.len(), 3);
    for (classification, (label, _)) in results.iter().zip(&candidates) {
        assert_eq!(classification.candidate_label, *label);
        assert_eq!(classification.ranking.len(), 3);
        assert_eq!(classification.failures, 0);
        assert!(
            classification.is_correct(),
            "candidate {} predicted {:?} ({:?})",
            label,
            classification.predicted_label,
            classification.ranking
        );
        // Ranking is sorted best first
        for pair in classification.ranking.windows(2) {
            assert!(pair[0].1 <= pair[1].1);
        }
    }
}

#[test]
fn test_results_follow_submission_order() {
    let references = shapes();
    let candidates = shifted(&references);
    let jobs: Vec<PairJob> = candidates
        .iter()
        .flat_map(|(c, candidate)| {
            references.iter().map(move |(r, reference)| PairJob {
                reference_label: *r,
                candidate_label: *c,
                reference: Arc::clone(reference),
                candidate: Arc::clone(candidate),
            })
        })
        .collect();
    let expected: Vec<(usize, usize)> = jobs
        .iter()
        .map(|j| (j.reference_label, j.candidate_label))
        .collect();

    let results = classifier(3, Some(9)).run(jobs);
    let labels: Vec<(usize, usize)> = results
        .iter()
        .map(|r| (r.reference_label, r.candidate_label))
        .collect();
    assert_eq!(labels, expected);
    assert!(results.iter().all(|r| r.outcome.is_ok()));
}

#[test]
fn test_seeded_batches_are_reproducible() {
    let references = shapes();
    let candidates = shifted(&references);

    let first = classifier(4, Some(77)).classify_candidates(&references, &candidates);
    let second = classifier(2, Some(77)).classify_candidates(&references, &candidates);

    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.ranking, b.ranking);
    }
}

#[test]
fn test_candidates_sharing_a_label_rank_separately() {
    let references = shapes();
    let shifted = shifted(&references);
    // Two samples of digit 1: a shifted vertical bar and a shifted diagonal
    let candidates = vec![
        (1, Arc::clone(&shifted[1].1)),
        (1, Arc::clone(&shifted[2].1)),
    ];

    let results = classifier(2, Some(21)).classify_candidates(&references, &candidates);

    assert_eq!(results.len(), 2);
    for classification in &results {
        assert_eq!(classification.candidate_label, 1);
        assert_eq!(classification.ranking.len(), 3);
        assert_eq!(classification.failures, 0);
    }
    assert_eq!(results[0].predicted_label, Some(1));
    assert_eq!(results[1].predicted_label, Some(2));
}

// ============================================================================
// Failures and Cancellation
// ============================================================================

#[test]
fn test_failed_pair_does_not_stop_batch() {
    let references = shapes();
    let blank = Arc::new(PointCloud::from_triples(&[(0.0, 0.0, 0.0)]));
    let mut candidates = shifted(&references);
    candidates.push((9, blank));

    let results = classifier(2, Some(3)).classify_candidates(&references, &candidates);

    assert_eq!(results.len(), 4);
    let blank_result = &results[3];
    assert_eq!(blank_result.predicted_label, None);
    assert_eq!(blank_result.failures, 3);
    assert!(results[..3].iter().all(|c| c.predicted_label.is_some()));
}

#[test]
fn test_failed_pair_reports_error() {
    let job = PairJob {
        reference_label: 0,
        candidate_label: 0,
        reference: Arc::new(common::horizontal_bar(3)),
        candidate: Arc::new(PointCloud::new()),
    };
    let results = classifier(1, Some(0)).run(vec![job]);
    assert_eq!(results.len(), 1);
    assert!(matches!(
        results[0].outcome,
        Err(DrishtiError::DegenerateInput("candidate"))
    ));
}

#[test]
fn test_cancelled_batch_runs_nothing() {
    let references = shapes();
    let candidates = shifted(&references);
    let classifier = classifier(2, Some(5));

    classifier.cancel_handle().store(true, Ordering::Relaxed);
    assert!(classifier.is_cancelled());

    let results = classifier.classify_candidates(&references, &candidates);
    assert!(results.iter().all(|c| c.ranking.is_empty()));
    assert!(results.iter().all(|c| c.predicted_label.is_none()));
}

#[test]
fn test_invalid_worker_count() {
    let err = BatchClassifier::<2>::new(
        SwarmConfig::new(Vector::new([1.0, 1.0])),
        ObjectiveConfig::translation(),
        TransportConfig::default(),
        ClassificationConfig {
            workers: 0,
            ..Default::default()
        },
    )
    .err()
    .unwrap();
    assert!(matches!(err, DrishtiError::InvalidConfig(_)));
}

// ============================================================================
// Bitmap Digits
// ============================================================================

#[test]
fn test_bitmap_digit_grid() {
    let dir = tempfile::tempdir().unwrap();
    let reference_strokes = [
        common::stroke_pixels(4, 6, 6),
        common::column_pixels(6, 3, 6),
    ];
    let candidate_strokes = [
        common::stroke_pixels(5, 8, 6),
        common::column_pixels(4, 4, 6),
    ];
    for label in 0..2 {
        common::save_bitmap(
            dir.path(),
            &reference_file_name(label),
            &common::ink_bitmap(14, &reference_strokes[label]),
        );
        common::save_bitmap(
            dir.path(),
            &candidate_file_name(label),
            &common::ink_bitmap(14, &candidate_strokes[label]),
        );
    }

    let loader = ImageLoader::new(dir.path());
    let converter = ImageConverter::default();
    let load = |name: String| Arc::new(loader.load_cloud(&name, &converter).unwrap());
    let references: Vec<_> = (0..2).map(|l| (l, load(reference_file_name(l)))).collect();
    let candidates: Vec<_> = (0..2).map(|l| (l, load(candidate_file_name(l)))).collect();

    let results = classifier(2, Some(12)).classify_candidates(&references, &candidates);
    assert!(results.iter().all(|c| c.is_correct()), "{:?}", results);
}
