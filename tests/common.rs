//! Test utilities for Drishti integration tests.
//!
//! Shapes, random instances and brute-force references.

#![allow(dead_code)]

use std::path::Path;

use drishti::{PointCloud, WeightedPoint};
use image::{GrayImage, Luma};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Asymmetric L-shaped stroke with unit masses.
pub fn l_shape() -> PointCloud {
    PointCloud::from_triples(&[
        (0.0, 0.0, 1.0),
        (1.0, 0.0, 1.0),
        (2.0, 0.0, 1.0),
        (3.0, 0.0, 1.0),
        (0.0, 1.0, 1.0),
        (0.0, 2.0, 1.0),
    ])
}

/// Horizontal bar of `len` unit masses starting at the origin.
pub fn horizontal_bar(len: usize) -> PointCloud {
    (0..len)
        .map(|i| WeightedPoint::new(i as f64, 0.0, 1.0))
        .collect()
}

/// Vertical bar of `len` unit masses starting at the origin.
pub fn vertical_bar(len: usize) -> PointCloud {
    (0..len)
        .map(|i| WeightedPoint::new(0.0, i as f64, 1.0))
        .collect()
}

/// Diagonal stroke of `len` unit masses.
pub fn diagonal(len: usize) -> PointCloud {
    (0..len)
        .map(|i| WeightedPoint::new(i as f64, i as f64, 1.0))
        .collect()
}

/// Random cloud in `[0, extent)²` with masses in `[0.1, 1)`.
pub fn random_cloud(n: usize, extent: f64, seed: u64) -> PointCloud {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            WeightedPoint::new(
                rng.random_range(0.0..extent),
                rng.random_range(0.0..extent),
                rng.random_range(0.1..1.0),
            )
        })
        .collect()
}

/// Random square cost matrix with entries in `[0, 10)`.
pub fn random_costs(n: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| (0..n).map(|_| rng.random_range(0.0..10.0)).collect())
        .collect()
}

/// Cheapest permutation assignment by exhaustive search.
pub fn brute_force_assignment(costs: &[Vec<f64>]) -> f64 {
    fn search(costs: &[Vec<f64>], row: usize, used: &mut Vec<bool>, acc: f64, best: &mut f64) {
        if row == costs.len() {
            *best = best.min(acc);
            return;
        }
        for col in 0..costs.len() {
            if !used[col] {
                used[col] = true;
                search(costs, row + 1, used, acc + costs[row][col], best);
                used[col] = false;
            }
        }
    }
    let mut best = f64::INFINITY;
    search(costs, 0, &mut vec![false; costs.len()], 0.0, &mut best);
    best
}

/// White `size x size` bitmap with black ink at the given `(col, row)`
/// pixels.
pub fn ink_bitmap(size: u32, pixels: &[(u32, u32)]) -> GrayImage {
    let mut image = GrayImage::from_pixel(size, size, Luma([255]));
    for &(col, row) in pixels {
        image.put_pixel(col, row, Luma([0]));
    }
    image
}

/// Pixels of a short horizontal stroke at `(col, row)`.
pub fn stroke_pixels(col: u32, row: u32, len: u32) -> Vec<(u32, u32)> {
    (0..len).map(|i| (col + i, row)).collect()
}

/// Pixels of a short vertical stroke at `(col, row)`.
pub fn column_pixels(col: u32, row: u32, len: u32) -> Vec<(u32, u32)> {
    (0..len).map(|i| (col, row + i)).collect()
}

/// Save a bitmap under `dir`.
pub fn save_bitmap(dir: &Path, name: &str, image: &GrayImage) {
    image.save(dir.join(name)).unwrap();
}
