//! Dense pairwise cost matrix.

use serde::{Deserialize, Serialize};

use crate::core::WeightedPoint;

/// Pairwise dissimilarity between point coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// `dx² + dy²`
    #[default]
    SquaredEuclidean,
    /// `sqrt(dx² + dy²)`
    Euclidean,
}

impl DistanceMetric {
    /// Select the metric from a "use squared distance" flag.
    pub fn from_squared(squared: bool) -> Self {
        if squared {
            DistanceMetric::SquaredEuclidean
        } else {
            DistanceMetric::Euclidean
        }
    }

    /// Distance between two points.
    #[inline]
    pub fn distance(&self, a: &WeightedPoint, b: &WeightedPoint) -> f64 {
        match self {
            DistanceMetric::SquaredEuclidean => a.distance_squared(b),
            DistanceMetric::Euclidean => a.distance(b),
        }
    }
}

/// Row-major `rows x cols` cost matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl CostMatrix {
    /// Create from row-major data.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> crate::Result<Self> {
        if data.len() != rows * cols {
            return Err(crate::DrishtiError::DimensionMismatch {
                expected: rows * cols,
                actual: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Create from nested rows. All rows must share the same length.
    pub fn from_rows(rows: &[Vec<f64>]) -> crate::Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return Err(crate::DrishtiError::DimensionMismatch {
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Build a matrix from every pair of `reference` (rows) and `candidate`
    /// (columns) points.
    pub fn between<'a, R, C>(reference: R, candidate: C, metric: DistanceMetric) -> Self
    where
        R: IntoIterator<Item = &'a WeightedPoint>,
        C: IntoIterator<Item = &'a WeightedPoint>,
        C::IntoIter: Clone,
    {
        let candidate = candidate.into_iter();
        let cols = candidate.clone().count();
        let mut data = Vec::new();
        let mut rows = 0;
        for r in reference {
            data.extend(candidate.clone().map(|c| metric.distance(r, c)));
            rows += 1;
        }
        Self { rows, cols, data }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cost at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// One row as a slice.
    #[inline]
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }
}
