//! Ordered weighted point cloud.

use super::point::WeightedPoint;

/// An ordered sequence of weighted points.
///
/// Order follows the source pixel grid; transforms preserve it so index
/// correspondence with the image is kept.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud {
    points: Vec<WeightedPoint>,
}

impl PointCloud {
    /// Create an empty cloud.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from points.
    pub fn from_points(points: Vec<WeightedPoint>) -> Self {
        Self { points }
    }

    /// Create from `(x, y, mass)` triples.
    pub fn from_triples(triples: &[(f64, f64, f64)]) -> Self {
        Self {
            points: triples
                .iter()
                .map(|&(x, y, m)| WeightedPoint::new(x, y, m))
                .collect(),
        }
    }

    /// Points in order.
    #[inline]
    pub fn points(&self) -> &[WeightedPoint] {
        &self.points
    }

    /// Number of slots (valid and invalid).
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether there are no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append a point.
    pub fn push(&mut self, point: WeightedPoint) {
        self.points.push(point);
    }

    /// Iterate over points.
    pub fn iter(&self) -> std::slice::Iter<'_, WeightedPoint> {
        self.points.iter()
    }

    /// Effective masses in order (zero for invalid points).
    pub fn masses(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.effective_mass()).collect()
    }

    /// Sum of effective masses.
    pub fn total_mass(&self) -> f64 {
        self.points.iter().map(|p| p.effective_mass()).sum()
    }

    /// Number of points with positive effective mass.
    pub fn active_count(&self) -> usize {
        self.points
            .iter()
            .filter(|p| p.effective_mass() > 0.0)
            .count()
    }

    /// Mass-weighted center, or `None` when the cloud carries no mass.
    pub fn center_of_mass(&self) -> Option<(f64, f64)> {
        let mut total = 0.0;
        let mut sx = 0.0;
        let mut sy = 0.0;
        for p in &self.points {
            let m = p.effective_mass();
            total += m;
            sx += p.x * m;
            sy += p.y * m;
        }
        if total > 0.0 {
            Some((sx / total, sy / total))
        } else {
            None
        }
    }

    /// New cloud shifted by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            points: self.points.iter().map(|p| p.translated(dx, dy)).collect(),
        }
    }

    /// New cloud rotated counter-clockwise by `theta` about `(cx, cy)`.
    pub fn rotated_about(&self, cx: f64, cy: f64, theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self {
            points: self
                .points
                .iter()
                .map(|p| p.rotated_about_precomputed(cx, cy, sin, cos))
                .collect(),
        }
    }
}

impl FromIterator<WeightedPoint> for PointCloud {
    fn from_iter<I: IntoIterator<Item = WeightedPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PointCloud {
    type Item = &'a WeightedPoint;
    type IntoIter = std::slice::Iter<'a, WeightedPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
