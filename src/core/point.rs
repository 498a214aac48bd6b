//! Weighted point type.

/// A 2D point carrying ink mass.
///
/// `invalid` marks a placeholder (e.g. a background pixel) that keeps its
/// slot in the ordered sequence but never contributes mass.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct WeightedPoint {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Ink mass (>= 0)
    pub mass: f64,
    /// Excluded from mass computations
    pub invalid: bool,
}

impl WeightedPoint {
    /// Create a valid point.
    #[inline]
    pub fn new(x: f64, y: f64, mass: f64) -> Self {
        Self {
            x,
            y,
            mass,
            invalid: false,
        }
    }

    /// Create a placeholder point.
    #[inline]
    pub fn placeholder(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            mass: 0.0,
            invalid: true,
        }
    }

    /// Mass that takes part in transport and center-of-mass computations.
    #[inline]
    pub fn effective_mass(&self) -> f64 {
        if self.invalid { 0.0 } else { self.mass }
    }

    /// Copy of this point shifted by `(dx, dy)`.
    #[inline]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Copy of this point rotated counter-clockwise by `theta` radians
    /// about `(cx, cy)`.
    #[inline]
    pub fn rotated_about(&self, cx: f64, cy: f64, theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        self.rotated_about_precomputed(cx, cy, sin, cos)
    }

    /// Rotation with pre-computed trig values, for batch transforms.
    #[inline]
    pub(crate) fn rotated_about_precomputed(&self, cx: f64, cy: f64, sin: f64, cos: f64) -> Self {
        let x = self.x - cx;
        let y = self.y - cy;
        Self {
            x: cx + x * cos - y * sin,
            y: cy + x * sin + y * cos,
            ..*self
        }
    }

    /// Squared distance (coordinates only).
    #[inline]
    pub fn distance_squared(&self, other: &WeightedPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance (coordinates only).
    #[inline]
    pub fn distance(&self, other: &WeightedPoint) -> f64 {
        self.distance_squared(other).sqrt()
    }
}
