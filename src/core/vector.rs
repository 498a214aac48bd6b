//! Fixed-dimension real vector used for particle positions, velocities and
//! search bounds.

use std::ops::{Add, Index, IndexMut, Mul, Sub};

/// An `N`-dimensional real vector.
///
/// The dimension is part of the type, so every vector taking part in one
/// swarm run (positions, velocities, bounds) is guaranteed to agree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector<const N: usize>([f64; N]);

impl<const N: usize> Vector<N> {
    /// Number of components.
    pub const DIM: usize = N;

    /// Create a vector from its components.
    #[inline]
    pub const fn new(components: [f64; N]) -> Self {
        Self(components)
    }

    /// All-zero vector.
    #[inline]
    pub const fn zeros() -> Self {
        Self([0.0; N])
    }

    /// Vector with every component set to `value`.
    #[inline]
    pub const fn splat(value: f64) -> Self {
        Self([value; N])
    }

    /// Build a vector component by component.
    #[inline]
    pub fn from_fn(f: impl FnMut(usize) -> f64) -> Self {
        Self(std::array::from_fn(f))
    }

    /// Build a vector from a slice, checking its length.
    pub fn from_slice(values: &[f64]) -> crate::Result<Self> {
        if values.len() != N {
            return Err(crate::DrishtiError::DimensionMismatch {
                expected: N,
                actual: values.len(),
            });
        }
        Ok(Self::from_fn(|i| values[i]))
    }

    /// Components as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Components as an array.
    #[inline]
    pub fn components(&self) -> [f64; N] {
        self.0
    }

    /// Apply `f` to every component.
    #[inline]
    pub fn map(&self, mut f: impl FnMut(f64) -> f64) -> Self {
        Self::from_fn(|i| f(self.0[i]))
    }

    /// Clamp every component to `[-limit, +limit]`.
    #[inline]
    pub fn clamp_magnitude(&self, limit: f64) -> Self {
        self.map(|c| c.clamp(-limit, limit))
    }
}

impl<const N: usize> Add for Vector<N> {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::from_fn(|i| self.0[i] + other.0[i])
    }
}

impl<const N: usize> Sub for Vector<N> {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::from_fn(|i| self.0[i] - other.0[i])
    }
}

impl<const N: usize> Mul<f64> for Vector<N> {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f64) -> Self {
        self.map(|c| c * scalar)
    }
}

impl<const N: usize> Index<usize> for Vector<N> {
    type Output = f64;

    #[inline]
    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl<const N: usize> IndexMut<usize> for Vector<N> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.0[index]
    }
}

impl<const N: usize> From<[f64; N]> for Vector<N> {
    fn from(components: [f64; N]) -> Self {
        Self(components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = Vector::new([1.0, 2.0, 3.0]);
        let b = Vector::new([0.5, -1.0, 2.0]);

        assert_eq!(a + b, Vector::new([1.5, 1.0, 5.0]));
        assert_eq!(a - b, Vector::new([0.5, 3.0, 1.0]));
        assert_eq!(a * 2.0, Vector::new([2.0, 4.0, 6.0]));
    }

    #[test]
    fn test_clamp_magnitude() {
        let v = Vector::new([7.0, -9.0, 0.5]);
        assert_eq!(v.clamp_magnitude(5.0), Vector::new([5.0, -5.0, 0.5]));
    }

    #[test]
    fn test_from_slice_checks_length() {
        assert!(Vector::<2>::from_slice(&[1.0, 2.0]).is_ok());
        let err = Vector::<3>::from_slice(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            crate::DrishtiError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_index() {
        let mut v = Vector::<2>::zeros();
        v[1] = 4.0;
        assert_eq!(v[0], 0.0);
        assert_eq!(v[1], 4.0);
        assert_eq!(Vector::<2>::DIM, 2);
        assert_eq!(Vector::<3>::splat(1.5).as_slice(), &[1.5, 1.5, 1.5]);
    }
}
