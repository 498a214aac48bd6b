//! Initial particle placement.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::Vector;

/// How particles are spread over `[-b, +b]` before the first iteration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Uniform random positions; velocities uniform in
    /// `[-f·b, +f·b]` for velocity fraction `f`.
    #[default]
    Random,
    /// Cell centers of a regular lattice with `k` cells per dimension,
    /// `k` the smallest integer with `k^N >= swarm_size`. Zero velocity.
    Grid,
}

impl Placement {
    /// Produce `swarm_size` (position, velocity) pairs.
    pub fn place<const N: usize, R: Rng + ?Sized>(
        &self,
        swarm_size: usize,
        bounds: &Vector<N>,
        velocity_fraction: f64,
        rng: &mut R,
    ) -> Vec<(Vector<N>, Vector<N>)> {
        match self {
            Placement::Random => (0..swarm_size)
                .map(|_| {
                    let position = Vector::from_fn(|d| symmetric_uniform(&mut *rng, bounds[d]));
                    let velocity = Vector::from_fn(|d| {
                        symmetric_uniform(&mut *rng, velocity_fraction * bounds[d])
                    });
                    (position, velocity)
                })
                .collect(),
            Placement::Grid => grid(swarm_size, bounds)
                .into_iter()
                .map(|position| (position, Vector::zeros()))
                .collect(),
        }
    }
}

/// Uniform sample from `[-half_width, half_width]`.
#[inline]
fn symmetric_uniform<R: Rng + ?Sized>(rng: &mut R, half_width: f64) -> f64 {
    if half_width > 0.0 {
        rng.random_range(-half_width..=half_width)
    } else {
        0.0
    }
}

/// Smallest `k` with `k^dims >= count`.
fn cells_per_dimension(count: usize, dims: usize) -> usize {
    if dims == 0 || count <= 1 {
        return 1;
    }
    let mut k: usize = 1;
    while (k as u128).pow(dims as u32) < count as u128 {
        k += 1;
    }
    k
}

/// First `count` lattice cell centers in row-major order, last dimension
/// varying fastest.
fn grid<const N: usize>(count: usize, bounds: &Vector<N>) -> Vec<Vector<N>> {
    let k = cells_per_dimension(count, N);
    (0..count)
        .map(|cell| {
            let mut rest = cell;
            let mut digits = [0usize; N];
            for d in (0..N).rev() {
                digits[d] = rest % k;
                rest /= k;
            }
            Vector::from_fn(|d| {
                let b = bounds[d];
                let width = 2.0 * b / k as f64;
                -b + (digits[d] as f64 + 0.5) * width
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let bounds = Vector::new([10.0, 10.0, 3.0]);
        let placed = Placement::Random.place(200, &bounds, 0.5, &mut rng);
        assert_eq!(placed.len(), 200);
        for (position, velocity) in placed {
            for d in 0..3 {
                assert!(position[d].abs() <= bounds[d]);
                assert!(velocity[d].abs() <= 0.5 * bounds[d]);
            }
        }
    }

    #[test]
    fn test_random_zero_bound_pins_dimension() {
        let mut rng = StdRng::seed_from_u64(1);
        let bounds = Vector::new([4.0, 0.0]);
        for (position, velocity) in Placement::Random.place(20, &bounds, 1.0, &mut rng) {
            assert_eq!(position[1], 0.0);
            assert_eq!(velocity[1], 0.0);
        }
    }

    #[test]
    fn test_cells_per_dimension() {
        assert_eq!(cells_per_dimension(15, 3), 3);
        assert_eq!(cells_per_dimension(27, 3), 3);
        assert_eq!(cells_per_dimension(28, 3), 4);
        assert_eq!(cells_per_dimension(4, 2), 2);
        assert_eq!(cells_per_dimension(1, 3), 1);
    }

    #[test]
    fn test_grid_cell_centers() {
        let mut rng = StdRng::seed_from_u64(0);
        let bounds = Vector::new([2.0, 2.0]);
        let placed = Placement::Grid.place(4, &bounds, 1.0, &mut rng);
        let positions: Vec<[f64; 2]> = placed.iter().map(|(p, _)| p.components()).collect();
        assert_eq!(
            positions,
            vec![[-1.0, -1.0], [-1.0, 1.0], [1.0, -1.0], [1.0, 1.0]]
        );
        assert!(placed.iter().all(|(_, v)| *v == Vector::zeros()));
    }

    #[test]
    fn test_grid_single_particle_at_origin() {
        let mut rng = StdRng::seed_from_u64(0);
        let bounds = Vector::new([10.0, 10.0, 3.0]);
        let placed = Placement::Grid.place(1, &bounds, 1.0, &mut rng);
        for d in 0..3 {
            assert_relative_eq!(placed[0].0[d], 0.0);
        }
    }
}
