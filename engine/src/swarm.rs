//! Material-point swarm: SoA storage for particle coordinates, material
//! index, and accumulated plastic strain.

use crate::grid::Grid;

/// Particle swarm over the model box (coordinates nondimensional).
#[derive(Debug, Clone, Default)]
pub struct Swarm {
    /// Particle positions.
    pub coords: Vec<[f64; 3]>,
    /// Dense material index per particle.
    pub material: Vec<u32>,
    /// Accumulated plastic strain per particle.
    pub plastic_strain: Vec<f64>,
}

impl Swarm {
    /// Deterministic regular lattice fill: `per_axis³` particles per cell,
    /// cell-centered sub-lattice, cells traversed x fastest.
    pub fn lattice(grid: &Grid, per_axis: usize) -> Self {
        let per_axis = per_axis.max(1);
        let sub = per_axis as f64;
        let (dx, dy, dz) = (grid.spacing(0), grid.spacing(1), grid.spacing(2));
        let mut coords =
            Vec::with_capacity(grid.cells() * per_axis * per_axis * per_axis);
        for k in 0..grid.res[2] {
            for j in 0..grid.res[1] {
                for i in 0..grid.res[0] {
                    let x0 = grid.min[0] + i as f64 * dx;
                    let y0 = grid.min[1] + j as f64 * dy;
                    let z0 = grid.min[2] + k as f64 * dz;
                    for pk in 0..per_axis {
                        for pj in 0..per_axis {
                            for pi in 0..per_axis {
                                coords.push([
                                    x0 + (pi as f64 + 0.5) * dx / sub,
                                    y0 + (pj as f64 + 0.5) * dy / sub,
                                    z0 + (pk as f64 + 0.5) * dz / sub,
                                ]);
                            }
                        }
                    }
                }
            }
        }
        let n = coords.len();
        Self { coords, material: vec![0; n], plastic_strain: vec![0.0; n] }
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Whether the swarm holds no particles.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}
