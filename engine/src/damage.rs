//! Plastic-strain damage seeding and the boundary strain taper.
//!
//! Both weighting functions are stateless numeric transforms over particle
//! coordinates. Seeding is deterministic given the seed (namespaced RNG).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Gaussian weight `exp(−(x − centre)² / width)`.
///
/// Equals 1 at `x = centre` and decays symmetrically with distance; `width`
/// divides the squared offset directly (it is not squared itself).
#[inline]
pub fn gaussian(x: f64, centre: f64, width: f64) -> f64 {
    (-(x - centre) * (x - centre) / width).exp()
}

/// Smooth edge taper over a normalized coordinate `z ∈ [0, 1]`:
/// `(tanh(20z) + tanh(20(1 − z)) − tanh(20))⁴`.
///
/// Zero at both edges, approaching 1 in the interior.
#[inline]
pub fn edge_taper(z: f64) -> f64 {
    let s = 20.0;
    ((s * z).tanh() + (s * (1.0 - z)).tanh() - s.tanh()).powi(4)
}

/// Parameters for the initial damage seed (all lengths nondimensional).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageParams {
    /// RNG seed (deterministic).
    pub seed: u64,
    /// Upper bound of the uniform random strain.
    pub max_damage: f64,
    /// Gaussian centre along x (the weak-zone axis position).
    pub centre_x: f64,
    /// Gaussian centre along z (the seed depth).
    pub centre_z: f64,
    /// Gaussian width (divides the squared offset).
    pub width: f64,
}

/// Seed per-particle plastic strain: uniform noise in `[0, max_damage)`
/// localized by Gaussian weights along x and z.
pub fn seed_plastic_strain(coords: &[[f64; 3]], plastic_strain: &mut [f64], p: &DamageParams) {
    if p.max_damage <= 0.0 {
        plastic_strain.fill(0.0);
        return;
    }
    let ns: u64 = 0x64616d_6167_65; // "damage"
    let mut rng = StdRng::seed_from_u64(p.seed ^ ns);
    let n = coords.len().min(plastic_strain.len());
    for i in 0..n {
        let noise: f64 = rng.gen_range(0.0..p.max_damage);
        let wx = gaussian(coords[i][0], p.centre_x, p.width);
        let wz = gaussian(coords[i][2], p.centre_z, p.width);
        plastic_strain[i] = noise * wx * wz;
    }
}

/// Multiply each particle's plastic strain by the edge taper of its
/// normalized x-coordinate, suppressing accumulation near the left/right
/// walls.
pub fn apply_edge_taper(coords: &[[f64; 3]], plastic_strain: &mut [f64], x_min: f64, x_max: f64) {
    let width = x_max - x_min;
    if width <= 0.0 {
        return;
    }
    let n = coords.len().min(plastic_strain.len());
    for i in 0..n {
        let z = (coords[i][0] - x_min) / width;
        plastic_strain[i] *= edge_taper(z);
    }
}
