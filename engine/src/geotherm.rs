//! Initial temperature structure: a steady conductive profile between the
//! Dirichlet boundary values with a radiogenic contribution inside
//! heat-producing layers, overridden wherever the temperature boundary
//! conditions pin a material.
//!
//! The conductive window is delimited by the override layers themselves:
//! the ramp runs from the bottom of the topmost pinned layer (base of the
//! air column) to the top of the lowest pinned layer (top of the
//! convecting mantle). Inside a heat-producing layer the profile gains the
//! parabolic term `H·(top − z)·(z − bottom) / 2k`, which vanishes at the
//! layer bounds and so keeps the profile continuous.

use crate::bcs::TemperatureBcs;
use crate::error::{EngineError, EngineResult};
use crate::grid::Grid;
use crate::materials::MaterialSet;
use crate::scaling::Scaling;

/// Model-level thermal defaults for materials that do not override them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalDefaults {
    /// Specific heat capacity (J/(kg·K)).
    pub capacity_j_kg_k: f64,
    /// Thermal diffusivity (m²/s).
    pub diffusivity_m2_s: f64,
}

/// Dimensional temperature (K) of the geotherm at a z level (m).
pub fn temperature_at_z_m(
    z_m: f64,
    materials: &MaterialSet,
    bcs: &TemperatureBcs,
    defaults: ThermalDefaults,
    window_top_m: f64,
    window_bottom_m: f64,
) -> f64 {
    // Pinned material wins outright.
    if let Some(id) = materials.assign_z_m(z_m) {
        if let Some(t) = bcs.override_for(id) {
            return t;
        }
    }

    if z_m >= window_top_m {
        return bcs.top_k;
    }
    if z_m <= window_bottom_m {
        return bcs.bottom_k;
    }

    // Linear conductive ramp across the window.
    let span = window_top_m - window_bottom_m;
    let frac = (window_top_m - z_m) / span;
    let mut t = bcs.top_k + frac * (bcs.bottom_k - bcs.top_k);

    // Radiogenic parabola inside heat-producing layers.
    if let Some(id) = materials.assign_z_m(z_m) {
        if let Some(mat) = materials.get(id) {
            if mat.heat_production_w_m3 > 0.0 {
                if let Some(layer) = mat.shape {
                    let kappa = mat.diffusivity_m2_s.unwrap_or(defaults.diffusivity_m2_s);
                    let cp = mat.capacity_j_kg_k.unwrap_or(defaults.capacity_j_kg_k);
                    let rho = mat.density.reference_kg_m3();
                    let conductivity = kappa * rho * cp;
                    if conductivity > 0.0 {
                        t += mat.heat_production_w_m3 * (layer.top_m - z_m) * (z_m - layer.bottom_m)
                            / (2.0 * conductivity);
                    }
                }
            }
        }
    }
    t
}

/// The conductive window `[bottom, top]` (m) implied by the override
/// layers; the full box extent when no shaped override exists.
pub fn conductive_window_m(
    grid: &Grid,
    scaling: &Scaling,
    materials: &MaterialSet,
    bcs: &TemperatureBcs,
) -> (f64, f64) {
    let box_top_m = scaling.length_m_from_nd(grid.max[2]);
    let box_bottom_m = scaling.length_m_from_nd(grid.min[2]);
    let mut top = box_top_m;
    let mut bottom = box_bottom_m;
    for &(id, _) in &bcs.material_overrides {
        if let Some(layer) = materials.get(id).and_then(|mat| mat.shape) {
            // A pinned layer touching the box top caps the window from
            // above; one touching the box bottom caps it from below.
            if (layer.top_m - box_top_m).abs() < f64::EPSILON.max(1.0e-9 * box_top_m.abs()) {
                top = top.min(layer.bottom_m);
            }
            if (layer.bottom_m - box_bottom_m).abs() < f64::EPSILON.max(1.0e-9 * box_bottom_m.abs()) {
                bottom = bottom.max(layer.top_m);
            }
        }
    }
    if bottom >= top {
        (box_bottom_m, box_top_m)
    } else {
        (bottom, top)
    }
}

/// Build the per-cell nondimensional temperature field.
pub fn build(
    grid: &Grid,
    scaling: &Scaling,
    materials: &MaterialSet,
    bcs: &TemperatureBcs,
    defaults: ThermalDefaults,
) -> EngineResult<Vec<f64>> {
    if materials.is_empty() {
        return Err(EngineError::Config("no materials defined before geotherm".into()));
    }
    let (window_bottom_m, window_top_m) = conductive_window_m(grid, scaling, materials, bcs);
    let mut out = Vec::with_capacity(grid.cells());
    for k in 0..grid.res[2] {
        for j in 0..grid.res[1] {
            for i in 0..grid.res[0] {
                let z_m = scaling.length_m_from_nd(grid.cell_center(i, j, k)[2]);
                let t_k = temperature_at_z_m(z_m, materials, bcs, defaults, window_top_m, window_bottom_m);
                out.push(t_k / scaling.temperature_k);
            }
        }
    }
    Ok(out)
}
