//! Isostatic basal boundary condition: per-column pressure balance against
//! a reference material column, expressed as a basal vertical velocity.
//!
//! For every (i, j) column the particle densities are averaged and compared
//! with the reference density; the pressure deficit, divided by the step
//! length, becomes the basal inflow/outflow that restores the balance over
//! one step. Columns heavier than the reference sink (negative basal
//! velocity), lighter columns are pushed up.

use tracing::debug;

use crate::bcs::IsostasyBc;
use crate::error::{EngineError, EngineResult};
use crate::grid::Grid;
use crate::materials::MaterialSet;
use crate::scaling::Scaling;

/// Summary of one basal-velocity evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsostasyStats {
    /// Number of (i, j) columns.
    pub columns: usize,
    /// Minimum basal velocity (m/yr).
    pub min_m_yr: f64,
    /// Mean basal velocity (m/yr).
    pub mean_m_yr: f64,
    /// Maximum basal velocity (m/yr).
    pub max_m_yr: f64,
}

/// Compute the nondimensional basal vertical velocity per column.
///
/// `temperature` is the per-cell nondimensional field used to evaluate
/// density laws at particle positions; `dt` is the nondimensional step the
/// correction is spread over.
pub fn basal_velocity(
    grid: &Grid,
    coords: &[[f64; 3]],
    material: &[u32],
    materials: &MaterialSet,
    temperature: &[f64],
    bc: IsostasyBc,
    scaling: &Scaling,
    dt: f64,
) -> EngineResult<(Vec<f64>, IsostasyStats)> {
    if dt <= 0.0 {
        return Err(EngineError::Config(format!("isostasy step must be positive, got {dt}")));
    }
    let reference = materials
        .get(bc.reference_material)
        .ok_or_else(|| EngineError::Config("isostasy reference material not in the set".into()))?;

    let ncol = grid.columns();
    let mut density_sum = vec![0.0f64; ncol];
    let mut count = vec![0usize; ncol];

    let n = coords.len().min(material.len());
    for p in 0..n {
        let [i, j, k] = grid.locate(coords[p]);
        let col = grid.column_index(i, j);
        let cell = grid.cell_index(i, j, k);
        let t_k = scaling.temperature_k_from_nd(temperature[cell]);
        let mat = materials
            .by_index(material[p] as usize)
            .ok_or_else(|| EngineError::Config(format!("particle references material {}", material[p])))?;
        density_sum[col] += mat.density.density_kg_m3(t_k);
        count[col] += 1;
    }

    // Reference density: the pure reference-material column at the basal
    // temperature, or the domain-average column when requested. The k = 0
    // slice is the first `columns()` entries of the cell-ordered field.
    let basal = &temperature[..ncol.min(temperature.len())];
    let t_base_nd = if basal.is_empty() {
        0.0
    } else {
        basal.iter().sum::<f64>() / basal.len() as f64
    };
    let t_base_k = scaling.temperature_k_from_nd(t_base_nd);
    let rho_ref = if bc.average {
        let (sum, cnt) = density_sum
            .iter()
            .zip(count.iter())
            .filter(|(_, &c)| c > 0)
            .fold((0.0f64, 0usize), |(s, m), (&d, &c)| (s + d / c as f64, m + 1));
        if cnt == 0 {
            reference.density.density_kg_m3(t_base_k)
        } else {
            sum / cnt as f64
        }
    } else {
        reference.density.density_kg_m3(t_base_k)
    };
    if rho_ref <= 0.0 {
        return Err(EngineError::Config(format!(
            "isostasy reference density must be positive, got {rho_ref}"
        )));
    }

    let height = grid.extent(2);
    let mut v = vec![0.0f64; ncol];
    let (mut vmin, mut vmax, mut vsum) = (f64::INFINITY, f64::NEG_INFINITY, 0.0f64);
    for col in 0..ncol {
        let vz = if count[col] == 0 {
            0.0
        } else {
            let rho_col = density_sum[col] / count[col] as f64;
            height * (rho_ref - rho_col) / rho_ref / dt
        };
        v[col] = vz;
        let vz_m_yr = scaling.velocity_m_yr_from_nd(vz);
        vmin = vmin.min(vz_m_yr);
        vmax = vmax.max(vz_m_yr);
        vsum += vz_m_yr;
    }

    let stats = IsostasyStats {
        columns: ncol,
        min_m_yr: if ncol > 0 { vmin } else { 0.0 },
        mean_m_yr: if ncol > 0 { vsum / ncol as f64 } else { 0.0 },
        max_m_yr: if ncol > 0 { vmax } else { 0.0 },
    };
    debug!(
        "[isostasy] columns={} rho_ref={:.1} kg/m3 basal v [min/mean/max]=[{:.4}/{:.4}/{:.4}] m/yr",
        stats.columns, rho_ref, stats.min_m_yr, stats.mean_m_yr, stats.max_m_yr
    );
    Ok((v, stats))
}
