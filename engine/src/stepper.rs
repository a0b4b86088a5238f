//! Kinematic stepper. Order per step:
//! 1) basal velocity from the isostasy condition (when configured)
//! 2) velocity field: linear x-ramp between the wall values, periodic y,
//!    basal vertical flow attenuated to zero at the surface
//! 3) explicit Euler advection of swarm and tracers
//! 4) plastic-strain accumulation where the creep stress reaches the
//!    softened yield stress
//! 5) post-solve hook
//! 6) clock advance

use tracing::info;

use crate::bcs::BottomCondition;
use crate::error::EngineResult;
use crate::grid::Grid;
use crate::isostasy::{self, IsostasyStats};
use crate::model::Model;
use crate::swarm::Swarm;

/// Parameters for one step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepParams {
    /// Nondimensional time step; `None` picks the stable advection step.
    pub dt: Option<f64>,
}

/// Result summary for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepStats {
    /// Nondimensional time after the step.
    pub t: f64,
    /// Step index after increment.
    pub step_idx: u64,
    /// Nondimensional time step used.
    pub dt: f64,
    /// Basal condition summary, when isostasy ran.
    pub basal: Option<IsostasyStats>,
    /// Mean plastic strain over the swarm.
    pub mean_plastic_strain: f64,
    /// Maximum plastic strain over the swarm.
    pub max_plastic_strain: f64,
    /// Particles at yield this step.
    pub yielding: usize,
}

/// Half-cell advection bound: the fastest prescribed wall velocity moves a
/// particle at most half an x-cell per step. Falls back to 1e-2 when no
/// walls drive the model.
pub fn stable_dt(model: &Model) -> f64 {
    let vmax = model
        .wall_velocities_nd()
        .map(|(l, r)| l.abs().max(r.abs()))
        .unwrap_or(0.0);
    if vmax <= 0.0 {
        1.0e-2
    } else {
        0.5 * model.grid.spacing(0) / vmax
    }
}

/// Sample the kinematic velocity field at a point.
fn velocity_at(
    grid: &Grid,
    left_nd: f64,
    right_nd: f64,
    basal: Option<&[f64]>,
    p: [f64; 3],
) -> [f64; 3] {
    let fx = grid.x_normalized(p[0]).clamp(0.0, 1.0);
    let vx = left_nd + (right_nd - left_nd) * fx;
    let vz = match basal {
        Some(v) => {
            let [i, j, _] = grid.locate(p);
            let attenuation = (grid.max[2] - p[2]) / grid.extent(2);
            v[grid.column_index(i, j)] * attenuation.clamp(0.0, 1.0)
        }
        None => 0.0,
    };
    [vx, 0.0, vz]
}

/// Execute one step. Prefer [`Model::step`], which checks initialization.
pub fn step(model: &mut Model, params: &StepParams) -> EngineResult<StepStats> {
    let dt = params.dt.unwrap_or_else(|| stable_dt(model));

    // 1) basal condition
    let mut basal_stats = None;
    let basal: Option<Vec<f64>> = match model.velocity_bcs.map(|b| b.bottom) {
        Some(BottomCondition::Isostasy(bc)) => {
            let (v, stats) = isostasy::basal_velocity(
                &model.grid,
                &model.swarm.coords,
                &model.swarm.material,
                &model.materials,
                &model.temperature,
                bc,
                &model.scaling,
                dt,
            )?;
            basal_stats = Some(stats);
            Some(v)
        }
        _ => None,
    };
    let basal_ref = basal.as_deref();

    // 2-3) advection
    let grid = model.grid.clone();
    let (left_nd, right_nd) = model.wall_velocities_nd().unwrap_or((0.0, 0.0));
    for p in &mut model.swarm.coords {
        let v = velocity_at(&grid, left_nd, right_nd, basal_ref, *p);
        *p = grid.confine([p[0] + v[0] * dt, p[1] + v[1] * dt, p[2] + v[2] * dt]);
    }
    for tracer in &mut model.tracers {
        tracer.advect(&grid, dt, |p| velocity_at(&grid, left_nd, right_nd, basal_ref, p));
    }

    // 4) plastic strain accumulation
    let exx_nd = (right_nd - left_nd) / grid.extent(0);
    let dt_s = model.scaling.time_s_from_nd(dt);
    let g_z = model.gravity_m_s2[2].abs();
    let top_m = model.scaling.length_m_from_nd(grid.max[2]);
    let mut yielding = 0usize;
    {
        let scaling = model.scaling;
        let materials = &model.materials;
        let temperature = &model.temperature;
        let (min_eta, max_eta) = (model.min_viscosity_pa_s, model.max_viscosity_pa_s);
        let limiter = model.stress_limiter_pa;
        let Swarm { coords, material, plastic_strain } = &mut model.swarm;
        for (idx, p) in coords.iter().enumerate() {
            let mat = match materials.by_index(material[idx] as usize) {
                Some(mat) => mat,
                None => continue,
            };
            let Some(plasticity) = mat.plasticity else { continue };

            let [i, j, k] = grid.locate(*p);
            let ezz_nd = match basal_ref {
                Some(v) => -v[grid.column_index(i, j)] / grid.extent(2),
                None => 0.0,
            };
            let rate_nd = (0.5 * (exx_nd * exx_nd + ezz_nd * ezz_nd)).sqrt();
            let rate_s = scaling.strain_rate_per_s_from_nd(rate_nd);
            if rate_s <= 0.0 {
                continue;
            }

            let t_k = scaling.temperature_k_from_nd(temperature[grid.cell_index(i, j, k)]);
            let depth_m = (top_m - scaling.length_m_from_nd(p[2])).max(0.0);
            let pressure_pa = mat.density.reference_kg_m3() * g_z * depth_m;

            let eta = mat
                .viscosity
                .viscosity_pa_s(rate_s, t_k, pressure_pa)
                .clamp(min_eta, max_eta);
            let stress_pa = 2.0 * eta * rate_s;
            let mut yield_pa = plasticity.yield_stress_pa(plastic_strain[idx], pressure_pa);
            if let Some(cap) = limiter {
                yield_pa = yield_pa.min(cap);
            }
            if stress_pa >= yield_pa {
                plastic_strain[idx] += rate_s * dt_s;
                yielding += 1;
            }
        }
    }

    // 5) post-solve hook
    if let Some(mut hook) = model.post_solve_hook.take() {
        let Swarm { coords, plastic_strain, .. } = &mut model.swarm;
        hook(coords, plastic_strain);
        model.post_solve_hook = Some(hook);
    }

    // 6) clock
    model.clock.t += dt;
    model.clock.step_idx += 1;

    let n = model.swarm.len().max(1);
    let (mut sum, mut max) = (0.0f64, 0.0f64);
    for &e in &model.swarm.plastic_strain {
        sum += e;
        max = max.max(e);
    }
    Ok(StepStats {
        t: model.clock.t,
        step_idx: model.clock.step_idx,
        dt,
        basal: basal_stats,
        mean_plastic_strain: sum / n as f64,
        max_plastic_strain: max,
        yielding,
    })
}

/// Run `nsteps` steps, logging one line per step; returns the final stats.
pub fn run_for(model: &mut Model, nsteps: u64, params: &StepParams) -> EngineResult<StepStats> {
    let mut last = StepStats {
        t: model.clock.t,
        step_idx: model.clock.step_idx,
        dt: 0.0,
        basal: None,
        mean_plastic_strain: 0.0,
        max_plastic_strain: 0.0,
        yielding: 0,
    };
    for _ in 0..nsteps {
        last = step(model, params)?;
        info!(
            "[step] idx={} t={:.1} yr dt={:.1} yr yielding={} eps_p[mean/max]=[{:.4}/{:.4}]",
            last.step_idx,
            model.scaling.time_yr_from_nd(last.t),
            model.scaling.time_yr_from_nd(last.dt),
            last.yielding,
            last.mean_plastic_strain,
            last.max_plastic_strain,
        );
    }
    Ok(last)
}
