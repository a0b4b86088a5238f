//! Model container: domain, materials, swarm, tracers, boundary conditions,
//! run options, clock, and the post-solve hook slot.
//!
//! Lifecycle: configure everything, call [`Model::init`] once, then
//! [`Model::run_for`] / [`Model::checkpoint`]. Configuration calls after
//! `init` are rejected.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::bcs::{TemperatureBcs, VelocityBcs};
use crate::config::SolverOptions;
use crate::error::{EngineError, EngineResult};
use crate::geotherm::{self, ThermalDefaults};
use crate::grid::Grid;
use crate::materials::{Material, MaterialId, MaterialSet};
use crate::scaling::Scaling;
use crate::snapshots::{self, CheckpointFiles};
use crate::stepper::{self, StepParams, StepStats};
use crate::swarm::Swarm;
use crate::tracers::PassiveTracers;
use crate::units::{Meters, MetersPerSecond};

/// Domain definition handed to [`Model::new`] (dimensional).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParams {
    /// Cells per axis `[nx, ny, nz]`.
    pub resolution: [usize; 3],
    /// Minimum corner (m).
    pub min_coord: [Meters; 3],
    /// Maximum corner (m).
    pub max_coord: [Meters; 3],
    /// Per-axis periodicity.
    pub periodic: [bool; 3],
    /// Gravity vector (m/s²).
    pub gravity_m_s2: [f64; 3],
}

/// Simulation clock (nondimensional time).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Clock {
    /// Current nondimensional time.
    pub t: f64,
    /// Step index (starts at 0, increments per step).
    pub step_idx: u64,
}

/// Post-solve hook over particle coordinates and plastic strain.
pub type PostSolveHook = Box<dyn FnMut(&[[f64; 3]], &mut [f64])>;

/// The complete model state required for configuration and stepping.
pub struct Model {
    /// Grid over the nondimensional box.
    pub grid: Grid,
    /// Scaling coefficients.
    pub scaling: Scaling,
    /// Ordered material set.
    pub materials: MaterialSet,
    /// Material-point swarm (built by `init`).
    pub swarm: Swarm,
    /// Passive tracer sets.
    pub tracers: Vec<PassiveTracers>,
    /// Per-cell nondimensional temperature (built by `init`).
    pub temperature: Vec<f64>,
    /// Temperature boundary conditions.
    pub temperature_bcs: Option<TemperatureBcs>,
    /// Velocity boundary conditions.
    pub velocity_bcs: Option<VelocityBcs>,
    /// Solver options recorded with the run.
    pub solver: SolverOptions,
    /// Checkpoint output directory.
    pub output_dir: PathBuf,
    /// Gravity vector (m/s²).
    pub gravity_m_s2: [f64; 3],
    /// Global lower viscosity bound (Pa·s).
    pub min_viscosity_pa_s: f64,
    /// Global upper viscosity bound (Pa·s).
    pub max_viscosity_pa_s: f64,
    /// Global yield-stress cap (Pa), if any.
    pub stress_limiter_pa: Option<f64>,
    /// Thermal defaults for materials that do not override them.
    pub thermal_defaults: ThermalDefaults,
    /// Swarm lattice density per cell axis.
    pub particles_per_cell_axis: usize,
    /// Simulation clock.
    pub clock: Clock,
    pub(crate) post_solve_hook: Option<PostSolveHook>,
    initialized: bool,
}

impl Model {
    /// Construct an unconfigured model over the given domain.
    pub fn new(params: ModelParams, scaling: Scaling) -> EngineResult<Self> {
        let min = [
            scaling.nd_length(params.min_coord[0]),
            scaling.nd_length(params.min_coord[1]),
            scaling.nd_length(params.min_coord[2]),
        ];
        let max = [
            scaling.nd_length(params.max_coord[0]),
            scaling.nd_length(params.max_coord[1]),
            scaling.nd_length(params.max_coord[2]),
        ];
        let grid = Grid::new(params.resolution, min, max, params.periodic)?;
        Ok(Self {
            grid,
            scaling,
            materials: MaterialSet::new(),
            swarm: Swarm::default(),
            tracers: Vec::new(),
            temperature: Vec::new(),
            temperature_bcs: None,
            velocity_bcs: None,
            solver: SolverOptions::default(),
            output_dir: PathBuf::from("outputs"),
            gravity_m_s2: params.gravity_m_s2,
            min_viscosity_pa_s: 1.0e18,
            max_viscosity_pa_s: 1.0e25,
            stress_limiter_pa: None,
            thermal_defaults: ThermalDefaults { capacity_j_kg_k: 1000.0, diffusivity_m2_s: 1.0e-6 },
            particles_per_cell_axis: 2,
            clock: Clock::default(),
            post_solve_hook: None,
            initialized: false,
        })
    }

    /// Top of the box (m), convenient for layer definitions.
    pub fn top(&self) -> Meters {
        Meters::new(self.scaling.length_m_from_nd(self.grid.max[2]))
    }

    /// Bottom of the box (m).
    pub fn bottom(&self) -> Meters {
        Meters::new(self.scaling.length_m_from_nd(self.grid.min[2]))
    }

    /// Whether `init` has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn reject_after_init(&self, what: &'static str) -> EngineResult<()> {
        if self.initialized {
            return Err(EngineError::Config(format!("{what} after init")));
        }
        Ok(())
    }

    /// Register a material; first added is checked first during assignment.
    pub fn add_material(&mut self, material: Material) -> EngineResult<MaterialId> {
        self.reject_after_init("add_material")?;
        Ok(self.materials.add(material))
    }

    /// Register a passive tracer set.
    pub fn add_passive_tracers(&mut self, tracers: PassiveTracers) -> EngineResult<()> {
        self.reject_after_init("add_passive_tracers")?;
        self.tracers.push(tracers);
        Ok(())
    }

    /// Set the temperature boundary conditions.
    pub fn set_temperature_bcs(&mut self, bcs: TemperatureBcs) -> EngineResult<()> {
        self.reject_after_init("set_temperature_bcs")?;
        self.temperature_bcs = Some(bcs);
        Ok(())
    }

    /// Set the velocity boundary conditions.
    pub fn set_velocity_bcs(&mut self, bcs: VelocityBcs) -> EngineResult<()> {
        self.reject_after_init("set_velocity_bcs")?;
        self.velocity_bcs = Some(bcs);
        Ok(())
    }

    /// Install the post-solve hook run at the end of every step.
    pub fn set_post_solve_hook(&mut self, hook: PostSolveHook) {
        self.post_solve_hook = Some(hook);
    }

    /// Set the checkpoint output directory.
    pub fn set_output_dir<P: AsRef<Path>>(&mut self, dir: P) {
        self.output_dir = dir.as_ref().to_path_buf();
    }

    /// Prescribed wall x-velocities in nondimensional form, if set.
    pub fn wall_velocities_nd(&self) -> Option<(f64, f64)> {
        self.velocity_bcs.map(|bcs| {
            (
                self.scaling.nd_velocity(MetersPerSecond::new(bcs.left_m_s)),
                self.scaling.nd_velocity(MetersPerSecond::new(bcs.right_m_s)),
            )
        })
    }

    /// Build the swarm, assign materials, compute the initial temperature
    /// field, and freeze the configuration.
    pub fn init(&mut self) -> EngineResult<()> {
        self.reject_after_init("init")?;
        self.solver.validate()?;
        if self.materials.is_empty() {
            return Err(EngineError::Config("no materials defined".into()));
        }
        if !(self.min_viscosity_pa_s > 0.0 && self.max_viscosity_pa_s >= self.min_viscosity_pa_s) {
            return Err(EngineError::Config(format!(
                "viscosity bounds invalid: [{:.3e}, {:.3e}]",
                self.min_viscosity_pa_s, self.max_viscosity_pa_s
            )));
        }

        self.swarm = Swarm::lattice(&self.grid, self.particles_per_cell_axis);
        let z_m: Vec<f64> =
            self.swarm.coords.iter().map(|p| self.scaling.length_m_from_nd(p[2])).collect();
        self.swarm.material = self.materials.assign_all(&z_m)?;

        self.temperature = match &self.temperature_bcs {
            Some(bcs) => geotherm::build(
                &self.grid,
                &self.scaling,
                &self.materials,
                bcs,
                self.thermal_defaults,
            )?,
            None => {
                warn!("[model] no temperature boundary conditions; field left at zero");
                vec![0.0; self.grid.cells()]
            }
        };

        self.initialized = true;
        info!(
            "[model] init: res={}x{}x{} cells={} particles={} materials={} tracer_sets={} solver={:?} tol={:.1e}",
            self.grid.res[0],
            self.grid.res[1],
            self.grid.res[2],
            self.grid.cells(),
            self.swarm.len(),
            self.materials.len(),
            self.tracers.len(),
            self.solver.solver,
            self.solver.nonlinear_tolerance,
        );
        Ok(())
    }

    /// Execute one step.
    pub fn step(&mut self, params: &StepParams) -> EngineResult<StepStats> {
        if !self.initialized {
            return Err(EngineError::Uninitialized("step"));
        }
        stepper::step(self, params)
    }

    /// Run a fixed number of steps (blocking), returning the final stats.
    pub fn run_for(&mut self, nsteps: u64, params: &StepParams) -> EngineResult<StepStats> {
        if !self.initialized {
            return Err(EngineError::Uninitialized("run_for"));
        }
        stepper::run_for(self, nsteps, params)
    }

    /// Write a checkpoint set with the given index to the output directory.
    pub fn checkpoint(&self, index: u64) -> EngineResult<CheckpointFiles> {
        if !self.initialized {
            return Err(EngineError::Uninitialized("checkpoint"));
        }
        snapshots::write_checkpoint(self, index)
    }

    /// Simulation time in years.
    pub fn time_years(&self) -> f64 {
        self.scaling.time_yr_from_nd(self.clock.t)
    }
}
