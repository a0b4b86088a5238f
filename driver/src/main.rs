//! riftbox: 3D lithospheric rift model.
//!
//! Configures a 500 × 500 × 180 km box with air, crust, mantle lithosphere,
//! mantle, and sediment layers, extension driven at ±2.5 cm/yr with an
//! isostatic base, a randomly seeded plastic-strain weak zone at the domain
//! center, and an edge taper that suppresses strain accumulation at the
//! left/right walls; then runs a fixed number of steps and checkpoints.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use engine::bcs::{BottomCondition, IsostasyBc, TemperatureBcs, VelocityBcs};
use engine::config::{self, SolverKind, SolverOptions};
use engine::damage::{self, DamageParams};
use engine::geotherm::ThermalDefaults;
use engine::materials::{DensityLaw, Layer, Material};
use engine::model::{Model, ModelParams};
use engine::rheology::{Plasticity, ViscosityLaw, ViscousCreep};
use engine::scaling::Scaling;
use engine::stepper::StepParams;
use engine::tracers::PassiveTracers;
use engine::units::{cm_yr, deg_k, km, m, uw_m3, Meters, MetersPerSecond, WattsPerCubicMeter};

/// 3D lithospheric rift model runner
#[derive(Parser)]
#[command(name = "riftbox")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "3D thermo-mechanical lithospheric rift model", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Checkpoint output directory
    #[arg(short, long, default_value = "outputs")]
    output: PathBuf,

    /// Number of timesteps to run
    #[arg(short, long, default_value = "10")]
    nsteps: u64,

    /// Seed for the plastic-strain damage noise
    #[arg(long, default_value = "42")]
    seed: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).with_target(false).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("=== riftbox {} ===", engine::version());

    // Resolution: base [128, 64, 64] scaled by the environment factor.
    let resolution = config::resolution();
    info!(
        "resolution: {}x{}x{} (factor {})",
        resolution[0],
        resolution[1],
        resolution[2],
        config::resolution_factor()
    );

    // Characteristic values of the system
    let half_rate: MetersPerSecond = cm_yr(1.8).into();
    let surface_temp = deg_k(273.15);
    let base_temp = deg_k(1603.15);
    let bodyforce_n_m3 = 3370.0 * 9.81;
    let scaling = Scaling::from_characteristic(
        m(500.0e3),
        half_rate,
        bodyforce_n_m3,
        surface_temp,
        base_temp,
    );

    let mut model = Model::new(
        ModelParams {
            resolution,
            min_coord: [km(0.0).into(), km(0.0).into(), km(-160.0).into()],
            max_coord: [km(500.0).into(), km(500.0).into(), km(20.0).into()],
            periodic: [false, true, false],
            gravity_m_s2: [0.0, 0.0, -9.81],
        },
        scaling,
    )
    .context("model domain setup failed")?;

    model.set_output_dir(&cli.output);
    model.max_viscosity_pa_s = 5.0e23;
    model.min_viscosity_pa_s = 1.0e19;
    model.stress_limiter_pa = Some(300.0e6);
    model.thermal_defaults = ThermalDefaults { capacity_j_kg_k: 1000.0, diffusivity_m2_s: 1.0e-6 };
    model.solver = SolverOptions {
        solver: SolverKind::Multigrid,
        initial_nonlinear_tolerance: 2.0e-2,
        nonlinear_tolerance: 2.0e-2,
    };

    // Materials, shallowest first: assignment is first shape match.
    let crust_plasticity = Plasticity {
        epsilon1: 0.01,
        epsilon2: 1.0,
        ..Plasticity::huismans_et_al_2011_crust()
    };

    let air = model
        .add_material(Material {
            shape: Some(Layer::new(model.top(), km(0.0).into())),
            density: DensityLaw::Constant(1.0),
            viscosity: ViscosityLaw::Constant(1.0e19),
            capacity_j_kg_k: Some(100.0),
            ..Material::named("Air")
        })
        .context("add Air")?;

    let _crust = model
        .add_material(Material {
            shape: Some(Layer::new(km(0.0).into(), km(-40.0).into())),
            density: DensityLaw::linear(2800.0),
            viscosity: ViscosityLaw::Creep(ViscousCreep::gleason_and_tullis_1995()),
            plasticity: Some(crust_plasticity),
            heat_production_w_m3: WattsPerCubicMeter::from(uw_m3(0.7)).value(),
            ..Material::named("Crust")
        })
        .context("add Crust")?;

    let _mantle_lithosphere = model
        .add_material(Material {
            shape: Some(Layer::new(km(-40.0).into(), km(-100.0).into())),
            density: DensityLaw::linear(3370.0),
            viscosity: ViscosityLaw::Creep(ViscousCreep::karato_and_wu_1990().scaled(5.0)),
            plasticity: Some(crust_plasticity),
            ..Material::named("MantleLithosphere")
        })
        .context("add MantleLithosphere")?;

    let mantle = model
        .add_material(Material {
            shape: Some(Layer::new(km(-100.0).into(), model.bottom())),
            density: DensityLaw::linear(3370.0),
            viscosity: ViscosityLaw::Creep(ViscousCreep::karato_and_wu_1990()),
            plasticity: Some(crust_plasticity),
            ..Material::named("Mantle")
        })
        .context("add Mantle")?;

    let _sediment = model
        .add_material(Material {
            density: DensityLaw::Constant(2300.0),
            viscosity: ViscosityLaw::Creep(ViscousCreep::gleason_and_tullis_1995()),
            plasticity: Some(crust_plasticity),
            heat_production_w_m3: WattsPerCubicMeter::from(uw_m3(0.6)).value(),
            ..Material::named("Sediment")
        })
        .context("add Sediment")?;

    // Passive tracers: surface sheet and Moho sheet
    let surface = PassiveTracers::sheet("Surface", &model.grid, 100, 100, 0.0);
    let moho_z = scaling.nd_length(Meters::from(km(-40.0)));
    let moho = PassiveTracers::sheet("Moho", &model.grid, 100, 100, moho_z);
    model.add_passive_tracers(surface).context("add Surface tracers")?;
    model.add_passive_tracers(moho).context("add Moho tracers")?;

    // Boundary conditions
    model
        .set_temperature_bcs(
            TemperatureBcs::new(deg_k(293.15), deg_k(1603.15))
                .with_override(mantle, deg_k(1603.15))
                .with_override(air, deg_k(293.15)),
        )
        .context("temperature boundary conditions")?;
    model
        .set_velocity_bcs(VelocityBcs::extension(
            cm_yr(-2.5),
            cm_yr(2.5),
            BottomCondition::Isostasy(IsostasyBc { reference_material: mantle, average: false }),
        ))
        .context("velocity boundary conditions")?;

    model.init().context("model init failed")?;

    // Seed the weak zone: random damage localized at the domain center and
    // 35 km depth.
    let damage_params = DamageParams {
        seed: cli.seed,
        max_damage: 0.25,
        centre_x: 0.5 * (model.grid.min[0] + model.grid.max[0]),
        centre_z: scaling.nd_length(Meters::from(km(-35.0))),
        width: scaling.nd_length(Meters::from(km(5.0))),
    };
    {
        let coords = &model.swarm.coords;
        let strain = &mut model.swarm.plastic_strain;
        damage::seed_plastic_strain(coords, strain, &damage_params);
    }
    info!(
        "damage seed: max={} centre_x={:.3} centre_z={:.3} width={:.4} seed={}",
        damage_params.max_damage,
        damage_params.centre_x,
        damage_params.centre_z,
        damage_params.width,
        damage_params.seed
    );

    // Taper strain to zero at the left/right walls after every step.
    let (x_min, x_max) = (model.grid.min[0], model.grid.max[0]);
    model.set_post_solve_hook(Box::new(move |coords, strain| {
        damage::apply_edge_taper(coords, strain, x_min, x_max);
    }));

    info!(
        "viscosity bounds [{:.1e}, {:.1e}] Pa·s, stress limiter {:.0} MPa",
        model.min_viscosity_pa_s,
        model.max_viscosity_pa_s,
        model.stress_limiter_pa.unwrap_or(0.0) / 1.0e6
    );

    let stats = model
        .run_for(cli.nsteps, &StepParams::default())
        .context("run loop failed")?;
    info!(
        "run complete: steps={} t={:.1} yr max_eps_p={:.4}",
        stats.step_idx,
        model.time_years(),
        stats.max_plastic_strain
    );

    let files = model.checkpoint(0).context("checkpoint failed")?;
    info!("checkpoint written: {}", files.manifest.display());

    Ok(())
}
