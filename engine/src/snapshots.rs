//! Checkpoint writers: CSV field/tracer archives plus a JSON manifest,
//! step-indexed, written to the model's output directory.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::SolverOptions;
use crate::error::{EngineError, EngineResult};
use crate::model::Model;

/// Checkpoint format version recorded in the manifest.
pub const CHECKPOINT_VERSION: u32 = 1;

/// Paths written by one checkpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointFiles {
    /// Manifest path.
    pub manifest: PathBuf,
    /// Data files referenced by the manifest.
    pub files: Vec<PathBuf>,
}

/// Manifest serialized next to the checkpoint data files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointManifest {
    /// Format version.
    pub version: u32,
    /// Checkpoint index chosen by the caller.
    pub index: u64,
    /// Step count at write time.
    pub step_idx: u64,
    /// Simulation time in years.
    pub time_years: f64,
    /// Grid resolution.
    pub resolution: [usize; 3],
    /// Swarm particle count.
    pub particles: usize,
    /// Solver options in force.
    pub solver: SolverOptions,
    /// Data file names (relative to the manifest).
    pub files: Vec<String>,
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> EngineError + '_ {
    move |source| EngineError::Checkpoint { path: path.to_path_buf(), source }
}

fn write_tracers_csv(path: &Path, model: &Model, tracer_idx: usize) -> EngineResult<()> {
    let tracer = &model.tracers[tracer_idx];
    let file = File::create(path).map_err(io_err(path))?;
    let mut w = BufWriter::new(file);
    let mut run = || -> std::io::Result<()> {
        writeln!(w, "# t_yr={:.6}", model.time_years())?;
        writeln!(w, "x_km,y_km,z_km")?;
        for p in &tracer.coords {
            writeln!(
                w,
                "{},{},{}",
                model.scaling.length_km_from_nd(p[0]),
                model.scaling.length_km_from_nd(p[1]),
                model.scaling.length_km_from_nd(p[2]),
            )?;
        }
        w.flush()
    };
    run().map_err(io_err(path))
}

fn write_swarm_csv(path: &Path, model: &Model) -> EngineResult<()> {
    let file = File::create(path).map_err(io_err(path))?;
    let mut w = BufWriter::new(file);
    let mut run = || -> std::io::Result<()> {
        writeln!(w, "# t_yr={:.6}", model.time_years())?;
        writeln!(w, "x_km,y_km,z_km,material,plastic_strain")?;
        for (i, p) in model.swarm.coords.iter().enumerate() {
            // Clamp to finite numbers to avoid CSV pollution
            let e = model.swarm.plastic_strain[i];
            let e = if e.is_finite() { e } else { 0.0 };
            writeln!(
                w,
                "{},{},{},{},{}",
                model.scaling.length_km_from_nd(p[0]),
                model.scaling.length_km_from_nd(p[1]),
                model.scaling.length_km_from_nd(p[2]),
                model.swarm.material[i],
                e,
            )?;
        }
        w.flush()
    };
    run().map_err(io_err(path))
}

fn write_temperature_csv(path: &Path, model: &Model) -> EngineResult<()> {
    let file = File::create(path).map_err(io_err(path))?;
    let mut w = BufWriter::new(file);
    let mut run = || -> std::io::Result<()> {
        writeln!(w, "# t_yr={:.6}", model.time_years())?;
        writeln!(w, "i,j,k,temperature_k")?;
        for k in 0..model.grid.res[2] {
            for j in 0..model.grid.res[1] {
                for i in 0..model.grid.res[0] {
                    let cell = model.grid.cell_index(i, j, k);
                    writeln!(
                        w,
                        "{},{},{},{}",
                        i,
                        j,
                        k,
                        model.scaling.temperature_k_from_nd(model.temperature[cell]),
                    )?;
                }
            }
        }
        w.flush()
    };
    run().map_err(io_err(path))
}

/// Write the full checkpoint set for `index` into the model's output
/// directory, creating it if needed.
pub fn write_checkpoint(model: &Model, index: u64) -> EngineResult<CheckpointFiles> {
    let dir = &model.output_dir;
    std::fs::create_dir_all(dir).map_err(io_err(dir))?;

    let mut files = Vec::new();
    let mut names = Vec::new();

    for (t, tracer) in model.tracers.iter().enumerate() {
        let name = format!("tracers_{}_{index:05}.csv", tracer.name.to_lowercase());
        let path = dir.join(&name);
        write_tracers_csv(&path, model, t)?;
        files.push(path);
        names.push(name);
    }

    let swarm_name = format!("swarm_{index:05}.csv");
    let swarm_path = dir.join(&swarm_name);
    write_swarm_csv(&swarm_path, model)?;
    files.push(swarm_path);
    names.push(swarm_name);

    let temp_name = format!("temperature_{index:05}.csv");
    let temp_path = dir.join(&temp_name);
    write_temperature_csv(&temp_path, model)?;
    files.push(temp_path);
    names.push(temp_name);

    let manifest = CheckpointManifest {
        version: CHECKPOINT_VERSION,
        index,
        step_idx: model.clock.step_idx,
        time_years: model.time_years(),
        resolution: model.grid.res,
        particles: model.swarm.len(),
        solver: model.solver,
        files: names,
    };
    let manifest_path = dir.join(format!("checkpoint_{index:05}.json"));
    let body = serde_json::to_string_pretty(&manifest)?;
    std::fs::write(&manifest_path, body).map_err(io_err(&manifest_path))?;

    info!(
        "[checkpoint] index={} step={} t={:.1} yr files={}",
        index,
        model.clock.step_idx,
        manifest.time_years,
        files.len() + 1
    );
    Ok(CheckpointFiles { manifest: manifest_path, files })
}

/// Read a checkpoint manifest back.
pub fn read_manifest(path: &Path) -> EngineResult<CheckpointManifest> {
    let body = std::fs::read_to_string(path).map_err(io_err(path))?;
    Ok(serde_json::from_str(&body)?)
}
