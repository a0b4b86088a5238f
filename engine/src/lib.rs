//! Kinematic thermo-mechanical rift model engine.
//!
//! A boundary-driven box model: structured 3D grid, material-point swarm,
//! layered materials with creep/plastic rheology, Dirichlet temperature and
//! prescribed-wall velocity boundary conditions, an isostatic basal
//! condition, passive tracer sheets, seeded plastic-strain damage, and a
//! blocking run loop with CSV/JSON checkpoints.
#![deny(missing_docs)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::dbg_macro, clippy::large_enum_variant)]

pub mod bcs;
pub mod config;
pub mod damage;
pub mod error;
pub mod geotherm;
pub mod grid;
pub mod isostasy;
pub mod materials;
pub mod model;
pub mod rheology;
pub mod scaling;
pub mod snapshots;
pub mod stepper;
pub mod swarm;
pub mod tracers;
pub mod units;

/// Returns the engine version string from Cargo metadata.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
