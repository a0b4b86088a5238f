//! Material definitions: layer shapes, density laws, and the ordered
//! material set the swarm is painted from.

use crate::error::{EngineError, EngineResult};
use crate::rheology::{Plasticity, ViscosityLaw};
use crate::units::Meters;

/// Dense material identifier (insertion order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

/// Horizontal layer shape bounded by two z levels (meters, z up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    /// Upper bound (m).
    pub top_m: f64,
    /// Lower bound (m).
    pub bottom_m: f64,
}

impl Layer {
    /// Layer from dimensional bounds; `top` must lie above `bottom`.
    pub fn new(top: Meters, bottom: Meters) -> Self {
        Self { top_m: top.value(), bottom_m: bottom.value() }
    }

    /// Whether a z level (m) lies inside the layer (bounds inclusive).
    pub fn contains(&self, z_m: f64) -> bool {
        z_m <= self.top_m && z_m >= self.bottom_m
    }
}

/// Density law evaluated at temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DensityLaw {
    /// Constant density (kg/m³).
    Constant(f64),
    /// Linear thermal expansion around a reference state:
    /// `ρ = ρ0 · (1 − α·(T − T0))`.
    Linear {
        /// Reference density ρ0 (kg/m³).
        reference_kg_m3: f64,
        /// Thermal expansivity α (1/K).
        expansivity_per_k: f64,
        /// Reference temperature T0 (K).
        reference_temperature_k: f64,
    },
}

impl DensityLaw {
    /// Linear law with the conventional defaults (α = 3e-5 1/K, T0 = 273.15 K).
    pub fn linear(reference_kg_m3: f64) -> Self {
        Self::Linear {
            reference_kg_m3,
            expansivity_per_k: 3.0e-5,
            reference_temperature_k: 273.15,
        }
    }

    /// Density in kg/m³ at the given temperature.
    pub fn density_kg_m3(&self, temperature_k: f64) -> f64 {
        match *self {
            Self::Constant(rho) => rho,
            Self::Linear { reference_kg_m3, expansivity_per_k, reference_temperature_k } => {
                reference_kg_m3 * (1.0 - expansivity_per_k * (temperature_k - reference_temperature_k))
            }
        }
    }

    /// Density at the reference state.
    pub fn reference_kg_m3(&self) -> f64 {
        match *self {
            Self::Constant(rho) => rho,
            Self::Linear { reference_kg_m3, .. } => reference_kg_m3,
        }
    }
}

/// One labeled region of the model with its physical properties.
///
/// A material without a shape receives no initial particles; it exists for
/// later deposition and for property lookups (the sediment material).
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Display name.
    pub name: String,
    /// Initial region, if any.
    pub shape: Option<Layer>,
    /// Density law.
    pub density: DensityLaw,
    /// Viscosity law.
    pub viscosity: ViscosityLaw,
    /// Optional frictional-plastic yield law.
    pub plasticity: Option<Plasticity>,
    /// Specific heat capacity (J/(kg·K)); `None` takes the model default.
    pub capacity_j_kg_k: Option<f64>,
    /// Thermal diffusivity (m²/s); `None` takes the model default.
    pub diffusivity_m2_s: Option<f64>,
    /// Radiogenic heat production (W/m³).
    pub heat_production_w_m3: f64,
}

impl Material {
    /// A named material with neutral defaults; callers override fields via
    /// struct update.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            shape: None,
            density: DensityLaw::Constant(0.0),
            viscosity: ViscosityLaw::Constant(1.0e21),
            plasticity: None,
            capacity_j_kg_k: None,
            diffusivity_m2_s: None,
            heat_production_w_m3: 0.0,
        }
    }
}

/// Ordered collection of materials; assignment is first shape match in
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct MaterialSet {
    materials: Vec<Material>,
}

impl MaterialSet {
    /// Empty set.
    pub fn new() -> Self {
        Self { materials: Vec::new() }
    }

    /// Add a material, returning its dense id.
    pub fn add(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    /// Number of materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Material by id.
    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    /// Material by dense index.
    pub fn by_index(&self, index: usize) -> Option<&Material> {
        self.materials.get(index)
    }

    /// Mutable material by id.
    pub fn get_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        self.materials.get_mut(id.0)
    }

    /// Iterate `(id, material)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (MaterialId, &Material)> {
        self.materials.iter().enumerate().map(|(i, mat)| (MaterialId(i), mat))
    }

    /// First material (insertion order) whose shape contains the z level.
    pub fn assign_z_m(&self, z_m: f64) -> Option<MaterialId> {
        self.materials
            .iter()
            .position(|mat| mat.shape.map(|sh| sh.contains(z_m)).unwrap_or(false))
            .map(MaterialId)
    }

    /// Assign every particle z level; errors if any particle is covered by
    /// no shape.
    pub fn assign_all(&self, z_m: &[f64]) -> EngineResult<Vec<u32>> {
        let mut out = Vec::with_capacity(z_m.len());
        let mut missed = 0usize;
        for &z in z_m {
            match self.assign_z_m(z) {
                Some(MaterialId(i)) => out.push(i as u32),
                None => {
                    missed += 1;
                    out.push(u32::MAX);
                }
            }
        }
        if missed > 0 {
            return Err(EngineError::Unassigned { count: missed });
        }
        Ok(out)
    }
}
