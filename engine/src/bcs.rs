//! Boundary condition sets: Dirichlet temperature with per-material
//! overrides, prescribed wall velocities, and the basal condition.

use crate::materials::MaterialId;
use crate::units::{CentimetersPerYear, Kelvin, MetersPerSecond};

/// Temperature boundary conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureBcs {
    /// Dirichlet value at the top surface (K).
    pub top_k: f64,
    /// Dirichlet value at the bottom surface (K).
    pub bottom_k: f64,
    /// Per-material overrides applied wherever the material sits (K).
    pub material_overrides: Vec<(MaterialId, f64)>,
}

impl TemperatureBcs {
    /// Dirichlet top/bottom values with no overrides.
    pub fn new(top: Kelvin, bottom: Kelvin) -> Self {
        Self { top_k: top.value(), bottom_k: bottom.value(), material_overrides: Vec::new() }
    }

    /// Add a per-material override.
    pub fn with_override(mut self, material: MaterialId, value: Kelvin) -> Self {
        self.material_overrides.push((material, value.value()));
        self
    }

    /// Override for a material, if any.
    pub fn override_for(&self, material: MaterialId) -> Option<f64> {
        self.material_overrides
            .iter()
            .find(|(id, _)| *id == material)
            .map(|&(_, t)| t)
    }
}

/// Basal velocity condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BottomCondition {
    /// No prescribed basal flow.
    Free,
    /// Isostatic compensation relative to a reference material column.
    Isostasy(IsostasyBc),
}

/// Isostasy bottom boundary condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsostasyBc {
    /// Material whose column defines the reference pressure.
    pub reference_material: MaterialId,
    /// Compensate against the domain-average column instead of the pure
    /// reference column.
    pub average: bool,
}

/// Velocity boundary conditions (wall values stored in m/s).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityBcs {
    /// Prescribed x-velocity on the left wall (m/s).
    pub left_m_s: f64,
    /// Prescribed x-velocity on the right wall (m/s).
    pub right_m_s: f64,
    /// Basal condition.
    pub bottom: BottomCondition,
}

impl VelocityBcs {
    /// Extension driven by equal and opposite wall velocities.
    pub fn extension(left: CentimetersPerYear, right: CentimetersPerYear, bottom: BottomCondition) -> Self {
        Self {
            left_m_s: MetersPerSecond::from(left).value(),
            right_m_s: MetersPerSecond::from(right).value(),
            bottom,
        }
    }
}
