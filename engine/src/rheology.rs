//! Viscous creep and Drucker–Prager plasticity laws with the registry
//! entries the model family uses.
//!
//! Creep viscosity follows the standard dislocation-creep form
//! `η = f · ½ A^(−1/n) ε̇^((1−n)/n) exp((Q + P·V) / (n·R·T))`
//! with `A` in MPa⁻ⁿ·s⁻¹. Yield strength is `C(εp) + μ(εp)·P` with linear
//! softening of cohesion and friction between two accumulated-strain knots.

/// Universal gas constant (J/(mol·K)).
pub const GAS_CONSTANT: f64 = 8.314_462_618;

/// Dislocation creep flow law.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViscousCreep {
    /// Law name for logs and manifests.
    pub name: &'static str,
    /// Pre-exponential factor A (MPa⁻ⁿ·s⁻¹).
    pub pre_exponential_mpa_s: f64,
    /// Stress exponent n.
    pub stress_exponent: f64,
    /// Activation energy Q (J/mol).
    pub activation_energy_j_mol: f64,
    /// Activation volume V (m³/mol).
    pub activation_volume_m3_mol: f64,
    /// Strength multiplier f applied to the whole law.
    pub factor: f64,
}

impl ViscousCreep {
    /// Wet quartzite dislocation creep, Gleason & Tullis (1995).
    pub fn gleason_and_tullis_1995() -> Self {
        Self {
            name: "Gleason and Tullis, 1995",
            pre_exponential_mpa_s: 1.1e-4,
            stress_exponent: 4.0,
            activation_energy_j_mol: 223.0e3,
            activation_volume_m3_mol: 0.0,
            factor: 1.0,
        }
    }

    /// Dry olivine dislocation creep, Karato & Wu (1990).
    pub fn karato_and_wu_1990() -> Self {
        Self {
            name: "Karato and Wu, 1990",
            pre_exponential_mpa_s: 2.4e5,
            stress_exponent: 3.5,
            activation_energy_j_mol: 540.0e3,
            activation_volume_m3_mol: 15.0e-6,
            factor: 1.0,
        }
    }

    /// Same law scaled by a strength multiplier (e.g. `5.0 ×` a registry
    /// entry for a stiffer lithospheric mantle).
    pub fn scaled(self, factor: f64) -> Self {
        Self { factor, ..self }
    }

    /// Creep viscosity in Pa·s at the given strain-rate invariant,
    /// temperature, and pressure.
    pub fn viscosity_pa_s(&self, strain_rate_per_s: f64, temperature_k: f64, pressure_pa: f64) -> f64 {
        let n = self.stress_exponent;
        let rate = strain_rate_per_s.max(1.0e-20);
        let t = temperature_k.max(1.0);
        let p = pressure_pa.max(0.0);
        let a = self.pre_exponential_mpa_s.powf(-1.0 / n);
        let arrhenius =
            ((self.activation_energy_j_mol + p * self.activation_volume_m3_mol) / (n * GAS_CONSTANT * t)).exp();
        // A is in MPa⁻ⁿ·s⁻¹, so the result is MPa·s before the 1e6.
        self.factor * 0.5 * a * rate.powf((1.0 - n) / n) * arrhenius * 1.0e6
    }
}

/// Drucker–Prager plasticity with linear strain softening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plasticity {
    /// Law name for logs and manifests.
    pub name: &'static str,
    /// Cohesion before softening (Pa).
    pub cohesion_pa: f64,
    /// Cohesion after softening (Pa).
    pub cohesion_after_softening_pa: f64,
    /// Friction coefficient before softening.
    pub friction_coefficient: f64,
    /// Friction coefficient after softening.
    pub friction_after_softening: f64,
    /// Accumulated plastic strain where softening starts.
    pub epsilon1: f64,
    /// Accumulated plastic strain where softening saturates.
    pub epsilon2: f64,
}

impl Plasticity {
    /// Crustal frictional-plastic parameters in the style of Huismans &
    /// Beaumont (2011): cohesion 20 → 4 MPa, friction 0.123 → 0.017.
    pub fn huismans_et_al_2011_crust() -> Self {
        Self {
            name: "Huismans et al., 2011 (Crust)",
            cohesion_pa: 20.0e6,
            cohesion_after_softening_pa: 4.0e6,
            friction_coefficient: 0.123,
            friction_after_softening: 0.017,
            epsilon1: 0.5,
            epsilon2: 1.5,
        }
    }

    /// Cohesion and friction at the given accumulated plastic strain,
    /// ramping linearly between `epsilon1` and `epsilon2`.
    pub fn softened(&self, plastic_strain: f64) -> (f64, f64) {
        let span = self.epsilon2 - self.epsilon1;
        let w = if span <= 0.0 {
            if plastic_strain >= self.epsilon1 { 1.0 } else { 0.0 }
        } else {
            ((plastic_strain - self.epsilon1) / span).clamp(0.0, 1.0)
        };
        let c = self.cohesion_pa + w * (self.cohesion_after_softening_pa - self.cohesion_pa);
        let mu = self.friction_coefficient + w * (self.friction_after_softening - self.friction_coefficient);
        (c, mu)
    }

    /// Yield stress C(εp) + μ(εp)·P in Pa.
    pub fn yield_stress_pa(&self, plastic_strain: f64, pressure_pa: f64) -> f64 {
        let (c, mu) = self.softened(plastic_strain);
        c + mu * pressure_pa.max(0.0)
    }
}

/// Material viscosity law: constant or creep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViscosityLaw {
    /// Constant viscosity (Pa·s).
    Constant(f64),
    /// Dislocation creep law.
    Creep(ViscousCreep),
}

impl ViscosityLaw {
    /// Viscosity in Pa·s at the given conditions, before global clamping.
    pub fn viscosity_pa_s(&self, strain_rate_per_s: f64, temperature_k: f64, pressure_pa: f64) -> f64 {
        match self {
            Self::Constant(eta) => *eta,
            Self::Creep(law) => law.viscosity_pa_s(strain_rate_per_s, temperature_k, pressure_pa),
        }
    }

    /// Law name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Constant(_) => "constant",
            Self::Creep(law) => law.name,
        }
    }
}
