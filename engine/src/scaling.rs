//! Characteristic-scale nondimensionalization.
//!
//! All internal model state (coordinates, time, velocities, temperature) is
//! nondimensional. The four base coefficients follow the usual choice for
//! boundary-driven lithospheric models: a length scale `KL` (the domain
//! length), a time scale `Kt = KL / v` from the driving half rate, a mass
//! scale `KM = ρg · KL² · Kt²` from the reference body force, and the
//! imposed temperature contrast `KT`. Every derived scale below is a pure
//! combination of those four.

use crate::units::{
    JoulesPerKilogramKelvin, Kelvin, KilogramsPerCubicMeter, Meters, MetersPerSecond,
    MetersPerSecondSquared, PascalSeconds, Pascals, Seconds, SquareMetersPerSecond,
    WattsPerCubicMeter, SECONDS_PER_YEAR,
};

/// Base scaling coefficients `[length]`, `[time]`, `[mass]`, `[temperature]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaling {
    /// Length scale KL in meters.
    pub length_m: f64,
    /// Time scale Kt in seconds.
    pub time_s: f64,
    /// Mass scale KM in kilograms.
    pub mass_kg: f64,
    /// Temperature scale KT in kelvin.
    pub temperature_k: f64,
}

impl Scaling {
    /// Derive the coefficients from characteristic values of the system:
    /// `KL = length`, `Kt = KL / half_rate`, `KM = bodyforce · KL² · Kt²`,
    /// `KT = base_temp − surface_temp`.
    ///
    /// `bodyforce` is the reference body force ρg in N/m³.
    pub fn from_characteristic(
        length: Meters,
        half_rate: MetersPerSecond,
        bodyforce_n_m3: f64,
        surface_temp: Kelvin,
        base_temp: Kelvin,
    ) -> Self {
        let kl = length.value();
        let kt = kl / half_rate.value();
        let km = bodyforce_n_m3 * kl * kl * kt * kt;
        Self {
            length_m: kl,
            time_s: kt,
            mass_kg: km,
            temperature_k: base_temp.value() - surface_temp.value(),
        }
    }

    /// Nondimensionalize a length.
    pub fn nd_length(&self, v: Meters) -> f64 {
        v.value() / self.length_m
    }

    /// Nondimensionalize a time.
    pub fn nd_time(&self, v: Seconds) -> f64 {
        v.value() / self.time_s
    }

    /// Nondimensionalize a velocity (scale KL/Kt).
    pub fn nd_velocity(&self, v: MetersPerSecond) -> f64 {
        v.value() * self.time_s / self.length_m
    }

    /// Nondimensionalize a temperature (scale KT).
    pub fn nd_temperature(&self, v: Kelvin) -> f64 {
        v.value() / self.temperature_k
    }

    /// Nondimensionalize a density (scale KM/KL³).
    pub fn nd_density(&self, v: KilogramsPerCubicMeter) -> f64 {
        v.value() * self.length_m.powi(3) / self.mass_kg
    }

    /// Nondimensionalize a dynamic viscosity (scale KM/(KL·Kt)).
    pub fn nd_viscosity(&self, v: PascalSeconds) -> f64 {
        v.value() * self.length_m * self.time_s / self.mass_kg
    }

    /// Nondimensionalize a stress (scale KM/(KL·Kt²)).
    pub fn nd_stress(&self, v: Pascals) -> f64 {
        v.value() * self.length_m * self.time_s * self.time_s / self.mass_kg
    }

    /// Nondimensionalize an acceleration (scale KL/Kt²).
    pub fn nd_gravity(&self, v: MetersPerSecondSquared) -> f64 {
        v.value() * self.time_s * self.time_s / self.length_m
    }

    /// Nondimensionalize a thermal diffusivity (scale KL²/Kt).
    pub fn nd_diffusivity(&self, v: SquareMetersPerSecond) -> f64 {
        v.value() * self.time_s / (self.length_m * self.length_m)
    }

    /// Nondimensionalize a specific heat capacity (scale KL²/(Kt²·KT)).
    pub fn nd_capacity(&self, v: JoulesPerKilogramKelvin) -> f64 {
        v.value() * self.time_s * self.time_s * self.temperature_k
            / (self.length_m * self.length_m)
    }

    /// Nondimensionalize a volumetric heat production (scale KM/(KL·Kt³)).
    pub fn nd_heat_production(&self, v: WattsPerCubicMeter) -> f64 {
        v.value() * self.length_m * self.time_s.powi(3) / self.mass_kg
    }

    /// Dimensional length in meters from a nondimensional value.
    pub fn length_m_from_nd(&self, nd: f64) -> f64 {
        nd * self.length_m
    }

    /// Dimensional length in kilometers from a nondimensional value.
    pub fn length_km_from_nd(&self, nd: f64) -> f64 {
        nd * self.length_m / 1000.0
    }

    /// Dimensional time in seconds from a nondimensional value.
    pub fn time_s_from_nd(&self, nd: f64) -> f64 {
        nd * self.time_s
    }

    /// Dimensional time in years from a nondimensional value.
    pub fn time_yr_from_nd(&self, nd: f64) -> f64 {
        nd * self.time_s / SECONDS_PER_YEAR
    }

    /// Dimensional velocity in m/s from a nondimensional value.
    pub fn velocity_m_s_from_nd(&self, nd: f64) -> f64 {
        nd * self.length_m / self.time_s
    }

    /// Dimensional velocity in m/yr from a nondimensional value.
    pub fn velocity_m_yr_from_nd(&self, nd: f64) -> f64 {
        self.velocity_m_s_from_nd(nd) * SECONDS_PER_YEAR
    }

    /// Dimensional temperature in kelvin from a nondimensional value.
    pub fn temperature_k_from_nd(&self, nd: f64) -> f64 {
        nd * self.temperature_k
    }

    /// Dimensional strain rate in 1/s from a nondimensional value.
    pub fn strain_rate_per_s_from_nd(&self, nd: f64) -> f64 {
        nd / self.time_s
    }
}
