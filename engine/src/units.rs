//! Units-of-measure newtypes for the quantities the model is configured with.
//! Conversions are explicit; mixing units requires an intentional conversion.

/// Seconds per Julian year.
pub const SECONDS_PER_YEAR: f64 = 365.25 * 86_400.0;

/// Distance in meters (m).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Meters(pub f64);

/// Distance in kilometers (km).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Kilometers(pub f64);

/// Time in seconds (s).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Seconds(pub f64);

/// Velocity in meters per second (m/s).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct MetersPerSecond(pub f64);

/// Velocity in centimeters per year (cm/yr).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct CentimetersPerYear(pub f64);

/// Absolute temperature in kelvin (K).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Kelvin(pub f64);

/// Density in kilograms per cubic meter (kg/m³).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct KilogramsPerCubicMeter(pub f64);

/// Dynamic viscosity in pascal-seconds (Pa·s).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct PascalSeconds(pub f64);

/// Stress in pascals (Pa).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Pascals(pub f64);

/// Stress in megapascals (MPa).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Megapascals(pub f64);

/// Specific heat capacity in joules per kilogram-kelvin (J/(kg·K)).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct JoulesPerKilogramKelvin(pub f64);

/// Thermal diffusivity in square meters per second (m²/s).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct SquareMetersPerSecond(pub f64);

/// Volumetric heat production in watts per cubic meter (W/m³).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct WattsPerCubicMeter(pub f64);

/// Volumetric heat production in microwatts per cubic meter (µW/m³).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct MicrowattsPerCubicMeter(pub f64);

/// Acceleration in meters per second squared (m/s²).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct MetersPerSecondSquared(pub f64);

macro_rules! impl_unit {
    ($t:ident) => {
        impl $t {
            /// Construct from a raw f64 in this unit.
            pub fn new(v: f64) -> Self {
                Self(v)
            }
            /// Extract the raw numeric value in this unit.
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_unit!(Meters);
impl_unit!(Kilometers);
impl_unit!(Seconds);
impl_unit!(MetersPerSecond);
impl_unit!(CentimetersPerYear);
impl_unit!(Kelvin);
impl_unit!(KilogramsPerCubicMeter);
impl_unit!(PascalSeconds);
impl_unit!(Pascals);
impl_unit!(Megapascals);
impl_unit!(JoulesPerKilogramKelvin);
impl_unit!(SquareMetersPerSecond);
impl_unit!(WattsPerCubicMeter);
impl_unit!(MicrowattsPerCubicMeter);
impl_unit!(MetersPerSecondSquared);

// Explicit conversions
impl From<Kilometers> for Meters {
    fn from(km: Kilometers) -> Self {
        Meters(km.0 * 1000.0)
    }
}

impl From<Megapascals> for Pascals {
    fn from(mpa: Megapascals) -> Self {
        Pascals(mpa.0 * 1.0e6)
    }
}

impl From<MicrowattsPerCubicMeter> for WattsPerCubicMeter {
    fn from(uw: MicrowattsPerCubicMeter) -> Self {
        WattsPerCubicMeter(uw.0 * 1.0e-6)
    }
}

impl From<CentimetersPerYear> for MetersPerSecond {
    fn from(v: CentimetersPerYear) -> Self {
        MetersPerSecond(v.0 * 0.01 / SECONDS_PER_YEAR)
    }
}

// Helper conversion functions
/// Shorthand constructor for meters.
pub fn m(v: f64) -> Meters {
    Meters::new(v)
}
/// Shorthand constructor for kilometers.
pub fn km(v: f64) -> Kilometers {
    Kilometers::new(v)
}
/// Shorthand constructor for seconds.
pub fn s(v: f64) -> Seconds {
    Seconds::new(v)
}
/// Shorthand constructor for cm/yr.
pub fn cm_yr(v: f64) -> CentimetersPerYear {
    CentimetersPerYear::new(v)
}
/// Shorthand constructor for kelvin.
pub fn deg_k(v: f64) -> Kelvin {
    Kelvin::new(v)
}
/// Shorthand constructor for kg/m³.
pub fn kg_m3(v: f64) -> KilogramsPerCubicMeter {
    KilogramsPerCubicMeter::new(v)
}
/// Shorthand constructor for Pa·s.
pub fn pa_s(v: f64) -> PascalSeconds {
    PascalSeconds::new(v)
}
/// Shorthand constructor for MPa.
pub fn mpa(v: f64) -> Megapascals {
    Megapascals::new(v)
}
/// Shorthand constructor for J/(kg·K).
pub fn j_kg_k(v: f64) -> JoulesPerKilogramKelvin {
    JoulesPerKilogramKelvin::new(v)
}
/// Shorthand constructor for m²/s.
pub fn m2_s(v: f64) -> SquareMetersPerSecond {
    SquareMetersPerSecond::new(v)
}
/// Shorthand constructor for µW/m³.
pub fn uw_m3(v: f64) -> MicrowattsPerCubicMeter {
    MicrowattsPerCubicMeter::new(v)
}
/// Shorthand constructor for m/s².
pub fn m_s2(v: f64) -> MetersPerSecondSquared {
    MetersPerSecondSquared::new(v)
}
