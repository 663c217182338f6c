//! Planet parameters, tessellation settings and their builder
//!
//! Parameters describe the physical body (radius, mass, spin, climate).
//! Tessellation describes how finely the UV sphere is cut. The mesh is a
//! pure function of both plus an RNG seed.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use rand::Rng;
use tracing::debug;

use crate::error::{PlanetError, Result};

/// Minimum number of sectors (longitude slices)
pub const MIN_SECTOR_COUNT: u32 = 3;

/// Minimum number of stacks (latitude bands)
pub const MIN_STACK_COUNT: u32 = 2;

/// Base RGB color for non-terrestrial planets, channels in `[0, 1]`
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BaseColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl BaseColor {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from 8-bit channels
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Draw a random color with each channel quantized to hundredths
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut channel = || rng.gen_range(0..100u32) as f32 * 0.01;
        let r = channel();
        let g = channel();
        let b = channel();
        Self::new(r, g, b)
    }
}

/// Physical description of a planet
///
/// `temperature_c` is the mean temperature at 45° latitude; the biome
/// model cools linearly from there toward the poles.
///
/// Roughness and water fraction are intended to lie in `[0, 1]` but are
/// not validated. Values outside that range give implausible shapes, not
/// errors.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetParameters {
    /// Polar radius in metres
    pub radius_m: f64,
    /// Mass in kilograms
    pub mass_kg: f64,
    /// Sidereal rotation period in seconds
    pub day_s: f64,
    /// Terrain roughness K, 0 is a perfect sphere
    pub roughness: f32,
    /// Mean temperature in °C
    pub temperature_c: f32,
    /// Fraction of the height range that lies under water
    pub water: f32,
    /// Terrestrial planets get sand and grass, others get `base_color`
    pub terrestrial: bool,
    /// Surface color for non-terrestrial planets
    pub base_color: BaseColor,
}

impl PlanetParameters {
    /// Earth-like preset
    pub fn earth() -> Self {
        Self {
            radius_m: 6_357_000.0,
            mass_kg: 5.9722e24,
            day_s: 86_164.0,
            roughness: 0.1,
            temperature_c: 15.0,
            water: 0.57,
            terrestrial: true,
            base_color: BaseColor::default(),
        }
    }
}

impl Default for PlanetParameters {
    fn default() -> Self {
        Self::earth()
    }
}

/// Builder for `PlanetParameters` with validation of the physical terms
///
/// # Example
///
/// ```rust
/// use planet_mesh::*;
///
/// let params = PlanetParametersBuilder::new()
///     .radius_km(3389.5)
///     .mass_kg(6.4171e23)
///     .day_hours(24.6229)
///     .water(0.0)
///     .build()
///     .unwrap();
///
/// assert_eq!(params.radius_m, 3_389_500.0);
/// ```
#[derive(Debug, Clone)]
pub struct PlanetParametersBuilder {
    params: PlanetParameters,
}

impl PlanetParametersBuilder {
    /// Create a builder seeded with the Earth preset
    pub fn new() -> Self {
        Self {
            params: PlanetParameters::earth(),
        }
    }

    pub fn radius_km(mut self, km: f64) -> Self {
        self.params.radius_m = km * 1000.0;
        self
    }

    pub fn radius_m(mut self, m: f64) -> Self {
        self.params.radius_m = m;
        self
    }

    pub fn mass_kg(mut self, kg: f64) -> Self {
        self.params.mass_kg = kg;
        self
    }

    pub fn day_hours(mut self, hours: f64) -> Self {
        self.params.day_s = hours * 3600.0;
        self
    }

    pub fn day_seconds(mut self, seconds: f64) -> Self {
        self.params.day_s = seconds;
        self
    }

    pub fn roughness(mut self, k: f32) -> Self {
        self.params.roughness = k;
        self
    }

    pub fn temperature_c(mut self, celsius: f32) -> Self {
        self.params.temperature_c = celsius;
        self
    }

    pub fn water(mut self, fraction: f32) -> Self {
        self.params.water = fraction;
        self
    }

    pub fn terrestrial(mut self, terrestrial: bool) -> Self {
        self.params.terrestrial = terrestrial;
        self
    }

    /// Set the base color from channels in `[0, 1]`
    pub fn base_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.params.base_color = BaseColor::new(r, g, b);
        self
    }

    /// Set the base color from 8-bit channels
    pub fn base_color_rgb8(mut self, r: u8, g: u8, b: u8) -> Self {
        self.params.base_color = BaseColor::from_rgb8(r, g, b);
        self
    }

    /// Pick a random base color from the given generator
    pub fn random_base_color<R: Rng>(mut self, rng: &mut R) -> Self {
        self.params.base_color = BaseColor::random(rng);
        self
    }

    /// Build the parameters
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if radius, mass or day length is not a
    /// positive finite number.
    pub fn build(self) -> Result<PlanetParameters> {
        let p = self.params;
        check_positive("radius", p.radius_m)?;
        check_positive("mass", p.mass_kg)?;
        check_positive("day length", p.day_s)?;
        Ok(p)
    }
}

impl Default for PlanetParametersBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PlanetError::InvalidConfig(format!(
            "{} must be positive and finite (got {})",
            name, value
        )))
    }
}

/// UV-sphere resolution and base shape scale
///
/// `radius` is a scale factor for the unit shape and is independent of the
/// physical radius in `PlanetParameters`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tessellation {
    pub radius: f32,
    pub sector_count: u32,
    pub stack_count: u32,
}

impl Tessellation {
    /// Create a tessellation, raising counts below the minimum to the minimum
    pub fn new(radius: f32, sector_count: u32, stack_count: u32) -> Self {
        Self {
            radius,
            sector_count: clamp_count("sector", sector_count, MIN_SECTOR_COUNT),
            stack_count: clamp_count("stack", stack_count, MIN_STACK_COUNT),
        }
    }

    /// Like `new` but rejects a non-positive shape radius
    pub fn try_new(radius: f32, sector_count: u32, stack_count: u32) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(PlanetError::InvalidConfig(format!(
                "shape radius must be positive and finite (got {})",
                radius
            )));
        }
        Ok(Self::new(radius, sector_count, stack_count))
    }

    /// The same tessellation with counts raised to the minimum
    ///
    /// Struct literals and deserialized values skip `new`, so every mesh
    /// entry point goes through this first.
    pub fn normalized(self) -> Self {
        Self::new(self.radius, self.sector_count, self.stack_count)
    }
}

impl Default for Tessellation {
    fn default() -> Self {
        Self::new(1.0, 36, 18)
    }
}

fn clamp_count(name: &str, count: u32, min: u32) -> u32 {
    if count < min {
        debug!("{} count {} raised to minimum {}", name, count, min);
        min
    } else {
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_earth_defaults() {
        let p = PlanetParameters::default();
        assert_eq!(p.radius_m, 6_357_000.0);
        assert_eq!(p.mass_kg, 5.9722e24);
        assert_eq!(p.day_s, 86_164.0);
        assert_eq!(p.roughness, 0.1);
        assert_eq!(p.temperature_c, 15.0);
        assert_eq!(p.water, 0.57);
        assert!(p.terrestrial);
    }

    #[test]
    fn test_builder_unit_conversions() {
        let p = PlanetParametersBuilder::new()
            .radius_km(6357.0)
            .day_hours(2.0)
            .build()
            .unwrap();
        assert_eq!(p.radius_m, 6_357_000.0);
        assert_eq!(p.day_s, 7200.0);
    }

    #[test]
    fn test_builder_rejects_bad_physics() {
        assert!(PlanetParametersBuilder::new().day_seconds(0.0).build().is_err());
        assert!(PlanetParametersBuilder::new().day_hours(-1.0).build().is_err());
        assert!(PlanetParametersBuilder::new().mass_kg(0.0).build().is_err());
        assert!(PlanetParametersBuilder::new().radius_m(f64::NAN).build().is_err());
    }

    #[test]
    fn test_builder_accepts_out_of_range_climate() {
        let p = PlanetParametersBuilder::new()
            .roughness(2.5)
            .water(-0.5)
            .temperature_c(-300.0)
            .build()
            .unwrap();
        assert_eq!(p.roughness, 2.5);
        assert_eq!(p.water, -0.5);
    }

    #[test]
    fn test_base_color_rgb8() {
        let p = PlanetParametersBuilder::new()
            .terrestrial(false)
            .base_color_rgb8(255, 0, 51)
            .build()
            .unwrap();
        assert!(!p.terrestrial);
        assert_eq!(p.base_color, BaseColor::new(1.0, 0.0, 0.2));
    }

    #[test]
    fn test_random_base_color_is_seeded() {
        let a = BaseColor::random(&mut ChaCha8Rng::seed_from_u64(7));
        let b = BaseColor::random(&mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(a, b);
        for c in [a.r, a.g, a.b] {
            assert!((0.0..1.0).contains(&c));
        }
    }

    #[test]
    fn test_tessellation_clamps_counts() {
        let t = Tessellation::new(1.0, 1, 0);
        assert_eq!(t.sector_count, MIN_SECTOR_COUNT);
        assert_eq!(t.stack_count, MIN_STACK_COUNT);

        let t = Tessellation::new(1.0, 8, 4);
        assert_eq!(t.sector_count, 8);
        assert_eq!(t.stack_count, 4);
    }

    #[test]
    fn test_normalized_raises_literal_counts() {
        let literal = Tessellation {
            radius: 1.0,
            sector_count: 2,
            stack_count: 1,
        };
        assert_eq!(literal.normalized(), Tessellation::new(1.0, 3, 2));

        let valid = Tessellation::new(2.0, 8, 4);
        assert_eq!(valid.normalized(), valid);
    }

    #[test]
    fn test_tessellation_try_new() {
        assert!(Tessellation::try_new(0.0, 8, 4).is_err());
        assert!(Tessellation::try_new(1.5, 8, 4).is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_parameters_serialization() {
        let params = PlanetParametersBuilder::new()
            .terrestrial(false)
            .base_color(0.2, 0.3, 0.4)
            .build()
            .unwrap();

        let json = serde_json::to_string(&params).unwrap();
        let restored: PlanetParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(params, restored);
    }
}
