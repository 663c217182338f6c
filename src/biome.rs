//! Biome classification
//!
//! Every mesh vertex is classified from its unsmoothed radius and its
//! latitude. Temperature falls linearly from the 45° calibration point
//! toward the poles; snow and sand lines follow from it. Polar cap edges
//! are jittered with draws from an injected RNG so the boundary is not a
//! crisp latitude line.
//!
//! Water and terrestrial flags act as master switches: a dry planet never
//! gets water or ice, a non-terrestrial one never gets sand or grass.

use std::f32::consts::{FRAC_PI_4, PI};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use rand::Rng;

use crate::config::PlanetParameters;
use crate::mesh::{ColorMapper, TerrainColor};
use crate::terrain::{HeightStats, NoiseSource};

/// Snow line coefficient cap, keeps snow on the highest peaks of hot planets
const SNOW_COEFF_CAP: f32 = 0.91;

/// Fraction of the water-to-snow band that is beach
const SAND_BAND: f32 = 0.08;

/// Jitter exponent for the outer polar fringe (wide fuzzy band)
const FRINGE_EXPONENT: f32 = 0.25;

/// Jitter exponent for ice shelf vs open water inside the fringe
const SHELF_EXPONENT: f32 = 0.9;

/// Surface classification of a vertex
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Biome {
    /// Open water
    Water,
    /// Pale floating ice inside the polar fringe
    IceShelf,
    /// Beach band just above the waterline
    Sand,
    /// Default terrestrial land
    Grass,
    /// Polar or high-altitude snow
    Snow,
    /// Non-terrestrial surface, base color shifted by `mottle` on every channel
    Alien { mottle: f32 },
}

impl Biome {
    /// Open water or ice shelf
    pub fn is_water(&self) -> bool {
        matches!(self, Biome::Water | Biome::IceShelf)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Biome::Water => "Water",
            Biome::IceShelf => "Ice shelf",
            Biome::Sand => "Sand",
            Biome::Grass => "Grass",
            Biome::Snow => "Snow",
            Biome::Alien { .. } => "Alien",
        }
    }
}

/// Height thresholds at one latitude, relative to the shape radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Climate {
    /// Local temperature in °C
    pub local_temperature: f32,
    pub snow_height: f32,
    pub water_height: f32,
    pub sand_height: f32,
}

impl Climate {
    /// Thresholds at `latitude` (radians) for a planet with the given
    /// mean temperature, water fraction and roughness
    pub fn at(latitude: f32, temperature: f32, water: f32, roughness: f32, stats: HeightStats) -> Self {
        let abs_lat = latitude.abs();
        let local_temperature = (temperature + 45.0) - abs_lat * 180.0 / PI;
        let coeff = (0.85 / 15.0 * local_temperature).min(SNOW_COEFF_CAP);
        let range = stats.range();

        let snow_height = (stats.min + coeff * range) * roughness;
        let water_height = (stats.min + water * range) * roughness;
        let sand_height = water_height + (snow_height - water_height) * SAND_BAND;

        Self {
            local_temperature,
            snow_height,
            water_height,
            sand_height,
        }
    }
}

/// Classifies vertices into biomes and colors them
pub struct BiomeColorizer<'a, N: ?Sized> {
    noise: &'a N,
    radius: f32,
    roughness: f32,
    temperature: f32,
    water: f32,
    terrestrial: bool,
    stats: HeightStats,
}

impl<'a, N: NoiseSource + ?Sized> BiomeColorizer<'a, N> {
    /// `radius` is the shape radius the mesh is built at
    pub fn new(params: &PlanetParameters, radius: f32, stats: HeightStats, noise: &'a N) -> Self {
        Self {
            noise,
            radius,
            roughness: params.roughness,
            temperature: params.temperature_c,
            water: params.water,
            terrestrial: params.terrestrial,
            stats,
        }
    }

    /// Climate thresholds at a latitude
    pub fn climate(&self, latitude: f32) -> Climate {
        Climate::at(latitude, self.temperature, self.water, self.roughness, self.stats)
    }

    /// Classify a vertex from its unsmoothed radius and latitude (radians)
    ///
    /// Draws from `rng` only inside the polar fringe test, so the number of
    /// draws depends on the vertex. Callers wanting reproducible meshes must
    /// keep the traversal order fixed.
    pub fn classify<R: Rng>(&self, adjusted_radius: f32, latitude: f32, rng: &mut R) -> Biome {
        let climate = self.climate(latitude);
        let abs_lat = latitude.abs();
        let has_water = self.water > 0.0;
        let water_line = self.radius + climate.water_height;

        // Distance past the temperature-dependent polar circle
        let past_circle = abs_lat - (FRAC_PI_4 + self.temperature * PI / 180.0);

        if (abs_lat - FRAC_PI_4) * 180.0 / PI > self.temperature
            && rng.gen::<f32>() < past_circle.powf(FRINGE_EXPONENT)
            && has_water
        {
            return if adjusted_radius > water_line {
                Biome::Snow
            } else if rng.gen::<f32>() < past_circle.powf(SHELF_EXPONENT) {
                Biome::IceShelf
            } else {
                Biome::Water
            };
        }

        if adjusted_radius <= water_line && has_water {
            Biome::Water
        } else if adjusted_radius < self.radius + climate.sand_height && self.terrestrial {
            Biome::Sand
        } else if adjusted_radius > self.radius + climate.snow_height && has_water {
            Biome::Snow
        } else if self.terrestrial {
            Biome::Grass
        } else {
            Biome::Alien {
                mottle: self.noise.noise1(latitude * 2.0),
            }
        }
    }

    /// Classify and map to an RGBA color
    pub fn colorize<R: Rng, C: ColorMapper>(
        &self,
        mapper: &C,
        adjusted_radius: f32,
        latitude: f32,
        rng: &mut R,
    ) -> TerrainColor {
        let biome = self.classify(adjusted_radius, latitude, rng);
        mapper.map_color(&biome)
    }
}
