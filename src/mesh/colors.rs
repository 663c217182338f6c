//! Color mapping for biomes

use crate::biome::Biome;
use crate::config::BaseColor;

/// RGBA color type
pub type TerrainColor = [f32; 4];

/// Trait for mapping biomes to colors
pub trait ColorMapper {
    /// Map a biome to an RGBA color
    fn map_color(&self, biome: &Biome) -> TerrainColor;
}

/// Biome colors, with the base color used for non-terrestrial surfaces
///
/// The default palette is the classic one: blue water, pale ice, sand,
/// green grass and off-white snow.
#[derive(Debug, Clone, PartialEq)]
pub struct BiomePalette {
    pub water: TerrainColor,
    pub ice_shelf: TerrainColor,
    pub sand: TerrainColor,
    pub grass: TerrainColor,
    pub snow: TerrainColor,
    pub base: BaseColor,
}

impl BiomePalette {
    /// Default palette with the given base color for alien surfaces
    pub fn with_base(base: BaseColor) -> Self {
        Self {
            base,
            ..Default::default()
        }
    }
}

impl Default for BiomePalette {
    fn default() -> Self {
        Self {
            water: [0.0, 94.0 / 255.0, 184.0 / 255.0, 1.0],
            ice_shelf: [180.0 / 255.0, 207.0 / 255.0, 250.0 / 255.0, 1.0],
            sand: [0.761, 0.698, 0.502, 1.0],
            grass: [0.0, 154.0 / 255.0, 23.0 / 255.0, 1.0],
            snow: [1.0, 0.98, 0.98, 1.0],
            base: BaseColor::default(),
        }
    }
}

impl ColorMapper for BiomePalette {
    fn map_color(&self, biome: &Biome) -> TerrainColor {
        match biome {
            Biome::Water => self.water,
            Biome::IceShelf => self.ice_shelf,
            Biome::Sand => self.sand,
            Biome::Grass => self.grass,
            Biome::Snow => self.snow,
            Biome::Alien { mottle } => [
                self.base.r + mottle,
                self.base.g + mottle,
                self.base.b + mottle,
                1.0,
            ],
        }
    }
}
