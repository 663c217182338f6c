//! Terrain height sampling
//!
//! Noise primitive trait, fractal octave summation and the height grid
//! sampled over the UV sphere.

mod fractal;
pub(crate) mod grid;
mod perlin;

pub use fractal::{fractal_height, OCTAVES};
pub use grid::{HeightGrid, HeightStats, RES};
pub use perlin::PerlinNoise;

use glam::Vec3;

/// Continuous pseudo-random scalar field
///
/// Implementations must be deterministic and return values in roughly
/// `[-1, 1]`.
pub trait NoiseSource {
    /// Sample 1D noise
    fn noise1(&self, x: f32) -> f32;

    /// Sample 3D noise
    fn noise3(&self, position: Vec3) -> f32;
}

impl<N: NoiseSource + ?Sized> NoiseSource for &N {
    fn noise1(&self, x: f32) -> f32 {
        (**self).noise1(x)
    }

    fn noise3(&self, position: Vec3) -> f32 {
        (**self).noise3(position)
    }
}
