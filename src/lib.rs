//! Procedural oblate planet meshes
//!
//! Derives a flat-shaded UV-sphere mesh from a handful of physical
//! parameters: radius, mass, day length, roughness, temperature and water
//! fraction. Heights come from six octaves of noise, the shape gets a
//! first-order rotational bulge, and every vertex is colored by a biome
//! model with jittered polar caps.
//!
//! # Quick Start
//!
//! ```rust
//! use planet_mesh::*;
//!
//! let params = PlanetParametersBuilder::new()
//!     .radius_km(6357.0)
//!     .day_hours(23.93)
//!     .water(0.57)
//!     .build()
//!     .unwrap();
//!
//! let planet = Planet::generate(params, Tessellation::new(1.0, 36, 18), 42);
//! let mesh = planet.mesh();
//! println!("Generated {} triangles", mesh.triangle_count());
//! ```
//!
//! # Features
//!
//! - `serde`: Enables serialization support for parameters, tessellation and biomes

// Modules
pub mod error;
pub mod config;
pub mod terrain;
pub mod physics;
pub mod biome;
pub mod mesh;
pub mod planet;

// Re-export core types for convenience
pub use error::{PlanetError, Result};
pub use config::{BaseColor, PlanetParameters, PlanetParametersBuilder, Tessellation};
pub use terrain::{fractal_height, HeightGrid, HeightStats, NoiseSource, PerlinNoise};
pub use physics::equatorial_bulge;
pub use biome::{Biome, BiomeColorizer, Climate};
pub use mesh::{
    generate_mesh, generate_mesh_with_colors, interleave, BiomePalette, ColorMapper, MeshData,
    RawVertex, TerrainColor,
};
pub use planet::Planet;

// Re-export glam::Vec3 for convenience
pub use glam::Vec3;
