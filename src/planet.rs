//! Planet main structure

use std::fmt;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::config::{PlanetParameters, Tessellation};
use crate::mesh::{generate_mesh_from_grid, BiomePalette, MeshData};
use crate::physics::equatorial_bulge;
use crate::terrain::{HeightGrid, NoiseSource, PerlinNoise};

/// A generated planet: parameters, height grid and mesh
///
/// The mesh is rebuilt from scratch whenever the shape radius or a
/// tessellation count changes. Every rebuild reseeds the RNG, so the mesh
/// is a pure function of (parameters, tessellation, seed, noise).
///
/// # Examples
///
/// ```
/// use planet_mesh::*;
///
/// let params = PlanetParameters::earth();
/// let planet = Planet::generate(params, Tessellation::new(1.0, 8, 4), 42);
///
/// assert_eq!(planet.mesh().triangle_count(), 48);
/// println!("{}", planet);
/// ```
#[derive(Debug, Clone)]
pub struct Planet<N = PerlinNoise> {
    params: PlanetParameters,
    tessellation: Tessellation,
    seed: u64,
    noise: N,
    palette: BiomePalette,
    grid: HeightGrid,
    mesh: MeshData,
}

impl Planet<PerlinNoise> {
    /// Generate a planet with the default Perlin noise
    ///
    /// `seed` drives both the terrain noise and the biome jitter.
    pub fn generate(params: PlanetParameters, tessellation: Tessellation, seed: u64) -> Self {
        let noise = PerlinNoise::new(seed as u32);
        Self::generate_with_noise(params, tessellation, seed, noise)
    }
}

impl<N: NoiseSource> Planet<N> {
    /// Generate a planet with a custom noise primitive
    ///
    /// `seed` only drives the biome jitter here; terrain comes from `noise`.
    pub fn generate_with_noise(
        params: PlanetParameters,
        tessellation: Tessellation,
        seed: u64,
        noise: N,
    ) -> Self {
        let tessellation = tessellation.normalized();
        let palette = BiomePalette::with_base(params.base_color);
        let (grid, mesh) = build(&params, &tessellation, seed, &noise, &palette);

        Self {
            params,
            tessellation,
            seed,
            noise,
            palette,
            grid,
            mesh,
        }
    }

    /// Replace the palette and recolor the mesh
    pub fn with_palette(mut self, palette: BiomePalette) -> Self {
        self.palette = palette;
        self.rebuild();
        self
    }

    #[inline]
    pub fn params(&self) -> &PlanetParameters {
        &self.params
    }

    #[inline]
    pub fn tessellation(&self) -> &Tessellation {
        &self.tessellation
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.tessellation.radius
    }

    #[inline]
    pub fn sector_count(&self) -> u32 {
        self.tessellation.sector_count
    }

    #[inline]
    pub fn stack_count(&self) -> u32 {
        self.tessellation.stack_count
    }

    /// Sampled terrain heights with their min/max
    #[inline]
    pub fn height_grid(&self) -> &HeightGrid {
        &self.grid
    }

    #[inline]
    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }

    /// Give up the planet and keep only its mesh
    pub fn into_mesh(self) -> MeshData {
        self.mesh
    }

    /// Equatorial bulge added to every vertex's xy radius
    pub fn equatorial_bulge(&self) -> f64 {
        equatorial_bulge(&self.params)
    }

    /// Set radius and counts together and rebuild
    ///
    /// Counts below the minimum are raised to it.
    pub fn set(&mut self, radius: f32, sector_count: u32, stack_count: u32) {
        self.tessellation = Tessellation::new(radius, sector_count, stack_count);
        self.rebuild();
    }

    /// Change the shape radius, rebuilding only if it differs
    pub fn set_radius(&mut self, radius: f32) {
        if radius != self.tessellation.radius {
            self.set(radius, self.tessellation.sector_count, self.tessellation.stack_count);
        } else {
            debug!("Radius unchanged ({}), skipping rebuild", radius);
        }
    }

    /// Change the sector count, rebuilding only if it differs
    pub fn set_sector_count(&mut self, sector_count: u32) {
        if sector_count != self.tessellation.sector_count {
            self.set(self.tessellation.radius, sector_count, self.tessellation.stack_count);
        } else {
            debug!("Sector count unchanged ({}), skipping rebuild", sector_count);
        }
    }

    /// Change the stack count, rebuilding only if it differs
    pub fn set_stack_count(&mut self, stack_count: u32) {
        if stack_count != self.tessellation.stack_count {
            self.set(self.tessellation.radius, self.tessellation.sector_count, stack_count);
        } else {
            debug!("Stack count unchanged ({}), skipping rebuild", stack_count);
        }
    }

    /// Multi-line description of the planet and its mesh counts
    pub fn summary(&self) -> String {
        self.to_string()
    }

    fn rebuild(&mut self) {
        let (grid, mesh) = build(
            &self.params,
            &self.tessellation,
            self.seed,
            &self.noise,
            &self.palette,
        );
        self.grid = grid;
        self.mesh = mesh;
    }
}

fn build<N: NoiseSource>(
    params: &PlanetParameters,
    tessellation: &Tessellation,
    seed: u64,
    noise: &N,
    palette: &BiomePalette,
) -> (HeightGrid, MeshData) {
    let grid = HeightGrid::sample(noise, tessellation.stack_count, tessellation.sector_count);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mesh = generate_mesh_from_grid(params, tessellation, &grid, noise, palette, &mut rng);
    (grid, mesh)
}

impl<N> fmt::Display for Planet<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== Planet =====")?;
        writeln!(f, "        Radius: {}", self.tessellation.radius)?;
        writeln!(f, "  Sector Count: {}", self.tessellation.sector_count)?;
        writeln!(f, "   Stack Count: {}", self.tessellation.stack_count)?;
        writeln!(f, "Triangle Count: {}", self.mesh.triangle_count())?;
        writeln!(f, "   Index Count: {}", self.mesh.index_count())?;
        writeln!(f, "  Vertex Count: {}", self.mesh.vertex_count())?;
        writeln!(f, "  Normal Count: {}", self.mesh.normals.len())?;
        write!(f, "   Color Count: {}", self.mesh.colors.len())
    }
}
