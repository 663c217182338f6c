//! Oblate UV-sphere mesh construction
//!
//! Two passes. The first places one raw vertex per grid point: terrain
//! height, water smoothing, rotational bulge and biome color. The second
//! walks the stack/sector quads and emits unshared, flat-shaded faces plus
//! a partial wireframe.

use glam::Vec3;
use rand::Rng;
use tracing::{info, warn};

use super::colors::{ColorMapper, TerrainColor};
use super::packer::interleave;
use super::MeshData;
use crate::biome::BiomeColorizer;
use crate::config::{PlanetParameters, Tessellation, MIN_SECTOR_COUNT, MIN_STACK_COUNT};
use crate::physics::equatorial_bulge;
use crate::terrain::grid::{sector_angle, stack_angle};
use crate::terrain::{HeightGrid, NoiseSource};

/// Cross products shorter than this give a zero normal
const NORMAL_EPSILON: f32 = 0.000001;

/// One grid vertex before tessellation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawVertex {
    /// Final position after water smoothing and bulge
    pub position: Vec3,
    /// Stack angle in radians, +π/2 at the north pole
    pub latitude: f32,
    /// Radius with terrain but before water smoothing
    pub adjusted_radius: f32,
    pub color: TerrainColor,
}

/// Radii of a grid vertex, returned as (unsmoothed, smoothed)
///
/// Terrain under the water floor is compressed with K² instead of K so the
/// sea bed is calmer than land without being clipped flat.
pub fn adjusted_radii(radius: f32, height: f32, roughness: f32, water_floor: f32) -> (f32, f32) {
    let unsmoothed = radius + height * roughness;
    if unsmoothed < water_floor {
        (unsmoothed, water_floor + height * roughness * roughness)
    } else {
        (unsmoothed, unsmoothed)
    }
}

/// Check that `grid` was sampled for `tessellation`'s counts
fn grid_matches(grid: &HeightGrid, tessellation: &Tessellation) -> bool {
    let rows = tessellation.stack_count as usize + 1;
    let columns = tessellation.sector_count as usize + 1;
    if grid.rows() == rows && grid.columns() == columns {
        return true;
    }
    warn!(
        "Height grid is {}x{} but tessellation {}x{} needs {}x{}",
        grid.rows(),
        grid.columns(),
        tessellation.sector_count,
        tessellation.stack_count,
        rows,
        columns
    );
    false
}

/// Place every grid vertex, row by row and column by column
///
/// The visiting order is fixed (north to south, 0 to 2π, seam included),
/// which pins the order of RNG draws made by the colorizer. Returns no
/// vertices if `grid` was sampled at other counts.
pub fn build_raw_vertices<N, C, R>(
    params: &PlanetParameters,
    tessellation: &Tessellation,
    grid: &HeightGrid,
    noise: &N,
    mapper: &C,
    rng: &mut R,
) -> Vec<RawVertex>
where
    N: NoiseSource + ?Sized,
    C: ColorMapper,
    R: Rng,
{
    let tessellation = tessellation.normalized();
    if !grid_matches(grid, &tessellation) {
        return Vec::new();
    }

    let radius = tessellation.radius;
    let k = params.roughness;
    let stats = grid.stats();
    let water_floor = radius + (stats.min + stats.range() * params.water) * k;
    let bulge = equatorial_bulge(params) as f32;
    let colorizer = BiomeColorizer::new(params, radius, stats, noise);

    let mut vertices = Vec::with_capacity(grid.rows() * grid.columns());

    for i in 0..=tessellation.stack_count {
        let stack = stack_angle(i, tessellation.stack_count);
        let (stack_sin, stack_cos) = stack.sin_cos();
        let Some(row) = grid.row(i as usize) else {
            continue;
        };

        for (j, &height) in row.iter().enumerate() {
            let sector = sector_angle(j as u32, tessellation.sector_count);
            let (unsmoothed, smoothed) = adjusted_radii(radius, height, k, water_floor);

            let xy = (smoothed + bulge) * stack_cos;
            let position = Vec3::new(xy * sector.cos(), xy * sector.sin(), smoothed * stack_sin);
            let color = colorizer.colorize(mapper, unsmoothed, stack, rng);

            vertices.push(RawVertex {
                position,
                latitude: stack,
                adjusted_radius: unsmoothed,
                color,
            });
        }
    }

    vertices
}

/// Normal of triangle v1-v2-v3, or zero if the triangle has no area
pub fn face_normal(v1: Vec3, v2: Vec3, v3: Vec3) -> Vec3 {
    let n = (v2 - v1).cross(v3 - v1);
    let length = n.length();
    if length > NORMAL_EPSILON {
        n / length
    } else {
        Vec3::ZERO
    }
}

/// Turn raw grid vertices into flat-shaded triangles and wireframe lines
///
/// ```text
///  v1--v3
///  |    |
///  v2--v4
/// ```
///
/// Row 0 emits (v1,v2,v4) and only the vertical line. The last row emits
/// (v1,v2,v3) with both lines. Interior rows emit (v1,v2,v3) and (v3,v2,v4)
/// sharing one normal from the first triangle, with the vertical and
/// horizontal lines; the quad diagonal is never drawn.
pub fn tessellate(raw: &[RawVertex], sector_count: u32, stack_count: u32) -> MeshData {
    let sector_count = sector_count.max(MIN_SECTOR_COUNT);
    let stack_count = stack_count.max(MIN_STACK_COUNT);
    let mut mesh = MeshData::default();
    let columns = sector_count as usize + 1;
    let expected = (stack_count as usize + 1) * columns;
    if raw.len() < expected {
        warn!(
            "Cannot tessellate {}x{}: expected {} raw vertices, got {}",
            sector_count,
            stack_count,
            expected,
            raw.len()
        );
        return mesh;
    }
    let mut index: u32 = 0;

    for i in 0..stack_count as usize {
        let mut vi1 = i * columns;
        let mut vi2 = (i + 1) * columns;

        for _ in 0..sector_count {
            let (v1, v2, v3, v4) = (&raw[vi1], &raw[vi2], &raw[vi1 + 1], &raw[vi2 + 1]);

            if i == 0 {
                let n = face_normal(v1.position, v2.position, v4.position);
                mesh.push_face(&[v1, v2, v4], n);
                mesh.indices.extend_from_slice(&[index, index + 1, index + 2]);
                mesh.line_indices.extend_from_slice(&[index, index + 1]);
                index += 3;
            } else if i == stack_count as usize - 1 {
                let n = face_normal(v1.position, v2.position, v3.position);
                mesh.push_face(&[v1, v2, v3], n);
                mesh.indices.extend_from_slice(&[index, index + 1, index + 2]);
                mesh.line_indices
                    .extend_from_slice(&[index, index + 1, index, index + 2]);
                index += 3;
            } else {
                let n = face_normal(v1.position, v2.position, v3.position);
                mesh.push_face(&[v1, v2, v3, v4], n);
                mesh.indices.extend_from_slice(&[
                    index, index + 1, index + 2,
                    index + 2, index + 1, index + 3,
                ]);
                mesh.line_indices
                    .extend_from_slice(&[index, index + 1, index, index + 2]);
                index += 4;
            }

            vi1 += 1;
            vi2 += 1;
        }
    }

    mesh.interleaved = interleave(&mesh.positions, &mesh.normals, &mesh.colors);
    mesh
}

/// Build a complete mesh from an already sampled height grid
///
/// A grid sampled at other counts than `tessellation` gives an empty mesh.
pub fn generate_mesh_from_grid<N, C, R>(
    params: &PlanetParameters,
    tessellation: &Tessellation,
    grid: &HeightGrid,
    noise: &N,
    mapper: &C,
    rng: &mut R,
) -> MeshData
where
    N: NoiseSource + ?Sized,
    C: ColorMapper,
    R: Rng,
{
    let tessellation = tessellation.normalized();
    if !grid_matches(grid, &tessellation) {
        return MeshData::default();
    }

    let raw = build_raw_vertices(params, &tessellation, grid, noise, mapper, rng);
    let mesh = tessellate(&raw, tessellation.sector_count, tessellation.stack_count);

    info!(
        "Built planet mesh {}x{}: {} vertices, {} triangles, {} lines",
        tessellation.sector_count,
        tessellation.stack_count,
        mesh.vertex_count(),
        mesh.triangle_count(),
        mesh.line_count()
    );

    mesh
}

/// Sample heights and build a mesh colored with a custom mapper
pub fn generate_mesh_with_colors<N, C, R>(
    params: &PlanetParameters,
    tessellation: &Tessellation,
    noise: &N,
    mapper: &C,
    rng: &mut R,
) -> MeshData
where
    N: NoiseSource + ?Sized,
    C: ColorMapper,
    R: Rng,
{
    let tessellation = tessellation.normalized();
    let grid = HeightGrid::sample(noise, tessellation.stack_count, tessellation.sector_count);
    generate_mesh_from_grid(params, &tessellation, &grid, noise, mapper, rng)
}

/// Sample heights and build a mesh with the default biome palette
///
/// The same parameters, noise and RNG state always give a bit-identical mesh.
pub fn generate_mesh<N, R>(
    params: &PlanetParameters,
    tessellation: &Tessellation,
    noise: &N,
    rng: &mut R,
) -> MeshData
where
    N: NoiseSource + ?Sized,
    R: Rng,
{
    let palette = super::BiomePalette::with_base(params.base_color);
    generate_mesh_with_colors(params, tessellation, noise, &palette, rng)
}
