//! Mesh generation for planets
//!
//! Generates engine-agnostic, flat-shaded mesh data from planet parameters.

mod builder;
mod colors;
mod packer;

pub use builder::{
    adjusted_radii, build_raw_vertices, face_normal, generate_mesh, generate_mesh_from_grid,
    generate_mesh_with_colors, tessellate, RawVertex,
};
pub use colors::{BiomePalette, ColorMapper, TerrainColor};
pub use packer::{interleave, FLOATS_PER_VERTEX, INTERLEAVED_STRIDE};

use glam::Vec3;

/// Engine-agnostic mesh data output
///
/// Vertices are not shared between faces: each face carries its own copies
/// so it can have a single flat normal.
/// - OpenGL / wgpu: upload `interleaved` with `interleaved_stride()`
/// - Bevy / Godot: use the separate attribute streams
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions
    pub positions: Vec<[f32; 3]>,
    /// Face normals, repeated for every vertex of the face
    pub normals: Vec<[f32; 3]>,
    /// Vertex colors (RGBA)
    pub colors: Vec<[f32; 4]>,
    /// Triangle indices
    pub indices: Vec<u32>,
    /// Wireframe line indices, in pairs
    pub line_indices: Vec<u32>,
    /// Position, normal and color per vertex, `FLOATS_PER_VERTEX` floats each
    pub interleaved: Vec<f32>,
}

impl MeshData {
    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn line_index_count(&self) -> usize {
        self.line_indices.len()
    }

    /// Get the number of wireframe segments
    pub fn line_count(&self) -> usize {
        self.line_indices.len() / 2
    }

    /// Check if mesh is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Size of the position stream in bytes
    pub fn vertex_size(&self) -> usize {
        std::mem::size_of_val(self.positions.as_slice())
    }

    pub fn normal_size(&self) -> usize {
        std::mem::size_of_val(self.normals.as_slice())
    }

    pub fn color_size(&self) -> usize {
        std::mem::size_of_val(self.colors.as_slice())
    }

    pub fn index_size(&self) -> usize {
        std::mem::size_of_val(self.indices.as_slice())
    }

    pub fn line_index_size(&self) -> usize {
        std::mem::size_of_val(self.line_indices.as_slice())
    }

    pub fn interleaved_size(&self) -> usize {
        std::mem::size_of_val(self.interleaved.as_slice())
    }

    /// Bytes between consecutive vertices in `interleaved`
    pub fn interleaved_stride(&self) -> usize {
        INTERLEAVED_STRIDE
    }

    /// Positions as a flat `x y z x y z ..` slice
    pub fn positions_flat(&self) -> &[f32] {
        self.positions.as_flattened()
    }

    pub fn normals_flat(&self) -> &[f32] {
        self.normals.as_flattened()
    }

    /// Colors as a flat `r g b a r g b a ..` slice
    pub fn colors_flat(&self) -> &[f32] {
        self.colors.as_flattened()
    }

    /// Append one face: its vertices, with one shared normal
    fn push_face(&mut self, vertices: &[&RawVertex], normal: Vec3) {
        for v in vertices {
            self.positions.push(v.position.to_array());
            self.normals.push(normal.to_array());
            self.colors.push(v.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PlanetParameters, Tessellation};
    use crate::terrain::PerlinNoise;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn small_mesh() -> MeshData {
        let params = PlanetParameters::earth();
        let noise = PerlinNoise::new(42);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        generate_mesh(&params, &Tessellation::new(1.0, 8, 4), &noise, &mut rng)
    }

    #[test]
    fn test_generate_mesh() {
        let mesh = small_mesh();

        assert!(!mesh.is_empty());
        assert!(mesh.vertex_count() > 0);
        assert!(mesh.triangle_count() > 0);
        assert_eq!(mesh.positions.len(), mesh.normals.len());
        assert_eq!(mesh.positions.len(), mesh.colors.len());
        assert_eq!(mesh.indices.len() % 3, 0);
        assert_eq!(mesh.line_indices.len() % 2, 0);
    }

    #[test]
    fn test_flat_views_and_sizes() {
        let mesh = small_mesh();
        let n = mesh.vertex_count();

        assert_eq!(mesh.positions_flat().len(), n * 3);
        assert_eq!(mesh.normals_flat().len(), n * 3);
        assert_eq!(mesh.colors_flat().len(), n * 4);
        assert_eq!(mesh.positions_flat().len() / 3, mesh.colors_flat().len() / 4);

        assert_eq!(mesh.vertex_size(), n * 12);
        assert_eq!(mesh.color_size(), n * 16);
        assert_eq!(mesh.index_size(), mesh.index_count() * 4);
        assert_eq!(mesh.line_index_size(), mesh.line_index_count() * 4);
        assert_eq!(mesh.interleaved_size(), n * mesh.interleaved_stride());
    }

    #[test]
    fn test_interleaved_matches_streams() {
        let mesh = small_mesh();
        assert_eq!(mesh.interleaved.len(), mesh.vertex_count() * FLOATS_PER_VERTEX);

        for (v, chunk) in mesh.interleaved.chunks_exact(FLOATS_PER_VERTEX).enumerate() {
            assert_eq!(&chunk[0..3], &mesh.positions[v]);
            assert_eq!(&chunk[3..6], &mesh.normals[v]);
            assert_eq!(&chunk[6..10], &mesh.colors[v]);
        }
    }

    #[test]
    fn test_indices_in_bounds() {
        let mesh = small_mesh();
        let n = mesh.vertex_count() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n));
        assert!(mesh.line_indices.iter().all(|&i| i < n));
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = MeshData::default();
        assert!(mesh.is_empty());
        assert_eq!(mesh.triangle_count(), 0);
        assert_eq!(mesh.vertex_size(), 0);
    }
}
