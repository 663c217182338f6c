//! Interleaved vertex packing
//!
//! Merges positions, normals and colors into one buffer with a fixed
//! per-vertex layout `px py pz nx ny nz r g b a`.

use super::colors::TerrainColor;

/// Floats per interleaved vertex (3 position + 3 normal + 4 color)
pub const FLOATS_PER_VERTEX: usize = 10;

/// Byte stride between interleaved vertices
pub const INTERLEAVED_STRIDE: usize = FLOATS_PER_VERTEX * std::mem::size_of::<f32>();

/// Pack the three vertex streams into one interleaved buffer
///
/// Streams are expected to have equal length; extra entries in a longer
/// stream are ignored.
pub fn interleave(positions: &[[f32; 3]], normals: &[[f32; 3]], colors: &[TerrainColor]) -> Vec<f32> {
    let mut out = Vec::with_capacity(positions.len() * FLOATS_PER_VERTEX);

    for ((p, n), c) in positions.iter().zip(normals).zip(colors) {
        out.extend_from_slice(p);
        out.extend_from_slice(n);
        out.extend_from_slice(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let positions = [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let normals = [[0.0, 0.0, 1.0], [0.0, 1.0, 0.0]];
        let colors = [[0.1, 0.2, 0.3, 1.0], [0.4, 0.5, 0.6, 1.0]];

        let packed = interleave(&positions, &normals, &colors);
        assert_eq!(packed.len(), 2 * FLOATS_PER_VERTEX);
        assert_eq!(
            &packed[..10],
            &[1.0, 2.0, 3.0, 0.0, 0.0, 1.0, 0.1, 0.2, 0.3, 1.0]
        );
        assert_eq!(&packed[10..13], &[4.0, 5.0, 6.0]);
        assert_eq!(&packed[16..20], &[0.4, 0.5, 0.6, 1.0]);
    }

    #[test]
    fn test_stride() {
        assert_eq!(INTERLEAVED_STRIDE, 40);
    }

    #[test]
    fn test_empty() {
        assert!(interleave(&[], &[], &[]).is_empty());
    }
}
