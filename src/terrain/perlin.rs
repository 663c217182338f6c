//! Seeded Perlin gradient noise
//!
//! Default `NoiseSource` for the crate. Uses the standard Ken Perlin
//! permutation table, mixed with a seed so different planets get different
//! terrain from the same table.

use glam::Vec3;

use super::NoiseSource;

// ============================================================================
// PERMUTATION TABLE
// ============================================================================
// Standard 256-element permutation table from Ken Perlin's reference implementation.
// Changing it changes every generated planet.
const PERM: [u32; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

/// Perlin noise with a 32-bit seed
///
/// Both entry points are deterministic and return values in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PerlinNoise {
    seed: u32,
    seed_hash: u32,
}

impl PerlinNoise {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            seed_hash: seed.wrapping_mul(1103515245).wrapping_add(12345) >> 16,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    #[inline]
    fn hash1(&self, x: i32) -> u32 {
        let ix = ((x as u32) ^ self.seed_hash) & 255;
        PERM[ix as usize]
    }

    #[inline]
    fn hash3(&self, x: i32, y: i32, z: i32) -> u32 {
        let ix = ((x as u32) ^ self.seed_hash) & 255;
        let iy = ((y as u32) ^ (self.seed_hash >> 8)) & 255;
        let iz = ((z as u32) ^ (self.seed_hash >> 16)) & 255;
        let a = PERM[ix as usize];
        let b = PERM[((a + iy) & 255) as usize];
        PERM[((b + iz) & 255) as usize]
    }
}

/// 1D gradient: slope in {±1/8, ±2/8, .., ±1} picked by the hash
#[inline]
fn gradient1(hash_value: u32, x: f32) -> f32 {
    let slope = ((hash_value & 7) + 1) as f32 / 8.0;
    if hash_value & 8 == 0 {
        -slope * x
    } else {
        slope * x
    }
}

/// Dot product with one of the 12 cube-edge directions selected by the hash
#[inline]
fn gradient3(hash_value: u32, x: f32, y: f32, z: f32) -> f32 {
    let h = hash_value & 15;

    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        z
    } else {
        x
    };

    let sign_u = if (h & 1) == 0 { -u } else { u };
    let sign_v = if (h & 2) == 0 { -v } else { v };

    sign_u + sign_v
}

/// Quintic fade 6t⁵ - 15t⁴ + 10t³
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

impl NoiseSource for PerlinNoise {
    fn noise1(&self, x: f32) -> f32 {
        let x0 = x.floor() as i32;
        let xf = x - x.floor();
        let g0 = gradient1(self.hash1(x0), xf);
        let g1 = gradient1(self.hash1(x0.wrapping_add(1)), xf - 1.0);
        // Raw 1D gradient noise peaks at 0.5; rescale to fill [-1, 1].
        (lerp(g0, g1, fade(xf)) * 2.0).clamp(-1.0, 1.0)
    }

    fn noise3(&self, pos: Vec3) -> f32 {
        let x0 = pos.x.floor() as i32;
        let y0 = pos.y.floor() as i32;
        let z0 = pos.z.floor() as i32;
        let x1 = x0.wrapping_add(1);
        let y1 = y0.wrapping_add(1);
        let z1 = z0.wrapping_add(1);

        let xf = pos.x - pos.x.floor();
        let yf = pos.y - pos.y.floor();
        let zf = pos.z - pos.z.floor();

        let u = fade(xf);
        let v = fade(yf);
        let w = fade(zf);

        let g_aaa = gradient3(self.hash3(x0, y0, z0), xf, yf, zf);
        let g_baa = gradient3(self.hash3(x1, y0, z0), xf - 1.0, yf, zf);
        let g_aba = gradient3(self.hash3(x0, y1, z0), xf, yf - 1.0, zf);
        let g_bba = gradient3(self.hash3(x1, y1, z0), xf - 1.0, yf - 1.0, zf);
        let g_aab = gradient3(self.hash3(x0, y0, z1), xf, yf, zf - 1.0);
        let g_bab = gradient3(self.hash3(x1, y0, z1), xf - 1.0, yf, zf - 1.0);
        let g_abb = gradient3(self.hash3(x0, y1, z1), xf, yf - 1.0, zf - 1.0);
        let g_bbb = gradient3(self.hash3(x1, y1, z1), xf - 1.0, yf - 1.0, zf - 1.0);

        let x00 = lerp(g_aaa, g_baa, u);
        let x10 = lerp(g_aba, g_bba, u);
        let x01 = lerp(g_aab, g_bab, u);
        let x11 = lerp(g_abb, g_bbb, u);
        let y0_val = lerp(x00, x10, v);
        let y1_val = lerp(x01, x11, v);

        lerp(y0_val, y1_val, w).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let noise = PerlinNoise::new(42);
        let p = Vec3::new(0.5, 0.7, 0.3);
        assert_eq!(noise.noise3(p), noise.noise3(p));
        assert_eq!(noise.noise1(3.7), noise.noise1(3.7));
    }

    #[test]
    fn test_range() {
        let noise = PerlinNoise::new(12345);
        for i in 0..500 {
            let t = i as f32 * 0.173 - 40.0;
            let v1 = noise.noise1(t);
            assert!((-1.0..=1.0).contains(&v1), "noise1({}) = {}", t, v1);

            let p = Vec3::new(t, t * 0.31 + 1.1, -t * 0.57);
            let v3 = noise.noise3(p);
            assert!((-1.0..=1.0).contains(&v3), "noise3({:?}) = {}", p, v3);
        }
    }

    #[test]
    fn test_zero_at_lattice_points() {
        let noise = PerlinNoise::new(7);
        assert_eq!(noise.noise3(Vec3::new(1.0, -2.0, 3.0)), 0.0);
        assert_eq!(noise.noise1(5.0), 0.0);
    }

    #[test]
    fn test_different_seeds() {
        let a = PerlinNoise::new(42);
        let b = PerlinNoise::new(999);
        let differs = (0..32).any(|i| {
            let p = Vec3::new(0.23 + i as f32 * 0.61, 1.71 - i as f32 * 0.37, 2.38);
            a.noise3(p) != b.noise3(p)
        });
        assert!(differs, "Different seeds should produce different values");
    }
}
