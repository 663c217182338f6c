//! Fractal octave summation

use glam::Vec3;

use super::NoiseSource;

/// Number of octaves summed per height sample (frequencies 1 through 32)
pub const OCTAVES: u32 = 6;

/// Sum six octaves of `noise3`, doubling frequency and halving amplitude
///
/// `H(p) = Σ noise3(p · 2^k) / 2^k` for `k` in `0..6`. With a primitive
/// bounded by 1 the result is bounded by `2 - 1/32`.
pub fn fractal_height<N: NoiseSource + ?Sized>(noise: &N, position: Vec3) -> f32 {
    let mut total = 0.0;
    let mut frequency = 1.0;
    let mut amplitude = 1.0;

    for _ in 0..OCTAVES {
        total += noise.noise3(position * frequency) * amplitude;
        frequency *= 2.0;
        amplitude *= 0.5;
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::PerlinNoise;
    use std::cell::RefCell;

    /// Records every sample point and returns a fixed value
    struct Recorder {
        calls: RefCell<Vec<Vec3>>,
        value: f32,
    }

    impl NoiseSource for Recorder {
        fn noise1(&self, _x: f32) -> f32 {
            self.value
        }

        fn noise3(&self, position: Vec3) -> f32 {
            self.calls.borrow_mut().push(position);
            self.value
        }
    }

    #[test]
    fn test_octave_frequencies() {
        let recorder = Recorder {
            calls: RefCell::new(Vec::new()),
            value: 0.0,
        };
        let p = Vec3::new(0.5, -1.0, 2.0);
        fractal_height(&recorder, p);

        let calls = recorder.calls.borrow();
        assert_eq!(calls.len(), OCTAVES as usize);
        for (k, call) in calls.iter().enumerate() {
            assert_eq!(*call, p * (1u32 << k) as f32);
        }
    }

    #[test]
    fn test_amplitude_sum() {
        let recorder = Recorder {
            calls: RefCell::new(Vec::new()),
            value: 1.0,
        };
        let h = fractal_height(&recorder, Vec3::ONE);
        assert_eq!(h, 2.0 - 1.0 / 32.0);
    }

    #[test]
    fn test_bounded_and_deterministic() {
        let noise = PerlinNoise::new(3);
        for i in 0..200 {
            let p = Vec3::new(i as f32 * 0.13, 1.0 - i as f32 * 0.07, 0.41);
            let h = fractal_height(&noise, p);
            assert!(h.abs() <= 2.0, "height {} out of bounds", h);
            assert_eq!(h, fractal_height(&noise, p));
        }
    }
}
