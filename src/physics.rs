//! Rotational bulge estimate
//!
//! First-order approximation only: the ratio of the centrifugal term to
//! gravity, normalized to the planet radius. Not a geodesy model.

use std::f64::consts::PI;

use crate::config::PlanetParameters;

/// Gravitational constant in m³ / (kg·s²)
pub const G: f64 = 6.674e-11;

/// Angular velocity in rad/s for a sidereal day of `day_s` seconds
#[inline]
pub fn angular_velocity(day_s: f64) -> f64 {
    2.0 * PI / day_s
}

/// Equatorial bulge `h = R⁴ω² / (G·M) / R`
///
/// Added to the equatorial (xy) component of every vertex. Grows with spin
/// rate and shrinks with mass.
pub fn equatorial_bulge(params: &PlanetParameters) -> f64 {
    let omega = angular_velocity(params.day_s);
    let r = params.radius_m;
    let h = r.powi(4) * omega * omega / (G * params.mass_kg);
    h / r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earth_bulge_is_small_and_positive() {
        let h = equatorial_bulge(&PlanetParameters::earth());
        assert!(h > 0.0);
        // R³ω²/(GM) for Earth is about 0.0034
        assert!((h - 0.0034).abs() < 0.0005, "h = {}", h);
    }

    #[test]
    fn test_faster_spin_means_larger_bulge() {
        let mut params = PlanetParameters::earth();
        let mut previous = 0.0;
        for hours in [100.0, 48.0, 24.0, 10.0, 5.0, 1.0] {
            params.day_s = hours * 3600.0;
            let h = equatorial_bulge(&params);
            assert!(h > previous, "bulge should grow as the day shortens");
            previous = h;
        }
    }

    #[test]
    fn test_heavier_planet_bulges_less() {
        let light = PlanetParameters::earth();
        let heavy = PlanetParameters {
            mass_kg: light.mass_kg * 10.0,
            ..light
        };
        assert!(equatorial_bulge(&heavy) < equatorial_bulge(&light));
    }
}
