//! Generate a few planets and print their mesh statistics

use std::collections::HashMap;

use planet_mesh::{Planet, PlanetParametersBuilder, Tessellation};

fn main() {
    println!("Planet Mesh Demo\n");

    let earth = PlanetParametersBuilder::new()
        .radius_km(6357.0)
        .mass_kg(5.9722e24)
        .day_hours(23.93)
        .roughness(0.1)
        .temperature_c(15.0)
        .water(0.57)
        .build()
        .expect("valid earth parameters");

    let mars = PlanetParametersBuilder::new()
        .radius_km(3376.2)
        .mass_kg(6.4171e23)
        .day_hours(24.6229)
        .roughness(0.15)
        .temperature_c(-60.0)
        .water(0.0)
        .terrestrial(false)
        .base_color_rgb8(193, 68, 14)
        .build()
        .expect("valid mars parameters");

    let tessellation = Tessellation::new(1.0, 72, 36);

    for (name, params) in [("Earth", earth), ("Mars", mars)] {
        let planet = Planet::generate(params, tessellation, 42);
        println!("{}", name);
        println!("{:-<60}", "");
        println!("{}", planet);
        println!("Equatorial bulge: {:.6}", planet.equatorial_bulge());

        let grid = planet.height_grid();
        println!(
            "Heights: min {:.3}, max {:.3}, range {:.3}",
            grid.min_height(),
            grid.max_height(),
            grid.height_range()
        );

        let mut counts: HashMap<[u32; 4], usize> = HashMap::new();
        for c in &planet.mesh().colors {
            *counts.entry(c.map(f32::to_bits)).or_insert(0) += 1;
        }
        println!("Distinct vertex colors: {}\n", counts.len());
    }
}
