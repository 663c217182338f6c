//! Height grid over the UV sphere
//!
//! One fractal height per (stack, sector) grid vertex, pole rows and the
//! seam column included as explicit duplicates. Min/max are produced as a
//! reduction over per-row partial results.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec3;
use tracing::debug;

use super::{fractal_height, NoiseSource};
use crate::config::{MIN_SECTOR_COUNT, MIN_STACK_COUNT};

/// Scale applied to unit-sphere coordinates before sampling noise
pub const RES: f32 = 2.0;

/// Running min/max of sampled heights
///
/// `merge` is associative and commutative with `EMPTY` as identity, so
/// partial results from any split of the grid combine to the same stats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightStats {
    pub min: f32,
    pub max: f32,
}

impl HeightStats {
    /// Identity element for `merge`
    pub const EMPTY: HeightStats = HeightStats {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    /// Fold one value in
    #[inline]
    pub fn include(self, value: f32) -> Self {
        Self {
            min: self.min.min(value),
            max: self.max.max(value),
        }
    }

    #[inline]
    pub fn merge(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// `max - min`, never negative for a non-empty set
    #[inline]
    pub fn range(&self) -> f32 {
        self.max - self.min
    }
}

impl Default for HeightStats {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Point on the unit sphere for a stack/sector angle pair (z is the polar axis)
#[inline]
pub(crate) fn unit_sphere_point(stack_angle: f32, sector_angle: f32) -> Vec3 {
    let xy = stack_angle.cos();
    Vec3::new(
        xy * sector_angle.cos(),
        xy * sector_angle.sin(),
        stack_angle.sin(),
    )
}

/// Stack angle for row `i`, from +π/2 at the north pole to −π/2 at the south
#[inline]
pub(crate) fn stack_angle(i: u32, stack_count: u32) -> f32 {
    FRAC_PI_2 - i as f32 * (PI / stack_count as f32)
}

/// Sector angle for column `j`, from 0 to 2π
#[inline]
pub(crate) fn sector_angle(j: u32, sector_count: u32) -> f32 {
    j as f32 * (2.0 * PI / sector_count as f32)
}

/// Row-major table of fractal heights, `(stacks + 1) × (sectors + 1)`
#[derive(Debug, Clone, PartialEq)]
pub struct HeightGrid {
    heights: Vec<f32>,
    rows: usize,
    columns: usize,
    stats: HeightStats,
}

impl HeightGrid {
    /// Sample the fractal height field at every grid vertex
    ///
    /// Counts below the tessellation minimum are raised to it.
    pub fn sample<N: NoiseSource + ?Sized>(noise: &N, stack_count: u32, sector_count: u32) -> Self {
        let stack_count = stack_count.max(MIN_STACK_COUNT);
        let sector_count = sector_count.max(MIN_SECTOR_COUNT);
        let rows = stack_count as usize + 1;
        let columns = sector_count as usize + 1;
        let mut heights = Vec::with_capacity(rows * columns);
        let mut stats = HeightStats::EMPTY;

        for i in 0..=stack_count {
            let row_stats = sample_row(noise, i, stack_count, sector_count, &mut heights);
            stats = stats.merge(row_stats);
        }

        debug!(
            "Sampled height grid {}x{}: min {:.4}, max {:.4}",
            rows, columns, stats.min, stats.max
        );

        Self {
            heights,
            rows,
            columns,
            stats,
        }
    }

    /// Number of rows (`stack_count + 1`)
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (`sector_count + 1`)
    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Height at stack row `i`, sector column `j`
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if i < self.rows && j < self.columns {
            self.heights.get(i * self.columns + j).copied()
        } else {
            None
        }
    }

    /// All heights of stack row `i`
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        if i < self.rows {
            let start = i * self.columns;
            Some(&self.heights[start..start + self.columns])
        } else {
            None
        }
    }

    /// Flat row-major view
    #[inline]
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    #[inline]
    pub fn stats(&self) -> HeightStats {
        self.stats
    }

    #[inline]
    pub fn min_height(&self) -> f32 {
        self.stats.min
    }

    #[inline]
    pub fn max_height(&self) -> f32 {
        self.stats.max
    }

    #[inline]
    pub fn height_range(&self) -> f32 {
        self.stats.range()
    }
}

/// Sample one stack row into `out` and return its partial stats
fn sample_row<N: NoiseSource + ?Sized>(
    noise: &N,
    i: u32,
    stack_count: u32,
    sector_count: u32,
    out: &mut Vec<f32>,
) -> HeightStats {
    let stack = stack_angle(i, stack_count);
    let mut stats = HeightStats::EMPTY;

    for j in 0..=sector_count {
        let point = unit_sphere_point(stack, sector_angle(j, sector_count)) * RES;
        let height = fractal_height(noise, point);
        stats = stats.include(height);
        out.push(height);
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::PerlinNoise;

    #[test]
    fn test_grid_dimensions() {
        let grid = HeightGrid::sample(&PerlinNoise::new(1), 4, 8);
        assert_eq!(grid.rows(), 5);
        assert_eq!(grid.columns(), 9);
        assert_eq!(grid.heights().len(), 45);
        assert!(grid.get(4, 8).is_some());
        assert!(grid.get(5, 0).is_none());
        assert!(grid.get(0, 9).is_none());
        assert!(grid.row(5).is_none());
        assert_eq!(grid.row(2).unwrap().len(), 9);
    }

    #[test]
    fn test_sub_minimum_counts_are_raised() {
        let grid = HeightGrid::sample(&PerlinNoise::new(3), 0, 0);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.columns(), 4);
        assert!(grid.heights().iter().all(|h| h.is_finite()));
        assert!(grid.height_range() >= 0.0);
        assert_eq!(grid, HeightGrid::sample(&PerlinNoise::new(3), 2, 3));
    }

    #[test]
    fn test_min_max_bound_every_cell() {
        let grid = HeightGrid::sample(&PerlinNoise::new(42), 16, 32);
        assert!(grid.height_range() >= 0.0);
        for &h in grid.heights() {
            assert!(grid.min_height() <= h && h <= grid.max_height());
        }
        assert!(grid.heights().contains(&grid.min_height()));
        assert!(grid.heights().contains(&grid.max_height()));
    }

    #[test]
    fn test_seam_column_duplicates_first() {
        let grid = HeightGrid::sample(&PerlinNoise::new(9), 6, 12);
        for i in 0..grid.rows() {
            let row = grid.row(i).unwrap();
            assert!((row[0] - row[12]).abs() < 1e-3, "row {} seam mismatch", i);
        }
    }

    #[test]
    fn test_stats_merge_is_order_independent() {
        let a = HeightStats::EMPTY.include(0.3).include(-1.2);
        let b = HeightStats::EMPTY.include(0.9);
        let c = HeightStats::EMPTY.include(-0.1).include(0.4);

        assert_eq!(a.merge(b).merge(c), a.merge(b.merge(c)));
        assert_eq!(a.merge(b), b.merge(a));
        assert_eq!(a.merge(HeightStats::EMPTY), a);
        assert_eq!(a.merge(b).merge(c), HeightStats { min: -1.2, max: 0.9 });
    }

    #[test]
    fn test_angles() {
        assert_eq!(stack_angle(0, 4), FRAC_PI_2);
        assert!((stack_angle(4, 4) + FRAC_PI_2).abs() < 1e-6);
        assert_eq!(sector_angle(0, 8), 0.0);
        assert!((sector_angle(8, 8) - 2.0 * PI).abs() < 1e-5);
    }
}
