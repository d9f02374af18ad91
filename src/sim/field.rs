//! Crack occupancy field
//!
//! A dense grid recording the most recent growth angle written at each cell.
//! Empty cells are `None`; stored angles are always normalized to [0, 360).

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::normalize_degrees;

#[derive(Debug, Clone, PartialEq)]
pub struct CrackField {
    width: usize,
    height: usize,
    cells: Vec<Option<f32>>,
}

impl CrackField {
    /// Empty field. Both dimensions must be positive.
    pub fn new(width: usize, height: usize) -> Self {
        debug_assert!(width > 0 && height > 0, "empty crack field: {width}x{height}");
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Check signed cell coordinates against the grid
    #[inline]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.width as u64 && (y as u64) < self.height as u64
    }

    /// Cell containing a floating point, if any
    ///
    /// Uses floor, so (-0.5, 3.0) is outside rather than truncated into column 0.
    pub fn cell_at(&self, p: Vec2) -> Option<(usize, usize)> {
        if !p.x.is_finite() || !p.y.is_finite() {
            return None;
        }
        let (x, y) = (p.x.floor() as i64, p.y.floor() as i64);
        self.in_bounds(x, y).then_some((x as usize, y as usize))
    }

    /// Angle stored at a cell, `None` when empty
    #[inline]
    pub fn get_angle(&self, x: usize, y: usize) -> Option<f32> {
        self.cells[self.index(x, y)]
    }

    /// Record an angle at a cell. Caller must bound-check first.
    #[inline]
    pub fn set_angle(&mut self, x: usize, y: usize, angle: f32) {
        debug_assert!(x < self.width && y < self.height, "set_angle out of bounds: ({x}, {y})");
        let i = self.index(x, y);
        self.cells[i] = Some(normalize_degrees(angle));
    }

    /// Uniformly random cell (consumes two RNG values: x then y)
    pub fn random_cell(&self, rng: &mut Pcg32) -> (usize, usize) {
        let x = rng.random_range(0..self.width);
        let y = rng.random_range(0..self.height);
        (x, y)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Row-major view of every cell
    pub fn cells(&self) -> &[Option<f32>] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_new_field_is_empty() {
        let field = CrackField::new(10, 4);
        assert_eq!(field.cells().len(), 40);
        assert_eq!(field.occupied_count(), 0);
        assert_eq!(field.get_angle(9, 3), None);
    }

    #[test]
    fn test_set_angle_normalizes() {
        let mut field = CrackField::new(5, 5);
        field.set_angle(1, 2, -90.0);
        field.set_angle(3, 4, 725.0);
        assert_eq!(field.get_angle(1, 2), Some(270.0));
        assert_eq!(field.get_angle(3, 4), Some(5.0));
        assert_eq!(field.occupied_count(), 2);

        field.clear();
        assert_eq!(field.occupied_count(), 0);
    }

    #[test]
    fn test_in_bounds_edges() {
        let field = CrackField::new(3, 2);
        assert!(field.in_bounds(0, 0));
        assert!(field.in_bounds(2, 1));
        assert!(!field.in_bounds(3, 0));
        assert!(!field.in_bounds(0, 2));
        assert!(!field.in_bounds(-1, 0));
        assert!(!field.in_bounds(0, -1));
    }

    #[test]
    fn test_cell_at_floors_negative() {
        let field = CrackField::new(4, 4);
        assert_eq!(field.cell_at(Vec2::new(0.2, 3.9)), Some((0, 3)));
        assert_eq!(field.cell_at(Vec2::new(-0.01, 1.0)), None);
        assert_eq!(field.cell_at(Vec2::new(1.0, 4.0)), None);
        assert_eq!(field.cell_at(Vec2::new(f32::NAN, 1.0)), None);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "empty crack field")]
    fn test_zero_sized_field_rejected() {
        let _ = CrackField::new(0, 5);
    }

    #[test]
    fn test_random_cell_in_bounds() {
        let field = CrackField::new(7, 3);
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..200 {
            let (x, y) = field.random_cell(&mut rng);
            assert!(x < 7 && y < 3);
        }
    }
}
