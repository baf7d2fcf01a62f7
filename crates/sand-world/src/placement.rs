//! Adding material to the grid from pixel coordinates.

use crate::grid::Grid;
use rand::Rng;
use sand_core::{Material, MaterialCatalog, Position};
use tracing::trace;

/// Turns external placement commands into new cells
#[derive(Debug, Clone)]
pub struct Placer {
    cell_size: u32,
    catalog: MaterialCatalog,
}

impl Placer {
    pub fn new(cell_size: u32, catalog: MaterialCatalog) -> Self {
        Self { cell_size, catalog }
    }

    /// Place `material` in the cell containing pixel `(pixel_x, pixel_y)`.
    ///
    /// Out-of-bounds or occupied targets are ignored; returns whether a cell
    /// was created.
    pub fn place<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        pixel_x: i32,
        pixel_y: i32,
        material: Material,
        rng: &mut R,
    ) -> bool {
        let pos = Position::from_pixels(pixel_x, pixel_y, self.cell_size);
        self.place_at(grid, pos, material, rng)
    }

    /// Place `material` directly at a grid position
    pub fn place_at<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        pos: Position,
        material: Material,
        rng: &mut R,
    ) -> bool {
        if !grid.is_empty(pos) {
            return false;
        }

        let cell = self.catalog.create(material, rng);
        trace!(%material, %pos, color = %cell.color.to_css(), "Placed cell");
        grid.set(pos, Some(cell));
        true
    }
}
