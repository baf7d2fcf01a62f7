//! 2D grid of material cells.

use sand_core::{Cell, Material, Position};
use serde::{Deserialize, Serialize};

/// A bounded (non-wrapping) grid; every slot is empty or holds one cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    cells: Vec<Option<Cell>>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// Cell at position; `None` when empty or out of bounds
    pub fn get(&self, pos: Position) -> Option<&Cell> {
        let i = self.index(pos)?;
        self.cells[i].as_ref()
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        let i = self.index(pos)?;
        self.cells[i].as_mut()
    }

    /// Overwrite a slot. Out-of-bounds writes are dropped.
    pub fn set(&mut self, pos: Position, cell: Option<Cell>) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = cell;
        }
    }

    /// Remove and return the cell at position
    pub fn take(&mut self, pos: Position) -> Option<Cell> {
        let i = self.index(pos)?;
        self.cells[i].take()
    }

    /// True when the position is inside the grid and unoccupied
    pub fn is_empty(&self, pos: Position) -> bool {
        self.index(pos).map_or(false, |i| self.cells[i].is_none())
    }

    pub fn material_at(&self, pos: Position) -> Option<Material> {
        self.get(pos).map(|cell| cell.material)
    }

    /// Move the cell at `from` into `to`, vacating `from`.
    /// Callers check that `to` is empty first.
    pub fn move_cell(&mut self, from: Position, to: Position) {
        if !self.in_bounds(from) || !self.in_bounds(to) {
            return;
        }
        let cell = self.take(from);
        self.set(to, cell);
    }

    /// Drop all contents and adopt new dimensions
    pub fn resize(&mut self, width: i32, height: i32) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }

    pub fn index_to_pos(&self, index: usize) -> Position {
        let width = self.width as usize;
        Position::new((index % width) as i32, (index / width) as i32)
    }

    /// Iterator over occupied cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.as_ref().map(|c| (self.index_to_pos(i), c)))
    }

    /// Raw row-major slots, including empties
    pub fn slots(&self) -> &[Option<Cell>] {
        &self.cells
    }

    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn count(&self, material: Material) -> usize {
        self.iter().filter(|(_, cell)| cell.is(material)).count()
    }

    /// First cell of the given material in row-major (top to bottom) order
    pub fn find(&self, material: Material) -> Option<Position> {
        self.iter()
            .find(|(_, cell)| cell.is(material))
            .map(|(pos, _)| pos)
    }
}
