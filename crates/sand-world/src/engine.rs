//! Per-tick material rules.
//!
//! A tick is a single in-place sweep over the grid, bottom row first and left
//! to right within a row. A cell that moved into (or was created at) a slot
//! during the sweep is not visited again until the next tick, so nothing
//! travels more than one step per tick.

use crate::grid::Grid;
use rand::Rng;
use sand_core::{Cell, Direction, Material, MaterialCatalog, Position, RuleConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickStats {
    /// Occupied cells visited by the sweep
    pub active: usize,
    /// Cells that changed position
    pub moved: usize,
    /// Water/lava contacts resolved
    pub reactions: usize,
    /// Vapor cells that turned back into water
    pub condensed: usize,
}

pub struct UpdateEngine {
    catalog: MaterialCatalog,
    rules: RuleConfig,
    settled: Vec<bool>,
    generation: u64,
}

impl UpdateEngine {
    pub fn new(catalog: MaterialCatalog, rules: RuleConfig) -> Self {
        Self {
            catalog,
            rules,
            settled: Vec::new(),
            generation: 0,
        }
    }

    /// Number of completed ticks; a renderer redraws when this changes.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Apply one tick to the grid
    pub fn tick<R: Rng + ?Sized>(&mut self, grid: &mut Grid, rng: &mut R) -> TickStats {
        let mut stats = TickStats::default();
        self.settled.clear();
        self.settled.resize(grid.slots().len(), false);

        for y in (0..grid.height).rev() {
            for x in 0..grid.width {
                let pos = Position::new(x, y);
                if self.settled[self.slot(grid, pos)] {
                    continue;
                }
                let Some(material) = grid.material_at(pos) else {
                    continue;
                };
                stats.active += 1;

                match material {
                    Material::Rock => {}
                    Material::Vapor => self.update_vapor(grid, pos, rng, &mut stats),
                    Material::Water | Material::Lava => {
                        self.update_liquid(grid, pos, material, rng, &mut stats)
                    }
                    Material::Default | Material::Sand | Material::Dog => {
                        self.update_solid(grid, pos, &mut stats)
                    }
                }
            }
        }

        self.generation += 1;
        debug!(
            generation = self.generation,
            active = stats.active,
            moved = stats.moved,
            reactions = stats.reactions,
            condensed = stats.condensed,
            "Tick complete"
        );
        stats
    }

    fn update_vapor<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        pos: Position,
        rng: &mut R,
        stats: &mut TickStats,
    ) {
        let catalog = &self.catalog;
        let remaining = match grid.get_mut(pos) {
            Some(cell) => {
                let lifetime = cell
                    .lifetime
                    .get_or_insert_with(|| catalog.vapor_lifetime(rng));
                *lifetime = lifetime.saturating_sub(1);
                *lifetime
            }
            None => return,
        };

        if remaining == 0 {
            let water = self.catalog.create(Material::Water, rng);
            grid.set(pos, Some(water));
            stats.condensed += 1;
            trace!(%pos, "Vapor condensed");
            return;
        }

        let above = pos.step(Direction::Up);
        if grid.is_empty(above) && rng.gen::<f64>() < self.rules.vapor_rise_chance {
            self.shift(grid, pos, above, stats);
        }
    }

    fn update_liquid<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        pos: Position,
        material: Material,
        rng: &mut R,
        stats: &mut TickStats,
    ) {
        if self.react(grid, pos, material, rng) {
            stats.reactions += 1;
            return;
        }

        let below = pos.step(Direction::Down);
        if grid.is_empty(below) {
            self.shift(grid, pos, below, stats);
            return;
        }

        // A left-first draw may still fall back to the right; a right draw
        // never looks left.
        let sides: &[Direction] = if rng.gen::<f64>() < self.rules.liquid_left_first_chance {
            &[Direction::Left, Direction::Right]
        } else {
            &[Direction::Right]
        };
        for &side in sides {
            let target = pos.step(side);
            if grid.is_empty(target) {
                self.shift(grid, pos, target, stats);
                return;
            }
        }
    }

    /// Resolve contact with the first orthogonal reactive partner, if any.
    /// Both cells are replaced; returns whether a reaction fired.
    fn react<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        pos: Position,
        material: Material,
        rng: &mut R,
    ) -> bool {
        let partner = match material {
            Material::Water => Material::Lava,
            Material::Lava => Material::Water,
            _ => return false,
        };

        let Some(neighbor) = Direction::all()
            .into_iter()
            .map(|dir| pos.step(dir))
            .find(|&n| grid.material_at(n) == Some(partner))
        else {
            return false;
        };

        let (own, other) = if material == Material::Water {
            let own = self.catalog.create(Material::Vapor, rng);
            (own, self.rock_or_vapor(rng))
        } else {
            let own = self.rock_or_vapor(rng);
            (own, self.catalog.create(Material::Vapor, rng))
        };

        trace!(
            %pos,
            %neighbor,
            became = %own.material,
            neighbor_became = %other.material,
            "Water and lava reacted"
        );

        grid.set(pos, Some(own));
        grid.set(neighbor, Some(other));
        self.settle(grid, pos);
        self.settle(grid, neighbor);
        true
    }

    fn rock_or_vapor<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        if rng.gen::<f64>() < self.rules.rock_chance {
            self.catalog.create(Material::Rock, rng)
        } else {
            self.catalog.create(Material::Vapor, rng)
        }
    }

    /// Falling solids: straight down, else diagonally down with a clear side
    fn update_solid(&mut self, grid: &mut Grid, pos: Position, stats: &mut TickStats) {
        let below = pos.step(Direction::Down);
        if grid.is_empty(below) {
            self.shift(grid, pos, below, stats);
            return;
        }

        for side in [Direction::Left, Direction::Right] {
            let beside = pos.step(side);
            let diagonal = beside.step(Direction::Down);
            if grid.is_empty(diagonal) && grid.is_empty(beside) {
                self.shift(grid, pos, diagonal, stats);
                return;
            }
        }
    }

    fn shift(&mut self, grid: &mut Grid, from: Position, to: Position, stats: &mut TickStats) {
        grid.move_cell(from, to);
        self.settle(grid, to);
        stats.moved += 1;
    }

    fn settle(&mut self, grid: &Grid, pos: Position) {
        if grid.in_bounds(pos) {
            let slot = self.slot(grid, pos);
            self.settled[slot] = true;
        }
    }

    fn slot(&self, grid: &Grid, pos: Position) -> usize {
        pos.y as usize * grid.width as usize + pos.x as usize
    }
}
