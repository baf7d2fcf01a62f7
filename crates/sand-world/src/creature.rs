//! The dog: one wandering creature that steps on a slow cadence.

use crate::grid::Grid;
use rand::Rng;
use sand_core::{Direction, Material, Position};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Outcome of one controller tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DogStep {
    /// Cadence not reached yet
    Waiting { counter: u32 },
    /// Cadence reached but there is no dog on the grid
    NoDog,
    /// Chosen destination was out of bounds or occupied
    Blocked { at: Position, direction: Direction },
    Moved { from: Position, to: Position },
}

impl DogStep {
    /// Whether this tick evaluated a move
    pub fn attempted(&self) -> bool {
        matches!(self, DogStep::Blocked { .. } | DogStep::Moved { .. })
    }
}

#[derive(Debug, Clone)]
pub struct CreatureController {
    move_delay: u32,
    counter: u32,
}

impl CreatureController {
    pub fn new(move_delay: u32) -> Self {
        Self {
            move_delay,
            counter: 0,
        }
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Advance the cadence counter; on the `move_delay`-th call, try to move
    /// the first dog (row-major) one step in a random orthogonal direction.
    pub fn tick<R: Rng + ?Sized>(&mut self, grid: &mut Grid, rng: &mut R) -> DogStep {
        self.counter += 1;
        if self.counter < self.move_delay {
            return DogStep::Waiting {
                counter: self.counter,
            };
        }
        self.counter = 0;

        let Some(from) = grid.find(Material::Dog) else {
            return DogStep::NoDog;
        };

        let directions = Direction::all();
        let direction = directions[rng.gen_range(0..directions.len())];
        let to = from.step(direction);

        if !grid.is_empty(to) {
            trace!(%from, ?direction, "Dog step blocked");
            return DogStep::Blocked {
                at: from,
                direction,
            };
        }

        grid.move_cell(from, to);
        trace!(%from, %to, "Dog moved");
        DogStep::Moved { from, to }
    }
}
