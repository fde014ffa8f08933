use tracing::debug;

use crate::GridCoord;
use crate::cell::State;
use crate::grid::Grid;
use crate::rule_set::RuleSet;

/// Offsets of the eight cells surrounding `(0, 0)`.
const NEIGHBORHOOD: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Advances a [`Grid`] one generation at a time on a torus.
///
/// Every step is computed into a scratch buffer from a single snapshot of the previous
/// generation, then swapped in as the grid's live buffer. The scratch buffer is kept around so
/// consecutive steps on a grid of the same size don't allocate.
#[derive(Debug, Clone, Default)]
pub struct Automaton {
    rule: RuleSet,

    scratch: Vec<State>,

    /// Number of steps taken so far
    generation: u64,
}

impl Automaton {
    pub fn new(rule: RuleSet) -> Self {
        Self {
            rule,
            scratch: Vec::new(),
            generation: 0,
        }
    }

    pub fn rule(&self) -> RuleSet {
        self.rule
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn reset_generation(&mut self) {
        self.generation = 0;
    }

    /// Count the alive cells among the eight neighbors of `(x, y)`, wrapping around every edge.
    ///
    /// Coordinates outside the grid are wrapped onto it first. A zero-area grid has no
    /// neighbors.
    pub fn count_neighbors(grid: &Grid, x: GridCoord, y: GridCoord) -> u8 {
        if grid.is_empty() {
            return 0;
        }

        let (w, h) = (grid.width() as isize, grid.height() as isize);
        let (x, y) = (x as isize, y as isize);

        NEIGHBORHOOD
            .iter()
            .map(|&(dx, dy)| {
                let nx = (x + dx).rem_euclid(w) as usize;
                let ny = (y + dy).rem_euclid(h) as usize;

                grid.get(nx, ny)
            })
            .filter(|s| s.is_alive())
            .count() as u8
    }

    /// Advance `grid` by exactly one generation and bump the generation counter.
    ///
    /// Stepping a zero-area grid changes no cells but still counts as a generation.
    pub fn step(&mut self, grid: &mut Grid) {
        let (w, h) = (grid.width(), grid.height());

        self.scratch.clear();
        self.scratch.reserve(w * h);

        for y in 0..h {
            for x in 0..w {
                let neighbors = Self::count_neighbors(grid, x as GridCoord, y as GridCoord);
                let next = self.rule.next_state(grid.get(x, y), neighbors);

                self.scratch.push(next);
            }
        }

        grid.swap_cells(&mut self.scratch);
        self.generation += 1;

        debug!(
            generation = self.generation,
            population = grid.population(),
            "Advanced grid"
        );
    }

    /// Advance `grid` by `n` generations.
    pub fn advance(&mut self, grid: &mut Grid, n: usize) {
        for _ in 0..n {
            self.step(grid);
        }
    }
}
