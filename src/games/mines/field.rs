//! Minefield cells, mine placement and flood-fill reveal.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Coord, Grid, RandomSource};

/// One minefield cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub mine: bool,
    pub revealed: bool,
    pub flagged: bool,
    /// Mines among the up-to-8 neighbours. Only meaningful for non-mines.
    pub adjacent: u8,
}

impl Cell {
    #[must_use]
    pub const fn is_hidden(self) -> bool {
        !self.revealed
    }
}

pub type Field = Grid<Cell>;

/// Whether `at` lies in the 3×3 block centred on `first`.
#[must_use]
pub fn in_safe_zone(first: Coord, at: Coord) -> bool {
    first.row.abs_diff(at.row) <= 1 && first.col.abs_diff(at.col) <= 1
}

/// Place `count` mines uniformly at random outside the safe zone around
/// `first`, then fill in every adjacency count.
///
/// Panics if `count` exceeds the cells outside the safe zone.
pub fn place_mines<R: RandomSource>(
    field: &mut Field,
    first: Coord,
    count: usize,
    rng: &mut R,
) -> Vec<Coord> {
    let safe = field.neighbors(first).len() + 1;
    assert!(
        count <= field.len() - safe,
        "{count} mines do not fit outside the safe zone of {first}"
    );

    let mut placed = Vec::with_capacity(count);
    while placed.len() < count {
        let at = field.coord_of(rng.next_index(field.len()));
        if in_safe_zone(first, at) || field[at].mine {
            continue;
        }
        field[at].mine = true;
        placed.push(at);
    }

    for at in field.coords().collect::<Vec<_>>() {
        if field[at].mine {
            continue;
        }
        let adjacent = field
            .neighbors(at)
            .into_iter()
            .filter(|&n| field[n].mine)
            .count();
        field[at].adjacent = adjacent as u8;
    }

    trace!(count, %first, "mines placed");
    placed
}

/// Reveal `at`, flooding outward through cells with no adjacent mines.
///
/// Revealed and flagged cells are left alone and stop the flood. Returns
/// the number of newly revealed cells.
pub fn reveal(field: &mut Field, at: Coord) -> usize {
    if !field.contains(at) {
        return 0;
    }

    let mut stack = vec![at];
    let mut revealed = 0;

    while let Some(next) = stack.pop() {
        let cell = &mut field[next];
        if cell.revealed || cell.flagged {
            continue;
        }
        cell.revealed = true;
        revealed += 1;

        if !cell.mine && cell.adjacent == 0 {
            stack.extend(field.neighbors(next));
        }
    }

    revealed
}

/// Reveal every mine. Returns how many were hidden.
pub fn reveal_mines(field: &mut Field) -> usize {
    let mut count = 0;
    for cell in field.values_mut() {
        if cell.mine && !cell.revealed {
            cell.revealed = true;
            count += 1;
        }
    }
    count
}

/// Toggle the flag on an unrevealed cell. Returns `false` (and changes
/// nothing) if the cell is revealed.
pub fn toggle_flag(field: &mut Field, at: Coord) -> bool {
    match field.get_mut(at) {
        Some(cell) if !cell.revealed => {
            cell.flagged = !cell.flagged;
            true
        }
        _ => false,
    }
}

/// Every non-mine cell is revealed.
#[must_use]
pub fn check_win(field: &Field) -> bool {
    field.values().all(|c| c.mine || c.revealed)
}

#[must_use]
pub fn count_flags(field: &Field) -> usize {
    field.values().filter(|c| c.flagged).count()
}
