//! Minesweeper integration tests: the first-click safe zone and flood fill.

use proptest::prelude::*;

use rust_arcade::core::{Coord, GameRng, Status};
use rust_arcade::games::mines::{
    check_win, in_safe_zone, place_mines, reveal, Cell, Field, Minesweeper, MinesweeperConfig,
};

/// A board size, a first click on it and a mine count that fits.
fn layout() -> impl Strategy<Value = (usize, usize, Coord, usize, u64)> {
    (3usize..12, 3usize..12).prop_flat_map(|(rows, cols)| {
        let capacity = rows * cols - 9;
        (
            Just(rows),
            Just(cols),
            (0..rows, 0..cols).prop_map(|(r, c)| Coord::new(r, c)),
            0..=capacity,
            any::<u64>(),
        )
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn test_first_click_neighbourhood_is_mine_free((rows, cols, first, count, seed) in layout()) {
        let mut field = Field::filled(rows, cols, Cell::default());
        let placed = place_mines(&mut field, first, count, &mut GameRng::new(seed));

        prop_assert_eq!(placed.len(), count);
        prop_assert_eq!(field.values().filter(|c| c.mine).count(), count);
        prop_assert!(!field[first].mine);
        for n in field.neighbors(first) {
            prop_assert!(!field[n].mine, "mine next to first click at {}", n);
        }
        for at in placed {
            prop_assert!(!in_safe_zone(first, at));
        }
    }

    #[test]
    fn test_adjacency_counts_match_mines((rows, cols, first, count, seed) in layout()) {
        let mut field = Field::filled(rows, cols, Cell::default());
        place_mines(&mut field, first, count, &mut GameRng::new(seed));

        for (at, cell) in field.iter() {
            if cell.mine {
                continue;
            }
            let mines = field.neighbors(at).into_iter().filter(|&n| field[n].mine).count();
            prop_assert_eq!(usize::from(cell.adjacent), mines);
        }
    }

    #[test]
    fn test_flood_fill_is_bounded((rows, cols, first, count, seed) in layout()) {
        let mut field = Field::filled(rows, cols, Cell::default());
        place_mines(&mut field, first, count, &mut GameRng::new(seed));

        let opened = reveal(&mut field, first);
        prop_assert!(opened >= 1);
        prop_assert!(opened <= rows * cols - count);
        prop_assert_eq!(field.values().filter(|c| c.revealed).count(), opened);
        prop_assert!(field.values().all(|c| !(c.mine && c.revealed)));

        // A second reveal of the same cell changes nothing.
        prop_assert_eq!(reveal(&mut field, first), 0);
    }
}

// =============================================================================
// Flood Fill
// =============================================================================

#[test]
fn test_empty_board_opens_fully() {
    let mut field = Field::filled(30, 30, Cell::default());
    assert_eq!(reveal(&mut field, Coord::new(15, 15)), 900);
    assert!(check_win(&field));
}

#[test]
fn test_flood_stops_at_numbers_and_flags() {
    let mut field = Field::filled(1, 6, Cell::default());
    field[Coord::new(0, 5)].mine = true;
    field[Coord::new(0, 4)].adjacent = 1;
    field[Coord::new(0, 1)].flagged = true;

    // Flagged cell 1 walls off cell 0; the number at 4 stops the flood.
    assert_eq!(reveal(&mut field, Coord::new(0, 3)), 3);
    assert!(!field[Coord::new(0, 0)].revealed);
    assert!(field[Coord::new(0, 4)].revealed);
    assert!(!field[Coord::new(0, 5)].revealed);
}

// =============================================================================
// Sessions
// =============================================================================

#[test]
fn test_first_reveal_never_loses() {
    let config = MinesweeperConfig::default().with_size(9, 9).with_mines(72);
    for seed in 0..20 {
        let mut game = Minesweeper::new(config.clone(), GameRng::new(seed));
        let first = Coord::new(4, 4);
        game.reveal(first).unwrap();

        assert_ne!(game.status(), Status::Lost, "seed {seed}");
        // Every cell outside the safe zone is a mine, so the game is won.
        assert_eq!(game.status(), Status::Won);
    }
}

#[test]
fn test_corner_click_on_dense_field() {
    // A corner click only protects four cells, leaving room for twelve mines.
    let mut field = Field::filled(4, 4, Cell::default());
    place_mines(&mut field, Coord::new(0, 0), 12, &mut GameRng::new(5));

    assert_eq!(reveal(&mut field, Coord::new(0, 0)), 4);
    assert!(check_win(&field));
}
