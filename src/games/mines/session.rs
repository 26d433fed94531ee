//! Minesweeper play session.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{ConfigError, Coord, GameRng, MoveError, RandomSource, Status};
use crate::persist::{keys, Persistent};

use super::field::{check_win, place_mines, reveal, reveal_mines, toggle_flag, Cell, Field};

/// Minesweeper configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinesweeperConfig {
    pub rows: usize,
    pub cols: usize,
    pub mines: usize,
}

impl Default for MinesweeperConfig {
    fn default() -> Self {
        Self {
            rows: 8,
            cols: 8,
            mines: 10,
        }
    }
}

impl MinesweeperConfig {
    #[must_use]
    pub fn with_size(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    #[must_use]
    pub fn with_mines(mut self, mines: usize) -> Self {
        self.mines = mines;
        self
    }

    /// Largest mine count that fits whatever the first click.
    #[must_use]
    pub fn max_mines(&self) -> usize {
        let safe = self.rows.min(3) * self.cols.min(3);
        (self.rows * self.cols).saturating_sub(safe)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::invalid("minesweeper.size", "board must be non-empty"));
        }
        if self.mines > self.max_mines() {
            return Err(ConfigError::invalid(
                "minesweeper.mines",
                format!(
                    "{} mines leave no room for the first-click safe zone (max {})",
                    self.mines,
                    self.max_mines()
                ),
            ));
        }
        Ok(())
    }
}

/// A game of Minesweeper.
///
/// Mines are placed on the first reveal, never within one cell of it. The
/// clock advances through [`Minesweeper::tick`] once per second while the
/// game is in progress.
#[derive(Clone, Debug)]
pub struct Minesweeper<R = GameRng> {
    config: MinesweeperConfig,
    field: Field,
    status: Status,
    flags: usize,
    elapsed: u32,
    best: Option<u32>,
    exploded: Option<Coord>,
    rng: R,
}

impl Minesweeper<GameRng> {
    pub fn with_seed(seed: u64) -> Self {
        Self::new(MinesweeperConfig::default(), GameRng::new(seed))
    }
}

impl<R: RandomSource> Minesweeper<R> {
    /// Panics if the configuration cannot fit its mines; validate
    /// untrusted configs first.
    pub fn new(config: MinesweeperConfig, rng: R) -> Self {
        assert!(
            config.mines <= config.max_mines(),
            "{} mines do not fit a {}x{} board",
            config.mines,
            config.rows,
            config.cols
        );
        let field = Field::filled(config.rows, config.cols, Cell::default());
        Self {
            config,
            field,
            status: Status::NotStarted,
            flags: 0,
            elapsed: 0,
            best: None,
            exploded: None,
            rng,
        }
    }

    #[must_use]
    pub fn field(&self) -> &Field {
        &self.field
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn flags(&self) -> usize {
        self.flags
    }

    /// Mines minus flags. Negative when over-flagged.
    #[must_use]
    pub fn mines_remaining(&self) -> i64 {
        self.config.mines as i64 - self.flags as i64
    }

    /// Seconds on the clock.
    #[must_use]
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Fastest winning time so far.
    #[must_use]
    pub fn best_time(&self) -> Option<u32> {
        self.best
    }

    /// The mine that ended a lost game.
    #[must_use]
    pub fn exploded(&self) -> Option<Coord> {
        self.exploded
    }

    #[must_use]
    pub fn config(&self) -> &MinesweeperConfig {
        &self.config
    }

    /// Reveal a cell. Returns the number of cells uncovered.
    pub fn reveal(&mut self, at: Coord) -> Result<usize, MoveError> {
        let cell = self.check_open(at)?;
        if cell.flagged {
            return Err(MoveError::Flagged(at));
        }
        if cell.revealed {
            return Err(MoveError::AlreadyRevealed(at));
        }

        if self.status == Status::NotStarted {
            place_mines(&mut self.field, at, self.config.mines, &mut self.rng);
            self.status = Status::InProgress;
        }

        if self.field[at].mine {
            let shown = reveal_mines(&mut self.field);
            self.exploded = Some(at);
            self.status = Status::Lost;
            info!(%at, elapsed = self.elapsed, "minesweeper lost");
            return Ok(shown);
        }

        let opened = reveal(&mut self.field, at);
        if check_win(&self.field) {
            self.status = Status::Won;
            if self.best.map_or(true, |best| self.elapsed < best) {
                self.best = Some(self.elapsed);
            }
            info!(elapsed = self.elapsed, best = ?self.best, "minesweeper won");
        }
        Ok(opened)
    }

    /// Toggle a flag. Returns whether the cell is now flagged.
    pub fn toggle_flag(&mut self, at: Coord) -> Result<bool, MoveError> {
        let cell = self.check_open(at)?;
        if cell.revealed {
            return Err(MoveError::AlreadyRevealed(at));
        }

        toggle_flag(&mut self.field, at);
        let flagged = self.field[at].flagged;
        if flagged {
            self.flags += 1;
        } else {
            self.flags -= 1;
        }
        Ok(flagged)
    }

    /// Advance the clock by one second while the game is running.
    pub fn tick(&mut self) -> u32 {
        if self.status == Status::InProgress {
            self.elapsed += 1;
        }
        self.elapsed
    }

    /// Start a new game on a fresh field. The best time is kept.
    pub fn restart(&mut self) {
        self.field = Field::filled(self.config.rows, self.config.cols, Cell::default());
        self.status = Status::NotStarted;
        self.flags = 0;
        self.elapsed = 0;
        self.exploded = None;
    }

    fn check_open(&self, at: Coord) -> Result<Cell, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }
        self.field.get(at).copied().ok_or(MoveError::OutOfBounds(at))
    }
}

impl<R: RandomSource> Persistent for Minesweeper<R> {
    const KEY: &'static str = keys::MINESWEEPER_BEST;
    type Record = Option<u32>;

    fn record(&self) -> Option<u32> {
        self.best
    }

    fn restore(&mut self, record: Option<u32>) {
        self.best = record;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SequenceSource;

    /// One row of seven cells with mines dealt to columns 3 and 5.
    fn strip() -> Minesweeper<SequenceSource> {
        let config = MinesweeperConfig::default().with_size(1, 7).with_mines(2);
        Minesweeper::new(config, SequenceSource::new([3, 5]))
    }

    fn at(col: usize) -> Coord {
        Coord::new(0, col)
    }

    #[test]
    fn test_first_reveal_starts_game() {
        let mut game = strip();
        assert_eq!(game.status(), Status::NotStarted);
        assert_eq!(game.tick(), 0);

        assert_eq!(game.reveal(at(0)), Ok(3));
        assert_eq!(game.status(), Status::InProgress);
        assert!(game.field()[at(3)].mine);
        assert_eq!(game.field()[at(4)].adjacent, 2);
        assert_eq!(game.tick(), 1);
    }

    #[test]
    fn test_hitting_a_mine_loses() {
        let mut game = strip();
        game.reveal(at(0)).unwrap();
        game.tick();

        assert_eq!(game.reveal(at(3)), Ok(2));
        assert_eq!(game.status(), Status::Lost);
        assert_eq!(game.exploded(), Some(at(3)));
        assert!(game.field()[at(5)].revealed);
        assert_eq!(game.reveal(at(6)), Err(MoveError::GameOver));
        assert_eq!(game.tick(), 1);
        assert_eq!(game.best_time(), None);
    }

    #[test]
    fn test_revealing_every_safe_cell_wins() {
        let mut game = strip();
        game.reveal(at(0)).unwrap();
        game.tick();
        game.tick();
        assert_eq!(game.reveal(at(4)), Ok(1));
        assert_eq!(game.reveal(at(6)), Ok(1));

        assert_eq!(game.status(), Status::Won);
        assert_eq!(game.best_time(), Some(2));
        assert!(!game.field()[at(3)].revealed);
    }

    #[test]
    fn test_flag_counter() {
        let mut game = strip();
        assert_eq!(game.toggle_flag(at(1)), Ok(true));
        assert_eq!(game.toggle_flag(at(2)), Ok(true));
        assert_eq!(game.toggle_flag(at(4)), Ok(true));
        assert_eq!(game.flags(), 3);
        assert_eq!(game.mines_remaining(), -1);

        assert_eq!(game.reveal(at(1)), Err(MoveError::Flagged(at(1))));
        assert_eq!(game.toggle_flag(at(1)), Ok(false));
        assert_eq!(game.mines_remaining(), 0);
    }

    #[test]
    fn test_rejects_out_of_bounds_and_revealed() {
        let mut game = strip();
        assert_eq!(game.reveal(at(7)), Err(MoveError::OutOfBounds(at(7))));

        game.reveal(at(0)).unwrap();
        assert_eq!(game.reveal(at(1)), Err(MoveError::AlreadyRevealed(at(1))));
        assert_eq!(game.toggle_flag(at(1)), Err(MoveError::AlreadyRevealed(at(1))));
    }

    #[test]
    fn test_best_time_keeps_fastest() {
        let mut game = strip();
        game.restore(Some(5));

        game.reveal(at(0)).unwrap();
        for _ in 0..7 {
            game.tick();
        }
        game.reveal(at(4)).unwrap();
        game.reveal(at(6)).unwrap();
        assert_eq!(game.status(), Status::Won);
        assert_eq!(game.best_time(), Some(5));

        game.restart();
        assert_eq!(game.status(), Status::NotStarted);
        assert_eq!(game.elapsed(), 0);
        assert_eq!(game.best_time(), Some(5));
    }

    #[test]
    fn test_config_validation() {
        assert!(MinesweeperConfig::default().validate().is_ok());
        assert_eq!(MinesweeperConfig::default().max_mines(), 55);
        assert!(MinesweeperConfig::default().with_mines(56).validate().is_err());
        assert!(MinesweeperConfig::default().with_size(0, 8).validate().is_err());
    }
}
