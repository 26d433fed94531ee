//! Tetris play session.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{ConfigError, Coord, GameRng, Grid, MoveError, RandomSource, Status};
use crate::persist::{keys, Persistent};

use super::piece::{filled_cells, shape, PieceQueue, Randomizer, Shape, Tetromino};
use super::well::{drop_interval, level_for, line_clear_score, Well, HEIGHT, WIDTH};

/// Tetris configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TetrisConfig {
    pub width: usize,
    pub height: usize,
    pub randomizer: Randomizer,
}

impl Default for TetrisConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            randomizer: Randomizer::Uniform,
        }
    }
}

impl TetrisConfig {
    #[must_use]
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_randomizer(mut self, randomizer: Randomizer) -> Self {
        self.randomizer = randomizer;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 4 {
            return Err(ConfigError::invalid("tetris.width", "an I piece must fit across"));
        }
        if self.height < 4 {
            return Err(ConfigError::invalid("tetris.height", "an I piece must fit upright"));
        }
        Ok(())
    }
}

/// The falling piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePiece {
    pub kind: Tetromino,
    /// Clockwise quarter-turns from the spawn orientation, `0..4`.
    pub rotation: u8,
    pub x: i32,
    pub y: i32,
}

impl ActivePiece {
    #[must_use]
    pub fn shape(&self) -> Shape {
        shape(self.kind, self.rotation)
    }
}

/// What a gravity step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fall {
    /// The piece moved down one row.
    Moved,
    /// The piece could not move and was locked.
    Locked { cleared: usize },
}

/// A game of Tetris.
///
/// Gravity is driven by the caller: call [`Tetris::tick`] every
/// [`Tetris::drop_interval`].
#[derive(Clone, Debug)]
pub struct Tetris<R = GameRng> {
    config: TetrisConfig,
    well: Well,
    current: Option<ActivePiece>,
    next: Option<Tetromino>,
    score: u32,
    lines: u32,
    level: u32,
    status: Status,
    paused: bool,
    high: u32,
    queue: PieceQueue,
    rng: R,
}

impl Tetris<GameRng> {
    pub fn with_seed(seed: u64) -> Self {
        Self::new(TetrisConfig::default(), GameRng::new(seed))
    }
}

impl<R: RandomSource> Tetris<R> {
    /// Panics if the well is too small for an I piece; validate
    /// untrusted configs first.
    pub fn new(config: TetrisConfig, rng: R) -> Self {
        assert!(
            config.width >= 4 && config.height >= 4,
            "a {}x{} well cannot hold an I piece",
            config.width,
            config.height
        );
        let well = Well::new(config.height, config.width);
        let queue = PieceQueue::new(config.randomizer);
        Self {
            config,
            well,
            current: None,
            next: None,
            score: 0,
            lines: 0,
            level: 1,
            status: Status::NotStarted,
            paused: false,
            high: 0,
            queue,
            rng,
        }
    }

    #[must_use]
    pub fn well(&self) -> &Well {
        &self.well
    }

    #[must_use]
    pub fn current(&self) -> Option<ActivePiece> {
        self.current
    }

    /// Preview of the piece after the current one.
    #[must_use]
    pub fn next_piece(&self) -> Option<Tetromino> {
        self.next
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn lines(&self) -> u32 {
        self.lines
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high
    }

    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        drop_interval(self.level)
    }

    /// Start (or restart) a game on an empty well.
    pub fn start(&mut self) {
        self.well = Well::new(self.config.height, self.config.width);
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.paused = false;
        self.current = None;
        self.queue.clear();
        self.next = Some(self.queue.next(&mut self.rng));
        self.status = Status::InProgress;
        self.spawn();
    }

    pub fn move_left(&mut self) -> Result<bool, MoveError> {
        self.shift(-1)
    }

    pub fn move_right(&mut self) -> Result<bool, MoveError> {
        self.shift(1)
    }

    /// Rotate clockwise in place. Rejected (returns `false`) if the rotated
    /// piece does not fit; there are no wall kicks.
    pub fn rotate(&mut self) -> Result<bool, MoveError> {
        let piece = self.active()?;
        let turned = ActivePiece {
            rotation: (piece.rotation + 1) % 4,
            ..piece
        };
        Ok(self.try_place(turned))
    }

    /// Move down one row, locking the piece if it cannot.
    pub fn soft_drop(&mut self) -> Result<Fall, MoveError> {
        let piece = self.active()?;
        let lower = ActivePiece {
            y: piece.y + 1,
            ..piece
        };
        if self.try_place(lower) {
            return Ok(Fall::Moved);
        }
        Ok(Fall::Locked {
            cleared: self.lock(piece),
        })
    }

    /// Gravity step; same as a soft drop.
    pub fn tick(&mut self) -> Result<Fall, MoveError> {
        self.soft_drop()
    }

    /// Drop straight to the lowest fitting row and lock. Returns the
    /// number of rows cleared.
    pub fn hard_drop(&mut self) -> Result<usize, MoveError> {
        let mut piece = self.active()?;
        piece.y += self.drop_distance(&piece);
        Ok(self.lock(piece))
    }

    /// Rows the current piece can still fall.
    #[must_use]
    pub fn ghost_y(&self) -> Option<i32> {
        self.current.map(|p| p.y + self.drop_distance(&p))
    }

    /// Pause or resume. Returns the new paused state.
    pub fn toggle_pause(&mut self) -> Result<bool, MoveError> {
        match self.status {
            Status::NotStarted => Err(MoveError::NotStarted),
            s if s.is_over() => Err(MoveError::GameOver),
            _ => {
                self.paused = !self.paused;
                Ok(self.paused)
            }
        }
    }

    /// The well with the falling piece drawn in.
    #[must_use]
    pub fn render(&self) -> Grid<Option<Tetromino>> {
        let mut grid = Grid::new(self.well.height(), self.well.width(), |at| {
            self.well.get(at.row, at.col)
        });
        if let Some(piece) = self.current {
            for cell in filled_cells(&piece.shape()) {
                let (by, bx) = (piece.y + cell.row as i32, piece.x + cell.col as i32);
                if by < 0 || bx < 0 {
                    continue;
                }
                if let Some(slot) = grid.get_mut(Coord::new(by as usize, bx as usize)) {
                    *slot = Some(piece.kind);
                }
            }
        }
        grid
    }

    fn active(&self) -> Result<ActivePiece, MoveError> {
        match self.status {
            Status::NotStarted => return Err(MoveError::NotStarted),
            s if s.is_over() => return Err(MoveError::GameOver),
            _ => {}
        }
        if self.paused {
            return Err(MoveError::Paused);
        }
        self.current.ok_or(MoveError::GameOver)
    }

    fn shift(&mut self, dx: i32) -> Result<bool, MoveError> {
        let piece = self.active()?;
        Ok(self.try_place(ActivePiece {
            x: piece.x + dx,
            ..piece
        }))
    }

    fn try_place(&mut self, piece: ActivePiece) -> bool {
        let fits = self.well.is_valid_placement(&piece.shape(), piece.x, piece.y);
        if fits {
            self.current = Some(piece);
        }
        fits
    }

    fn drop_distance(&self, piece: &ActivePiece) -> i32 {
        let shape = piece.shape();
        let mut distance = 0;
        while self
            .well
            .is_valid_placement(&shape, piece.x, piece.y + distance + 1)
        {
            distance += 1;
        }
        distance
    }

    fn lock(&mut self, piece: ActivePiece) -> usize {
        let cleared = self
            .well
            .lock_piece(&piece.shape(), piece.x, piece.y, piece.kind);

        if cleared > 0 {
            self.score += line_clear_score(cleared, self.level);
            self.lines += cleared as u32;
            self.level = level_for(self.lines);
            debug!(cleared, score = self.score, level = self.level, "lines cleared");
        }

        self.current = None;
        self.spawn();
        cleared
    }

    fn spawn(&mut self) {
        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.queue.next(&mut self.rng),
        };
        self.next = Some(self.queue.next(&mut self.rng));

        let width = kind.spawn_shape().cols();
        let piece = ActivePiece {
            kind,
            rotation: 0,
            x: ((self.well.width() - width) / 2) as i32,
            y: 0,
        };

        if !self.try_place(piece) {
            self.status = Status::Lost;
            self.high = self.high.max(self.score);
            info!(
                score = self.score,
                lines = self.lines,
                level = self.level,
                "tetris game over"
            );
        }
    }
}

impl<R: RandomSource> Persistent for Tetris<R> {
    const KEY: &'static str = keys::TETRIS_HIGH_SCORE;
    type Record = u32;

    fn record(&self) -> u32 {
        self.high
    }

    fn restore(&mut self, record: u32) {
        self.high = record;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SequenceSource;

    /// Deals only O pieces.
    fn o_only() -> Tetris<SequenceSource> {
        Tetris::new(TetrisConfig::default(), SequenceSource::new([1]))
    }

    #[test]
    #[should_panic(expected = "cannot hold an I piece")]
    fn test_narrow_well_is_rejected() {
        let config = TetrisConfig::default().with_size(3, 20);
        assert!(config.validate().is_err());
        let _ = Tetris::new(config, SequenceSource::new([1]));
    }

    #[test]
    fn test_not_started_rejects_input() {
        let mut game = o_only();
        assert_eq!(game.move_left(), Err(MoveError::NotStarted));
        assert_eq!(game.toggle_pause(), Err(MoveError::NotStarted));
        assert_eq!(game.current(), None);
    }

    #[test]
    fn test_start_spawns_centered() {
        let mut game = o_only();
        game.start();

        let piece = game.current().unwrap();
        assert_eq!(piece.kind, Tetromino::O);
        assert_eq!((piece.x, piece.y, piece.rotation), (4, 0, 0));
        assert_eq!(game.next_piece(), Some(Tetromino::O));
        assert_eq!(game.status(), Status::InProgress);
        assert_eq!(game.drop_interval(), Duration::from_millis(1000));
    }

    #[test]
    fn test_walls_stop_sideways_moves() {
        let mut game = o_only();
        game.start();
        for _ in 0..4 {
            assert_eq!(game.move_left(), Ok(true));
        }
        assert_eq!(game.move_left(), Ok(false));
        assert_eq!(game.current().unwrap().x, 0);
    }

    #[test]
    fn test_rotate_rejected_without_room() {
        // I spawns flat at x = 3; upright it needs all four rows of one column.
        let mut game = Tetris::new(
            TetrisConfig::default().with_size(10, 4),
            SequenceSource::new([0]),
        );
        game.start();
        game.hard_drop().unwrap();
        assert_eq!(game.well().row(3)[3..7], [Some(Tetromino::I); 4]);

        assert_eq!(game.rotate(), Ok(false));
        assert_eq!(game.current().unwrap().rotation, 0);

        assert_eq!(game.move_left(), Ok(true));
        assert_eq!(game.rotate(), Ok(true));
        let piece = game.current().unwrap();
        assert_eq!((piece.rotation, piece.x, piece.y), (1, 2, 0));
    }

    #[test]
    fn test_hard_drop_locks_at_floor() {
        let mut game = o_only();
        game.start();
        assert_eq!(game.ghost_y(), Some(18));
        assert_eq!(game.hard_drop(), Ok(0));

        assert_eq!(game.well().get(19, 4), Some(Tetromino::O));
        assert_eq!(game.well().get(18, 5), Some(Tetromino::O));
        assert_eq!(game.well().filled(), 4);
        assert_eq!(game.current().unwrap().y, 0);
    }

    #[test]
    fn test_soft_drop_locks_when_blocked() {
        let mut game = o_only();
        game.start();
        for _ in 0..18 {
            assert_eq!(game.tick(), Ok(Fall::Moved));
        }
        assert_eq!(game.tick(), Ok(Fall::Locked { cleared: 0 }));
        assert_eq!(game.well().filled(), 4);
    }

    #[test]
    fn test_clearing_two_rows_scores() {
        let mut game = o_only();
        game.start();
        // Five O pieces side by side fill the bottom two rows.
        for target in [0, 2, 4, 6, 8] {
            let x = game.current().unwrap().x;
            for _ in 0..(x - target).abs() {
                if target < x {
                    game.move_left().unwrap();
                } else {
                    game.move_right().unwrap();
                }
            }
            game.hard_drop().unwrap();
        }

        assert_eq!(game.lines(), 2);
        assert_eq!(game.score(), 300);
        assert_eq!(game.well().filled(), 0);
    }

    #[test]
    fn test_pause_blocks_moves() {
        let mut game = o_only();
        game.start();
        assert_eq!(game.toggle_pause(), Ok(true));
        assert_eq!(game.tick(), Err(MoveError::Paused));
        assert_eq!(game.hard_drop(), Err(MoveError::Paused));
        assert_eq!(game.toggle_pause(), Ok(false));
        assert_eq!(game.move_right(), Ok(true));
    }

    #[test]
    fn test_topping_out_ends_game() {
        let mut game = Tetris::new(
            TetrisConfig::default().with_size(4, 4),
            SequenceSource::new([1]),
        );
        game.start();
        game.restore(10);

        // Two O pieces stack to the top of a 4-high well at x = 1.
        game.hard_drop().unwrap();
        assert_eq!(game.status(), Status::InProgress);
        game.hard_drop().unwrap();

        assert_eq!(game.status(), Status::Lost);
        assert_eq!(game.current(), None);
        assert_eq!(game.hard_drop(), Err(MoveError::GameOver));
        assert_eq!(game.high_score(), 10);
    }

    #[test]
    fn test_render_overlays_piece() {
        let mut game = o_only();
        game.start();
        let grid = game.render();
        assert_eq!(grid[Coord::new(0, 4)], Some(Tetromino::O));
        assert_eq!(grid[Coord::new(1, 5)], Some(Tetromino::O));
        assert_eq!(grid.values().filter(|c| c.is_some()).count(), 4);
    }
}
