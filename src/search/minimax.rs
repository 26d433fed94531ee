//! Minimax with alpha-beta pruning over two-player placement games.
//!
//! The searcher is generic over the board: anything implementing
//! [`Adversarial`] can be searched. Placements are made and undone in place
//! on a scratch copy, so the caller's board is never touched.

use std::time::Instant;

use smallvec::SmallVec;
use tracing::{debug, instrument};

use crate::core::{Coord, Side};

use super::config::SearchConfig;
use super::stats::SearchStats;

/// Legal moves of one position, in scan order.
pub type MoveList<M> = SmallVec<[M; 9]>;

/// A two-player game in which every move places one piece on a grid.
///
/// ## Implementation Notes
///
/// - `moves`: legal moves in the order ties should be broken
/// - `play`/`unplay`: must restore the exact prior position
/// - `completes_line`: whether the piece at `at` is part of a winning line
/// - `evaluate`: only called at the depth limit; exhaustive games can keep
///   the default
pub trait Adversarial: Clone {
    type Move: Copy + std::fmt::Debug + PartialEq;

    /// Legal moves in scan order. Empty when the board is full.
    fn moves(&self) -> MoveList<Self::Move>;

    /// Place a piece for `side`, returning the cell it landed on.
    fn play(&mut self, mv: Self::Move, side: Side) -> Coord;

    /// Remove the piece at `at`.
    fn unplay(&mut self, at: Coord);

    /// Whether the piece at `at` completes a winning line.
    fn completes_line(&self, at: Coord) -> bool;

    /// Whether no legal move remains.
    fn is_full(&self) -> bool;

    /// Heuristic value of the position for `side`.
    fn evaluate(&self, _side: Side) -> i32 {
        0
    }
}

/// Minimax searcher.
///
/// ```
/// use rust_arcade::core::Side;
/// use rust_arcade::games::tictactoe::Board;
/// use rust_arcade::search::{Minimax, SearchConfig};
///
/// let board = Board::parse("XX. .O. ...");
/// let mut search = Minimax::new(SearchConfig::exhaustive());
/// assert_eq!(search.best_move(&board, Side::Second), Some(2));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Minimax {
    config: SearchConfig,
    stats: SearchStats,
}

impl Minimax {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            stats: SearchStats::default(),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Statistics of the most recent search.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Choose the move maximizing `side`'s minimax value.
    ///
    /// Returns `None` only if there is no legal move. Ties go to the first
    /// move in `moves()` order.
    #[instrument(level = "debug", skip_all, fields(side = ?side))]
    pub fn best_move<G: Adversarial>(&mut self, game: &G, side: Side) -> Option<G::Move> {
        let start = Instant::now();
        self.stats.reset();

        let mut scratch = game.clone();
        let mut best: Option<(G::Move, i32)> = None;
        let mut alpha = i32::MIN;

        for mv in scratch.moves() {
            let at = scratch.play(mv, side);
            let score = self.value(&mut scratch, side, side, at, 0, alpha, i32::MAX);
            scratch.unplay(at);

            if best.map_or(true, |(_, b)| score > b) {
                best = Some((mv, score));
            }
            if self.config.alpha_beta {
                alpha = alpha.max(score);
            }
        }

        self.stats.time_us = start.elapsed().as_micros() as u64;
        if let Some((mv, score)) = best {
            debug!(
                ?mv,
                score,
                nodes = self.stats.nodes,
                cutoffs = self.stats.cutoffs,
                time_us = self.stats.time_us,
                "search complete"
            );
        }
        best.map(|(mv, _)| mv)
    }

    /// Exact minimax value of every legal move for `side`, in scan order.
    ///
    /// Unlike `best_move`, the root window is never narrowed, so every
    /// score is exact. Useful for hints and for testing.
    pub fn score_moves<G: Adversarial>(&mut self, game: &G, side: Side) -> Vec<(G::Move, i32)> {
        self.stats.reset();
        let mut scratch = game.clone();

        scratch
            .moves()
            .into_iter()
            .map(|mv| {
                let at = scratch.play(mv, side);
                let score = self.value(&mut scratch, side, side, at, 0, i32::MIN, i32::MAX);
                scratch.unplay(at);
                (mv, score)
            })
            .collect()
    }

    /// Value for `ai` of the position after `mover` placed at `at`,
    /// `ply` placements below the root move.
    #[allow(clippy::too_many_arguments)]
    fn value<G: Adversarial>(
        &mut self,
        game: &mut G,
        ai: Side,
        mover: Side,
        at: Coord,
        ply: u32,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.stats.nodes += 1;
        self.stats.max_ply = self.stats.max_ply.max(ply);

        let win = self.config.win_score;
        if game.completes_line(at) {
            return if mover == ai {
                win - ply as i32
            } else {
                ply as i32 - win
            };
        }
        if game.is_full() {
            return 0;
        }
        if self.config.max_depth.is_some_and(|limit| ply >= limit) {
            self.stats.heuristic_leaves += 1;
            return game.evaluate(ai);
        }

        let to_move = mover.other();
        let maximizing = to_move == ai;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for mv in game.moves() {
            let placed = game.play(mv, to_move);
            let score = self.value(game, ai, to_move, placed, ply + 1, alpha, beta);
            game.unplay(placed);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if self.config.alpha_beta && beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        best
    }
}
