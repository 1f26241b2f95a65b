use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::ops;
use super::rng::TileSource;
use super::state::{Board, Grid, Move, Score, Status, Tile};
use crate::error::BoardError;

/// What a single move did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// False when no line changed; board, score and status are then untouched.
    pub moved: bool,
    /// Points earned from merges in this move.
    pub gained: Score,
    /// Status after the move.
    pub status: Status,
}

/// A single game of 2048: board, score and status plus the random source
/// used for tile spawns.
///
/// Moves are always applied regardless of status. Front-ends decide whether to
/// forward input once the game is won or lost.
///
/// ```
/// use twenty48_core::{GameEngine, Status};
///
/// let mut game = GameEngine::seeded(7);
/// assert_eq!(game.status(), Status::Idle);
/// game.start();
/// assert_eq!(game.status(), Status::Playing);
/// let before = game.state();
/// let outcome = game.move_left();
/// if !outcome.moved {
///     assert_eq!(game.state(), before);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct GameEngine<R = StdRng> {
    board: Board,
    score: Score,
    status: Status,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Empty board, idle, entropy-seeded RNG.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Empty board, idle, RNG seeded from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Start from a caller-supplied grid. The rows are validated and copied.
    pub fn with_board<T: AsRef<[i64]>>(rows: &[T]) -> Result<Self, BoardError> {
        let board = Board::from_rows(rows)?;
        Ok(Self::from_board(board, StdRng::from_entropy()))
    }
}

impl Default for GameEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: TileSource> GameEngine<R> {
    /// Empty board, idle, spawning tiles from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self::from_board(Board::EMPTY, rng)
    }

    /// Seeded board and random source, both supplied by the caller.
    pub fn from_board(board: Board, rng: R) -> Self {
        Self {
            board,
            score: 0,
            status: Status::Idle,
            rng,
        }
    }

    /// Reset score and board, place two tiles and begin playing.
    pub fn start(&mut self) {
        self.score = 0;
        self.status = Status::Playing;
        self.board = Board::EMPTY;
        for _ in 0..2 {
            self.spawn();
        }
        info!("game started: {:?}", self.board.rows());
    }

    /// Same as [`start`](Self::start).
    #[inline]
    pub fn restart(&mut self) {
        self.start();
    }

    #[inline]
    pub fn move_left(&mut self) -> MoveOutcome {
        self.apply(Move::Left)
    }

    #[inline]
    pub fn move_right(&mut self) -> MoveOutcome {
        self.apply(Move::Right)
    }

    #[inline]
    pub fn move_up(&mut self) -> MoveOutcome {
        self.apply(Move::Up)
    }

    #[inline]
    pub fn move_down(&mut self) -> MoveOutcome {
        self.apply(Move::Down)
    }

    /// Slide in `direction`. When anything moved, add the merge points, spawn
    /// one tile and re-evaluate the status.
    pub fn apply(&mut self, direction: Move) -> MoveOutcome {
        let slide = ops::shift(self.board, direction);
        if !slide.moved {
            debug!("move {:?}: no change", direction);
            return MoveOutcome {
                moved: false,
                gained: 0,
                status: self.status,
            };
        }

        self.board = slide.board;
        self.score += slide.gained;
        self.spawn();

        let prev = self.status;
        self.status = ops::evaluate_status(self.board);
        debug!(
            "move {:?}: gained={} score={} status={}",
            direction, slide.gained, self.score, self.status
        );
        if self.status != prev && self.status.is_terminal() {
            info!(
                "game over ({}): score={} highest={}",
                self.status,
                self.score,
                self.board.highest_tile()
            );
        }

        MoveOutcome {
            moved: true,
            gained: slide.gained,
            status: self.status,
        }
    }

    fn spawn(&mut self) {
        if let Some(spawn) = ops::insert_random_tile(&mut self.board, &mut self.rng) {
            debug!("spawned {} at ({}, {})", spawn.value, spawn.row, spawn.col);
        }
    }
}

impl<R> GameEngine<R> {
    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }

    /// Copy of the current grid. Changing it never affects the engine.
    #[inline]
    pub fn state(&self) -> Grid {
        self.board.rows()
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn board(&self) -> Board {
        self.board
    }

    #[inline]
    pub fn highest_tile(&self) -> Tile {
        self.board.highest_tile()
    }

    /// True if sliding in `direction` would change the board.
    pub fn can_move(&self, direction: Move) -> bool {
        ops::shift(self.board, direction).moved
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        ops::legal_moves(self.board)
    }
}
