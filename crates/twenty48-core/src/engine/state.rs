use std::fmt;

use super::ops;
use super::rng::TileSource;
use crate::error::BoardError;
use serde::{Deserialize, Serialize};

/// Side length of the board.
pub const SIZE: usize = 4;

/// Tile value that wins the game.
pub const WIN_TILE: Tile = 2048;

/// Largest tile accepted in a seeded board (2^30).
///
/// Merges may grow tiles past this; it only bounds caller input.
pub const MAX_TILE: Tile = 1 << 30;

pub type Tile = u32;
pub type Score = u64;

/// Plain row-major grid of tile values; 0 is an empty cell.
pub type Grid = [[Tile; SIZE]; SIZE];

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];
}

/// Lifecycle of a single game.
///
/// `Idle` until the first `start`, `Playing` while moves remain, then `Win`
/// once a 2048 tile shows up or `Lose` when the board is full and stuck.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Idle,
    Playing,
    Win,
    Lose,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Playing => "playing",
            Status::Win => "win",
            Status::Lose => "lose",
        }
    }

    /// True for `Win` and `Lose`.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Win | Status::Lose)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of sliding a whole board in one direction, before any tile spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slide {
    pub board: Board,
    /// Sum of every tile produced by a merge.
    pub gained: Score,
    /// True if at least one line changed.
    pub moved: bool,
}

/// A tile placed by the spawn procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn {
    pub row: usize,
    pub col: usize,
    pub value: Tile,
}

/// 4x4 2048 board holding actual tile values.
///
/// Every non-zero cell is a power of two. The only ways to build a `Board`
/// from outside the crate go through validation, which also caps seeded
/// tiles at [`MAX_TILE`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board(pub(crate) Grid);

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board([[0; SIZE]; SIZE]);

    /// Validate and copy a caller-supplied grid.
    ///
    /// Rows may be any slice-like type so both `Vec<Vec<_>>` and fixed arrays
    /// work. Values are taken as `i64` so that negative input can be reported
    /// instead of wrapping.
    ///
    /// ```
    /// use twenty48_core::engine::Board;
    /// use twenty48_core::BoardError;
    ///
    /// let rows: [[i64; 4]; 4] = [[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 4]];
    /// let b = Board::from_rows(&rows).unwrap();
    /// assert_eq!(b.count_empty(), 14);
    ///
    /// let ragged: Vec<Vec<i64>> = vec![vec![2, 0, 0], vec![0; 4], vec![0; 4], vec![0; 4]];
    /// let err = Board::from_rows(&ragged);
    /// assert!(matches!(err, Err(BoardError::InvalidBoardShape { .. })));
    /// ```
    pub fn from_rows<R: AsRef<[i64]>>(rows: &[R]) -> Result<Self, BoardError> {
        if rows.len() != SIZE {
            return Err(BoardError::InvalidBoardShape {
                rows: rows.len(),
                row: None,
                len: None,
            });
        }
        let mut grid = [[0; SIZE]; SIZE];
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != SIZE {
                return Err(BoardError::InvalidBoardShape {
                    rows: rows.len(),
                    row: Some(r),
                    len: Some(row.len()),
                });
            }
            for (c, &value) in row.iter().enumerate() {
                grid[r][c] = checked_tile(value).ok_or(BoardError::InvalidTileValue {
                    row: r,
                    col: c,
                    value,
                })?;
            }
        }
        Ok(Board(grid))
    }

    /// Copy of the underlying grid.
    #[inline]
    pub fn rows(&self) -> Grid {
        self.0
    }

    /// Tile value at `(row, col)`, 0 if empty.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Tile {
        self.0[row][col]
    }

    /// Return the board resulting from sliding/merging tiles in `dir` (no random insert).
    ///
    /// ```
    /// use twenty48_core::engine::{Board, Move};
    ///
    /// let rows: [[i64; 4]; 4] = [[2, 2, 2, 2], [0; 4], [0; 4], [0; 4]];
    /// let b = Board::from_rows(&rows).unwrap();
    /// let slide = b.shift(Move::Left);
    /// assert_eq!(slide.board.rows()[0], [4, 4, 0, 0]);
    /// assert_eq!(slide.gained, 8);
    /// ```
    #[inline]
    pub fn shift(self, dir: Move) -> Slide {
        ops::shift(self, dir)
    }

    /// Insert a random 2 (90%) or 4 (10%) tile into a random empty slot.
    ///
    /// Returns the board unchanged when it is full.
    ///
    /// Deterministic example using a seeded RNG:
    /// ```
    /// use twenty48_core::engine::Board;
    /// use rand::{SeedableRng, rngs::StdRng};
    ///
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let b = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// assert_eq!(b.count_empty(), 14);
    /// ```
    #[inline]
    pub fn with_random_tile<S: TileSource + ?Sized>(mut self, source: &mut S) -> Self {
        ops::insert_random_tile(&mut self, source);
        self
    }

    /// True if the board is full and no adjacent pair can merge.
    ///
    /// ```
    /// use twenty48_core::engine::Board;
    /// // Empty cells always leave room to play.
    /// assert!(!Board::EMPTY.is_game_over());
    /// ```
    #[inline]
    pub fn is_game_over(self) -> bool {
        ops::is_game_over(self)
    }

    /// Return the highest tile value present on the board (0 if empty).
    #[inline]
    pub fn highest_tile(self) -> Tile {
        ops::get_highest_tile_val(self)
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(self) -> usize {
        ops::count_empty(self)
    }

    /// Sum of all tile values.
    #[inline]
    pub fn tile_sum(self) -> u64 {
        self.tiles().map(u64::from).sum()
    }

    /// Iterate over tile values in row-major order.
    #[inline]
    pub fn tiles(self) -> TilesIter {
        TilesIter {
            grid: self.0,
            idx: 0,
        }
    }
}

/// Accepts 0 or a power of two in `2..=MAX_TILE`.
fn checked_tile(value: i64) -> Option<Tile> {
    if value == 0 {
        return Some(0);
    }
    let tile = Tile::try_from(value).ok()?;
    (tile >= 2 && tile <= MAX_TILE && tile.is_power_of_two()).then_some(tile)
}

impl TryFrom<Grid> for Board {
    type Error = BoardError;

    fn try_from(grid: Grid) -> Result<Self, Self::Error> {
        let rows = grid.map(|row| row.map(i64::from));
        Board::from_rows(&rows)
    }
}

impl TryFrom<Vec<Vec<i64>>> for Board {
    type Error = BoardError;

    fn try_from(rows: Vec<Vec<i64>>) -> Result<Self, Self::Error> {
        Board::from_rows(&rows)
    }
}

impl From<Board> for Grid {
    fn from(b: Board) -> Self {
        b.0
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.0)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.0.iter().enumerate() {
            if r > 0 {
                writeln!(f, "{}", "-".repeat(SIZE * 8 - 1))?;
            }
            let cells: Vec<String> = row.iter().map(|&v| ops::format_val(v)).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

/// Iterator over board tiles in row-major order.
pub struct TilesIter {
    grid: Grid,
    idx: usize,
}

impl Iterator for TilesIter {
    type Item = Tile;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= SIZE * SIZE {
            return None;
        }
        let v = self.grid[self.idx / SIZE][self.idx % SIZE];
        self.idx += 1;
        Some(v)
    }
}

impl IntoIterator for Board {
    type Item = Tile;
    type IntoIter = TilesIter;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.tiles()
    }
}

impl IntoIterator for &Board {
    type Item = Tile;
    type IntoIter = TilesIter;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.tiles()
    }
}
