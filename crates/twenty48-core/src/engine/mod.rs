//! Engine module: 4x4 2048 board, the line slide/merge routine, tile spawns
//! and the `GameEngine` that ties them to a score and status.
//!
//! - `Board` is the plain 4x4 grid with useful methods.
//! - Free functions mirror the methods when convenient (e.g., `shift`).
//! - Random spawns go through `TileSource`, so any `rand::Rng` or a
//!   `ScriptedSource` can drive them.

mod game;
mod ops;
mod rng;
pub mod state;

pub use game::{GameEngine, MoveOutcome};
pub use rng::{ScriptedSource, TileSource};
pub use state::{Board, Grid, Move, Score, Slide, Spawn, Status, Tile, MAX_TILE, SIZE, WIN_TILE};

pub use ops::{
    count_empty, empty_cells, evaluate_status, get_highest_tile_val, has_adjacent_pair, has_tile,
    insert_random_tile, is_game_over, legal_moves, shift, slide_line, Line, LineSlide,
};
