//! twenty48-core: the rules of 2048 with no presentation attached.
//!
//! Quick start:
//! ```
//! use twenty48_core::{GameEngine, Move, Status};
//!
//! // Deterministic game via a seeded RNG
//! let mut game = GameEngine::seeded(42);
//! game.start();
//! assert_eq!(game.state().iter().flatten().filter(|&&t| t != 0).count(), 2);
//!
//! for dir in [Move::Left, Move::Up, Move::Right, Move::Down] {
//!     let outcome = game.apply(dir);
//!     assert_eq!(outcome.status, game.status());
//! }
//! assert_ne!(game.status(), Status::Idle);
//! ```
//!
//! For tests, `engine::ScriptedSource` replays exact spawn positions and
//! values, and `GameEngine::from_board` seeds any starting grid.

pub mod engine;
pub mod error;

pub use engine::{Board, GameEngine, Move, MoveOutcome, Status};
pub use error::BoardError;
