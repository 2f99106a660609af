//! State machine for a box-pushing puzzle: tiles, move and push rules,
//! completion detection and undo, plus the built-in level catalog.
//!
//! Rendering and input live outside this crate; they drive a [`GameState`]
//! and re-query it after each [`Change`].

pub mod direction;
pub mod game;
pub mod grid;
pub mod history;
pub mod levels;
pub mod tile;

pub use direction::{ALL_DIRECTIONS, Direction};
pub use game::{Change, ChangeListener, GameState, MoveOutcome};
pub use grid::{Grid, Position};
pub use history::{Action, HistoryError, MoveLog, parse_moves};
pub use levels::{Level, LevelCatalog, LevelError};
pub use tile::Tile;
