//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the simulation of the falling-block game: the shape
//! catalog, pieces, the board, scoring rules and the engine that ties them
//! together. It has **no dependencies** on terminals, audio, or storage:
//!
//! - **Deterministic**: the same seed produces the same piece sequence
//! - **Testable**: time is passed in as elapsed milliseconds, never read
//! - **Observable**: every transition queues a [`GameEvent`]
//!
//! # Module Structure
//!
//! - [`shapes`]: the seven base matrices and their color tags
//! - [`piece`]: a positioned, rotatable instance of a shape
//! - [`board`]: the grid with collision queries and row clearing
//! - [`rng`]: seedable randomizers
//! - [`scoring`]: line points, level and gravity curve
//! - [`config`]: engine configuration and validation
//! - [`events`]: notifications and move/step outcomes
//! - [`engine`]: the game engine and its phases
//! - [`snapshot`]: read-only copies for renderers
//!
//! # Example
//!
//! ```
//! use falling_blocks_core::{GameEngine, GamePhase};
//! use falling_blocks_core::types::GameCommand;
//!
//! let mut engine = GameEngine::new(12345);
//! engine.start();
//! assert_eq!(engine.phase(), GamePhase::Running);
//!
//! engine.apply(GameCommand::MoveLeft);
//! engine.apply(GameCommand::Rotate);
//! engine.apply(GameCommand::HardDrop);
//!
//! // One piece is now part of the board.
//! assert_eq!(engine.board().filled_count(), 4);
//! ```
//!
//! # Timing
//!
//! Hosts call [`GameEngine::step`] once per frame with the elapsed time.
//! Gravity fires when the accumulated time reaches the current drop interval
//! (1000ms at level 1, 100ms less per level, never below 100ms).

pub mod board;
pub mod config;
pub mod engine;
pub mod events;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use falling_blocks_types as types;

pub use board::Board;
pub use config::{ConfigError, EngineConfig};
pub use engine::{GameEngine, GamePhase};
pub use events::{GameEvent, MoveOutcome, StepOutcome};
pub use piece::{Piece, PieceCells};
pub use rng::{Randomizer, RandomizerKind, SimpleRng};
pub use shapes::{definition_for, random_kind, ShapeDefinition, ShapeMatrix};
pub use snapshot::{GameSnapshot, PieceSnapshot};
