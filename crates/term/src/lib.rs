//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It skips widget
//! toolkits and draws into a plain character canvas that is flushed to the
//! terminal, which keeps control over aspect ratio (2 chars per board cell).
//!
//! - [`fb`]: styled character canvas
//! - [`game_view`]: snapshot to canvas, no I/O
//! - [`effects`]: combo banner state fed by engine events
//! - [`renderer`]: raw mode, alternate screen, frame encoding, bell

pub mod effects;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use falling_blocks_core as core;
pub use falling_blocks_settings as settings;
pub use falling_blocks_types as types;

pub use effects::{ComboTracker, COMBO_BANNER_MS};
pub use fb::{Attrs, Canvas, Cell, Rect, Rgb, Style};
pub use game_view::{GameView, Hud, Theme, Viewport};
pub use renderer::{encode_frame, rings_bell, FrameKind, FrameStats, TerminalRenderer};
