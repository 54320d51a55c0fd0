//! Input module (engine-facing).
//!
//! Translates raw host input into [`crate::types::GameCommand`]s:
//!
//! - [`map`]: keyboard events from `crossterm`
//! - [`swipe`]: drag/touch gestures classified by dominant axis
//!
//! Nothing here touches the engine; hosts apply the returned commands.

pub mod map;
pub mod swipe;

pub use falling_blocks_types as types;

pub use map::{handle_key_event, is_music_toggle, is_sound_toggle, should_quit};
pub use swipe::{classify_swipe, SwipeTracker, DEFAULT_MIN_SWIPE_DISTANCE};
