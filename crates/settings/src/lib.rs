//! Player preferences and sound cues.
//!
//! - [`prefs`]: palette, speed and audio toggles persisted as JSON
//! - [`sound`]: which engine events deserve a sound, gated by preferences

pub mod prefs;
pub mod sound;

pub use falling_blocks_core as core;
pub use falling_blocks_types as types;

pub use prefs::{parse_hex_color, Palette, Settings, SettingsError, SETTINGS_FILE_NAME};
pub use sound::{cue_for_event, SoundBoard, SoundCue};
