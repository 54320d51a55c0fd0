//! Persisted preferences.
//!
//! Saved as pretty JSON. Loading merges whatever fields the file has over
//! the defaults, so older files keep working when fields are added.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{EngineConfig, RandomizerKind};
use crate::types::ColorTag;

pub const SETTINGS_FILE_NAME: &str = "settings.json";

const APP_DIR: &str = "falling-blocks";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Block colors as `#rrggbb` strings, one per color tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub cyan: String,
    pub blue: String,
    pub orange: String,
    pub yellow: String,
    pub green: String,
    pub purple: String,
    pub red: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            cyan: "#00f0f0".to_string(),
            blue: "#0000f0".to_string(),
            orange: "#f0a000".to_string(),
            yellow: "#f0f000".to_string(),
            green: "#00f000".to_string(),
            purple: "#a000f0".to_string(),
            red: "#f00000".to_string(),
        }
    }
}

impl Palette {
    pub fn hex(&self, tag: ColorTag) -> &str {
        match tag {
            ColorTag::Cyan => &self.cyan,
            ColorTag::Blue => &self.blue,
            ColorTag::Orange => &self.orange,
            ColorTag::Yellow => &self.yellow,
            ColorTag::Green => &self.green,
            ColorTag::Purple => &self.purple,
            ColorTag::Red => &self.red,
        }
    }

    /// Parsed color for `tag`, falling back to the default palette when the
    /// stored string is malformed.
    pub fn rgb(&self, tag: ColorTag) -> (u8, u8, u8) {
        parse_hex_color(self.hex(tag))
            .or_else(|| parse_hex_color(Palette::default().hex(tag)))
            .unwrap_or((255, 255, 255))
    }
}

/// Parse `#rrggbb` (leading `#` optional).
pub fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub background_color: String,
    /// Image drawn behind the board by hosts that can show one. The
    /// terminal host only checks that it exists.
    pub background_image: Option<PathBuf>,
    pub palette: Palette,
    /// Gravity interval at level 1.
    pub initial_speed_ms: u32,
    pub sound_effects: bool,
    pub background_music: bool,
    /// 0.0 ..= 1.0
    pub volume: f32,
    pub bag_randomizer: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            background_color: "#000000".to_string(),
            background_image: None,
            palette: Palette::default(),
            initial_speed_ms: 500,
            sound_effects: true,
            background_music: true,
            volume: 0.5,
            bag_randomizer: false,
        }
    }
}

impl Settings {
    /// `<config dir>/falling-blocks/settings.json`, if the platform has a
    /// config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE_NAME))
    }

    /// Load from `path`. A missing file is not an error and yields defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        let settings: Settings = serde_json::from_slice(&bytes)?;
        Ok(settings.sanitized())
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    pub fn sanitized(mut self) -> Self {
        self.volume = if self.volume.is_finite() {
            self.volume.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self
    }

    /// Flip sound effects and return the new state.
    pub fn toggle_sound_effects(&mut self) -> bool {
        self.sound_effects = !self.sound_effects;
        self.sound_effects
    }

    /// Flip background music and return the new state.
    pub fn toggle_background_music(&mut self) -> bool {
        self.background_music = !self.background_music;
        self.background_music
    }

    /// The configured background image, if set but not a readable file.
    pub fn missing_background_image(&self) -> Option<&Path> {
        self.background_image
            .as_deref()
            .filter(|path| !path.is_file())
    }

    pub fn background_rgb(&self) -> (u8, u8, u8) {
        parse_hex_color(&self.background_color).unwrap_or((0, 0, 0))
    }

    /// Engine rules with the player's starting speed and randomizer.
    ///
    /// The starting interval never drops below the gravity floor, so the
    /// result always validates.
    pub fn engine_config(&self) -> EngineConfig {
        let base = EngineConfig::default();
        let initial = self.initial_speed_ms.max(base.min_drop_interval_ms);
        let randomizer = if self.bag_randomizer {
            RandomizerKind::SevenBag
        } else {
            RandomizerKind::Uniform
        };
        base.with_initial_drop_interval(initial)
            .with_randomizer(randomizer)
    }
}
