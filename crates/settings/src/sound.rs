//! Sound cues derived from engine events.
//!
//! Playback is the host's business. This module only decides which cue an
//! event maps to and whether the player wants to hear it.

use crate::core::GameEvent;
use crate::prefs::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Move,
    Rotate,
    Drop,
    Clear,
    GameOver,
}

impl SoundCue {
    /// Asset name for hosts that play sampled audio.
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Move => "move",
            SoundCue::Rotate => "rotate",
            SoundCue::Drop => "drop",
            SoundCue::Clear => "clear",
            SoundCue::GameOver => "gameover",
        }
    }
}

/// The cue for `event`, ignoring preferences.
///
/// Gravity and soft drops (`dx == 0`) stay silent; only sideways moves click.
pub fn cue_for_event(event: &GameEvent) -> Option<SoundCue> {
    match *event {
        GameEvent::Moved { dx, .. } if dx != 0 => Some(SoundCue::Move),
        GameEvent::Rotated { success: true } => Some(SoundCue::Rotate),
        GameEvent::Locked { .. } => Some(SoundCue::Drop),
        GameEvent::LinesCleared { count } if count > 0 => Some(SoundCue::Clear),
        GameEvent::GameOver => Some(SoundCue::GameOver),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundBoard {
    enabled: bool,
    music: bool,
    volume: f32,
}

impl SoundBoard {
    pub fn new(enabled: bool, volume: f32) -> Self {
        Self {
            enabled,
            music: false,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    pub fn with_music(mut self, music: bool) -> Self {
        self.music = music;
        self
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.sound_effects, settings.volume).with_music(settings.background_music)
    }

    pub fn is_audible(&self) -> bool {
        self.enabled && self.volume > 0.0
    }

    /// Background music shares the volume with effects but has its own toggle.
    pub fn is_music_playing(&self) -> bool {
        self.music && self.volume > 0.0
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn cue(&self, event: &GameEvent) -> Option<SoundCue> {
        if !self.is_audible() {
            return None;
        }
        cue_for_event(event)
    }

    /// Audible cues for a drained batch of events, in order.
    pub fn cues<'a>(&'a self, events: &'a [GameEvent]) -> impl Iterator<Item = SoundCue> + 'a {
        events.iter().filter_map(move |e| self.cue(e))
    }
}

impl Default for SoundBoard {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn event_mapping() {
        assert_eq!(
            cue_for_event(&GameEvent::Moved { dx: -1, dy: 0 }),
            Some(SoundCue::Move)
        );
        assert_eq!(cue_for_event(&GameEvent::Moved { dx: 0, dy: 1 }), None);
        assert_eq!(
            cue_for_event(&GameEvent::Rotated { success: true }),
            Some(SoundCue::Rotate)
        );
        assert_eq!(cue_for_event(&GameEvent::Rotated { success: false }), None);
        assert_eq!(
            cue_for_event(&GameEvent::Locked { kind: PieceKind::T }),
            Some(SoundCue::Drop)
        );
        assert_eq!(cue_for_event(&GameEvent::LinesCleared { count: 0 }), None);
        assert_eq!(
            cue_for_event(&GameEvent::LinesCleared { count: 2 }),
            Some(SoundCue::Clear)
        );
        assert_eq!(cue_for_event(&GameEvent::GameOver), Some(SoundCue::GameOver));
        assert_eq!(cue_for_event(&GameEvent::Reset), None);
    }

    #[test]
    fn muted_board_is_silent() {
        let events = [GameEvent::GameOver, GameEvent::Locked { kind: PieceKind::I }];
        assert_eq!(SoundBoard::new(false, 1.0).cues(&events).count(), 0);
        assert_eq!(SoundBoard::new(true, 0.0).cues(&events).count(), 0);

        let cues: Vec<_> = SoundBoard::new(true, 0.7).cues(&events).collect();
        assert_eq!(cues, vec![SoundCue::GameOver, SoundCue::Drop]);
    }

    #[test]
    fn music_follows_its_toggle_and_volume() {
        let mut settings = Settings::default();
        assert!(SoundBoard::from_settings(&settings).is_music_playing());

        settings.sound_effects = false;
        assert!(SoundBoard::from_settings(&settings).is_music_playing());

        settings.toggle_background_music();
        assert!(!SoundBoard::from_settings(&settings).is_music_playing());

        assert!(!SoundBoard::new(true, 0.0).with_music(true).is_music_playing());
    }
}
