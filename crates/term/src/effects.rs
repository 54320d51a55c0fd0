//! Presentation-only effects layered on top of engine events.

use crate::core::GameEvent;

/// How long a combo banner stays up after the clear that armed it.
pub const COMBO_BANNER_MS: u32 = 1000;

/// Counts consecutive clearing locks.
///
/// Fed from drained engine events; the engine itself knows nothing about
/// combos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComboTracker {
    combo: u32,
    timer_ms: u32,
}

impl ComboTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::LinesCleared { count } if count > 0 => {
                self.combo += 1;
                self.timer_ms = COMBO_BANNER_MS;
            }
            GameEvent::LinesCleared { .. } => self.combo = 0,
            GameEvent::Reset => *self = Self::default(),
            _ => {}
        }
    }

    pub fn observe_all(&mut self, events: &[GameEvent]) {
        for event in events {
            self.observe(event);
        }
    }

    /// Advance the banner timer by one frame.
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.timer_ms = self.timer_ms.saturating_sub(elapsed_ms);
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Combo count to announce, if the banner is showing.
    pub fn banner(&self) -> Option<u32> {
        (self.combo > 1 && self.timer_ms > 0).then_some(self.combo)
    }
}
