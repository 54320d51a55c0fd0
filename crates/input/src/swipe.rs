//! Swipe gestures.
//!
//! A swipe is judged on its dominant axis once it ends. Horizontal swipes
//! move the piece, a downward swipe soft-drops, an upward swipe rotates.
//! Swipes no longer than the minimum distance on their dominant axis are
//! ignored, so taps do nothing.

use crate::types::GameCommand;

/// Minimum travel, in touch units, for a swipe to count.
pub const DEFAULT_MIN_SWIPE_DISTANCE: f32 = 30.0;

/// Classify a gesture from its total travel (`dx`, `dy`).
///
/// Positive `dy` points down the screen. Ties go to the vertical axis.
pub fn classify_swipe(dx: f32, dy: f32, min_distance: f32) -> Option<GameCommand> {
    if dx.abs() > dy.abs() {
        if dx.abs() <= min_distance {
            return None;
        }
        if dx > 0.0 {
            Some(GameCommand::MoveRight)
        } else {
            Some(GameCommand::MoveLeft)
        }
    } else {
        if dy.abs() <= min_distance {
            return None;
        }
        if dy > 0.0 {
            Some(GameCommand::SoftDrop)
        } else {
            Some(GameCommand::Rotate)
        }
    }
}

/// Tracks one gesture from press to release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeTracker {
    min_distance: f32,
    /// Multiplier applied to horizontal travel before classification.
    x_scale: f32,
    start: Option<(f32, f32)>,
}

impl SwipeTracker {
    pub fn new(min_distance: f32) -> Self {
        Self {
            min_distance,
            x_scale: 1.0,
            start: None,
        }
    }

    /// Scale horizontal travel, e.g. 0.5 for terminal cells twice as tall
    /// as they are wide.
    pub fn with_x_scale(mut self, x_scale: f32) -> Self {
        self.x_scale = x_scale;
        self
    }

    pub fn begin(&mut self, x: f32, y: f32) {
        self.start = Some((x, y));
    }

    /// Finish the gesture at (`x`, `y`). A release without a press is ignored.
    pub fn end(&mut self, x: f32, y: f32) -> Option<GameCommand> {
        let (sx, sy) = self.start.take()?;
        classify_swipe((x - sx) * self.x_scale, y - sy, self.min_distance)
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }

    pub fn in_progress(&self) -> bool {
        self.start.is_some()
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SWIPE_DISTANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_swipes_move() {
        assert_eq!(classify_swipe(45.0, 10.0, 30.0), Some(GameCommand::MoveRight));
        assert_eq!(classify_swipe(-45.0, -10.0, 30.0), Some(GameCommand::MoveLeft));
    }

    #[test]
    fn vertical_swipes_drop_or_rotate() {
        assert_eq!(classify_swipe(5.0, 60.0, 30.0), Some(GameCommand::SoftDrop));
        assert_eq!(classify_swipe(5.0, -60.0, 30.0), Some(GameCommand::Rotate));
    }

    #[test]
    fn short_swipes_are_ignored() {
        assert_eq!(classify_swipe(30.0, 0.0, 30.0), None);
        assert_eq!(classify_swipe(0.0, -12.0, 30.0), None);
        assert_eq!(classify_swipe(0.0, 0.0, 30.0), None);
    }

    #[test]
    fn tracker_scales_horizontal_travel() {
        let mut tracker = SwipeTracker::new(2.0).with_x_scale(0.5);
        tracker.begin(10.0, 5.0);
        // 4 columns scale to 2.0, not beyond the minimum.
        assert_eq!(tracker.end(14.0, 5.0), None);

        tracker.begin(10.0, 5.0);
        assert_eq!(tracker.end(16.0, 5.0), Some(GameCommand::MoveRight));
        assert!(!tracker.in_progress());
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut tracker = SwipeTracker::default();
        assert_eq!(tracker.end(100.0, 0.0), None);
    }

    #[test]
    fn cancelled_drag_does_not_swipe() {
        let mut tracker = SwipeTracker::new(2.0);
        tracker.begin(0.0, 0.0);
        assert!(tracker.in_progress());
        tracker.cancel();
        assert!(!tracker.in_progress());
        assert_eq!(tracker.end(0.0, 40.0), None);
    }
}
