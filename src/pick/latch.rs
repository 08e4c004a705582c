use std::time::{Duration, Instant};

/// Remembers when the constrain key went down, to tell a tap from a hold.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstrainLatch {
    pressed_at: Option<Instant>,
}

impl ConstrainLatch {
    /// Records a key press.
    pub fn press(&mut self, at: Instant) {
        self.pressed_at = Some(at);
    }

    /// Consumes the press and reports whether the key was held for longer
    /// than `threshold`.
    pub fn release(&mut self, at: Instant, threshold: Duration) -> bool {
        self.pressed_at
            .take()
            .is_some_and(|pressed| at.saturating_duration_since(pressed) > threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: Duration = Duration::from_millis(500);

    #[test]
    fn tap_is_not_a_hold() {
        let start = Instant::now();
        let mut latch = ConstrainLatch::default();
        latch.press(start);
        assert!(!latch.release(start + Duration::from_millis(120), THRESHOLD));
    }

    #[test]
    fn long_press_is_a_hold() {
        let start = Instant::now();
        let mut latch = ConstrainLatch::default();
        latch.press(start);
        assert!(latch.release(start + Duration::from_millis(800), THRESHOLD));
    }

    #[test]
    fn exactly_threshold_is_a_tap() {
        let start = Instant::now();
        let mut latch = ConstrainLatch::default();
        latch.press(start);
        assert!(!latch.release(start + THRESHOLD, THRESHOLD));
    }

    #[test]
    fn release_without_press_is_not_a_hold() {
        let mut latch = ConstrainLatch::default();
        assert!(!latch.release(Instant::now(), THRESHOLD));
    }
}
