pub const DEFAULT_THRESHOLD_PX: f32 = 80.0;

/// Two-state follow heuristic for the message list: new content pulls the
/// view down only while it is already near the bottom.
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    threshold: f32,
    away_from_bottom: bool,
}

impl ScrollTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.max(0.0),
            away_from_bottom: false,
        }
    }

    /// Record the viewport geometry after a frame has been laid out.
    pub fn observe(&mut self, offset: f32, viewport_height: f32, content_height: f32) {
        let at_bottom = offset + viewport_height >= content_height - self.threshold;
        self.away_from_bottom = !at_bottom;
    }

    pub fn is_following(&self) -> bool {
        !self.away_from_bottom
    }

    pub fn should_scroll(&self, force: bool) -> bool {
        force || self.is_following()
    }
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD_PX)
    }
}
