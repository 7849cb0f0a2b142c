use std::collections::VecDeque;

pub const FRAME_WINDOW: usize = 120;

/// Rolling frame-time average over the last [`FRAME_WINDOW`] frames.
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    samples: VecDeque<f32>,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one frame duration in seconds.
    pub fn push(&mut self, delta_time: f32) {
        if !delta_time.is_finite() || delta_time < 0.0 {
            return;
        }

        if self.samples.len() == FRAME_WINDOW {
            self.samples.pop_front();
        }

        self.samples.push_back(delta_time);
    }

    pub fn average_ms(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let total: f32 = self.samples.iter().sum();
        total / self.samples.len() as f32 * 1000.0
    }

    pub fn fps(&self) -> f32 {
        let ms = self.average_ms();
        if ms > 0.0 {
            1000.0 / ms
        } else {
            0.0
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
