/// Frames drawn after each change. The second frame covers a swap chain that
/// still shows the previous image.
pub const FRAMES_PER_CHANGE: u8 = 2;

/// Dirty-flag countdown: a static image is not redrawn.
#[derive(Debug)]
pub struct Countdown {
    remaining: u8,
}

impl Default for Countdown {
    fn default() -> Self {
        Self {
            remaining: FRAMES_PER_CHANGE,
        }
    }
}

impl Countdown {
    pub fn invalidate(&mut self) {
        self.remaining = FRAMES_PER_CHANGE;
    }

    pub fn is_pending(&self) -> bool {
        self.remaining > 0
    }

    /// Whether this frame should be drawn; consumes one frame of the budget.
    pub fn take(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}
