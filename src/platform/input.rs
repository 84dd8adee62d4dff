//! Keyboard edge latch
//!
//! Key callbacks can fire at any point in a frame. They only record edges
//! here; the next tick consumes them all at once.

use crate::sim::TickInput;

/// Latches flap key edges between ticks
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    held: bool,
    pressed: bool,
    released: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key down. Auto-repeat while held does not produce another flap.
    pub fn press(&mut self) {
        if !self.held {
            self.pressed = true;
        }
        self.held = true;
    }

    /// Key up
    pub fn release(&mut self) {
        if self.held {
            self.released = true;
        }
        self.held = false;
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Consume the edges recorded since the last call
    pub fn take(&mut self) -> TickInput {
        let input = TickInput {
            flap: self.pressed,
            flap_released: self.released,
        };
        self.pressed = false;
        self.released = false;
        input
    }
}
