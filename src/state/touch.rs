// Double-tap tracking for touch gestures
use crate::consts::DOUBLE_TAP_COUNT;

#[derive(Default, Debug, Clone)]
pub struct TouchState {
    pub tap_count: u32,
    pub window_open: bool,
}

impl TouchState {
    /// Count a single-finger tap. Returns true when this tap opens the
    /// double-tap window, i.e. the window timer has to be armed.
    pub fn register_tap(&mut self) -> bool {
        let opens = self.tap_count == 0;
        self.tap_count += 1;
        if opens {
            self.window_open = true;
        }
        opens
    }

    /// Close the window. True only when exactly two taps landed in it.
    pub fn close_window(&mut self) -> bool {
        let double = self.window_open && self.tap_count == DOUBLE_TAP_COUNT;
        self.reset();
        double
    }

    pub fn reset(&mut self) {
        self.tap_count = 0;
        self.window_open = false;
    }
}
