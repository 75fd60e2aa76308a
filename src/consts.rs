//! Shared numeric constants for the knob.

// ── Layout ──────────────────────────────────────────────────────

/// Arc radius as a fraction of the smaller canvas side.
pub const RADIUS_RATIO: f64 = 0.4;

/// Value text size as a fraction of the smaller canvas side (before `text_scale`).
pub const VALUE_FONT_RATIO: f64 = 0.2;

/// Label text size as a fraction of the track stroke width.
pub const LABEL_FONT_RATIO: f64 = 0.8;

/// Half-width of the needle tick, in radians.
pub const NEEDLE_HALF_WIDTH: f64 = 0.02;

// ── Gestures ────────────────────────────────────────────────────

/// Window after the first tap in which a second tap counts as a double-tap.
pub const DOUBLE_TAP_WINDOW_MS: u32 = 500;

/// Exact tap count that opens the editor when the double-tap window closes.
pub const DOUBLE_TAP_COUNT: u32 = 2;

/// Scroll inactivity after which the wheel-adjusted value is committed.
pub const WHEEL_COMMIT_DELAY_MS: u32 = 250;
