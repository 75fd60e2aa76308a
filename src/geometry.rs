//! Pointer geometry: from a position on the canvas to an angle on the arc,
//! and from that angle to a value.
//!
//! Angles follow the drawing convention of the knob: 0 radians points up and
//! angles grow clockwise, so `atan2` is taken as `atan2(x, -y)` in screen
//! coordinates (y grows downwards).

use std::f64::consts::TAU;

use crate::model::KnobConfig;

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

/// Size of the control as laid out on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn center(self) -> (f64, f64) {
        (0.5 * self.width, 0.5 * self.height)
    }
}

/// Page-space box of the control (client rect shifted by the page scroll).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// A pointer or touch position relative to the control's top-left corner.
///
/// Mouse and touch input are both reduced to this before reaching the
/// state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    pub extent: Extent,
}

impl PointerSample {
    #[must_use]
    pub fn new(x: f64, y: f64, extent: Extent) -> Self {
        Self { x, y, extent }
    }

    /// Build a sample from page coordinates, as reported for touch points.
    #[must_use]
    pub fn from_page(page_x: f64, page_y: f64, bounds: &BoundingBox) -> Self {
        Self {
            x: page_x - bounds.left,
            y: page_y - bounds.top,
            extent: Extent::new(bounds.width, bounds.height),
        }
    }
}

/// Angle of the sample measured from `angle_start`.
///
/// Negative angles wrap by a full turn when the arc spans at least one turn;
/// otherwise they mean "before the start" and pin to 0.
#[must_use]
pub fn pointer_angle(sample: PointerSample, config: &KnobConfig) -> f64 {
    let (cx, cy) = sample.extent.center();
    let rel_x = sample.x - cx;
    let rel_y = sample.y - cy;
    let angle = rel_x.atan2(-rel_y) - config.angle_start;
    if angle >= 0.0 {
        angle
    } else if config.angle_span() >= TAU {
        angle + TAU
    } else {
        0.0
    }
}

/// Map an angle (relative to `angle_start`) to a clamped value.
#[must_use]
pub fn angle_to_value(angle: f64, config: &KnobConfig) -> f64 {
    let value = (angle / config.angle_span()) * config.value_span() + config.value_min;
    config.clamp(value)
}

#[must_use]
pub fn coordinate_to_value(sample: PointerSample, config: &KnobConfig) -> f64 {
    angle_to_value(pointer_angle(sample, config), config)
}
