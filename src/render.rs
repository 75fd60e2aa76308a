//! Rendering: draws the knob onto a 2D surface.
//!
//! Drawing goes through the [`Surface`] trait so the scene can be checked
//! without a browser; [`CanvasRenderingContext2d`] is the real surface. The
//! renderer only reads the config and the value, it never mutates state.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::{LABEL_FONT_RATIO, NEEDLE_HALF_WIDTH, RADIUS_RATIO, VALUE_FONT_RATIO};
use crate::model::KnobConfig;

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("canvas has no 2d context")]
    NoContext,
    #[error("canvas call failed: {0}")]
    Canvas(String),
}

impl From<JsValue> for RenderError {
    fn from(value: JsValue) -> Self {
        Self::Canvas(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

/// A circular arc, clockwise from `start` to `end` (radians, canvas convention).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub start: f64,
    pub end: f64,
}

/// The drawing primitives the knob needs.
pub trait Surface {
    fn clear(&mut self, width: f64, height: f64) -> Result<(), RenderError>;
    /// Stroke an arc with butt caps.
    fn stroke_arc(&mut self, arc: &Arc, line_width: f64, color: &str) -> Result<(), RenderError>;
    /// Fill text centred on `(x, y)`.
    fn fill_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        font_px: f64,
        color: &str,
    ) -> Result<(), RenderError>;
}

/// Sizes and angles derived from a config, shared by the canvas and the text overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobLayout {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    /// Track stroke width, whole pixels.
    pub line_width: f64,
    pub value_font_px: f64,
    pub label_font_px: f64,
    /// Baseline centre of the caption.
    pub label_y: f64,
    /// Arc start with `angle_offset` applied.
    pub start: f64,
    /// Arc end with `angle_offset` applied.
    pub end: f64,
}

impl KnobLayout {
    #[must_use]
    pub fn new(config: &KnobConfig) -> Self {
        let smaller = config.width.min(config.height);
        let center_y = 0.5 * config.height;
        let radius = RADIUS_RATIO * smaller;
        let line_width = (config.track_width * radius).round();
        Self {
            center_x: 0.5 * config.width,
            center_y,
            radius,
            line_width,
            value_font_px: VALUE_FONT_RATIO * smaller * config.text_scale,
            label_font_px: (LABEL_FONT_RATIO * line_width).round(),
            label_y: center_y + radius,
            start: config.angle_start + config.angle_offset,
            end: config.angle_end + config.angle_offset,
        }
    }

    /// Canvas angle pointing at `value`.
    #[must_use]
    pub fn value_angle(&self, value: f64, config: &KnobConfig) -> f64 {
        let relative = (value - config.value_min) / config.value_span();
        self.start + relative * config.angle_span()
    }

    fn arc(&self, start: f64, end: f64) -> Arc {
        Arc {
            center_x: self.center_x,
            center_y: self.center_y,
            radius: self.radius,
            start,
            end,
        }
    }

    #[must_use]
    pub fn track(&self) -> Arc {
        self.arc(self.start, self.end)
    }

    /// Filled arc up to the value, or the needle tick around it.
    #[must_use]
    pub fn filling(&self, value: f64, config: &KnobConfig) -> Arc {
        let angle = self.value_angle(value, config);
        if config.needle {
            self.arc(angle - NEEDLE_HALF_WIDTH, angle + NEEDLE_HALF_WIDTH)
        } else {
            self.arc(self.start, angle)
        }
    }
}

/// Draw the whole knob: clear, track, filling, value text, caption.
///
/// # Errors
///
/// Returns `Err` if a surface call fails.
pub fn draw(
    surface: &mut impl Surface,
    config: &KnobConfig,
    value: i64,
) -> Result<(), RenderError> {
    let layout = KnobLayout::new(config);

    surface.clear(config.width, config.height)?;
    surface.stroke_arc(&layout.track(), layout.line_width, &config.color_bg)?;
    surface.stroke_arc(
        &layout.filling(value as f64, config),
        layout.line_width,
        &config.color_fg,
    )?;
    surface.fill_text(
        &config.format_value(value),
        layout.center_x,
        layout.center_y,
        layout.value_font_px,
        &config.color_fg,
    )?;
    if let Some(label) = &config.label {
        surface.fill_text(
            label,
            layout.center_x,
            layout.label_y,
            layout.label_font_px,
            &config.color_label,
        )?;
    }
    Ok(())
}

/// Get the 2D context of a canvas.
///
/// # Errors
///
/// Returns [`RenderError::NoContext`] when the canvas has no 2D context.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, RenderError> {
    canvas
        .get_context("2d")?
        .ok_or(RenderError::NoContext)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| RenderError::NoContext)
}

impl Surface for CanvasRenderingContext2d {
    fn clear(&mut self, width: f64, height: f64) -> Result<(), RenderError> {
        self.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn stroke_arc(&mut self, arc: &Arc, line_width: f64, color: &str) -> Result<(), RenderError> {
        self.begin_path();
        self.arc(arc.center_x, arc.center_y, arc.radius, arc.start, arc.end)?;
        self.set_line_cap("butt");
        self.set_line_width(line_width);
        self.set_stroke_style_str(color);
        self.stroke();
        Ok(())
    }

    fn fill_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        font_px: f64,
        color: &str,
    ) -> Result<(), RenderError> {
        self.set_font(&format!("{font_px}px sans-serif"));
        self.set_fill_style_str(color);
        self.set_text_align("center");
        self.set_text_baseline("middle");
        CanvasRenderingContext2d::fill_text(self, text, x, y)?;
        Ok(())
    }
}
