//! Core data models for the knob.
//! Configuration supplied by the owner, the initial value, and the
//! live/committed value pair that gestures act on.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::rc::Rc;

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

/// Parses entered text into a number; `None` when the text holds no number.
pub type ParseFn = Rc<dyn Fn(&str) -> Option<f64>>;
/// Formats a value for display on the canvas.
pub type FormatFn = Rc<dyn Fn(i64) -> String>;

/// The pair of pure functions used to round-trip values through text.
#[derive(Clone)]
pub struct Converters {
    pub string_to_value: ParseFn,
    pub value_to_string: FormatFn,
}

impl Default for Converters {
    fn default() -> Self {
        Self {
            string_to_value: Rc::new(parse_int_prefix),
            value_to_string: Rc::new(|v| v.to_string()),
        }
    }
}

impl PartialEq for Converters {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.string_to_value, &other.string_to_value)
            && Rc::ptr_eq(&self.value_to_string, &other.value_to_string)
    }
}

impl fmt::Debug for Converters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Converters { .. }")
    }
}

/// Reads a leading decimal integer: whitespace, optional sign, digits.
/// Anything after the digits is ignored.
pub fn parse_int_prefix(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1.0, &trimmed[1..]),
        Some(b'+') => (1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<f64>().ok().map(|v| sign * v)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid knob config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KnobConfig {
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
    /// Angle of the minimum value, radians (0 points up before `angle_offset`).
    pub angle_start: f64,
    /// Angle of the maximum value; may lie more than a full turn past `angle_start`.
    pub angle_end: f64,
    /// Rotation applied to the whole arc when drawing.
    pub angle_offset: f64,
    /// Track colour.
    pub color_bg: String,
    /// Filling and value text colour.
    pub color_fg: String,
    pub color_label: String,
    /// Caption drawn under the arc.
    pub label: Option<String>,
    /// Draw a tick at the value instead of a filled arc.
    pub needle: bool,
    /// Render only; ignore every value-changing gesture.
    pub read_only: bool,
    pub text_scale: f64,
    /// Track stroke width as a fraction of the radius.
    pub track_width: f64,
    pub value_min: f64,
    pub value_max: f64,
    #[serde(skip)]
    pub converters: Converters,
}

impl Default for KnobConfig {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 300.0,
            angle_start: -0.75 * PI,
            angle_end: 0.75 * PI,
            angle_offset: -0.5 * PI,
            color_bg: "#181818".to_string(),
            color_fg: "#ff8800".to_string(),
            color_label: "#ffffff".to_string(),
            label: None,
            needle: false,
            read_only: false,
            text_scale: 1.0,
            track_width: 0.4,
            value_min: 0.0,
            value_max: 100.0,
            converters: Converters::default(),
        }
    }
}

impl KnobConfig {
    /// Parse a config from JSON; missing fields take their defaults.
    ///
    /// Degenerate ranges are logged but kept as given.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        if config.value_max <= config.value_min {
            log::warn!(
                "knob value range [{}, {}] is empty",
                config.value_min,
                config.value_max
            );
        }
        if config.angle_span() <= 0.0 {
            log::warn!(
                "knob angle span [{}, {}] is empty",
                config.angle_start,
                config.angle_end
            );
        }
        Ok(config)
    }

    pub fn angle_span(&self) -> f64 {
        self.angle_end - self.angle_start
    }

    pub fn value_span(&self) -> f64 {
        self.value_max - self.value_min
    }

    /// Clamp into `[value_min, value_max]`.
    /// Comparisons only, so an inverted range cannot panic.
    pub fn clamp(&self, value: f64) -> f64 {
        if value < self.value_min {
            self.value_min
        } else if value > self.value_max {
            self.value_max
        } else {
            value
        }
    }

    /// Clamp, then round half up to an integer.
    pub fn quantize(&self, value: f64) -> i64 {
        (self.clamp(value) + 0.5).floor() as i64
    }

    pub fn format_value(&self, value: i64) -> String {
        (self.converters.value_to_string)(value)
    }

    /// Parse entered text; non-finite results count as unparseable.
    pub fn parse_value(&self, text: &str) -> Option<f64> {
        (self.converters.string_to_value)(text).filter(|v| v.is_finite())
    }
}

/// Initial value handed over by the owner, as text or as a number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InitialValue {
    Number(f64),
    Text(String),
}

impl Default for InitialValue {
    fn default() -> Self {
        Self::Text("0".to_string())
    }
}

impl From<&str> for InitialValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<f64> for InitialValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for InitialValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl InitialValue {
    /// Resolve against a config; anything unparseable falls back to `value_min`.
    pub fn resolve(&self, config: &KnobConfig) -> f64 {
        let parsed = match self {
            Self::Number(v) => Some(*v).filter(|v| v.is_finite()),
            Self::Text(text) => config.parse_value(text),
        };
        parsed.unwrap_or_else(|| {
            log::warn!("initial knob value {self:?} is not a number, using minimum");
            config.value_min
        })
    }
}

/// Live value shown on the canvas plus the last committed value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValueModel {
    value: i64,
    committed: i64,
}

impl ValueModel {
    /// The initial value counts as committed.
    pub fn new(initial: f64, config: &KnobConfig) -> Self {
        let value = config.quantize(initial);
        Self {
            value,
            committed: value,
        }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn committed(&self) -> i64 {
        self.committed
    }

    /// Show a transient value; the committed snapshot is untouched.
    pub fn apply_floating(&mut self, value: f64, config: &KnobConfig) -> i64 {
        self.value = config.quantize(value);
        self.value
    }

    pub fn commit(&mut self) -> i64 {
        self.committed = self.value;
        self.value
    }

    pub fn rollback(&mut self) -> i64 {
        self.value = self.committed;
        self.value
    }
}
