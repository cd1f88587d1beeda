use std::fmt::Debug;

use crate::error::TextMeasureError;

/// Core trait for text measurement functionality
pub trait TextMeasurer: Send + Sync + Debug {
    /// Measures the bounding dimensions for a text string with given configuration
    fn measure_text_bounds(
        &self,
        config: &TextMeasurementConfig,
    ) -> Result<TextBounds, TextMeasureError>;
}

/// Configuration needed for text measurement
#[derive(Debug, Clone)]
pub struct TextMeasurementConfig<'a> {
    /// The text string to measure
    pub text: &'a str,
    /// Font size in pixels
    pub font_size: f32,
}

impl<'a> TextMeasurementConfig<'a> {
    pub fn new(text: &'a str, font_size: f32) -> Self {
        Self { text, font_size }
    }
}

/// Results from text measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBounds {
    /// Total width of the text
    pub width: f32,
    /// Total height from top to bottom
    pub height: f32,
    /// Distance from top to baseline
    pub ascent: f32,
    /// Distance from bottom to baseline
    pub descent: f32,
    /// Distance from top to where the top of the next line would be
    pub line_height: f32,
}

impl TextBounds {
    pub fn empty() -> Self {
        TextBounds {
            width: 0.0,
            height: 10.0,
            ascent: 10.0 * 0.8,
            descent: 10.0 * 0.2,
            line_height: 10.0 * 1.2,
        }
    }

    /// Bounds of the same text drawn rotated by a quarter turn
    pub fn rotated(self) -> Self {
        TextBounds {
            width: self.height,
            height: self.width,
            ..self
        }
    }
}

/// Font-free measurer that estimates glyph advance from the font size
#[derive(Debug, Clone, Copy)]
pub struct ApproxTextMeasurer {
    /// Average glyph advance as a fraction of the font size
    pub char_width: f32,
    pub line_height: f32,
}

impl Default for ApproxTextMeasurer {
    fn default() -> Self {
        Self {
            char_width: 0.6,
            line_height: 1.2,
        }
    }
}

impl ApproxTextMeasurer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextMeasurer for ApproxTextMeasurer {
    fn measure_text_bounds(
        &self,
        config: &TextMeasurementConfig,
    ) -> Result<TextBounds, TextMeasureError> {
        if !config.font_size.is_finite() || config.font_size <= 0.0 {
            return Err(TextMeasureError::InvalidFontSize(config.font_size));
        }

        let size = config.font_size;
        let chars = config.text.chars().count() as f32;
        Ok(TextBounds {
            width: chars * size * self.char_width,
            height: size,
            ascent: size * 0.8,
            descent: size * 0.2,
            line_height: size * self.line_height,
        })
    }
}
