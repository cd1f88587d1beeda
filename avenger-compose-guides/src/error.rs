use avenger_compose::ComposeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextMeasureError {
    #[error("Text measurement error: `{0}`")]
    TextMeasurementError(String),

    #[error("Invalid font size: {0}")]
    InvalidFontSize(f32),
}

impl From<TextMeasureError> for ComposeError {
    fn from(value: TextMeasureError) -> Self {
        ComposeError::Measurement(value.to_string())
    }
}
