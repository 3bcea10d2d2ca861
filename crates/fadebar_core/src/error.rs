use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndicatorError {
    #[error("Height fraction must be in (0, 1], got {0}")]
    InvalidHeightFraction(f32),

    #[error("Drag velocity must be a positive finite number, got {0}")]
    InvalidVelocity(f32),

    #[error("Right offset must be finite, got {0}")]
    InvalidRightOffset(f32),

    #[error("Quiet period must be greater than zero")]
    InvalidQuietPeriod,

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Scroll host not found: {0}")]
    HostNotFound(String),

    #[error("Configuration parse error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IndicatorError>;
