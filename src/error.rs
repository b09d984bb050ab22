use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ArgError {
    #[error("missing shape count")]
    MissingCount,

    #[error("invalid shape count `{0}`, expected an integer")]
    InvalidCount(String),

    #[error("shape count must be greater than 0, got {0}")]
    NonPositiveCount(i64),

    #[error("expected a value for {0}")]
    MissingValue(&'static str),

    #[error("invalid value `{value}` for {option}")]
    InvalidValue { option: &'static str, value: String },

    #[error("{option} needs the `{feature}` feature, rebuild with `--features {feature}`")]
    FeatureDisabled {
        option: &'static str,
        feature: &'static str,
    },
}

impl ArgError {
    /// Whether the usage text should follow the message.
    pub fn wants_usage(&self) -> bool {
        matches!(self, ArgError::MissingCount | ArgError::InvalidCount(_))
    }
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to start the event loop: {0}")]
    EventLoop(String),

    #[error("failed to create the window: {0}")]
    Window(String),

    #[error("failed to set up the drawing surface: {0}")]
    Surface(String),

    #[cfg_attr(not(feature = "ttf"), allow(dead_code))]
    #[error("failed to load font: {0}")]
    Font(String),

    #[cfg(feature = "minifb")]
    #[error("minifb: {0}")]
    Minifb(String),
}
