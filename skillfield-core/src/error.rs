use thiserror::Error;

/// Errors raised while setting up a playground
#[derive(Debug, Error)]
pub enum PlaygroundError {
    #[error("container must have positive, finite dimensions (got {width}x{height})")]
    InvalidContainer { width: f32, height: f32 },

    #[error("entity radius must be positive and finite (got {0})")]
    InvalidRadius(f32),

    #[error("entity '{label}' with radius {radius} does not fit in a {width}x{height} container")]
    EntityTooLarge {
        label: String,
        radius: f32,
        width: f32,
        height: f32,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PlaygroundResult<T> = Result<T, PlaygroundError>;
