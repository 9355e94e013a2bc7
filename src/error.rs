use thiserror::Error;

/// Widget geometry that would make value normalization divide by zero.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    #[error("joystick outer radius {outer} must exceed inner radius {inner}")]
    DegenerateJoystick { inner: f64, outer: f64 },
    #[error("slider bottom {bottom} must lie below top {top}")]
    DegenerateSlider { top: f64, bottom: f64 },
    #[error("widget geometry must be finite")]
    NonFinite,
}

/// Reasons a tick's message was dropped instead of sent.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("failed to encode control snapshot: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("could not open {url}: {reason}")]
    Open { url: String, reason: String },
    #[error("websocket send failed: {0}")]
    Send(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid port {0:?}")]
    InvalidPort(String),
    #[error("malformed query value {0:?}")]
    InvalidEncoding(String),
}
