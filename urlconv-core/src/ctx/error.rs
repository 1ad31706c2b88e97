use thiserror::Error as ThisError;

#[derive(Debug, ThisError, Clone, PartialEq, Eq)]
pub enum RequestRejectError {
    #[error("invalid request path")]
    InvalidPath,

    #[error("device failed: {message}")]
    DeviceFailure { message: String },
}
