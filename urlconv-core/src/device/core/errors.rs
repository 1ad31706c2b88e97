use std::fmt::{Display, Formatter};

/// Represents an error that occurred while a device was handling a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceError {
    /// A descriptive message explaining the error that occurred
    pub message: String,
    /// Whether the error should stop the request instead of letting it continue
    pub fatal: bool,
}

impl DeviceError {
    pub fn non_fatal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fatal: false,
        }
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fatal: true,
        }
    }
}

impl Display for DeviceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let fatal = if self.fatal { "(fatal) " } else { "" };
        write!(f, "{}{}", fatal, self.message)
    }
}
