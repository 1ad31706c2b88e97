use crate::device::core::errors::DeviceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceResult {
    /// Continue to the next device / next phase
    Continue,

    /// Error that should invoke on_error handlers; only fatal errors stop the request
    Error(DeviceError),
}
