mod error;
mod request_ctx;
mod request_id;

pub use error::*;
pub use request_ctx::*;
pub use request_id::*;
