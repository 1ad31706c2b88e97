pub mod conf;
pub mod convert;
pub mod resolve;
