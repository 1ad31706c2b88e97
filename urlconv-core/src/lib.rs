pub mod cli;
pub mod conf;
pub mod convert;
pub mod ctx;
pub mod device;
pub mod gateway;
pub mod logging;
pub mod probe;
pub mod route;
