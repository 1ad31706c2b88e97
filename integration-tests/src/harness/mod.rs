mod config;
pub mod gateway;
pub mod tracing;

pub use config::{EUC_KR_HANGUL, SHIFT_JIS_NIHON};
pub use gateway::TestGateway;
pub use tracing::{CapturedEvent, capture_events};
