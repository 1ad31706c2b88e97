mod public_gateway;
mod response;

pub use public_gateway::Gateway;
pub use response::{GatewayResponse, ServeOutcome};
