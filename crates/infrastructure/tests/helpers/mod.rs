pub mod dns_messages;
pub mod mock_upstream;

pub use dns_messages::*;
pub use mock_upstream::{MockUpstream, UpstreamBehavior};
