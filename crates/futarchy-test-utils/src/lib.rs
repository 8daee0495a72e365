pub mod fixtures;
pub mod helpers;
pub mod mock_transport;

pub use fixtures::*;
pub use helpers::*;
pub use mock_transport::MockTransport;
