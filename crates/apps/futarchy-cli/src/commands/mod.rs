//! CLI command implementations.

pub mod call;
pub mod mcp_server;
pub mod poll;
pub mod polls;
pub mod position;
pub mod stats;
pub mod tools;
pub mod vote;
pub mod wallet;

// Re-export command handlers
pub use call::call;
pub use mcp_server::mcp_server;
pub use poll::poll;
pub use polls::polls;
pub use position::position;
pub use stats::stats;
pub use tools::tools;
pub use vote::vote;
pub use wallet::wallet;
