//! Calls to the backend's whitelisted methods and the `{success, message}`
//! envelope every one of them answers with.

mod client;
mod config;
mod endpoint;
mod envelope;

pub use client::RpcClient;
pub use config::RpcConfig;
pub use endpoint::Endpoint;
