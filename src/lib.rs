pub mod client;
pub mod config;
pub mod errors;
pub mod types;

pub use client::AcceptClient;
pub use config::AcceptConfig;
pub use errors::{AcceptError, AcceptResult};
