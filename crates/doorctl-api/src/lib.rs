// doorctl-api: Async Rust client for the MyQ garage door web service

pub mod auth;
pub mod client;
pub mod devices;
pub mod error;
pub mod gateways;
pub mod models;
pub mod transport;

pub use client::{DEFAULT_BASE_URL, ServiceClient};
pub use error::Error;
pub use models::{WireDevice, WirePlace};
pub use transport::{DEFAULT_TIMEOUT, TransportConfig};
