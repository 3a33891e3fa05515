// sdmon-api: Async Rust client for the SD-WAN controller's monitoring API

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod bfd;
mod devices;
mod stats;
mod tunnels;

pub use auth::{AuthOutcome, AuthStatus, SessionStatus};
pub use client::Client;
pub use error::Error;
pub use models::{BfdSession, Device, InterfaceStat, TunnelStat};
pub use transport::TransportConfig;
