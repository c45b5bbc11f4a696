//! Outbound HTTP gateways to third-party services.

pub mod spotify;
