//! Client and ingestion configuration

pub mod client_config;
pub mod null_patterns;

pub use client_config::*;
pub use null_patterns::*;
