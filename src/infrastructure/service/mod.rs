//! HTTP client for the local text-generation service

pub mod client;
pub mod wire;

pub use client::{ServiceClient, ServiceState};
