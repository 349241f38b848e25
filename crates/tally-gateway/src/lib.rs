//! Blocking HTTP adapter for the budget service REST contract.

mod client;
mod wire;

pub use client::{HttpGateway, USER_AGENT};
