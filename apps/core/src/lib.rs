//! Respona gateway brain: model selection and response post-processing for
//! text/voice chat traffic.
//!
//! The crate is split into a pure, synchronous core and a thin async shell:
//!
//! - [`pipeline`] cleans, classifies, formats and scores model output. No
//!   I/O, no shared state, safe to call concurrently.
//! - [`selector`] analyzes the raw user input and picks the upstream model
//!   configuration and generation strategy.
//! - [`actors`] wraps the upstream provider call and orchestrates a request
//!   end to end.
//!
//! The HTTP route layer lives elsewhere and only sees [`models::GatewayRequest`]
//! in and [`models::GatewayResponse`] out.

pub mod actors;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod rate_limiter;
pub mod selector;

pub use error::AppError;

#[cfg(test)]
mod tests;
