//! Test Module
//!
//! Cross-module test suite for the Respona gateway brain.
//!
//! ## Test Categories
//! - `pipeline_tests`: cleaning, classification, formatting contracts
//! - `selector_tests`: model selection policy and the classifier divergence
//! - `integration_tests`: full supervisor workflow with provider doubles

pub mod integration_tests;
