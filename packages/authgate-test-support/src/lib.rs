//! Authgate test support utilities
//!
//! This crate provides utilities for authgate testing: unified logging
//! initialization and assertions over the JSON error contract.

pub mod error_body;
pub mod logging;

pub use error_body::assert_error_body;
