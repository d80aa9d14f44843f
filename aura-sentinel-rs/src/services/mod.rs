//! Backend client implementations
//!
//! This module contains clients for specific generative-text services.

pub mod gemini;
mod common;

pub use common::UserAgent;
