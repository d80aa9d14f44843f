//! Unit tests for AuraSentinel
//!
//! This module contains tests for the components of the crate.

pub mod config_tests;
pub mod error_tests;
