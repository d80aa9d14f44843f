//! # AuraSentinel
//!
//! Forensic narrative generation for Fintech and Web3 security alerts.
//!
//! This crate provides:
//!
//! - `NarrativeGenerator`: turns raw log telemetry into a structured
//!   investigation narrative, falling back to a fixed message on failure
//! - `TextGenerationBackend`: the seam between the generator and the model
//! - A typed Gemini `generateContent` client implementing that seam
//! - Error taxonomy and configuration loading shared by both
//!
//! ## Usage
//!
//! ```no_run
//! use aura_sentinel::NarrativeGenerator;
//! use serde_json::json;
//!
//! # async fn run() -> aura_sentinel::Result<()> {
//! let generator = NarrativeGenerator::from_env()?;
//! let narrative = generator
//!     .investigate_staking_anomalies(&json!({"amount": 500, "validator": "V1"}))
//!     .await;
//! println!("{}", narrative);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub use crate::core::{
    TextGenerationBackend, ServiceClient, AuthenticatedClient,
    SamplingConfig, SafetySetting, HarmCategory, HarmBlockThreshold,
};

pub mod narrative;
pub use crate::narrative::{NarrativeGenerator, FALLBACK_NARRATIVE, SYSTEM_INSTRUCTION};

pub mod services;
pub use crate::services::gemini;

pub mod error;
pub use crate::error::{ServiceError, ErrorContext, Result};

pub mod config;
pub use crate::config::{ConfigProvider, ServiceConfig, GeminiConfig};

pub mod util;

#[cfg(test)]
mod tests;
