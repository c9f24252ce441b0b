//! textfront core - text cleaning, phonemization and symbol encoding for a
//! multilingual TTS front end.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use textfront_core::prelude::*;
//!
//! let config = FrontendConfig::from_file("frontend.yaml")?;
//! let encoder = config.build_encoder()?;
//! let mode = config.cleaning_mode()?;
//!
//! let (ids, cleaned) = encoder.text_to_sequence("Hi, glad to meet you.", &mode, Some("EN"))?;
//! assert_eq!(encoder.sequence_to_text(&ids)?, cleaned);
//! ```
//!
//! ## Module Organization
//!
//! ### Tables
//! - [`symbols`] - symbol vocabulary and the symbol <-> id bijection
//! - [`language`] - supported language codes and backend locales
//!
//! ### Cleaning
//! - [`transforms`] - string transform primitives
//! - [`backends`] - phonemizer backends and the per-language pool
//! - [`cleaners`] - named cleaner pipelines
//!
//! ### Encoding
//! - [`encoder`] - cleaning modes, encode and decode
//! - [`config`] - YAML/JSON configuration
//!
//! ### Evaluation
//! - [`eval`] - ASR-based intelligibility scoring (WER/CER)

// ============================================================================
// Prelude - Common imports for convenience
// ============================================================================

/// Common imports for textfront-core users.
pub mod prelude;

/// Unified error type.
pub mod error;

pub use error::{TextfrontError, TextfrontResult};

// ============================================================================
// Tables
// ============================================================================

/// Symbol vocabulary
pub mod symbols;

/// Language codes and locales
pub mod language;

// ============================================================================
// Cleaning
// ============================================================================

/// Transform primitives used by cleaners
pub mod transforms;

/// Phonemizer backends (espeak-ng) and the per-language backend pool
pub mod backends;

/// Named cleaner pipelines
pub mod cleaners;

// ============================================================================
// Encoding & Configuration
// ============================================================================

/// Text to symbol-id encoding
pub mod encoder;

/// Front-end configuration
pub mod config;

// ============================================================================
// Evaluation
// ============================================================================

/// Intelligibility evaluation harness
pub mod eval;

/// Testing utilities (mocks)
#[doc(hidden)]
pub mod testing;
