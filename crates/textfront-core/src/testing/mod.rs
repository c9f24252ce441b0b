//! Testing utilities for textfront-core.
//!
//! Mocks that stand in for the external phonemizer and speech-recognition
//! programs, so cleaners, the backend pool and the evaluation harness can be
//! tested without espeak-ng or an ASR model installed.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use textfront_core::testing::mocks::MockBackendFactory;
//!
//! let factory = Arc::new(MockBackendFactory::new());
//! let backends = Backends::new(factory.clone(), LanguageTable::default(), BackendOptions::default())?;
//! assert_eq!(factory.initialize_calls(), 1);
//! ```

pub mod mocks;

pub use mocks::*;
