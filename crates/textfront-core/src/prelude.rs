//! Common imports.
//!
//! ```rust,ignore
//! use textfront_core::prelude::*;
//! ```

pub use crate::backends::{
    BackendFactory, BackendOptions, BackendPool, Backends, EspeakFactory, LanguageSwitch,
    Phonemizer,
};
pub use crate::cleaners::Cleaner;
pub use crate::config::FrontendConfig;
pub use crate::encoder::{CleaningMode, TextEncoder};
pub use crate::error::{TextfrontError, TextfrontResult};
pub use crate::eval::{CommandTranscriber, EvaluationReport, Evaluator, Metric, Transcriber};
pub use crate::language::{LanguageEntry, LanguageTable};
pub use crate::symbols::SymbolTable;
