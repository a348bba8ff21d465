//! # counsel-runtime
//!
//! Session handling around the counsel-core engine: text intake,
//! configuration, and short-lived result retention.
//!
//! The engine itself is pure; everything here deals with the edges
//! (files, clocks, sessions) and never changes how a text is scored.

pub mod config;
pub mod intake;
pub mod orchestrator;
pub mod retention;

pub use config::{
    ConfigError, DeterminismConfig, IntakeConfig, RetentionConfig, RubricConfig, RuntimeConfig,
    MAX_TTL,
};
pub use intake::{extract_text, IntakeError, Submission};
pub use orchestrator::{AnalysisOutcome, Orchestrator, RuntimeError};
pub use retention::{RetentionError, RetentionStore, SessionId};
