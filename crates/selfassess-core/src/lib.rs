//! selfassess-core — Survey engine, scoring, and interpretation.
//!
//! This crate owns the answer state, section scoring, navigation gating and
//! score interpretation of the self-assessment, plus the snapshot format and
//! storage used to persist an in-progress survey.

pub mod engine;
pub mod error;
pub mod interpretation;
pub mod model;
pub mod report;
pub mod session;
pub mod share;
pub mod snapshot;
pub mod storage;

pub use engine::SurveyEngine;
pub use error::SurveyError;
