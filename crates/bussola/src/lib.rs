//! Scoring engine behind the Bussola political-orientation quiz.
//!
//! The [`quiz`] module owns the statement bank, question-set sampling, and the local
//! fallback pipeline (aggregate, classify, assemble). [`ranking`] folds stored
//! participations into the public ranking.

pub mod config;
pub mod error;
pub mod quiz;
pub mod ranking;
pub mod telemetry;
