//! Question bank, question-set sampling, and the local classification pipeline.
//!
//! The remote AI classifier is an external collaborator reached through
//! [`RemoteClassifier`]; everything else here is pure and synchronous.

pub mod bank;
pub mod builder;
pub mod domain;
pub mod progress;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use bank::{
    all_statements, self_positioning_options, validate_bank, BankError, SelfPositioningOption,
};
pub use builder::{build_quiz_set, QuizBuilder};
pub use domain::{
    normalize_likert, AnswerSheet, AxisScores, Category, ClassificationResult, LikertAnswer,
    LikertError, LikertValue, ResultOrigin, SelfAssessment, SelfPositioningId, Statement,
    StatementId,
};
pub use progress::SavedProgress;
pub use router::quiz_router;
pub use scoring::{
    aggregate, axis_highlights, build_fallback_result, classify, AxisHighlight, FallbackConfig,
    FallbackEngine, PoliticalLabel,
};
pub use service::{ClassifierError, QuizCompletion, QuizService, QuizServiceError, RemoteClassifier};
