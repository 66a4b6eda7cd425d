//! Local scoring pipeline used when the remote classifier cannot produce a result.

mod aggregate;
mod classify;
mod config;
mod highlights;

pub use aggregate::{aggregate, SWING_SCALE};
pub use classify::{classify, PoliticalLabel, HIGH_THRESHOLD, LOW_THRESHOLD};
pub use config::{
    FallbackConfig, DEFAULT_FALLBACK_CONFIDENCE, DEFAULT_FALLBACK_EXPLANATION,
    DEFAULT_FALLBACK_INTENSITY, DEFAULT_FALLBACK_REFERENCE,
};
pub use highlights::{axis_highlights, AxisHighlight, AxisPole};

use super::domain::{
    ClassificationResult, LikertAnswer, ResultOrigin, SelfAssessment, Statement,
};

/// Stateless assembler that turns answers into a locally computed classification.
#[derive(Debug, Clone, Default)]
pub struct FallbackEngine {
    config: FallbackConfig,
}

impl FallbackEngine {
    pub fn new(config: FallbackConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FallbackConfig {
        &self.config
    }

    pub fn assemble(
        &self,
        answers: &[LikertAnswer],
        bank: &[Statement],
        self_assessment: Option<SelfAssessment>,
    ) -> ClassificationResult {
        let axis_scores = aggregate(answers, bank);
        let label = classify(&axis_scores);

        ClassificationResult {
            label: label.as_str().to_string(),
            axis_scores,
            intensity: self.config.intensity,
            explanation: self.config.explanation.clone(),
            comparable_references: self.config.comparable_references.clone(),
            confidence: self.config.confidence,
            self_assessment,
            origin: ResultOrigin::LocalFallback,
            completed_at: None,
        }
    }
}

/// Fallback result with the default placeholder constants.
pub fn build_fallback_result(
    answers: &[LikertAnswer],
    bank: &[Statement],
    self_assessment: Option<SelfAssessment>,
) -> ClassificationResult {
    FallbackEngine::default().assemble(answers, bank, self_assessment)
}
