use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::quiz::domain::{AxisScores, ClassificationResult, AXIS_NEUTRAL};

const UNDETERMINED_LABEL: &str = "undetermined";

/// Stored form of a completed quiz, as consumed by the public ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationRecord {
    pub label: String,
    pub axis_scores: AxisScores,
    pub intensity: f64,
    pub explanation: String,
    pub comparable_references: Vec<String>,
    pub confidence: f64,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub region_opt_in: bool,
    pub created_at: DateTime<Utc>,
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

impl ParticipationRecord {
    /// Normalise a result for storage. Remote results are not trusted to be well formed, so
    /// blank labels and non-finite numbers are replaced with neutral defaults.
    pub fn from_result(result: &ClassificationResult, created_at: DateTime<Utc>) -> Self {
        let label = result.label.trim();
        let label = if label.is_empty() {
            UNDETERMINED_LABEL.to_string()
        } else {
            label.to_string()
        };

        let scores = result.axis_scores;
        let axis_scores = AxisScores {
            economic: finite_or(scores.economic, AXIS_NEUTRAL),
            social: finite_or(scores.social, AXIS_NEUTRAL),
            cultural: finite_or(scores.cultural, AXIS_NEUTRAL),
            national: finite_or(scores.national, AXIS_NEUTRAL),
        };

        Self {
            label,
            axis_scores,
            intensity: finite_or(result.intensity, AXIS_NEUTRAL),
            explanation: result.explanation.clone(),
            comparable_references: result.comparable_references.clone(),
            confidence: finite_or(result.confidence, 0.0),
            region: None,
            region_opt_in: false,
            created_at,
        }
    }

    /// Attach a region the participant agreed to share.
    pub fn with_region(mut self, region: impl Into<String>, opt_in: bool) -> Self {
        let region = region.into();
        let region = region.trim();
        self.region = (!region.is_empty()).then(|| region.to_ascii_uppercase());
        self.region_opt_in = opt_in;
        self
    }

    /// Region counted in the ranking, only when the participant opted in.
    pub fn shared_region(&self) -> Option<&str> {
        if self.region_opt_in {
            self.region.as_deref()
        } else {
            None
        }
    }
}

/// Storage abstraction so ranking aggregation can run against any backend.
pub trait ParticipationStore: Send + Sync {
    fn insert(&self, record: ParticipationRecord) -> Result<(), StoreError>;
    fn all(&self) -> Result<Vec<ParticipationRecord>, StoreError>;
    fn count(&self) -> Result<usize, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("participation store unavailable: {0}")]
    Unavailable(String),
}
