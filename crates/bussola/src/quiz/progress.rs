use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{LikertAnswer, SelfAssessment, Statement};

pub const PROGRESS_VERSION: u32 = 1;

/// Snapshot of an unfinished quiz so it can be resumed later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProgress {
    pub version: u32,
    pub question_set: Vec<Statement>,
    pub answers: Vec<LikertAnswer>,
    pub current_index: usize,
    #[serde(default)]
    pub self_assessment: Option<SelfAssessment>,
    pub saved_at: DateTime<Utc>,
}

impl SavedProgress {
    pub fn new(
        question_set: Vec<Statement>,
        answers: Vec<LikertAnswer>,
        current_index: usize,
        self_assessment: Option<SelfAssessment>,
        saved_at: DateTime<Utc>,
    ) -> Self {
        Self {
            version: PROGRESS_VERSION,
            question_set,
            answers,
            current_index,
            self_assessment,
            saved_at,
        }
    }

    /// Restore a snapshot; anything missing, unreadable or from another version is discarded.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let raw = raw?;
        match serde_json::from_str::<SavedProgress>(raw) {
            Ok(progress) if progress.version == PROGRESS_VERSION => Some(progress),
            Ok(progress) => {
                warn!(version = progress.version, "ignoring saved progress from another version");
                None
            }
            Err(err) => {
                warn!(error = %err, "failed to read saved progress");
                None
            }
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::bank::all_statements;
    use crate::quiz::domain::{LikertValue, SelfPositioningId, StatementId};
    use chrono::TimeZone;

    fn snapshot() -> SavedProgress {
        let question_set: Vec<Statement> = all_statements().into_iter().take(4).collect();
        let answers = vec![LikertAnswer::new(
            StatementId(1),
            LikertValue::try_from(4).expect("valid"),
        )];
        let saved_at = Utc
            .with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
            .single()
            .expect("valid timestamp");
        SavedProgress::new(
            question_set,
            answers,
            1,
            Some(SelfPositioningId::Center.selection()),
            saved_at,
        )
    }

    #[test]
    fn restores_a_saved_snapshot() {
        let progress = snapshot();
        let raw = progress.to_json().expect("serializes");
        assert_eq!(SavedProgress::parse(Some(&raw)), Some(progress));
    }

    #[test]
    fn discards_missing_malformed_or_foreign_versions() {
        assert_eq!(SavedProgress::parse(None), None);
        assert_eq!(SavedProgress::parse(Some("{not json")), None);

        let mut progress = snapshot();
        progress.version = 2;
        let raw = progress.to_json().expect("serializes");
        assert_eq!(SavedProgress::parse(Some(&raw)), None);
    }

    #[test]
    fn rejects_snapshots_with_invalid_answers() {
        let raw = snapshot()
            .to_json()
            .expect("serializes")
            .replace("\"value\":4", "\"value\":9");
        assert_eq!(SavedProgress::parse(Some(&raw)), None);
    }
}
