use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::body::to_bytes;
use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::config::QuizConfig;
use crate::quiz::domain::{
    AxisScores, Category, ClassificationResult, LikertAnswer, LikertValue, ResultOrigin,
    Statement, StatementId,
};
use crate::quiz::service::{ClassifierError, QuizService, RemoteClassifier};
use crate::quiz::quiz_router;
use crate::ranking::{ParticipationRecord, ParticipationStore, StoreError};

pub(super) fn likert(value: u8) -> LikertValue {
    LikertValue::try_from(value).expect("valid likert value")
}

pub(super) fn answer(id: u32, value: u8) -> LikertAnswer {
    LikertAnswer::new(StatementId(id), likert(value))
}

pub(super) fn statement(id: u32, category: Category, effect: f64, weight: f64) -> Statement {
    Statement::new(id, category, "fixture statement", effect, weight)
}

pub(super) fn scores(economic: f64, social: f64, cultural: f64, national: f64) -> AxisScores {
    AxisScores {
        economic,
        social,
        cultural,
        national,
    }
}

pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn quiz_config() -> QuizConfig {
    QuizConfig {
        target_size: 20,
        seed: Some(2024),
    }
}

pub(super) fn remote_result() -> ClassificationResult {
    ClassificationResult {
        label: "social democrat".to_string(),
        axis_scores: scores(3.2, 6.4, 7.1, 6.0),
        intensity: 6.5,
        explanation: "Remote analysis".to_string(),
        comparable_references: vec!["Figure A".to_string(), "Figure B".to_string()],
        confidence: 88.0,
        self_assessment: None,
        origin: ResultOrigin::LocalFallback,
        completed_at: None,
    }
}

#[derive(Default)]
pub(super) struct FailingClassifier {
    calls: Mutex<usize>,
}

impl FailingClassifier {
    pub(super) fn calls(&self) -> usize {
        *self.calls.lock().expect("classifier mutex poisoned")
    }
}

impl RemoteClassifier for FailingClassifier {
    fn classify(
        &self,
        _answers: &[LikertAnswer],
        _question_set: &[Statement],
    ) -> Result<ClassificationResult, ClassifierError> {
        *self.calls.lock().expect("classifier mutex poisoned") += 1;
        Err(ClassifierError::Network("connection reset".to_string()))
    }
}

pub(super) struct FixedClassifier;

impl RemoteClassifier for FixedClassifier {
    fn classify(
        &self,
        _answers: &[LikertAnswer],
        _question_set: &[Statement],
    ) -> Result<ClassificationResult, ClassifierError> {
        Ok(remote_result())
    }
}

#[derive(Default)]
pub(super) struct MemoryStore {
    records: Mutex<Vec<ParticipationRecord>>,
}

impl MemoryStore {
    pub(super) fn records(&self) -> Vec<ParticipationRecord> {
        self.records.lock().expect("store mutex poisoned").clone()
    }
}

impl ParticipationStore for MemoryStore {
    fn insert(&self, record: ParticipationRecord) -> Result<(), StoreError> {
        self.records
            .lock()
            .expect("store mutex poisoned")
            .push(record);
        Ok(())
    }

    fn all(&self) -> Result<Vec<ParticipationRecord>, StoreError> {
        Ok(self.records())
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.records.lock().expect("store mutex poisoned").len())
    }
}

pub(super) struct UnavailableStore;

impl ParticipationStore for UnavailableStore {
    fn insert(&self, _record: ParticipationRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn all(&self) -> Result<Vec<ParticipationRecord>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn count(&self) -> Result<usize, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    Arc<QuizService<FailingClassifier, MemoryStore>>,
    Arc<FailingClassifier>,
    Arc<MemoryStore>,
) {
    let classifier = Arc::new(FailingClassifier::default());
    let store = Arc::new(MemoryStore::default());
    let service = Arc::new(QuizService::new(
        classifier.clone(),
        store.clone(),
        &quiz_config(),
    ));
    (service, classifier, store)
}

pub(super) fn router_with_service<C, S>(service: Arc<QuizService<C, S>>) -> axum::Router
where
    C: RemoteClassifier + 'static,
    S: ParticipationStore + 'static,
{
    quiz_router(service)
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&bytes).expect("json body")
}

pub(super) fn category_counts(set: &[Statement]) -> BTreeMap<Category, usize> {
    let mut counts = BTreeMap::new();
    for statement in set {
        *counts.entry(statement.category).or_insert(0) += 1;
    }
    counts
}
