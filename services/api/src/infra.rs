use bussola::quiz::{
    ClassificationResult, ClassifierError, LikertAnswer, RemoteClassifier, SelfPositioningId,
    Statement,
};
use bussola::ranking::{ParticipationRecord, ParticipationStore, StoreError, TimeRange};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryParticipationStore {
    records: Arc<Mutex<Vec<ParticipationRecord>>>,
}

impl InMemoryParticipationStore {
    fn guard(&self) -> Result<MutexGuard<'_, Vec<ParticipationRecord>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("participation store mutex poisoned".to_string()))
    }
}

impl ParticipationStore for InMemoryParticipationStore {
    fn insert(&self, record: ParticipationRecord) -> Result<(), StoreError> {
        self.guard()?.push(record);
        Ok(())
    }

    fn all(&self) -> Result<Vec<ParticipationRecord>, StoreError> {
        Ok(self.guard()?.clone())
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.guard()?.len())
    }
}

/// Stand-in for the hosted AI classifier; every request goes to the local fallback.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct UnconfiguredClassifier;

impl RemoteClassifier for UnconfiguredClassifier {
    fn classify(
        &self,
        _answers: &[LikertAnswer],
        _question_set: &[Statement],
    ) -> Result<ClassificationResult, ClassifierError> {
        Err(ClassifierError::Unavailable)
    }
}

pub(crate) fn parse_self_positioning(raw: &str) -> Result<SelfPositioningId, String> {
    SelfPositioningId::from_slug(raw).ok_or_else(|| {
        let known: Vec<&str> = SelfPositioningId::ORDERED
            .iter()
            .map(|id| id.slug())
            .collect();
        format!("unknown self-positioning '{raw}', expected one of {}", known.join(", "))
    })
}

pub(crate) fn parse_time_range(raw: &str) -> Result<TimeRange, String> {
    raw.parse::<TimeRange>().map_err(|err| err.to_string())
}
