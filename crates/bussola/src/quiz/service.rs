use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::bank::{all_statements, validate_bank, BankError};
use super::builder::QuizBuilder;
use super::domain::{
    AnswerSheet, ClassificationResult, LikertAnswer, ResultOrigin, SelfPositioningId, Statement,
    StatementId,
};
use super::scoring::{FallbackConfig, FallbackEngine};
use crate::config::QuizConfig;
use crate::ranking::{
    ParticipationRecord, ParticipationStore, RankingSummary, StoreError, TimeRange,
};

/// Primary classification path backed by an external AI service.
pub trait RemoteClassifier: Send + Sync {
    fn classify(
        &self,
        answers: &[LikertAnswer],
        question_set: &[Statement],
    ) -> Result<ClassificationResult, ClassifierError>;
}

/// Failure of the remote classifier. Any variant triggers the local fallback.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("classifier request failed: {0}")]
    Network(String),
    #[error("classifier response could not be parsed: {0}")]
    Parse(String),
    #[error("classifier quota exhausted")]
    Quota,
    #[error("classifier not configured")]
    Unavailable,
}

/// Answers submitted at the end of a quiz.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizCompletion {
    pub answers: Vec<LikertAnswer>,
    /// Statements that were presented; empty means the whole bank.
    #[serde(default)]
    pub question_ids: Vec<StatementId>,
    #[serde(default)]
    pub self_assessment: Option<SelfPositioningId>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub region_opt_in: bool,
}

/// Service composing the statement bank, question sampling, classification paths and the
/// participation store.
pub struct QuizService<C, S> {
    bank: Arc<Vec<Statement>>,
    builder: Mutex<QuizBuilder>,
    engine: Arc<FallbackEngine>,
    classifier: Arc<C>,
    store: Arc<S>,
    target_size: usize,
}

impl<C, S> QuizService<C, S>
where
    C: RemoteClassifier + 'static,
    S: ParticipationStore + 'static,
{
    pub fn new(classifier: Arc<C>, store: Arc<S>, config: &QuizConfig) -> Self {
        Self::assemble(
            all_statements(),
            classifier,
            store,
            config,
            FallbackConfig::default(),
        )
    }

    /// Build the service over a caller-supplied bank, rejecting banks that break the statement
    /// invariants (unique ids, positive weights, effects within [-1, 1]).
    pub fn with_bank(
        bank: Vec<Statement>,
        classifier: Arc<C>,
        store: Arc<S>,
        config: &QuizConfig,
        fallback: FallbackConfig,
    ) -> Result<Self, QuizServiceError> {
        if let Err(err) = validate_bank(&bank) {
            warn!(error = %err, bank_size = bank.len(), "rejecting invalid statement bank");
            return Err(err.into());
        }
        Ok(Self::assemble(bank, classifier, store, config, fallback))
    }

    fn assemble(
        bank: Vec<Statement>,
        classifier: Arc<C>,
        store: Arc<S>,
        config: &QuizConfig,
        fallback: FallbackConfig,
    ) -> Self {
        let builder = match config.seed {
            Some(seed) => QuizBuilder::seeded(seed),
            None => QuizBuilder::from_entropy(),
        };

        Self {
            bank: Arc::new(bank),
            builder: Mutex::new(builder),
            engine: Arc::new(FallbackEngine::new(fallback)),
            classifier,
            store,
            target_size: config.target_size,
        }
    }

    pub fn bank(&self) -> &[Statement] {
        &self.bank
    }

    /// Draw a fresh question set; `None` uses the configured size.
    pub fn new_quiz(&self, target_size: Option<usize>) -> Vec<Statement> {
        let target_size = target_size.unwrap_or(self.target_size);
        let set = self
            .builder
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .build(&self.bank, target_size);
        self.log_degenerate(&set, target_size);
        set
    }

    /// Draw a question set from a caller-provided seed without touching the shared source.
    pub fn new_quiz_seeded(&self, target_size: Option<usize>, seed: u64) -> Vec<Statement> {
        let target_size = target_size.unwrap_or(self.target_size);
        let set = QuizBuilder::seeded(seed).build(&self.bank, target_size);
        self.log_degenerate(&set, target_size);
        set
    }

    fn log_degenerate(&self, set: &[Statement], target_size: usize) {
        if set.is_empty() {
            warn!(
                target_size,
                bank_size = self.bank.len(),
                "quiz size too small to cover every category; returning an empty question set"
            );
        }
    }

    /// Resolve presented statement ids against the bank. Unknown ids are dropped.
    pub fn resolve_question_set(&self, question_ids: &[StatementId]) -> Vec<Statement> {
        if question_ids.is_empty() {
            return self.bank.to_vec();
        }

        let wanted: HashSet<StatementId> = question_ids.iter().copied().collect();
        self.bank
            .iter()
            .filter(|statement| wanted.contains(&statement.id))
            .cloned()
            .collect()
    }

    pub fn complete(
        &self,
        completion: QuizCompletion,
    ) -> Result<ClassificationResult, QuizServiceError> {
        self.complete_at(completion, Utc::now())
    }

    /// Classify a finished quiz remotely, falling back to the local pipeline on failure, and
    /// record the participation.
    pub fn complete_at(
        &self,
        completion: QuizCompletion,
        now: DateTime<Utc>,
    ) -> Result<ClassificationResult, QuizServiceError> {
        let QuizCompletion {
            answers,
            question_ids,
            self_assessment,
            region,
            region_opt_in,
        } = completion;

        let mut question_set = self.resolve_question_set(&question_ids);
        if question_set.is_empty() {
            question_set = self.bank.to_vec();
        }
        let presented: HashSet<StatementId> =
            question_set.iter().map(|statement| statement.id).collect();
        let sheet: AnswerSheet = answers
            .into_iter()
            .filter(|answer| presented.contains(&answer.statement_id))
            .collect();
        let self_assessment = self_assessment.map(SelfPositioningId::selection);

        let mut result = match self.classifier.classify(sheet.answers(), &question_set) {
            Ok(mut remote) => {
                remote.origin = ResultOrigin::Remote;
                remote
            }
            Err(err) => {
                warn!(error = %err, "remote classification failed; using local fallback");
                self.engine
                    .assemble(sheet.answers(), &question_set, self_assessment.clone())
            }
        };
        result.self_assessment = self_assessment;
        result.completed_at = Some(now);

        let mut record = ParticipationRecord::from_result(&result, now);
        if let Some(region) = region {
            record = record.with_region(region, region_opt_in);
        }
        self.store.insert(record)?;

        info!(
            label = %result.label,
            origin = ?result.origin,
            answers = sheet.len(),
            "quiz completed"
        );
        Ok(result)
    }

    pub fn ranking(
        &self,
        range: TimeRange,
        now: DateTime<Utc>,
    ) -> Result<RankingSummary, QuizServiceError> {
        let records = self.store.all()?;
        Ok(RankingSummary::compute(&records, range, now))
    }

    pub fn participation_count(&self) -> Result<usize, QuizServiceError> {
        Ok(self.store.count()?)
    }
}

/// Error raised by the quiz service.
#[derive(Debug, thiserror::Error)]
pub enum QuizServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid statement bank: {0}")]
    InvalidBank(#[from] BankError),
}
