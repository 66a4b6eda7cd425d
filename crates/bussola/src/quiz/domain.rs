use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The four ideological dimensions. Every statement belongs to one, and each is also a scored axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Economic,
    Social,
    Cultural,
    National,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Economic,
        Category::Social,
        Category::Cultural,
        Category::National,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Category::Economic => "economic",
            Category::Social => "social",
            Category::Cultural => "cultural",
            Category::National => "national",
        }
    }
}

/// Stable identifier of a bank statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatementId(pub u32);

/// Scored quiz item. `effect` gives the signed push agreement applies to each axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub id: StatementId,
    pub category: Category,
    pub text: String,
    pub effect: BTreeMap<Category, f64>,
    pub weight: f64,
}

impl Statement {
    pub fn new(id: u32, category: Category, text: &str, effect: f64, weight: f64) -> Self {
        Self {
            id: StatementId(id),
            category,
            text: text.to_string(),
            effect: BTreeMap::from([(category, effect)]),
            weight,
        }
    }
}

pub const LIKERT_MIN: u8 = 1;
pub const LIKERT_NEUTRAL: u8 = 3;
pub const LIKERT_MAX: u8 = 5;

/// Agreement rating on the 1..=5 scale, 3 being neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LikertValue(u8);

impl LikertValue {
    pub const NEUTRAL: LikertValue = LikertValue(LIKERT_NEUTRAL);

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for LikertValue {
    type Error = LikertError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (LIKERT_MIN..=LIKERT_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(LikertError::OutOfRange(value))
        }
    }
}

impl From<LikertValue> for u8 {
    fn from(value: LikertValue) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LikertError {
    #[error("likert value {0} outside 1..=5")]
    OutOfRange(u8),
}

/// Signed distance from neutral, in `-2..=2`.
pub fn normalize_likert(value: LikertValue) -> i8 {
    value.get() as i8 - LIKERT_NEUTRAL as i8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikertAnswer {
    pub statement_id: StatementId,
    pub value: LikertValue,
}

impl LikertAnswer {
    pub fn new(statement_id: StatementId, value: LikertValue) -> Self {
        Self {
            statement_id,
            value,
        }
    }
}

/// Answers collected for one quiz; re-answering a statement replaces the earlier value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<LikertAnswer>", into = "Vec<LikertAnswer>")]
pub struct AnswerSheet {
    answers: Vec<LikertAnswer>,
    positions: HashMap<StatementId, usize>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, answer: LikertAnswer) {
        match self.positions.get(&answer.statement_id) {
            Some(&position) => self.answers[position].value = answer.value,
            None => {
                self.positions
                    .insert(answer.statement_id, self.answers.len());
                self.answers.push(answer);
            }
        }
    }

    pub fn get(&self, statement_id: StatementId) -> Option<LikertValue> {
        self.positions
            .get(&statement_id)
            .map(|&position| self.answers[position].value)
    }

    pub fn answers(&self) -> &[LikertAnswer] {
        &self.answers
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl From<Vec<LikertAnswer>> for AnswerSheet {
    fn from(answers: Vec<LikertAnswer>) -> Self {
        answers.into_iter().collect()
    }
}

impl From<AnswerSheet> for Vec<LikertAnswer> {
    fn from(sheet: AnswerSheet) -> Self {
        sheet.answers
    }
}

impl FromIterator<LikertAnswer> for AnswerSheet {
    fn from_iter<I: IntoIterator<Item = LikertAnswer>>(iter: I) -> Self {
        let mut sheet = AnswerSheet::new();
        for answer in iter {
            sheet.record(answer);
        }
        sheet
    }
}

pub const AXIS_MIN: f64 = 0.0;
pub const AXIS_MAX: f64 = 10.0;
pub const AXIS_NEUTRAL: f64 = 5.0;

/// Position on each axis. Low means left/authoritarian/conservative/nationalist,
/// high means right/libertarian/progressive/globalist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisScores {
    pub economic: f64,
    pub social: f64,
    pub cultural: f64,
    pub national: f64,
}

impl AxisScores {
    pub const fn neutral() -> Self {
        Self {
            economic: AXIS_NEUTRAL,
            social: AXIS_NEUTRAL,
            cultural: AXIS_NEUTRAL,
            national: AXIS_NEUTRAL,
        }
    }

    pub fn get(&self, axis: Category) -> f64 {
        match axis {
            Category::Economic => self.economic,
            Category::Social => self.social,
            Category::Cultural => self.cultural,
            Category::National => self.national,
        }
    }

    fn slot_mut(&mut self, axis: Category) -> &mut f64 {
        match axis {
            Category::Economic => &mut self.economic,
            Category::Social => &mut self.social,
            Category::Cultural => &mut self.cultural,
            Category::National => &mut self.national,
        }
    }

    pub fn add(&mut self, axis: Category, delta: f64) {
        *self.slot_mut(axis) += delta;
    }

    /// Truncate every axis into `[0, 10]`.
    pub fn clamped(mut self) -> Self {
        for axis in Category::ALL {
            let slot = self.slot_mut(axis);
            *slot = slot.clamp(AXIS_MIN, AXIS_MAX);
        }
        self
    }
}

impl Default for AxisScores {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Where the respondent placed themselves before answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfPositioningId {
    Left,
    CenterLeft,
    Center,
    CenterRight,
    Right,
    Unsure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelfAssessment {
    pub id: SelfPositioningId,
    pub label: String,
    pub scores: Option<AxisScores>,
}

/// Which path produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultOrigin {
    Remote,
    LocalFallback,
}

/// Classification handed to display, sharing and persistence, whichever path produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub label: String,
    pub axis_scores: AxisScores,
    pub intensity: f64,
    pub explanation: String,
    pub comparable_references: Vec<String>,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_assessment: Option<SelfAssessment>,
    pub origin: ResultOrigin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}
