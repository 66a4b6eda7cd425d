//! Compiled-in statement catalogue and the self-positioning options shown before the quiz.
//!
//! Agreeing with a statement whose effect is `+1` moves its axis towards the high pole
//! (right, libertarian, progressive, globalist); `-1` moves it towards the low pole.

use std::collections::BTreeSet;

use serde::Serialize;

use super::domain::{
    AxisScores, Category, SelfAssessment, SelfPositioningId, Statement, StatementId,
};

/// The full statement bank, five statements per category, ordered by id.
pub fn all_statements() -> Vec<Statement> {
    use Category::*;

    vec![
        Statement::new(
            1,
            Economic,
            "The State should be primarily responsible for guaranteeing free healthcare and education for everyone.",
            -1.0,
            1.0,
        ),
        Statement::new(
            2,
            Economic,
            "High taxes on large fortunes are necessary to reduce social inequality.",
            -1.0,
            1.2,
        ),
        Statement::new(
            3,
            Economic,
            "Privatising state-owned companies generally improves the efficiency of services.",
            1.0,
            1.0,
        ),
        Statement::new(
            4,
            Economic,
            "The market should regulate itself with as little government interference as possible.",
            1.0,
            1.1,
        ),
        Statement::new(
            5,
            Economic,
            "Cash-transfer programmes for low-income families should be expanded.",
            -1.0,
            0.9,
        ),
        Statement::new(
            6,
            Social,
            "Individual freedom should always prevail over the collective interest of the State.",
            1.0,
            1.0,
        ),
        Statement::new(
            7,
            Social,
            "The government should have the power to monitor private communications to guarantee national security.",
            -1.0,
            1.2,
        ),
        Statement::new(
            8,
            Social,
            "Drug use should be treated as a matter of individual liberty and health, not as a crime.",
            1.0,
            1.0,
        ),
        Statement::new(
            9,
            Social,
            "Strict public-order laws are essential for a safe society, even if they limit protests.",
            -1.0,
            1.1,
        ),
        Statement::new(
            10,
            Social,
            "Gun ownership by ordinary citizens should be a right guaranteed by the State.",
            1.0,
            1.0,
        ),
        Statement::new(
            11,
            Cultural,
            "Abortion should be legal and provided by the public health system.",
            1.0,
            1.2,
        ),
        Statement::new(
            12,
            Cultural,
            "Religious values should directly influence the country's legislation.",
            -1.0,
            1.1,
        ),
        Statement::new(
            13,
            Cultural,
            "Racial quotas in universities and public jobs are essential for historical justice.",
            1.0,
            1.0,
        ),
        Statement::new(
            14,
            Cultural,
            "Preserving the traditional family should be one of the priorities of cultural policy.",
            -1.0,
            1.0,
        ),
        Statement::new(
            15,
            Cultural,
            "Schools should teach about gender diversity and sexual orientation.",
            1.0,
            0.9,
        ),
        Statement::new(
            16,
            National,
            "The country should prioritise international free-trade agreements, even if they hurt local industry.",
            1.0,
            1.0,
        ),
        Statement::new(
            17,
            National,
            "National sovereignty is sacred and international bodies should not interfere in internal affairs.",
            -1.0,
            1.2,
        ),
        Statement::new(
            18,
            National,
            "Immigration should be encouraged because it enriches the country's culture and economy.",
            1.0,
            1.0,
        ),
        Statement::new(
            19,
            National,
            "Patriotism and the teaching of national symbols should be mandatory in schools.",
            -1.0,
            0.8,
        ),
        Statement::new(
            20,
            National,
            "Global environmental concerns should override national economic development interests.",
            1.0,
            1.1,
        ),
    ]
}

/// Structural problems detected in a statement bank.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BankError {
    #[error("statement id {0:?} appears more than once")]
    DuplicateId(StatementId),
    #[error("statement {id:?} has non-positive weight {weight}")]
    InvalidWeight { id: StatementId, weight: f64 },
    #[error("statement {id:?} effect on {axis:?} is {value}, expected a value in [-1, 1]")]
    EffectOutOfRange {
        id: StatementId,
        axis: Category,
        value: f64,
    },
    #[error("statement {id:?} has no non-zero effect on its own category {category:?}")]
    PrimaryAxisWithoutEffect { id: StatementId, category: Category },
}

/// Check the bank invariants: unique ids, positive weights, bounded effects, and a
/// non-zero effect on each statement's own category.
pub fn validate_bank(statements: &[Statement]) -> Result<(), BankError> {
    let mut seen = BTreeSet::new();

    for statement in statements {
        if !seen.insert(statement.id) {
            return Err(BankError::DuplicateId(statement.id));
        }

        if !(statement.weight.is_finite() && statement.weight > 0.0) {
            return Err(BankError::InvalidWeight {
                id: statement.id,
                weight: statement.weight,
            });
        }

        for (&axis, &value) in &statement.effect {
            if !(-1.0..=1.0).contains(&value) {
                return Err(BankError::EffectOutOfRange {
                    id: statement.id,
                    axis,
                    value,
                });
            }
        }

        let primary = statement
            .effect
            .get(&statement.category)
            .copied()
            .unwrap_or(0.0);
        if primary == 0.0 {
            return Err(BankError::PrimaryAxisWithoutEffect {
                id: statement.id,
                category: statement.category,
            });
        }
    }

    Ok(())
}

/// A self-positioning choice with its reference point on the compass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelfPositioningOption {
    pub id: SelfPositioningId,
    pub label: &'static str,
    pub description: &'static str,
    pub scores: Option<AxisScores>,
}

impl SelfPositioningId {
    pub const ORDERED: [SelfPositioningId; 6] = [
        SelfPositioningId::Left,
        SelfPositioningId::CenterLeft,
        SelfPositioningId::Center,
        SelfPositioningId::CenterRight,
        SelfPositioningId::Right,
        SelfPositioningId::Unsure,
    ];

    pub const fn slug(self) -> &'static str {
        match self {
            SelfPositioningId::Left => "left",
            SelfPositioningId::CenterLeft => "center_left",
            SelfPositioningId::Center => "center",
            SelfPositioningId::CenterRight => "center_right",
            SelfPositioningId::Right => "right",
            SelfPositioningId::Unsure => "unsure",
        }
    }

    pub fn from_slug(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        Self::ORDERED
            .into_iter()
            .find(|candidate| candidate.slug() == normalized)
    }

    pub fn option(self) -> SelfPositioningOption {
        let (label, description, scores) = match self {
            SelfPositioningId::Left => (
                "Left",
                "Strong State role in the economy and broad social guarantees.",
                Some(reference(2.5, 5.5, 7.0, 6.0)),
            ),
            SelfPositioningId::CenterLeft => (
                "Center-left",
                "Social protection balanced with market mechanisms.",
                Some(reference(4.0, 5.5, 6.0, 5.5)),
            ),
            SelfPositioningId::Center => (
                "Center",
                "Pragmatic positions without a strong ideological pull.",
                Some(reference(5.0, 5.0, 5.0, 5.0)),
            ),
            SelfPositioningId::CenterRight => (
                "Center-right",
                "Market-friendly economics with moderate social views.",
                Some(reference(6.0, 5.0, 4.0, 4.5)),
            ),
            SelfPositioningId::Right => (
                "Right",
                "Free markets, order, and traditional values.",
                Some(reference(7.5, 4.5, 3.0, 3.5)),
            ),
            SelfPositioningId::Unsure => (
                "Not sure",
                "No self-placement; the result is shown without comparison.",
                None,
            ),
        };

        SelfPositioningOption {
            id: self,
            label,
            description,
            scores,
        }
    }

    /// The value attached to a result for the self-placement comparison.
    pub fn selection(self) -> SelfAssessment {
        let option = self.option();
        SelfAssessment {
            id: option.id,
            label: option.label.to_string(),
            scores: option.scores,
        }
    }
}

const fn reference(economic: f64, social: f64, cultural: f64, national: f64) -> AxisScores {
    AxisScores {
        economic,
        social,
        cultural,
        national,
    }
}

pub fn self_positioning_options() -> Vec<SelfPositioningOption> {
    SelfPositioningId::ORDERED
        .into_iter()
        .map(SelfPositioningId::option)
        .collect()
}
