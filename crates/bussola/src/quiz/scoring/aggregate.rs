use std::collections::HashMap;

use tracing::debug;

use super::super::domain::{normalize_likert, AxisScores, LikertAnswer, Statement, StatementId};

/// Caps a single fully-weighted statement at about one point of movement (2 * 1 * 1 * 0.5).
pub const SWING_SCALE: f64 = 0.5;

/// Fold answers into axis scores, starting from neutral and clamping into `[0, 10]` at the end.
///
/// Answers referencing statements missing from `bank` are skipped. Contributions are summed
/// in answer order.
pub fn aggregate(answers: &[LikertAnswer], bank: &[Statement]) -> AxisScores {
    let mut index: HashMap<StatementId, &Statement> = HashMap::with_capacity(bank.len());
    for statement in bank {
        index.entry(statement.id).or_insert(statement);
    }
    let mut scores = AxisScores::neutral();

    for answer in answers {
        let Some(statement) = index.get(&answer.statement_id) else {
            debug!(statement_id = answer.statement_id.0, "skipping answer for unknown statement");
            continue;
        };

        let normalized = f64::from(normalize_likert(answer.value));
        for (&axis, &effect) in &statement.effect {
            scores.add(axis, normalized * effect * statement.weight * SWING_SCALE);
        }
    }

    scores.clamped()
}
