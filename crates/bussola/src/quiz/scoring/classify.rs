use serde::{Deserialize, Serialize};

use super::super::domain::AxisScores;

pub const LOW_THRESHOLD: f64 = 4.0;
pub const HIGH_THRESHOLD: f64 = 6.0;

/// Coarse quadrant label produced by the fallback heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PoliticalLabel {
    LeftAuthoritarian,
    LeftLibertarian,
    RightAuthoritarian,
    RightLibertarian,
    Center,
}

impl PoliticalLabel {
    pub const fn as_str(self) -> &'static str {
        match self {
            PoliticalLabel::LeftAuthoritarian => "left-authoritarian",
            PoliticalLabel::LeftLibertarian => "left-libertarian",
            PoliticalLabel::RightAuthoritarian => "right-authoritarian",
            PoliticalLabel::RightLibertarian => "right-libertarian",
            PoliticalLabel::Center => "center",
        }
    }
}

/// Quadrant from the economic and social axes only; cultural and national are ignored.
///
/// Both thresholds are strict, so a score of exactly 4 or 6 stays in the center band.
pub fn classify(scores: &AxisScores) -> PoliticalLabel {
    let (e, s) = (scores.economic, scores.social);

    if e < LOW_THRESHOLD && s < LOW_THRESHOLD {
        PoliticalLabel::LeftAuthoritarian
    } else if e < LOW_THRESHOLD && s > HIGH_THRESHOLD {
        PoliticalLabel::LeftLibertarian
    } else if e > HIGH_THRESHOLD && s < LOW_THRESHOLD {
        PoliticalLabel::RightAuthoritarian
    } else if e > HIGH_THRESHOLD && s > HIGH_THRESHOLD {
        PoliticalLabel::RightLibertarian
    } else {
        PoliticalLabel::Center
    }
}
