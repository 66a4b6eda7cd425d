use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::super::domain::{AxisScores, Category, AXIS_NEUTRAL};

const HIGHLIGHT_COUNT: usize = 3;
const LOW_POLE_MAX: f64 = 3.5;
const HIGH_POLE_MIN: f64 = 6.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisPole {
    Low,
    Balanced,
    High,
}

/// One of the axes where a profile leans the most.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisHighlight {
    pub axis: Category,
    pub value: f64,
    pub strength: f64,
    pub pole: AxisPole,
}

fn pole_for(value: f64) -> AxisPole {
    if value >= HIGH_POLE_MIN {
        AxisPole::High
    } else if value <= LOW_POLE_MAX {
        AxisPole::Low
    } else {
        AxisPole::Balanced
    }
}

/// The three axes furthest from neutral, strongest first. Ties keep axis order.
pub fn axis_highlights(scores: &AxisScores) -> Vec<AxisHighlight> {
    let mut highlights: Vec<AxisHighlight> = Category::ALL
        .into_iter()
        .map(|axis| {
            let value = scores.get(axis);
            AxisHighlight {
                axis,
                value,
                strength: (value - AXIS_NEUTRAL).abs(),
                pole: pole_for(value),
            }
        })
        .collect();

    highlights.sort_by(|a, b| {
        b.strength
            .partial_cmp(&a.strength)
            .unwrap_or(Ordering::Equal)
    });
    highlights.truncate(HIGHLIGHT_COUNT);
    highlights
}
