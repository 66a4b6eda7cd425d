use serde::{Deserialize, Serialize};

pub const DEFAULT_FALLBACK_INTENSITY: f64 = 5.0;
pub const DEFAULT_FALLBACK_CONFIDENCE: f64 = 70.0;
pub const DEFAULT_FALLBACK_EXPLANATION: &str = "This analysis was computed locally because the AI analysis service was unavailable. \
It places your answers on each axis with a fixed rule set and does not include an AI-generated interpretation.";
pub const DEFAULT_FALLBACK_REFERENCE: &str = "Various historical figures";

/// Fixed fields stamped onto locally computed results. The fallback path has no genuine
/// intensity or confidence metric, so both are placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackConfig {
    pub intensity: f64,
    pub confidence: f64,
    pub explanation: String,
    pub comparable_references: Vec<String>,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            intensity: DEFAULT_FALLBACK_INTENSITY,
            confidence: DEFAULT_FALLBACK_CONFIDENCE,
            explanation: DEFAULT_FALLBACK_EXPLANATION.to_string(),
            comparable_references: vec![DEFAULT_FALLBACK_REFERENCE.to_string()],
        }
    }
}
