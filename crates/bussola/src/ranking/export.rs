use serde::Serialize;

use super::stats::{MonthlyTrendPoint, RankingSummary};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write csv export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush csv export: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to recover csv buffer: {0}")]
    Flush(String),
    #[error("csv export is not valid utf-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("failed to serialize json export: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct TrendRow<'a> {
    month: &'a str,
    economic: Option<f64>,
    social: Option<f64>,
    cultural: Option<f64>,
    national: Option<f64>,
    participants: usize,
}

impl<'a> From<&'a MonthlyTrendPoint> for TrendRow<'a> {
    fn from(point: &'a MonthlyTrendPoint) -> Self {
        Self {
            month: &point.month,
            economic: point.averages.map(|scores| scores.economic),
            social: point.averages.map(|scores| scores.social),
            cultural: point.averages.map(|scores| scores.cultural),
            national: point.averages.map(|scores| scores.national),
            participants: point.participants,
        }
    }
}

impl RankingSummary {
    pub fn to_json_pretty(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Monthly averages as CSV; months without participations leave the axis columns empty.
    pub fn monthly_trend_csv(&self) -> Result<String, ExportError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for point in &self.monthly_trend {
            writer.serialize(TrendRow::from(point))?;
        }
        writer.flush()?;

        let bytes = writer
            .into_inner()
            .map_err(|err| ExportError::Flush(err.to_string()))?;
        Ok(String::from_utf8(bytes)?)
    }
}
