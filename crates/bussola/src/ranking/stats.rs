use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::participation::ParticipationRecord;
use crate::quiz::domain::{AxisScores, Category};

const TREND_MONTHS: i32 = 6;

/// Window of participations included in the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "30d")]
    Last30Days,
    #[default]
    #[serde(rename = "all")]
    All,
}

impl TimeRange {
    pub const fn slug(self) -> &'static str {
        match self {
            TimeRange::Last7Days => "7d",
            TimeRange::Last30Days => "30d",
            TimeRange::All => "all",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            TimeRange::Last7Days => "Last 7 days",
            TimeRange::Last30Days => "Last 30 days",
            TimeRange::All => "All time",
        }
    }

    fn window(self) -> Option<Duration> {
        match self {
            TimeRange::Last7Days => Some(Duration::days(7)),
            TimeRange::Last30Days => Some(Duration::days(30)),
            TimeRange::All => None,
        }
    }

    pub fn includes(self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self.window() {
            Some(window) => created_at >= now - window,
            None => true,
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown time range '{0}', expected 7d, 30d or all")]
pub struct TimeRangeParseError(pub String);

impl FromStr for TimeRange {
    type Err = TimeRangeParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "7d" => Ok(TimeRange::Last7Days),
            "30d" => Ok(TimeRange::Last30Days),
            "all" | "" => Ok(TimeRange::All),
            _ => Err(TimeRangeParseError(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelShare {
    pub label: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionCount {
    pub region: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionBreakdown {
    pub total: usize,
    pub max_count: usize,
    pub by_region: Vec<RegionCount>,
}

/// Average axis position for one calendar month; `None` averages mean no participations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrendPoint {
    pub month: String,
    pub averages: Option<AxisScores>,
    pub participants: usize,
}

/// Aggregate view of stored participations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingSummary {
    pub generated_at: DateTime<Utc>,
    pub range: TimeRange,
    pub range_label: String,
    pub participants: usize,
    pub averages: Option<AxisScores>,
    pub distribution: Vec<LabelShare>,
    pub regions: RegionBreakdown,
    pub monthly_trend: Vec<MonthlyTrendPoint>,
}

impl RankingSummary {
    /// Summarise `records` for `range`. The monthly trend always covers every record.
    pub fn compute(records: &[ParticipationRecord], range: TimeRange, now: DateTime<Utc>) -> Self {
        let filtered: Vec<&ParticipationRecord> = records
            .iter()
            .filter(|record| range.includes(record.created_at, now))
            .collect();

        Self {
            generated_at: now,
            range,
            range_label: range.label().to_string(),
            participants: filtered.len(),
            averages: average_scores(&filtered),
            distribution: label_distribution(&filtered),
            regions: region_breakdown(&filtered),
            monthly_trend: monthly_trend(records, now),
        }
    }
}

fn average_scores(records: &[&ParticipationRecord]) -> Option<AxisScores> {
    if records.is_empty() {
        return None;
    }

    let count = records.len() as f64;
    let mut sums = AxisScores {
        economic: 0.0,
        social: 0.0,
        cultural: 0.0,
        national: 0.0,
    };
    for record in records {
        for axis in Category::ALL {
            sums.add(axis, record.axis_scores.get(axis));
        }
    }

    Some(AxisScores {
        economic: sums.economic / count,
        social: sums.social / count,
        cultural: sums.cultural / count,
        national: sums.national / count,
    })
}

fn label_distribution(records: &[&ParticipationRecord]) -> Vec<LabelShare> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.label.as_str()).or_insert(0) += 1;
    }

    let total = records.len() as f64;
    let mut shares: Vec<LabelShare> = counts
        .into_iter()
        .map(|(label, count)| LabelShare {
            label: label.to_string(),
            count,
            percentage: count as f64 / total * 100.0,
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    shares
}

fn region_breakdown(records: &[&ParticipationRecord]) -> RegionBreakdown {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for region in records.iter().filter_map(|record| record.shared_region()) {
        *counts.entry(region).or_insert(0) += 1;
    }

    let total = counts.values().sum();
    let max_count = counts.values().copied().max().unwrap_or(0);
    let mut by_region: Vec<RegionCount> = counts
        .into_iter()
        .map(|(region, count)| RegionCount {
            region: region.to_string(),
            count,
        })
        .collect();
    by_region.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.region.cmp(&b.region)));

    RegionBreakdown {
        total,
        max_count,
        by_region,
    }
}

fn month_key(year: i32, month0: u32) -> i32 {
    year * 12 + month0 as i32
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn monthly_trend(records: &[ParticipationRecord], now: DateTime<Utc>) -> Vec<MonthlyTrendPoint> {
    let mut buckets: BTreeMap<i32, Vec<&ParticipationRecord>> = BTreeMap::new();
    for record in records {
        let key = month_key(record.created_at.year(), record.created_at.month0());
        buckets.entry(key).or_default().push(record);
    }

    let current = month_key(now.year(), now.month0());
    (0..TREND_MONTHS)
        .map(|offset| {
            let key = current - (TREND_MONTHS - 1 - offset);
            let (year, month) = (key.div_euclid(12), key.rem_euclid(12) + 1);
            let bucket = buckets.get(&key).map(Vec::as_slice).unwrap_or(&[]);
            let averages = average_scores(bucket).map(|scores| AxisScores {
                economic: round2(scores.economic),
                social: round2(scores.social),
                cultural: round2(scores.cultural),
                national: round2(scores.national),
            });

            MonthlyTrendPoint {
                month: format!("{year:04}-{month:02}"),
                averages,
                participants: bucket.len(),
            }
        })
        .collect()
}
