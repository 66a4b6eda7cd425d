//! Public ranking: normalised participation records and the statistics built from them.

mod export;
pub mod participation;
pub mod stats;

pub use export::ExportError;
pub use participation::{ParticipationRecord, ParticipationStore, StoreError};
pub use stats::{
    LabelShare, MonthlyTrendPoint, RankingSummary, RegionBreakdown, RegionCount, TimeRange,
    TimeRangeParseError,
};
