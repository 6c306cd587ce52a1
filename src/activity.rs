use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A planned unit of work. Its duration is derived from the planned dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_end: Option<NaiveDate>,
}

impl Activity {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            planned_start: None,
            planned_end: None,
        }
    }

    pub fn with_dates(
        id: impl Into<String>,
        title: impl Into<String>,
        planned_start: NaiveDate,
        planned_end: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            planned_start: Some(planned_start),
            planned_end: Some(planned_end),
        }
    }

    /// True when both dates are present and the end precedes the start.
    pub fn has_inverted_dates(&self) -> bool {
        matches!(
            (self.planned_start, self.planned_end),
            (Some(start), Some(end)) if end < start
        )
    }

    /// Whole days between the planned dates, never negative.
    ///
    /// Calendar dates differ by whole days, so the ceiling of the day
    /// difference is the difference itself. Missing dates yield 0.
    pub fn planned_duration_days(&self) -> i64 {
        match (self.planned_start, self.planned_end) {
            (Some(start), Some(end)) => (end - start).num_days().max(0),
            _ => 0,
        }
    }
}

/// A zero-duration point-in-time event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

impl Milestone {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}
