use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleMetadata {
    pub project_name: String,
    #[serde(default)]
    pub project_description: String,
    /// Calendar date of day 0. When absent, results stay in day offsets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_start_date: Option<NaiveDate>,
}

impl Default for ScheduleMetadata {
    fn default() -> Self {
        Self {
            project_name: "New Project".to_string(),
            project_description: "No description".to_string(),
            project_start_date: None,
        }
    }
}

impl ScheduleMetadata {
    /// Calendar date for a day offset, if the origin is known.
    pub fn date_for_offset(&self, offset_days: i64) -> Option<NaiveDate> {
        let origin = self.project_start_date?;
        let magnitude = Days::new(offset_days.unsigned_abs());
        if offset_days >= 0 {
            origin.checked_add_days(magnitude)
        } else {
            origin.checked_sub_days(magnitude)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_map_to_calendar_dates() {
        let metadata = ScheduleMetadata {
            project_start_date: NaiveDate::from_ymd_opt(2025, 1, 30),
            ..ScheduleMetadata::default()
        };
        assert_eq!(metadata.date_for_offset(3), NaiveDate::from_ymd_opt(2025, 2, 2));
        assert_eq!(metadata.date_for_offset(-1), NaiveDate::from_ymd_opt(2025, 1, 29));
        assert_eq!(ScheduleMetadata::default().date_for_offset(3), None);
    }
}
