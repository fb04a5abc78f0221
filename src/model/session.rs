use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::model::{nullable, Collection, Entity, Id};

/// Calendar date (`YYYY-MM-DD`) or timestamp of a training session.
///
/// Timestamps are stored in UTC with millisecond precision
/// (`2024-03-18T07:30:00.000Z`), so the stored strings sort chronologically.
/// A bare calendar date sorts before every timestamp of the same day.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SessionDate(String);

impl SessionDate {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(Self(date.format("%Y-%m-%d").to_string()));
        }
        match DateTime::parse_from_rfc3339(trimmed) {
            Ok(timestamp) => Ok(Self(
                timestamp
                    .with_timezone(&Utc)
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
            )),
            Err(_) => Err(format!(
                "date must be YYYY-MM-DD or an RFC 3339 timestamp, got '{}'",
                raw
            )),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_calendar_date(&self) -> bool {
        !self.0.contains('T')
    }

    /// Inclusive upper bound for range filters: a calendar date covers its whole day
    pub fn upper_bound(&self) -> String {
        if self.is_calendar_date() {
            format!("{}T23:59:59.999Z", self.0)
        } else {
            self.0.clone()
        }
    }
}

impl<'de> Deserialize<'de> for SessionDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        SessionDate::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetEntry {
    #[validate(range(min = 0.0, message = "weight must not be negative"))]
    pub weight: f64,
    pub reps: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SessionEntry {
    /// Not checked against the exercises collection
    #[validate(length(min = 1, message = "exerciseId is required"))]
    pub exercise_id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub sets: Vec<SetEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Id,
    pub date: SessionDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_id: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
    #[serde(default)]
    pub entries: Vec<SessionEntry>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for Session {
    const COLLECTION: Collection = Collection::Sessions;
    const LABEL: &'static str = "Session";
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewSession {
    pub date: SessionDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_id: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
    #[validate(nested)]
    pub entries: Vec<SessionEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SessionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<SessionDate>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub workout_id: Option<Option<Id>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub entries: Option<Vec<SessionEntry>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_session_date_accepts_calendar_dates_and_timestamps() {
        assert!(SessionDate::parse("2024-03-18").is_ok());
        assert!(SessionDate::parse("2024-03-18T07:30:00Z").is_ok());
        assert!(SessionDate::parse("18/03/2024").is_err());
    }

    #[test]
    fn test_timestamps_are_stored_in_utc() {
        let date = SessionDate::parse("2024-03-18T23:00:00-05:00").unwrap();
        assert_eq!(date.as_str(), "2024-03-19T04:00:00.000Z");
        assert!(!date.is_calendar_date());

        let earlier = SessionDate::parse("2024-03-19T01:00:00Z").unwrap();
        assert!(earlier < date);
    }

    #[test]
    fn test_calendar_date_upper_bound_covers_the_day() {
        let date = SessionDate::parse("2024-03-18").unwrap();
        assert_eq!(date.as_str(), "2024-03-18");
        assert_eq!(date.upper_bound(), "2024-03-18T23:59:59.999Z");

        let late = SessionDate::parse("2024-03-18T23:59:59Z").unwrap();
        assert!(late.as_str() <= date.upper_bound().as_str());
    }

    #[test]
    fn test_new_session_rejects_bad_date() {
        let result = serde_json::from_value::<NewSession>(json!({
            "date": "ontem",
            "entries": []
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_new_session_requires_entries() {
        let result = serde_json::from_value::<NewSession>(json!({"date": "2024-03-18"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_weight_fails_validation() {
        let session: NewSession = serde_json::from_value(json!({
            "date": "2024-03-18",
            "entries": [{"exerciseId": "e1", "sets": [{"weight": -5.0, "reps": 10}]}]
        }))
        .unwrap();
        assert!(session.validate().is_err());
    }
}
