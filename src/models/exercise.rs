use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{opt_string_or_number, string_or_number};
use crate::dates;

/// One log entry, embedded in its user's document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub description: String,
    /// Integer-parsed minutes; `None` when the input held no leading digits.
    pub duration: Option<i64>,
    /// Normalized date string, see [`dates::DATE_FORMAT`].
    pub date: String,
}

impl Exercise {
    /// Builds the entry to persist. A missing or unparseable date falls back
    /// to the current day.
    pub fn from_request(body: &CreateExerciseRequest) -> Self {
        let date = body
            .date
            .as_deref()
            .and_then(dates::parse_date)
            .unwrap_or_else(dates::today);

        Self {
            description: body.description.clone(),
            duration: dates::parse_int_prefix(&body.duration),
            date: dates::normalize(date),
        }
    }
}

/// POST /api/users/:id/exercises
#[derive(Debug, Deserialize, Validate)]
pub struct CreateExerciseRequest {
    #[serde(default, deserialize_with = "string_or_number")]
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,

    #[serde(default, deserialize_with = "string_or_number")]
    #[validate(length(min = 1, message = "duration is required"))]
    pub duration: String,

    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExerciseResponse {
    pub username: String,
    pub description: String,
    pub duration: Option<i64>,
    pub date: String,
    pub id: Uuid,
}

/// GET /api/users/:id/logs
#[derive(Debug, Default, Deserialize)]
pub struct LogQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

impl LogQuery {
    /// Applies `from`, then `to`, then `limit`, in that order.
    ///
    /// A bound that does not parse compares false against every entry, so it
    /// empties the log instead of being ignored.
    pub fn apply(&self, mut log: Vec<Exercise>) -> Vec<Exercise> {
        if let Some(from) = present(&self.from) {
            let from = dates::parse_date(from);
            log.retain(|e| matches!((dates::parse_date(&e.date), from), (Some(d), Some(f)) if d >= f));
        }

        if let Some(to) = present(&self.to) {
            let to = dates::parse_date(to);
            log.retain(|e| matches!((dates::parse_date(&e.date), to), (Some(d), Some(t)) if d <= t));
        }

        if let Some(limit) = present(&self.limit) {
            let keep = match dates::parse_int_prefix(limit) {
                None => 0,
                Some(n) if n >= 0 => usize::try_from(n).unwrap_or(usize::MAX),
                // negative counts drop from the end
                Some(n) => {
                    let drop = usize::try_from(n.unsigned_abs()).unwrap_or(usize::MAX);
                    log.len().saturating_sub(drop)
                }
            };
            log.truncate(keep);
        }

        log
    }
}

/// Empty query values count as absent.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[derive(Debug, Serialize)]
pub struct LogResponse {
    pub username: String,
    pub count: usize,
    pub id: Uuid,
    pub log: Vec<Exercise>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(description: &str, date: &str) -> Exercise {
        Exercise {
            description: description.into(),
            duration: Some(10),
            date: date.into(),
        }
    }

    fn sample_log() -> Vec<Exercise> {
        vec![
            entry("a", "Mon Jan 01 2024"),
            entry("b", "Mon Jan 15 2024"),
            entry("c", "Thu Feb 01 2024"),
        ]
    }

    fn query(from: Option<&str>, to: Option<&str>, limit: Option<&str>) -> LogQuery {
        LogQuery {
            from: from.map(Into::into),
            to: to.map(Into::into),
            limit: limit.map(Into::into),
        }
    }

    fn descriptions(log: &[Exercise]) -> Vec<&str> {
        log.iter().map(|e| e.description.as_str()).collect()
    }

    #[test]
    fn test_no_filters_keeps_everything() {
        let log = LogQuery::default().apply(sample_log());
        assert_eq!(descriptions(&log), ["a", "b", "c"]);
    }

    #[test]
    fn test_from_and_to_are_inclusive() {
        let log = query(Some("2024-01-15"), Some("2024-02-01"), None).apply(sample_log());
        assert_eq!(descriptions(&log), ["b", "c"]);

        let log = query(Some("2024-01-01"), Some("2024-01-01"), None).apply(sample_log());
        assert_eq!(descriptions(&log), ["a"]);
    }

    #[test]
    fn test_limit_applies_after_filter() {
        let log = query(Some("2024-01-10"), None, Some("1")).apply(sample_log());
        assert_eq!(descriptions(&log), ["b"]);
    }

    #[test]
    fn test_limit_keeps_insertion_order_front() {
        let log = query(None, None, Some("2")).apply(sample_log());
        assert_eq!(descriptions(&log), ["a", "b"]);

        let log = query(None, None, Some("10")).apply(sample_log());
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_unparseable_limit_keeps_nothing() {
        let log = query(None, None, Some("lots")).apply(sample_log());
        assert!(log.is_empty());
    }

    #[test]
    fn test_negative_limit_drops_from_end() {
        let log = query(None, None, Some("-1")).apply(sample_log());
        assert_eq!(descriptions(&log), ["a", "b"]);

        let log = query(None, None, Some("-5")).apply(sample_log());
        assert!(log.is_empty());
    }

    #[test]
    fn test_malformed_bound_excludes_all() {
        let log = query(Some("whenever"), None, None).apply(sample_log());
        assert!(log.is_empty());

        let log = query(None, Some("soon"), None).apply(sample_log());
        assert!(log.is_empty());
    }

    #[test]
    fn test_empty_values_are_ignored() {
        let log = query(Some(""), Some(""), Some("")).apply(sample_log());
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_request_accepts_numeric_json_fields() {
        let body: CreateExerciseRequest =
            serde_json::from_str(r#"{"description":"swim","duration":45,"date":null}"#).unwrap();
        assert_eq!(body.duration, "45");
        assert_eq!(body.date, None);
    }

    #[test]
    fn test_request_accepts_numeric_description() {
        let body: CreateExerciseRequest =
            serde_json::from_str(r#"{"description":5,"duration":"10"}"#).unwrap();
        assert_eq!(body.description, "5");
        assert!(body.validate().is_ok());
    }

    #[test]
    fn test_request_missing_fields_fail_validation() {
        let body: CreateExerciseRequest = serde_json::from_str(r#"{"description":"swim"}"#).unwrap();
        let err = body.validate().unwrap_err();
        assert!(err.field_errors().contains_key("duration"));
        assert!(!err.field_errors().contains_key("description"));
    }

    #[test]
    fn test_from_request_normalizes_date_and_duration() {
        let body = CreateExerciseRequest {
            description: "run".into(),
            duration: "30".into(),
            date: Some("2024-01-01".into()),
        };
        let exercise = Exercise::from_request(&body);
        assert_eq!(exercise.duration, Some(30));
        assert_eq!(exercise.date, "Mon Jan 01 2024");
    }

    #[test]
    fn test_from_request_defaults_bad_date_to_today() {
        let body = CreateExerciseRequest {
            description: "run".into(),
            duration: "fast".into(),
            date: Some("someday".into()),
        };
        let exercise = Exercise::from_request(&body);
        assert_eq!(exercise.duration, None);
        assert_eq!(exercise.date, dates::normalize(dates::today()));
    }
}
