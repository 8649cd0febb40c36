//! Contribution calendar types and the endpoint's response envelope

use serde::{Deserialize, Serialize};

use super::{ContribheatError, Result};

/// One calendar day with its contribution count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionDay {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    #[serde(rename = "contributionCount")]
    pub count: u64,
}

impl ContributionDay {
    pub fn new(date: impl Into<String>, count: u64) -> Self {
        Self {
            date: date.into(),
            count,
        }
    }
}

/// Up to seven chronological days
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionWeek {
    #[serde(rename = "contributionDays")]
    pub days: Vec<ContributionDay>,
}

/// A full contribution calendar, weeks in chronological order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionData {
    #[serde(rename = "totalContributions")]
    pub total_count: u64,
    pub weeks: Vec<ContributionWeek>,
}

impl ContributionData {
    /// Parse the endpoint body:
    /// `{ data: { user: { contributionsCollection: { contributionCalendar } } } }`
    ///
    /// Takes a mutable buffer because simd-json parses in place.
    pub fn from_response_slice(body: &mut [u8]) -> Result<Self> {
        let envelope: ResponseEnvelope = simd_json::serde::from_slice(body)
            .map_err(|e| ContribheatError::Parse(e.to_string()))?;
        let user = envelope
            .data
            .user
            .ok_or_else(|| ContribheatError::Parse("response has no user".into()))?;
        Ok(user.contributions_collection.contribution_calendar)
    }

    /// All days in chronological order
    pub fn days(&self) -> impl Iterator<Item = &ContributionDay> {
        self.weeks.iter().flat_map(|w| w.days.iter())
    }

    /// Highest single-day count (0 for an empty calendar)
    pub fn max_count(&self) -> u64 {
        self.days().map(|d| d.count).max().unwrap_or(0)
    }

    /// Number of days with at least one contribution
    pub fn active_days(&self) -> usize {
        self.days().filter(|d| d.count > 0).count()
    }
}

#[derive(Debug, Deserialize)]
struct ResponseEnvelope {
    data: ResponseData,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    /// GraphQL answers `null` for unknown users
    user: Option<ResponseUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseUser {
    contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    contribution_calendar: ContributionData,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_body() -> Vec<u8> {
        br#"{
            "data": {
                "user": {
                    "contributionsCollection": {
                        "contributionCalendar": {
                            "totalContributions": 7,
                            "weeks": [
                                { "contributionDays": [
                                    { "contributionCount": 0, "date": "2024-01-06" }
                                ]},
                                { "contributionDays": [
                                    { "contributionCount": 2, "date": "2024-01-07" },
                                    { "contributionCount": 5, "date": "2024-01-08" }
                                ]}
                            ]
                        }
                    }
                }
            }
        }"#
        .to_vec()
    }

    #[test]
    fn test_parse_envelope() {
        let mut body = sample_body();
        let data = ContributionData::from_response_slice(&mut body).unwrap();

        assert_eq!(data.total_count, 7);
        assert_eq!(data.weeks.len(), 2);
        assert_eq!(data.weeks[1].days[1], ContributionDay::new("2024-01-08", 5));
    }

    #[test]
    fn test_parse_null_user_is_error() {
        let mut body = br#"{"data":{"user":null}}"#.to_vec();
        let err = ContributionData::from_response_slice(&mut body).unwrap_err();
        assert!(matches!(err, ContribheatError::Parse(_)));
    }

    #[test]
    fn test_parse_missing_nested_field_is_error() {
        let mut body = br#"{"data":{"user":{"contributionsCollection":{}}}}"#.to_vec();
        let err = ContributionData::from_response_slice(&mut body).unwrap_err();
        assert!(matches!(err, ContribheatError::Parse(_)));
    }

    #[test]
    fn test_parse_garbage_is_error() {
        let mut body = b"<html>Bad Gateway</html>".to_vec();
        assert!(ContributionData::from_response_slice(&mut body).is_err());
    }

    #[test]
    fn test_days_and_stats() {
        let mut body = sample_body();
        let data = ContributionData::from_response_slice(&mut body).unwrap();

        let dates: Vec<&str> = data.days().map(|d| d.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-06", "2024-01-07", "2024-01-08"]);
        assert_eq!(data.max_count(), 5);
        assert_eq!(data.active_days(), 2);
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let day = ContributionDay::new("2024-01-05", 3);
        let json = serde_json::to_string(&day).unwrap();
        assert_eq!(json, r#"{"date":"2024-01-05","contributionCount":3}"#);
    }
}
