use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use ts_rs::TS;

use crate::Stored;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum InterviewType {
    Technical,
    Behavioral,
    SystemDesign,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum InterviewRound {
    Initial,
    Coding,
    SystemDesign,
    Behavioral,
    Final,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq, Hash)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum InterviewStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl InterviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewStatus::Scheduled => "scheduled",
            InterviewStatus::Completed => "completed",
            InterviewStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An RFC 3339 timestamp that serializes back to the exact text it was
/// parsed from, offset included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewDate {
    text: String,
    at: DateTime<FixedOffset>,
}

impl InterviewDate {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn to_utc(&self) -> DateTime<Utc> {
        self.at.with_timezone(&Utc)
    }
}

impl FromStr for InterviewDate {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let at = DateTime::parse_from_rfc3339(s)?;
        Ok(Self {
            text: s.to_string(),
            at,
        })
    }
}

impl From<DateTime<Utc>> for InterviewDate {
    fn from(value: DateTime<Utc>) -> Self {
        Self {
            text: value.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            at: value.into(),
        }
    }
}

impl std::fmt::Display for InterviewDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for InterviewDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for InterviewDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse()
            .map_err(|e| D::Error::custom(format!("invalid date `{}`: {}", text, e)))
    }
}

/// A scheduled or past interview. `company` is a free-form name and is not
/// checked against the companies collection.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct Interview {
    pub company: String,
    pub role: String,
    #[ts(type = "string")]
    pub date: InterviewDate,
    #[serde(rename = "type")]
    pub interview_type: InterviewType,
    pub round: InterviewRound,
    pub status: InterviewStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub notes: Option<String>,
}

pub type StoredInterview = Stored<Interview>;

#[derive(Debug, Serialize, Deserialize)]
pub struct InterviewsResponse {
    pub interviews: Vec<StoredInterview>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InterviewListQuery {
    pub status: Option<InterviewStatus>,
    pub company: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interview_deserialization() {
        let json = r#"{
            "company": "Google",
            "role": "SWE",
            "date": "2025-05-15T10:00:00Z",
            "type": "system-design",
            "round": "system-design",
            "status": "scheduled"
        }"#;

        let interview: Interview = serde_json::from_str(json).unwrap();
        assert_eq!(interview.interview_type, InterviewType::SystemDesign);
        assert_eq!(interview.round, InterviewRound::SystemDesign);
        assert_eq!(interview.status, InterviewStatus::Scheduled);
        assert!(interview.notes.is_none());
    }

    #[test]
    fn test_interview_rejects_unknown_round() {
        let json = r#"{
            "company": "Google",
            "role": "SWE",
            "date": "2025-05-15T10:00:00Z",
            "type": "technical",
            "round": "lunch",
            "status": "scheduled"
        }"#;

        assert!(serde_json::from_str::<Interview>(json).is_err());
    }

    #[test]
    fn test_interview_date_keeps_offset() {
        let date: InterviewDate = serde_json::from_str(r#""2025-05-15T10:00:00+02:00""#).unwrap();
        assert_eq!(date.as_str(), "2025-05-15T10:00:00+02:00");
        assert_eq!(
            date.to_utc(),
            "2025-05-15T08:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
        assert_eq!(
            serde_json::to_string(&date).unwrap(),
            r#""2025-05-15T10:00:00+02:00""#
        );
    }

    #[test]
    fn test_interview_date_rejects_garbage() {
        assert!(serde_json::from_str::<InterviewDate>(r#""next tuesday""#).is_err());
        assert!(serde_json::from_str::<InterviewDate>(r#""2025-05-15""#).is_err());
    }
}
