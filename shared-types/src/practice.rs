use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::Stored;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum LeetCodeStatus {
    Solved,
    Unsolved,
    Review,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum ChallengeStatus {
    Completed,
    InProgress,
    Abandoned,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ComprehensionLevel {
    Low,
    Medium,
    High,
}

/// A solved (or attempted) coding problem.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct LeetCodeSession {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub difficulty: Difficulty,
    /// Minutes spent.
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub language: String,
    pub status: LeetCodeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MiniChallengeSession {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub estimated_duration: u32,
    #[serde(default)]
    pub actual_duration: u32,
    pub status: ChallengeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub learnings: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub topic: String,
    pub resources: String,
    #[serde(default)]
    pub duration: u32,
    pub comprehension_level: ComprehensionLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub key_takeaways: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub next_steps: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct TypingSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub wpm: Option<u32>,
    /// Percentage, 0 to 100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub notes: Option<String>,
}

/// One practice session, discriminated by its `type` field.
///
/// The variant is fixed at creation; switching kinds means deleting the
/// session and creating a new one.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PracticeSession {
    Leetcode(LeetCodeSession),
    MiniChallenge(MiniChallengeSession),
    Study(StudySession),
    Typing(TypingSession),
}

/// The tag values of [`PracticeSession`], used for filtering and counting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq, Hash)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum PracticeKind {
    Leetcode,
    MiniChallenge,
    Study,
    Typing,
}

impl PracticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PracticeKind::Leetcode => "leetcode",
            PracticeKind::MiniChallenge => "mini-challenge",
            PracticeKind::Study => "study",
            PracticeKind::Typing => "typing",
        }
    }
}

impl std::fmt::Display for PracticeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PracticeSession {
    pub fn kind(&self) -> PracticeKind {
        match self {
            PracticeSession::Leetcode(_) => PracticeKind::Leetcode,
            PracticeSession::MiniChallenge(_) => PracticeKind::MiniChallenge,
            PracticeSession::Study(_) => PracticeKind::Study,
            PracticeSession::Typing(_) => PracticeKind::Typing,
        }
    }

    /// Human-facing name of the session: a problem or challenge title, or a
    /// study topic. Typing drills have none.
    pub fn label(&self) -> Option<&str> {
        match self {
            PracticeSession::Leetcode(s) => Some(&s.title),
            PracticeSession::MiniChallenge(s) => Some(&s.title),
            PracticeSession::Study(s) => Some(&s.topic),
            PracticeSession::Typing(_) => None,
        }
    }

    /// Status as it appears on the wire, for the kinds that carry one.
    pub fn status(&self) -> Option<&'static str> {
        match self {
            PracticeSession::Leetcode(s) => Some(match s.status {
                LeetCodeStatus::Solved => "solved",
                LeetCodeStatus::Unsolved => "unsolved",
                LeetCodeStatus::Review => "review",
            }),
            PracticeSession::MiniChallenge(s) => Some(match s.status {
                ChallengeStatus::Completed => "completed",
                ChallengeStatus::InProgress => "in-progress",
                ChallengeStatus::Abandoned => "abandoned",
            }),
            PracticeSession::Study(_) | PracticeSession::Typing(_) => None,
        }
    }

    /// Minutes of practice the session accounts for.
    pub fn minutes(&self) -> u32 {
        match self {
            PracticeSession::Leetcode(s) => s.duration,
            PracticeSession::MiniChallenge(s) => s.actual_duration,
            PracticeSession::Study(s) => s.duration,
            PracticeSession::Typing(_) => 0,
        }
    }
}

pub type StoredPracticeSession = Stored<PracticeSession>;

#[derive(Debug, Serialize, Deserialize)]
pub struct PracticeSessionsResponse {
    pub sessions: Vec<StoredPracticeSession>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PracticeListQuery {
    #[serde(rename = "type")]
    pub kind: Option<PracticeKind>,
    pub status: Option<String>,
    pub q: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_practice_session_tags() {
        let session = PracticeSession::MiniChallenge(MiniChallengeSession {
            title: "Build a CLI".to_string(),
            link: "https://example.com/cli".to_string(),
            estimated_duration: 60,
            actual_duration: 75,
            status: ChallengeStatus::InProgress,
            learnings: None,
        });

        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["type"], "mini-challenge");
        assert_eq!(value["estimatedDuration"], 60);
        assert_eq!(value["status"], "in-progress");
    }

    #[test]
    fn test_leetcode_defaults() {
        let json = r#"{
            "type": "leetcode",
            "title": "Two Sum",
            "category": "arrays",
            "difficulty": "easy",
            "status": "unsolved",
            "duration": 30
        }"#;

        let session: PracticeSession = serde_json::from_str(json).unwrap();
        match &session {
            PracticeSession::Leetcode(s) => {
                assert_eq!(s.title, "Two Sum");
                assert_eq!(s.duration, 30);
                assert!(s.language.is_empty());
            }
            _ => panic!("Wrong session type"),
        }
        assert_eq!(session.kind(), PracticeKind::Leetcode);
        assert_eq!(session.status(), Some("unsolved"));
    }

    #[test]
    fn test_typing_session_all_optional() {
        let session: PracticeSession = serde_json::from_str(r#"{"type":"typing"}"#).unwrap();
        assert_eq!(session.kind(), PracticeKind::Typing);
        assert_eq!(session.label(), None);
        assert_eq!(session.minutes(), 0);
    }

    #[test]
    fn test_stored_session_round_trip() {
        let json = r#"{
            "id": "s-1",
            "createdAt": "2025-01-02T03:04:05Z",
            "type": "study",
            "topic": "B-trees",
            "resources": "CLRS ch. 18",
            "duration": 45,
            "comprehensionLevel": "medium"
        }"#;

        let stored: StoredPracticeSession = serde_json::from_str(json).unwrap();
        assert_eq!(stored.id, "s-1");
        assert_eq!(stored.record.kind(), PracticeKind::Study);
        assert_eq!(stored.record.minutes(), 45);

        let value = serde_json::to_value(&stored).unwrap();
        assert_eq!(value["type"], "study");
        assert_eq!(value["comprehensionLevel"], "medium");
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(serde_json::from_str::<PracticeSession>(r#"{"type":"chess"}"#).is_err());
    }
}
