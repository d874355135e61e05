use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::StoredInterview;

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, PartialEq, Eq)]
#[ts(export)]
pub struct InterviewCounts {
    pub scheduled: usize,
    pub completed: usize,
    pub cancelled: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, PartialEq, Eq)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PracticeCounts {
    pub leetcode: usize,
    pub mini_challenge: usize,
    pub study: usize,
    pub typing: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, PartialEq, Eq)]
#[ts(export)]
pub struct LeetCodeProgress {
    pub solved: usize,
    pub unsolved: usize,
    pub review: usize,
}

/// Aggregate view backing the dashboard page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub companies: usize,
    pub interviews: InterviewCounts,
    pub practice: PracticeCounts,
    pub leetcode: LeetCodeProgress,
    pub practice_minutes: u64,
    pub next_interview: Option<StoredInterview>,
}
