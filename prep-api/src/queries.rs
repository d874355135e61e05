//! Filtering, ordering and aggregation over loaded collections.

use chrono::{DateTime, Utc};
use shared_types::{
    DashboardSummary, InterviewCounts, InterviewListQuery, InterviewStatus, LeetCodeProgress,
    LeetCodeStatus, PracticeCounts, PracticeKind, PracticeListQuery, PracticeSession,
    StoredCompany, StoredInterview, StoredPracticeSession,
};

pub const DEFAULT_LIMIT: usize = 5;

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn search_companies(companies: Vec<StoredCompany>, q: Option<&str>) -> Vec<StoredCompany> {
    match non_blank(q) {
        Some(q) => companies
            .into_iter()
            .filter(|c| contains_ignore_case(&c.record.name, q))
            .collect(),
        None => companies,
    }
}

pub fn filter_interviews(
    interviews: Vec<StoredInterview>,
    query: &InterviewListQuery,
) -> Vec<StoredInterview> {
    let company = non_blank(query.company.as_deref());

    interviews
        .into_iter()
        .filter(|i| query.status.map_or(true, |status| i.record.status == status))
        .filter(|i| company.map_or(true, |c| contains_ignore_case(&i.record.company, c)))
        .collect()
}

/// Scheduled interviews strictly after `now`, soonest first.
pub fn upcoming_interviews(
    interviews: Vec<StoredInterview>,
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<StoredInterview> {
    let mut upcoming: Vec<StoredInterview> = interviews
        .into_iter()
        .filter(|i| {
            i.record.status == InterviewStatus::Scheduled && i.record.date.to_utc() > now
        })
        .collect();

    upcoming.sort_by_key(|i| i.record.date.to_utc());
    upcoming.truncate(limit);
    upcoming
}

pub fn filter_sessions(
    sessions: Vec<StoredPracticeSession>,
    query: &PracticeListQuery,
) -> Vec<StoredPracticeSession> {
    let status = non_blank(query.status.as_deref());
    let q = non_blank(query.q.as_deref());

    sessions
        .into_iter()
        .filter(|s| query.kind.map_or(true, |kind| s.record.kind() == kind))
        .filter(|s| status.map_or(true, |status| s.record.status() == Some(status)))
        .filter(|s| {
            q.map_or(true, |q| {
                s.record
                    .label()
                    .is_some_and(|label| contains_ignore_case(label, q))
            })
        })
        .collect()
}

/// Newest sessions first. Sessions without a creation time sort last.
pub fn recent_sessions(
    mut sessions: Vec<StoredPracticeSession>,
    limit: usize,
) -> Vec<StoredPracticeSession> {
    sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sessions.truncate(limit);
    sessions
}

pub fn summarize(
    companies: &[StoredCompany],
    interviews: &[StoredInterview],
    sessions: &[StoredPracticeSession],
    now: DateTime<Utc>,
) -> DashboardSummary {
    let mut interview_counts = InterviewCounts::default();
    for interview in interviews {
        match interview.record.status {
            InterviewStatus::Scheduled => interview_counts.scheduled += 1,
            InterviewStatus::Completed => interview_counts.completed += 1,
            InterviewStatus::Cancelled => interview_counts.cancelled += 1,
        }
    }

    let mut practice = PracticeCounts::default();
    let mut leetcode = LeetCodeProgress::default();
    let mut practice_minutes = 0u64;
    for session in sessions {
        match session.record.kind() {
            PracticeKind::Leetcode => practice.leetcode += 1,
            PracticeKind::MiniChallenge => practice.mini_challenge += 1,
            PracticeKind::Study => practice.study += 1,
            PracticeKind::Typing => practice.typing += 1,
        }
        if let PracticeSession::Leetcode(problem) = &session.record {
            match problem.status {
                LeetCodeStatus::Solved => leetcode.solved += 1,
                LeetCodeStatus::Unsolved => leetcode.unsolved += 1,
                LeetCodeStatus::Review => leetcode.review += 1,
            }
        }
        practice_minutes += u64::from(session.record.minutes());
    }

    DashboardSummary {
        companies: companies.len(),
        interviews: interview_counts,
        practice,
        leetcode,
        practice_minutes,
        next_interview: upcoming_interviews(interviews.to_vec(), now, 1)
            .into_iter()
            .next(),
    }
}
