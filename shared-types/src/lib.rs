use serde::{Deserialize, Serialize};

pub mod company;
pub mod dashboard;
pub mod interview;
pub mod practice;
pub mod stored;

pub use company::{
    CompaniesResponse, Company, CompanyFinancials, CompanyManager, CompanyTechnology,
    CompanyValue, StoredCompany, TechnologyCategory,
};
pub use dashboard::{DashboardSummary, InterviewCounts, LeetCodeProgress, PracticeCounts};
pub use interview::{
    Interview, InterviewDate, InterviewListQuery, InterviewRound, InterviewStatus, InterviewType,
    InterviewsResponse, StoredInterview,
};
pub use practice::{
    ChallengeStatus, ComprehensionLevel, Difficulty, LeetCodeSession, LeetCodeStatus,
    MiniChallengeSession, PracticeKind, PracticeListQuery, PracticeSession,
    PracticeSessionsResponse, StoredPracticeSession, StudySession, TypingSession,
};
pub use stored::{DeleteRequest, Stored, SuccessResponse, UpdateRequest};

/// Error response for API endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Query for endpoints that return the first `limit` items of a sorted view.
#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

/// Free-text search over a collection.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}
