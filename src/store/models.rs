use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ResumeId = u32;
pub type MatchId = u32;
pub type RejectionId = u32;
pub type JobId = u32;
pub type CandidateId = u32;

/// Application-status lifecycle of a job match, seen from the seeker's side
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Pending,
    Applied,
    Ignored,
}

/// Terminal decision on a pending match.
///
/// A separate type from `MatchStatus` so that "transition back to pending"
/// is unrepresentable at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchDecision {
    Apply,
    Ignore,
}

impl MatchDecision {
    pub fn status(self) -> MatchStatus {
        match self {
            MatchDecision::Apply => MatchStatus::Applied,
            MatchDecision::Ignore => MatchStatus::Ignored,
        }
    }
}

/// A job opportunity paired with one resume, with an alignment score and
/// an application-status lifecycle. Owned by exactly one `Resume`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    pub position: String,
    pub company: String,
    pub location: String,
    /// Display string, e.g. "$110,000 - $140,000"
    pub salary: String,
    pub alignment_score: u8,
    pub description: String,
    pub status: MatchStatus,
}

/// A recorded gap between a resume and a job opportunity, with a
/// remediation suggestion. Immutable after creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rejection {
    pub id: RejectionId,
    pub position: String,
    pub company: String,
    pub reason: String,
    pub suggestion: String,
}

/// An uploaded-CV record plus its derived score fields and associated
/// matches/rejections. Only the selected file's name crosses the boundary;
/// file content is never read.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: ResumeId,
    pub position: String,
    pub university: String,
    /// Kept as the numeric string the form submitted
    pub expected_salary: String,
    pub file_name: String,
    pub ats_score: u8,
    pub university_rank: u32,
    pub salary_percentile: u8,
    pub matches: Vec<Match>,
    pub rejections: Vec<Rejection>,
}

/// Input for `AppStore::add_resume`; pre-validated by `UploadForm`
#[derive(Debug, Clone)]
pub struct NewResume {
    pub position: String,
    pub university: String,
    pub expected_salary: String,
    pub file_name: String,
}

/// Derived score fields the match engine fills in for a new resume
#[derive(Debug, Clone, Copy)]
pub struct ResumeProfile {
    pub ats_score: u8,
    pub university_rank: u32,
    pub salary_percentile: u8,
}

/// A recruiter-created posting with its ranked candidate list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub salary_min: u32,
    pub salary_max: u32,
    pub description: String,
    pub requirements: String,
    pub responsibilities: String,
    pub created_at: DateTime<Utc>,
    pub candidates: Vec<Candidate>,
}

/// Input for `AppStore::add_job`
#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub salary_min: u32,
    pub salary_max: u32,
    pub description: String,
    pub requirements: String,
    pub responsibilities: String,
    /// Name of an optionally attached reference CV; content is never read
    pub cv_file_name: Option<String>,
}

/// A job seeker as seen from the recruiter side, ranked against one job.
/// `match_rank` is 1-based and dense, assigned at creation from descending
/// `match_score` order; never re-ranked afterwards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub title: String,
    pub match_score: u8,
    pub skills_match: u8,
    pub years_of_experience: u8,
    pub skills: Vec<String>,
    pub match_rank: u32,
}

/// Candidate fields as produced by a match engine, before the store
/// assigns ids and ranks
#[derive(Debug, Clone)]
pub struct CandidateProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub title: String,
    pub match_score: u8,
    pub skills_match: u8,
    pub years_of_experience: u8,
    pub skills: Vec<String>,
}

/// Match fields without id/status, used when seeding demo history
#[derive(Debug, Clone)]
pub struct MatchDraft {
    pub position: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub alignment_score: u8,
    pub description: String,
}

/// Rejection fields without id, used when seeding demo history
#[derive(Debug, Clone)]
pub struct RejectionDraft {
    pub position: String,
    pub company: String,
    pub reason: String,
    pub suggestion: String,
}
