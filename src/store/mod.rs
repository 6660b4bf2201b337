pub mod forms;
pub mod models;
pub mod skills;

use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, info};

use self::models::{
    Candidate, CandidateProfile, Job, JobId, Match, MatchDecision, MatchDraft, MatchId,
    MatchStatus, NewJob, NewResume, Rejection, RejectionDraft, Resume, ResumeId, ResumeProfile,
};

/// The mocked "AI" behind scoring and matching. Injected at store
/// construction so tests can swap in a deterministic engine.
pub trait MatchEngine: Send + Sync {
    /// Derived score fields for a freshly uploaded resume
    fn score_resume(&self, input: &NewResume) -> ResumeProfile;

    /// Unranked candidate matches for a new job posting; the store sorts
    /// them and assigns ids and dense ranks
    fn match_candidates(&self, job_title: &str) -> Vec<CandidateProfile>;
}

/// Store-level errors
///
/// Not-found and invalid-transition outcomes are explicit values rather
/// than silent no-ops; state is left untouched whenever one is returned.
#[derive(Debug)]
pub enum StoreError {
    /// Job posting submitted without a title
    MissingTitle,

    /// Job posting with salary_min above salary_max
    InvalidSalaryRange { min: u32, max: u32 },

    /// No resume with the given id
    ResumeNotFound(ResumeId),

    /// No such match within the given resume
    MatchNotFound { resume_id: ResumeId, match_id: MatchId },

    /// The match already left `pending`; terminal states are stable
    MatchResolved { match_id: MatchId, status: MatchStatus },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::MissingTitle => write!(f, "Job posting is missing a title"),
            StoreError::InvalidSalaryRange { min, max } => {
                write!(f, "Invalid salary range: {} - {}", min, max)
            }
            StoreError::ResumeNotFound(id) => write!(f, "Resume not found: {}", id),
            StoreError::MatchNotFound { resume_id, match_id } => {
                write!(f, "Match {} not found on resume {}", match_id, resume_id)
            }
            StoreError::MatchResolved { match_id, status } => {
                write!(f, "Match {} already resolved as {:?}", match_id, status)
            }
        }
    }
}

impl std::error::Error for StoreError {}

#[derive(Default)]
struct Collections {
    resumes: Vec<Resume>,
    jobs: Vec<Job>,
    next_resume_id: ResumeId,
    next_job_id: JobId,
}

/// Single owner of the resume and job collections and the sole authority
/// for mutation. Screens read cloned snapshots and watch the revision
/// channel to know when to re-render.
///
/// Constructor-injected rather than global: tests build as many independent
/// stores as they like.
pub struct AppStore {
    engine: Box<dyn MatchEngine>,
    state: RwLock<Collections>,
    revision: watch::Sender<u64>,
}

impl AppStore {
    pub fn new(engine: Box<dyn MatchEngine>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            engine,
            state: RwLock::new(Collections::default()),
            revision,
        }
    }

    /// Observe mutations: the received value bumps on every committed change
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Add a resume from pre-validated upload input.
    ///
    /// Fields map verbatim from the form; derived scores come from the
    /// engine; matches and rejections start empty. Infallible: malformed
    /// input is rejected by form validation before this point.
    pub fn add_resume(&self, input: NewResume) -> ResumeId {
        let profile = self.engine.score_resume(&input);
        let mut state = self.write();

        let id = state.next_resume_id;
        state.next_resume_id += 1;

        state.resumes.push(Resume {
            id,
            position: input.position,
            university: input.university,
            expected_salary: input.expected_salary,
            file_name: input.file_name,
            ats_score: profile.ats_score,
            university_rank: profile.university_rank,
            salary_percentile: profile.salary_percentile,
            matches: Vec::new(),
            rejections: Vec::new(),
        });
        info!("Store: resume {} added ({} resumes on file)", id, state.resumes.len());

        drop(state);
        self.bump();
        id
    }

    /// Create a job posting with its mocked candidate matches.
    ///
    /// Returns the fresh id so the caller can navigate to the detail view.
    /// The collection is left unchanged on error.
    pub fn add_job(&self, input: NewJob) -> Result<JobId, StoreError> {
        if input.title.trim().is_empty() {
            return Err(StoreError::MissingTitle);
        }
        if input.salary_min > input.salary_max {
            return Err(StoreError::InvalidSalaryRange {
                min: input.salary_min,
                max: input.salary_max,
            });
        }

        if let Some(name) = &input.cv_file_name {
            // only the name is kept for the log line; content is never read
            debug!("Store: posting references CV file {}", name);
        }

        let candidates = rank_candidates(self.engine.match_candidates(&input.title));
        let mut state = self.write();

        let id = state.next_job_id;
        state.next_job_id += 1;

        debug!(
            "Store: creating job {} with {} matched candidates",
            id,
            candidates.len()
        );
        state.jobs.push(Job {
            id,
            title: input.title,
            salary_min: input.salary_min,
            salary_max: input.salary_max,
            description: input.description,
            requirements: input.requirements,
            responsibilities: input.responsibilities,
            created_at: Utc::now(),
            candidates,
        });
        info!("Store: job {} posted ({} jobs on file)", id, state.jobs.len());

        drop(state);
        self.bump();
        Ok(id)
    }

    /// Resolve a pending match as applied or ignored.
    ///
    /// The transition is one-way: once a match leaves `pending` every later
    /// call fails with `MatchResolved` and the stored status keeps its
    /// terminal value.
    pub fn update_match_status(
        &self,
        resume_id: ResumeId,
        match_id: MatchId,
        decision: MatchDecision,
    ) -> Result<MatchStatus, StoreError> {
        let mut state = self.write();

        let resume = state
            .resumes
            .iter_mut()
            .find(|r| r.id == resume_id)
            .ok_or(StoreError::ResumeNotFound(resume_id))?;
        let matched = resume
            .matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or(StoreError::MatchNotFound { resume_id, match_id })?;

        if matched.status != MatchStatus::Pending {
            return Err(StoreError::MatchResolved {
                match_id,
                status: matched.status,
            });
        }

        matched.status = decision.status();
        let status = matched.status;
        info!(
            "Store: match {} on resume {} resolved as {:?}",
            match_id, resume_id, status
        );

        drop(state);
        self.bump();
        Ok(status)
    }

    /// Snapshot lookup; callers render a not-found state on `None`
    pub fn get_job(&self, job_id: JobId) -> Option<Job> {
        self.read().jobs.iter().find(|j| j.id == job_id).cloned()
    }

    pub fn get_resume(&self, resume_id: ResumeId) -> Option<Resume> {
        self.read().resumes.iter().find(|r| r.id == resume_id).cloned()
    }

    /// Snapshot of all resumes in upload order; the first entry is the
    /// default selection on the seeker screens
    pub fn resumes(&self) -> Vec<Resume> {
        self.read().resumes.clone()
    }

    /// Snapshot of all job postings in creation order
    pub fn jobs(&self) -> Vec<Job> {
        self.read().jobs.clone()
    }

    /// Demo-only injection of a resume with pre-baked match/rejection
    /// history. Regular uploads always start with empty history.
    pub(crate) fn seed_resume(
        &self,
        input: NewResume,
        matches: Vec<MatchDraft>,
        rejections: Vec<RejectionDraft>,
    ) -> ResumeId {
        let profile = self.engine.score_resume(&input);
        let mut state = self.write();

        let id = state.next_resume_id;
        state.next_resume_id += 1;

        let matches = matches
            .into_iter()
            .enumerate()
            .map(|(i, draft)| Match {
                id: i as MatchId + 1,
                position: draft.position,
                company: draft.company,
                location: draft.location,
                salary: draft.salary,
                alignment_score: draft.alignment_score,
                description: draft.description,
                status: MatchStatus::Pending,
            })
            .collect();
        let rejections = rejections
            .into_iter()
            .enumerate()
            .map(|(i, draft)| Rejection {
                id: i as u32 + 1,
                position: draft.position,
                company: draft.company,
                reason: draft.reason,
                suggestion: draft.suggestion,
            })
            .collect();

        state.resumes.push(Resume {
            id,
            position: input.position,
            university: input.university,
            expected_salary: input.expected_salary,
            file_name: input.file_name,
            ats_score: profile.ats_score,
            university_rank: profile.university_rank,
            salary_percentile: profile.salary_percentile,
            matches,
            rejections,
        });
        debug!("Store: seeded resume {}", id);

        drop(state);
        self.bump();
        id
    }

    fn bump(&self) {
        self.revision.send_modify(|r| *r += 1);
    }

    fn read(&self) -> RwLockReadGuard<'_, Collections> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Collections> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Sort candidates by descending match score (stable, so equal scores keep
/// engine order) and assign 1-based dense ranks and ids.
fn rank_candidates(profiles: Vec<CandidateProfile>) -> Vec<Candidate> {
    let mut profiles = profiles;
    profiles.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    profiles
        .into_iter()
        .enumerate()
        .map(|(i, p)| Candidate {
            id: i as u32 + 1,
            name: p.name,
            email: p.email,
            phone: p.phone,
            location: p.location,
            title: p.title,
            match_score: p.match_score,
            skills_match: p.skills_match,
            years_of_experience: p.years_of_experience,
            skills: p.skills,
            match_rank: i as u32 + 1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic engine so assertions are exact
    struct FixedEngine;

    impl MatchEngine for FixedEngine {
        fn score_resume(&self, _input: &NewResume) -> ResumeProfile {
            ResumeProfile {
                ats_score: 80,
                university_rank: 12,
                salary_percentile: 65,
            }
        }

        fn match_candidates(&self, _job_title: &str) -> Vec<CandidateProfile> {
            vec![
                candidate_profile("Aisha Khan", 72),
                candidate_profile("Ben Ortiz", 91),
                candidate_profile("Chen Wei", 84),
            ]
        }
    }

    fn candidate_profile(name: &str, match_score: u8) -> CandidateProfile {
        CandidateProfile {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            phone: "+1 555 010 0000".to_string(),
            location: "Remote".to_string(),
            title: "Engineer".to_string(),
            match_score,
            skills_match: match_score.saturating_sub(5),
            years_of_experience: 4,
            skills: vec!["Rust".to_string()],
        }
    }

    fn store() -> AppStore {
        AppStore::new(Box::new(FixedEngine))
    }

    fn upload_input() -> NewResume {
        NewResume {
            position: "Data Scientist".to_string(),
            university: "Stanford".to_string(),
            expected_salary: "120000".to_string(),
            file_name: "cv.pdf".to_string(),
        }
    }

    fn job_input(title: &str, min: u32, max: u32) -> NewJob {
        NewJob {
            title: title.to_string(),
            salary_min: min,
            salary_max: max,
            description: "Build things".to_string(),
            requirements: "Rust".to_string(),
            responsibilities: "Ship features".to_string(),
            cv_file_name: None,
        }
    }

    fn seeded_match() -> MatchDraft {
        MatchDraft {
            position: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Berlin".to_string(),
            salary: "$90,000 - $120,000".to_string(),
            alignment_score: 88,
            description: "Platform team".to_string(),
        }
    }

    #[test]
    fn add_resume_appends_verbatim_with_empty_history() {
        let store = store();
        let id = store.add_resume(upload_input());

        let resumes = store.resumes();
        assert_eq!(resumes.len(), 1);
        let resume = &resumes[0];
        assert_eq!(resume.id, id);
        assert_eq!(resume.position, "Data Scientist");
        assert_eq!(resume.university, "Stanford");
        assert_eq!(resume.expected_salary, "120000");
        assert_eq!(resume.file_name, "cv.pdf");
        assert!(resume.matches.is_empty());
        assert!(resume.rejections.is_empty());
    }

    #[test]
    fn add_resume_preserves_upload_order_and_unique_ids() {
        let store = store();
        let first = store.add_resume(upload_input());
        let second = store.add_resume(NewResume {
            position: "Backend Engineer".to_string(),
            ..upload_input()
        });

        assert_ne!(first, second);
        let resumes = store.resumes();
        assert_eq!(resumes[0].id, first);
        assert_eq!(resumes[1].id, second);
    }

    #[test]
    fn add_job_returns_id_that_get_job_resolves() {
        let store = store();
        let id = store
            .add_job(job_input("Engineer", 50_000, 100_000))
            .expect("valid posting");

        let job = store.get_job(id).expect("job should exist");
        assert_eq!(job.title, "Engineer");
        assert_eq!(job.salary_min, 50_000);
        assert_eq!(job.salary_max, 100_000);
    }

    #[test]
    fn add_job_rejects_missing_title_without_mutating() {
        let store = store();
        let result = store.add_job(job_input("   ", 50_000, 100_000));

        assert!(matches!(result, Err(StoreError::MissingTitle)));
        assert!(store.jobs().is_empty());
    }

    #[test]
    fn add_job_rejects_inverted_salary_range() {
        let store = store();
        let result = store.add_job(job_input("Engineer", 100_000, 50_000));

        assert!(matches!(
            result,
            Err(StoreError::InvalidSalaryRange { min: 100_000, max: 50_000 })
        ));
        assert!(store.jobs().is_empty());
    }

    #[test]
    fn new_job_candidates_are_dense_ranked_by_descending_score() {
        let store = store();
        let id = store
            .add_job(job_input("Engineer", 50_000, 100_000))
            .expect("valid posting");

        let job = store.get_job(id).expect("job should exist");
        let scores: Vec<u8> = job.candidates.iter().map(|c| c.match_score).collect();
        assert_eq!(scores, vec![91, 84, 72]);
        let ranks: Vec<u32> = job.candidates.iter().map(|c| c.match_rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn get_job_unknown_id_is_none() {
        assert!(store().get_job(42).is_none());
    }

    #[test]
    fn pending_match_transitions_one_way() {
        let store = store();
        let resume_id = store.seed_resume(upload_input(), vec![seeded_match()], Vec::new());
        let match_id = store.get_resume(resume_id).unwrap().matches[0].id;

        let status = store
            .update_match_status(resume_id, match_id, MatchDecision::Apply)
            .expect("pending match accepts a decision");
        assert_eq!(status, MatchStatus::Applied);

        // A later opposite decision fails and the terminal state sticks
        let result = store.update_match_status(resume_id, match_id, MatchDecision::Ignore);
        assert!(matches!(
            result,
            Err(StoreError::MatchResolved { status: MatchStatus::Applied, .. })
        ));
        let resume = store.get_resume(resume_id).unwrap();
        assert_eq!(resume.matches[0].status, MatchStatus::Applied);
    }

    #[test]
    fn repeated_ignore_keeps_terminal_state() {
        let store = store();
        let resume_id = store.seed_resume(upload_input(), vec![seeded_match()], Vec::new());
        let match_id = store.get_resume(resume_id).unwrap().matches[0].id;

        store
            .update_match_status(resume_id, match_id, MatchDecision::Ignore)
            .expect("first decision succeeds");
        let second = store.update_match_status(resume_id, match_id, MatchDecision::Ignore);

        assert!(matches!(second, Err(StoreError::MatchResolved { .. })));
        let resume = store.get_resume(resume_id).unwrap();
        assert_eq!(resume.matches[0].status, MatchStatus::Ignored);
    }

    #[test]
    fn unknown_resume_id_leaves_every_match_untouched() {
        let store = store();
        let resume_id = store.seed_resume(upload_input(), vec![seeded_match()], Vec::new());

        let result = store.update_match_status(9999, 1, MatchDecision::Apply);

        assert!(matches!(result, Err(StoreError::ResumeNotFound(9999))));
        let resume = store.get_resume(resume_id).unwrap();
        assert_eq!(resume.matches[0].status, MatchStatus::Pending);
    }

    #[test]
    fn unknown_match_id_is_an_error() {
        let store = store();
        let resume_id = store.seed_resume(upload_input(), Vec::new(), Vec::new());

        let result = store.update_match_status(resume_id, 7, MatchDecision::Apply);
        assert!(matches!(result, Err(StoreError::MatchNotFound { match_id: 7, .. })));
    }

    #[test]
    fn every_committed_mutation_bumps_the_revision() {
        let store = store();
        let mut revisions = store.subscribe();
        let start = *revisions.borrow_and_update();

        store.add_resume(upload_input());
        store
            .add_job(job_input("Engineer", 50_000, 100_000))
            .expect("valid posting");

        assert_eq!(*revisions.borrow_and_update(), start + 2);
    }

    #[test]
    fn failed_mutations_do_not_bump_the_revision() {
        let store = store();
        let mut revisions = store.subscribe();
        let start = *revisions.borrow_and_update();

        let _ = store.add_job(job_input("", 50_000, 100_000));
        let _ = store.update_match_status(1, 1, MatchDecision::Apply);

        assert_eq!(*revisions.borrow_and_update(), start);
    }
}
