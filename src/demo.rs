//! Pre-baked sample data standing in for a real matching service.
//!
//! Scores come from `rand` ranges, so every run looks plausible without
//! any actual analysis happening anywhere.

use rand::Rng;
use tracing::{error, info};

use crate::store::models::{
    CandidateProfile, MatchDraft, NewJob, NewResume, RejectionDraft, ResumeProfile,
};
use crate::store::{AppStore, MatchEngine};

// (position, company, location, salary, alignment score, description)
const SAMPLE_MATCHES: &[(&str, &str, &str, &str, u8, &str)] = &[
    (
        "Senior Data Scientist",
        "Nimbus Analytics",
        "San Francisco, CA",
        "$135,000 - $165,000",
        92,
        "Lead churn-prediction modelling for a B2B SaaS platform.",
    ),
    (
        "Machine Learning Engineer",
        "Brightpath Labs",
        "Remote",
        "$120,000 - $150,000",
        87,
        "Productionize recommendation models on a streaming pipeline.",
    ),
    (
        "Data Analyst",
        "Harbor & Finch",
        "New York, NY",
        "$95,000 - $115,000",
        74,
        "Own reporting and experimentation analysis for the growth team.",
    ),
];

// (position, company, reason, suggestion)
const SAMPLE_REJECTIONS: &[(&str, &str, &str, &str)] = &[
    (
        "Staff Data Scientist",
        "Quantin",
        "Role requires 8+ years of experience",
        "Highlight project leadership and mentoring to offset the years gap.",
    ),
    (
        "NLP Research Engineer",
        "Lexiqa",
        "No published NLP work found on the CV",
        "Add a publications or open-source section with NLP-related work.",
    ),
];

// (name, email, phone, location, title, years, skills)
const CANDIDATE_POOL: &[(&str, &str, &str, &str, &str, u8, &[&str])] = &[
    (
        "Sarah Johnson",
        "sarah.johnson@example.com",
        "+1 555 010 2231",
        "Austin, TX",
        "Senior Backend Engineer",
        7,
        &["Python", "PostgreSQL", "AWS", "Docker"],
    ),
    (
        "Michael Chen",
        "michael.chen@example.com",
        "+1 555 010 8846",
        "Seattle, WA",
        "Software Engineer",
        4,
        &["Python", "Kubernetes", "AWS"],
    ),
    (
        "Priya Sharma",
        "priya.sharma@example.com",
        "+1 555 010 5519",
        "Remote",
        "Full Stack Developer",
        5,
        &["TypeScript", "React", "PostgreSQL", "Docker"],
    ),
    (
        "David Okafor",
        "david.okafor@example.com",
        "+1 555 010 7702",
        "Chicago, IL",
        "Platform Engineer",
        6,
        &["Go", "Kubernetes", "Terraform", "AWS"],
    ),
    (
        "Emily Rodriguez",
        "emily.rodriguez@example.com",
        "+1 555 010 3358",
        "Denver, CO",
        "Backend Developer",
        3,
        &["Python", "Django", "PostgreSQL"],
    ),
    (
        "James Park",
        "james.park@example.com",
        "+1 555 010 9914",
        "Boston, MA",
        "DevOps Engineer",
        8,
        &["Terraform", "Kubernetes", "Go", "Docker"],
    ),
];

/// Default engine for the binary: fixed candidate pool, randomized scores
pub struct MockEngine;

impl MatchEngine for MockEngine {
    fn score_resume(&self, _input: &NewResume) -> ResumeProfile {
        let mut rng = rand::thread_rng();
        ResumeProfile {
            ats_score: rng.gen_range(62..=94),
            university_rank: rng.gen_range(1..=200),
            salary_percentile: rng.gen_range(35..=90),
        }
    }

    fn match_candidates(&self, _job_title: &str) -> Vec<CandidateProfile> {
        let mut rng = rand::thread_rng();
        CANDIDATE_POOL
            .iter()
            .map(|&(name, email, phone, location, title, years, skills)| CandidateProfile {
                name: name.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
                location: location.to_string(),
                title: title.to_string(),
                match_score: rng.gen_range(55..=98),
                skills_match: rng.gen_range(50..=99),
                years_of_experience: years,
                skills: skills.iter().map(|s| s.to_string()).collect(),
            })
            .collect()
    }
}

/// Populate a fresh store so every screen has data on first render: one
/// resume with full match/rejection history, one bare resume, one job.
pub fn seed(store: &AppStore) {
    let matches = SAMPLE_MATCHES
        .iter()
        .map(|&(position, company, location, salary, alignment_score, description)| MatchDraft {
            position: position.to_string(),
            company: company.to_string(),
            location: location.to_string(),
            salary: salary.to_string(),
            alignment_score,
            description: description.to_string(),
        })
        .collect();
    let rejections = SAMPLE_REJECTIONS
        .iter()
        .map(|&(position, company, reason, suggestion)| RejectionDraft {
            position: position.to_string(),
            company: company.to_string(),
            reason: reason.to_string(),
            suggestion: suggestion.to_string(),
        })
        .collect();

    store.seed_resume(
        NewResume {
            position: "Data Scientist".to_string(),
            university: "Stanford University".to_string(),
            expected_salary: "130000".to_string(),
            file_name: "jane_doe_cv.pdf".to_string(),
        },
        matches,
        rejections,
    );
    store.seed_resume(
        NewResume {
            position: "Frontend Engineer".to_string(),
            university: "University of Toronto".to_string(),
            expected_salary: "98000".to_string(),
            file_name: "alex_kim_cv.docx".to_string(),
        },
        Vec::new(),
        Vec::new(),
    );

    let posting = NewJob {
        title: "Senior Backend Engineer".to_string(),
        salary_min: 110_000,
        salary_max: 150_000,
        description: "Own the service layer of our matching platform.".to_string(),
        requirements: "5+ years backend experience, strong SQL.".to_string(),
        responsibilities: "Design APIs, mentor engineers, run incident reviews.".to_string(),
        cv_file_name: None,
    };
    match store.add_job(posting) {
        Ok(id) => info!("Seeded demo data: 2 resumes, job {}", id),
        Err(e) => error!("Failed to seed demo job: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_populates_both_sides() {
        let store = AppStore::new(Box::new(MockEngine));
        seed(&store);

        let resumes = store.resumes();
        assert_eq!(resumes.len(), 2);
        assert_eq!(resumes[0].matches.len(), SAMPLE_MATCHES.len());
        assert_eq!(resumes[0].rejections.len(), SAMPLE_REJECTIONS.len());
        assert!(resumes[1].matches.is_empty());

        let jobs = store.jobs();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].candidates.len(), CANDIDATE_POOL.len());
    }

    #[test]
    fn mock_candidates_end_up_dense_ranked() {
        let store = AppStore::new(Box::new(MockEngine));
        seed(&store);

        let job = &store.jobs()[0];
        for (i, pair) in job.candidates.windows(2).enumerate() {
            assert!(pair[0].match_score >= pair[1].match_score);
            assert_eq!(pair[0].match_rank, i as u32 + 1);
        }
        assert_eq!(
            job.candidates.last().map(|c| c.match_rank),
            Some(job.candidates.len() as u32)
        );
    }

    #[test]
    fn mock_scores_stay_in_range() {
        let engine = MockEngine;
        for _ in 0..20 {
            let profile = engine.score_resume(&NewResume {
                position: "Engineer".to_string(),
                university: "MIT".to_string(),
                expected_salary: "100000".to_string(),
                file_name: "cv.pdf".to_string(),
            });
            assert!(profile.ats_score <= 100);
            assert!(profile.salary_percentile <= 100);
            assert!(profile.university_rank >= 1);
        }
    }
}
