//! Skill tally and score distribution for the job-detail analytics tab.
//! Pure functions over a candidate snapshot; total for any input.

use serde::Serialize;

use crate::store::models::Candidate;

/// Occurrence of one skill across a job's candidate list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillTally {
    pub name: String,
    pub count: usize,
    /// round(count / candidate_count * 100)
    pub percentage: u32,
}

/// One bucket of the match-score histogram
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBucket {
    pub label: &'static str,
    pub count: usize,
}

/// Top 5 skills by occurrence count across all candidates, ties broken by
/// first-encountered order. Empty candidate list yields an empty vec.
pub fn top_skills(candidates: &[Candidate]) -> Vec<SkillTally> {
    if candidates.is_empty() {
        return Vec::new();
    }

    // Vec rather than a map so first-encounter order survives for ties
    let mut tallies: Vec<(String, usize)> = Vec::new();
    for candidate in candidates {
        for skill in &candidate.skills {
            match tallies.iter_mut().find(|(name, _)| name == skill) {
                Some((_, count)) => *count += 1,
                None => tallies.push((skill.clone(), 1)),
            }
        }
    }

    // sort_by is stable, so equal counts keep their first-encounter order
    tallies.sort_by(|a, b| b.1.cmp(&a.1));
    tallies.truncate(5);

    let total = candidates.len() as f64;
    tallies
        .into_iter()
        .map(|(name, count)| SkillTally {
            name,
            count,
            percentage: (count as f64 / total * 100.0).round() as u32,
        })
        .collect()
}

/// Five-bucket match-score histogram (90-100, 80-89, 70-79, 60-69, below 60)
pub fn score_distribution(candidates: &[Candidate]) -> [ScoreBucket; 5] {
    let mut buckets = [
        ScoreBucket { label: "90-100%", count: 0 },
        ScoreBucket { label: "80-89%", count: 0 },
        ScoreBucket { label: "70-79%", count: 0 },
        ScoreBucket { label: "60-69%", count: 0 },
        ScoreBucket { label: "Below 60%", count: 0 },
    ];
    for candidate in candidates {
        let slot = match candidate.match_score {
            90..=u8::MAX => 0,
            80..=89 => 1,
            70..=79 => 2,
            60..=69 => 3,
            _ => 4,
        };
        buckets[slot].count += 1;
    }
    buckets
}
