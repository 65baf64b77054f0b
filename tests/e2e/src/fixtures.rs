//! Test Data Factory
//!
//! Generates realistic household data: two children, fixed and custom
//! subjects, and review histories with known score profiles.

use chrono::{DateTime, Duration, Utc};
use fukushu_core::{AppSettings, Problem, ProblemDraft, Rating, ReviewLog, Subject};

/// Factory for creating test data
pub struct TestDataFactory;

impl TestDataFactory {
    /// A problem with a fixed id, owned by `user_id`
    pub fn problem(id: &str, user_id: &str, subject: &str, text: &str) -> Problem {
        let settings = AppSettings::default();
        let mut problem = ProblemDraft {
            user_id: user_id.to_string(),
            subject: Subject::from_name(subject, &settings.fixed_subjects),
            text: text.to_string(),
            answer: format!("answer to {text}"),
            tags: vec![],
            image: None,
            source: None,
            memo: None,
        }
        .into_problem(Utc::now())
        .expect("fixture drafts are valid");
        problem.id = id.to_string();
        problem
    }

    /// A batch of `count` problems `p0..pN` for one user and subject
    pub fn batch(count: usize, user_id: &str, subject: &str) -> Vec<Problem> {
        (0..count)
            .map(|i| Self::problem(&format!("p{i}"), user_id, subject, &format!("question {i}")))
            .collect()
    }

    /// A rating history for one problem, one log per day ending now
    pub fn history(
        problem_id: &str,
        user_id: &str,
        ratings: &[Rating],
    ) -> Vec<ReviewLog> {
        let start: DateTime<Utc> = Utc::now() - Duration::days(ratings.len() as i64);
        ratings
            .iter()
            .enumerate()
            .map(|(i, &rating)| {
                ReviewLog::new(problem_id, user_id, rating, start + Duration::days(i as i64))
            })
            .collect()
    }
}
