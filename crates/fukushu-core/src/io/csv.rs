//! CSV import/export.
//!
//! Exports are UTF-8 with a byte-order mark and CRLF line endings so they
//! open cleanly in Excel; fields containing comma/quote/newline are quoted
//! with internal quotes doubled (the csv crate's RFC behavior). Imports
//! tolerate a leading BOM.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone as _, Utc};
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use serde::Deserialize;

use crate::domain::{
    normalize_tags, AppSettings, Problem, Rating, ReviewLog, Subject, User,
};

/// UTF-8 byte-order mark prepended to every export
const BOM: &str = "\u{feff}";

// ============================================================================
// ERROR TYPES
// ============================================================================

/// CSV adapter error type
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum CsvError {
    /// Malformed CSV input or write failure
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    /// Export produced non-UTF-8 output (cannot happen with valid input)
    #[error("encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

// ============================================================================
// EXPORT
// ============================================================================

/// Format a timestamp for spreadsheet display: JST wall-clock time as
/// `YYYY-MM-DD hh:mm:ss`.
fn jst() -> FixedOffset {
    // SAFETY: +09:00 is always a valid offset; JST has no DST
    FixedOffset::east_opt(9 * 3600).expect("valid constant offset")
}

fn format_jst(dt: DateTime<Utc>) -> String {
    dt.with_timezone(&jst()).format("%Y-%m-%d %H:%M:%S").to_string()
}

fn parse_jst(s: &str) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").ok()?;
    Some(jst().from_local_datetime(&naive).single()?.with_timezone(&Utc))
}

fn user_name<'a>(users: &'a [User], id: &str) -> &'a str {
    users
        .iter()
        .find(|u| u.id == id)
        .map(|u| u.name.as_str())
        .unwrap_or("")
}

fn bom_writer() -> csv::Writer<Vec<u8>> {
    WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new())
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, CsvError> {
    let bytes = writer.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(format!("{BOM}{}", String::from_utf8(bytes)?))
}

/// Export problems, optionally restricted to one user (`None` = everyone).
pub fn export_problems_csv(
    problems: &[Problem],
    users: &[User],
    user_filter: Option<&str>,
) -> Result<String, CsvError> {
    let mut writer = bom_writer();
    writer.write_record([
        "problem_id",
        "user_id",
        "user_name",
        "subject_name",
        "subject_fixed",
        "text",
        "answer",
        "tags",
        "source",
        "memo",
        "created_at",
        "last_updated_at",
    ])?;

    for p in problems
        .iter()
        .filter(|p| user_filter.is_none_or(|u| p.user_id == u))
    {
        writer.write_record([
            p.id.as_str(),
            p.user_id.as_str(),
            user_name(users, &p.user_id),
            p.subject.name(),
            if p.subject.is_fixed() { "true" } else { "false" },
            p.text.as_str(),
            p.answer.as_str(),
            &p.tags.join(";"),
            p.source.as_deref().unwrap_or(""),
            p.memo.as_deref().unwrap_or(""),
            &format_jst(p.created_at),
            &format_jst(p.updated_at),
        ])?;
    }

    finish(writer)
}

/// Export review logs, optionally restricted to one user and a time window.
pub fn export_logs_csv(
    logs: &[ReviewLog],
    users: &[User],
    user_filter: Option<&str>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Result<String, CsvError> {
    let mut writer = bom_writer();
    writer.write_record([
        "log_id",
        "problem_id",
        "user_id",
        "user_name",
        "reviewed_at",
        "rating_code",
        "rating_label",
    ])?;

    for log in logs
        .iter()
        .filter(|l| user_filter.is_none_or(|u| l.user_id == u))
        .filter(|l| from.is_none_or(|f| l.reviewed_at >= f))
        .filter(|l| to.is_none_or(|t| l.reviewed_at <= t))
    {
        writer.write_record([
            log.id.as_str(),
            log.problem_id.as_str(),
            log.user_id.as_str(),
            user_name(users, &log.user_id),
            &format_jst(log.reviewed_at),
            log.rating.as_str(),
            log.rating.label(),
        ])?;
    }

    finish(writer)
}

// ============================================================================
// IMPORT
// ============================================================================

/// Result of a CSV import
#[derive(Debug, Default)]
pub struct CsvImport {
    /// Imported problems, fresh ids assigned
    pub problems: Vec<Problem>,
    /// Synthetic initial review logs for rows that arrived non-correct
    pub initial_logs: Vec<ReviewLog>,
    /// Rows dropped for failing validation (empty question or answer)
    pub skipped: usize,
}

/// Normalize a free-form status cell into a rating via substring matching.
///
/// Anything that is not recognizably wrong or doubtful counts as correct,
/// including an empty cell.
pub fn normalize_status(status: &str) -> Rating {
    const WRONG_MARKERS: [&str; 3] = ["×", "NG", "まちがい"];
    const DOUBT_MARKERS: [&str; 3] = ["△", "保留", "ちょっと自信ない"];

    if WRONG_MARKERS.iter().any(|m| status.contains(m)) {
        Rating::Wrong
    } else if DOUBT_MARKERS.iter().any(|m| status.contains(m)) {
        Rating::Doubt
    } else {
        Rating::Correct
    }
}

/// One row of an external question-bank CSV
#[derive(Debug, Deserialize)]
struct QuestionBankRow {
    #[serde(default)]
    #[allow(dead_code)]
    id: String,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    unit: String,
    #[serde(default)]
    question: String,
    #[serde(default)]
    answer: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    note: String,
}

/// Import an external question bank (`id,subject,unit,question,answer,status,note`).
///
/// `unit` becomes a tag and `note` the memo. The `status` column is
/// normalized via [`normalize_status`]; a synthetic initial review log is
/// created only when the result is not correct, so already-mastered rows
/// enter the queue unscored. Rows with an empty question or answer are
/// skipped, not fatal.
pub fn import_question_bank_csv(
    data: &str,
    user_id: &str,
    settings: &AppSettings,
    now: DateTime<Utc>,
) -> Result<CsvImport, CsvError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(data.trim_start_matches('\u{feff}').as_bytes());

    let mut import = CsvImport::default();
    for row in reader.deserialize::<QuestionBankRow>() {
        let row = row?;
        if row.question.trim().is_empty() || row.answer.trim().is_empty() {
            tracing::warn!("skipping question bank row with empty question or answer");
            import.skipped += 1;
            continue;
        }

        let mut tags = Vec::new();
        let unit = row.unit.trim();
        if !unit.is_empty() {
            tags.push(unit.to_string());
        }

        let problem = Problem {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            subject: Subject::from_name(row.subject.trim(), &settings.fixed_subjects),
            text: row.question.trim().to_string(),
            answer: row.answer.trim().to_string(),
            tags,
            image: None,
            source: None,
            memo: {
                let note = row.note.trim();
                (!note.is_empty()).then(|| note.to_string())
            },
            created_at: now,
            updated_at: now,
            archived: false,
        };

        let rating = normalize_status(&row.status);
        if rating != Rating::Correct {
            import
                .initial_logs
                .push(ReviewLog::new(problem.id.clone(), user_id, rating, now));
        }
        import.problems.push(problem);
    }

    Ok(import)
}

/// One row of our own problems export
#[derive(Debug, Deserialize)]
struct ProblemRow {
    #[serde(default)]
    #[allow(dead_code)]
    problem_id: String,
    #[serde(default)]
    user_id: String,
    #[serde(default)]
    subject_name: String,
    #[serde(default)]
    subject_fixed: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    answer: String,
    #[serde(default)]
    tags: String,
    #[serde(default)]
    source: String,
    #[serde(default)]
    memo: String,
    #[serde(default)]
    created_at: String,
}

/// Re-import a problems export produced by [`export_problems_csv`].
///
/// Every row gets a fresh id, so re-importing can never overwrite existing
/// data. Text, answer, tags, and subject round-trip unchanged.
pub fn import_problems_csv(data: &str, now: DateTime<Utc>) -> Result<CsvImport, CsvError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(data.trim_start_matches('\u{feff}').as_bytes());

    let mut import = CsvImport::default();
    for row in reader.deserialize::<ProblemRow>() {
        let row = row?;
        if row.text.trim().is_empty() || row.answer.trim().is_empty() {
            import.skipped += 1;
            continue;
        }

        let name = row.subject_name.trim().to_string();
        let subject = if row.subject_fixed.trim().eq_ignore_ascii_case("true") {
            Subject::Fixed(name)
        } else {
            Subject::Custom(name)
        };

        import.problems.push(Problem {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: row.user_id.trim().to_string(),
            subject,
            text: row.text.trim().to_string(),
            answer: row.answer.trim().to_string(),
            tags: normalize_tags(&row.tags),
            image: None,
            source: {
                let s = row.source.trim();
                (!s.is_empty()).then(|| s.to_string())
            },
            memo: {
                let m = row.memo.trim();
                (!m.is_empty()).then(|| m.to_string())
            },
            created_at: parse_jst(row.created_at.trim()).unwrap_or(now),
            updated_at: now,
            archived: false,
        });
    }

    Ok(import)
}

// ============================================================================
// TESTS
// ============================================================================
