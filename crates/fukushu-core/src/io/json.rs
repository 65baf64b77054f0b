//! JSON backup import/export.
//!
//! A backup is a full snapshot of one device's data. Import merges by id:
//! colliding problems get a fresh id (existing data is never overwritten),
//! their logs follow the new id, and settings are left alone.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use uuid::Uuid;

use crate::domain::{AppSettings, Problem, ReviewLog, User};
use crate::store::{NewReviewLog, ReviewStore, Snapshot, StoreError};

/// Current backup schema version
pub const BACKUP_VERSION: &str = "1.0.0";

// ============================================================================
// ERROR TYPES
// ============================================================================

/// JSON adapter error type
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    /// Malformed backup document
    #[error("invalid backup: {0}")]
    Parse(#[from] serde_json::Error),
    /// File read/write failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// BACKUP DOCUMENT
// ============================================================================

/// Full-snapshot backup document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    /// Schema version
    pub version: String,
    /// User roster at export time
    pub users: Vec<User>,
    /// All problems
    pub problems: Vec<Problem>,
    /// Full review history
    pub review_logs: Vec<ReviewLog>,
    /// Settings at export time; never applied on import
    pub app_settings: AppSettings,
}

impl Backup {
    /// Snapshot the given data into a backup document
    pub fn new(
        users: Vec<User>,
        problems: Vec<Problem>,
        review_logs: Vec<ReviewLog>,
        app_settings: AppSettings,
    ) -> Self {
        Self {
            version: BACKUP_VERSION.to_string(),
            users,
            problems,
            review_logs,
            app_settings,
        }
    }
}

/// Serialize a backup as pretty-printed JSON
pub fn export_backup(backup: &Backup) -> Result<String, JsonError> {
    Ok(serde_json::to_string_pretty(backup)?)
}

/// Parse a backup document
pub fn parse_backup(data: &str) -> Result<Backup, JsonError> {
    Ok(serde_json::from_str(data)?)
}

/// Write a backup to disk
pub fn write_backup_file(path: &Path, backup: &Backup) -> Result<(), JsonError> {
    std::fs::write(path, export_backup(backup)?)?;
    Ok(())
}

/// Read a backup from disk
pub fn read_backup_file(path: &Path) -> Result<Backup, JsonError> {
    parse_backup(&std::fs::read_to_string(path)?)
}

// ============================================================================
// IMPORT (MERGE)
// ============================================================================

/// What an import did
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Problems written to the store
    pub problems_added: usize,
    /// Problems whose id collided and were assigned a fresh one
    pub problems_renamed: usize,
    /// Review logs appended
    pub logs_added: usize,
}

/// Merge a backup into the store.
///
/// `existing` is the current snapshot (used for collision detection). A
/// problem whose id already exists is added under a fresh id - never
/// overwritten - and its logs are rewritten to reference the fresh id.
pub async fn import_backup(
    store: &dyn ReviewStore,
    existing: &Snapshot,
    backup: Backup,
) -> Result<ImportSummary, StoreError> {
    let existing_ids: HashSet<&str> = existing.problems.iter().map(|p| p.id.as_str()).collect();

    let mut summary = ImportSummary::default();
    let mut renamed: HashMap<String, String> = HashMap::new();

    for mut problem in backup.problems {
        if existing_ids.contains(problem.id.as_str()) {
            let fresh = Uuid::new_v4().to_string();
            tracing::warn!(old = %problem.id, new = %fresh, "backup problem id collides; assigning fresh id");
            renamed.insert(problem.id.clone(), fresh.clone());
            problem.id = fresh;
            summary.problems_renamed += 1;
        }
        store.put_problem(problem).await?;
        summary.problems_added += 1;
    }

    for log in backup.review_logs {
        let problem_id = renamed
            .get(&log.problem_id)
            .cloned()
            .unwrap_or(log.problem_id);
        store
            .append_review_log(NewReviewLog {
                problem_id,
                user_id: log.user_id,
                rating: log.rating,
                reviewed_at: log.reviewed_at,
            })
            .await?;
        summary.logs_added += 1;
    }

    tracing::debug!(?summary, "backup import finished");
    Ok(summary)
}

/// Convenience: snapshot a store's current data for one export.
pub fn backup_from_snapshot(snapshot: &Snapshot, settings: AppSettings) -> Backup {
    Backup::new(
        AppSettings::default_users(),
        snapshot.problems.clone(),
        snapshot.review_logs.clone(),
        settings,
    )
}

// ============================================================================
// TESTS
// ============================================================================
