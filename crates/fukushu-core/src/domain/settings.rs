//! Users and application settings.
//!
//! The user roster is a fixed enumeration of the household's children; the
//! settings value rides along in JSON backups and is never overwritten by
//! an import.

use serde::{Deserialize, Serialize};

/// A reviewing user (one child)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable identifier supplied by the authentication collaborator
    pub id: String,
    /// Display name
    pub name: String,
}

/// Session-level adaptive repetition switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOptions {
    /// Re-insert wrong/doubt problems a few positions ahead
    pub repeat_mistakes: bool,
    /// Allow the same problem to appear more than once per session
    pub repeat_within_session: bool,
}

impl Default for ReviewOptions {
    fn default() -> Self {
        Self {
            repeat_mistakes: true,
            repeat_within_session: true,
        }
    }
}

/// Default ordering for problem listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    /// Most recently registered first
    #[default]
    Newest,
    /// Highest "needs review" score first
    WrongFirst,
    /// Grouped by tag, newest within each group
    TagThenNewest,
}

/// Application settings carried in backups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Non-deletable curriculum subjects
    pub fixed_subjects: Vec<String>,
    /// Defaults for new review sessions
    pub default_review_options: ReviewOptions,
    /// Default listing order
    pub default_sort_order: SortOrder,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            fixed_subjects: vec!["漢字".to_string(), "算数".to_string()],
            default_review_options: ReviewOptions::default(),
            default_sort_order: SortOrder::Newest,
        }
    }
}

impl AppSettings {
    /// The default two-child roster
    pub fn default_users() -> Vec<User> {
        vec![
            User {
                id: "rin".to_string(),
                name: "りん".to_string(),
            },
            User {
                id: "yui".to_string(),
                name: "ゆい".to_string(),
            },
        ]
    }
}

// ============================================================================
// TESTS
// ============================================================================
