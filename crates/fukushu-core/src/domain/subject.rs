//! Subjects - fixed curriculum entries vs. user-defined free text.
//!
//! The wire format keeps the original `subjectName`/`subjectFixed` field
//! pair so existing backups and cloud documents stay readable.

use serde::{Deserialize, Serialize};

/// A problem's subject.
///
/// Fixed subjects (e.g. 漢字, 算数) are part of the app's curriculum and
/// cannot be deleted; custom subjects are free text entered by the parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "SubjectRepr", into = "SubjectRepr")]
pub enum Subject {
    /// Non-deletable curriculum subject
    Fixed(String),
    /// User-defined subject
    Custom(String),
}

impl Subject {
    /// Classify a raw subject name against the configured fixed list
    pub fn from_name(name: impl Into<String>, fixed_subjects: &[String]) -> Self {
        let name = name.into();
        if fixed_subjects.iter().any(|s| s == &name) {
            Subject::Fixed(name)
        } else {
            Subject::Custom(name)
        }
    }

    /// The subject's display name
    pub fn name(&self) -> &str {
        match self {
            Subject::Fixed(name) | Subject::Custom(name) => name,
        }
    }

    /// Whether this subject is part of the fixed curriculum
    pub fn is_fixed(&self) -> bool {
        matches!(self, Subject::Fixed(_))
    }
}

/// Wire representation: `{"subjectName": ..., "subjectFixed": ...}`
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubjectRepr {
    subject_name: String,
    subject_fixed: bool,
}

impl From<SubjectRepr> for Subject {
    fn from(repr: SubjectRepr) -> Self {
        if repr.subject_fixed {
            Subject::Fixed(repr.subject_name)
        } else {
            Subject::Custom(repr.subject_name)
        }
    }
}

impl From<Subject> for SubjectRepr {
    fn from(subject: Subject) -> Self {
        let subject_fixed = subject.is_fixed();
        let subject_name = match subject {
            Subject::Fixed(name) | Subject::Custom(name) => name,
        };
        SubjectRepr {
            subject_name,
            subject_fixed,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
