//! Aggregated client-side validation errors.
//!
//! Form validation never stops at the first problem: every offending field
//! is reported so the user can fix them in one pass. Submission is blocked
//! while any issue remains.

use serde::Serialize;
use thiserror::Error;

/// One user-facing problem with one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// Path of the offending field (e.g. `colors[0].sizes[1].stock`).
    pub field: String,
    /// Message shown to the user.
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A non-empty set of field issues.
#[derive(Error, Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[error("{}", distinct_messages(.issues).join("; "))]
pub struct ValidationError {
    issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an error holding a single issue.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut err = Self::new();
        err.push(field, message);
        err
    }

    /// Record an issue.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.issues.push(FieldIssue::new(field, message));
    }

    /// All recorded issues, in the order they were found.
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Check whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Distinct messages in first-seen order, for notification display.
    pub fn messages(&self) -> Vec<&str> {
        distinct_messages(&self.issues)
    }

    /// Check whether a given field was flagged.
    pub fn has_field(&self, field: &str) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }

    /// Turn the collector into a result.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn distinct_messages(issues: &[FieldIssue]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for issue in issues {
        if !seen.contains(&issue.message.as_str()) {
            seen.push(&issue.message);
        }
    }
    seen
}
