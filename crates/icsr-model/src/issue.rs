use serde::Serialize;

use crate::error::StructuralError;
use crate::path::FieldPath;
use crate::scalar::Scalar;

/// Code reported for input that could not be read into a document tree.
pub const STRUCTURE_CODE: &str = "structure";

/// A located problem found in a document tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    /// Location of the offending node or attribute.
    pub path: FieldPath,
    /// Machine-readable issue code (e.g., "unresolved_reference").
    pub code: String,
    /// Human-readable message describing the issue.
    pub message: String,
    /// The value that failed the check, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offending_value: Option<Scalar>,
}

impl ValidationIssue {
    pub fn new(path: FieldPath, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path,
            code: code.into(),
            message: message.into(),
            offending_value: None,
        }
    }

    #[must_use]
    pub fn with_offending_value(mut self, value: Scalar) -> Self {
        self.offending_value = Some(value);
        self
    }
}

impl From<&StructuralError> for ValidationIssue {
    fn from(error: &StructuralError) -> Self {
        ValidationIssue::new(error.path.clone(), STRUCTURE_CODE, error.message.clone())
    }
}

/// Every issue found in one document, with its overall verdict.
///
/// An empty report is valid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueReport {
    pub is_valid: bool,
    pub issues: Vec<ValidationIssue>,
}

impl Default for IssueReport {
    fn default() -> Self {
        Self {
            is_valid: true,
            issues: Vec::new(),
        }
    }
}

impl IssueReport {
    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    pub fn codes(&self) -> Vec<&str> {
        self.issues.iter().map(|issue| issue.code.as_str()).collect()
    }
}
