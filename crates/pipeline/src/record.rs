//! The flat export record.
//!
//! A [`FlatIssueRecord`] merges one repository, one pull request and one
//! security issue into a single-level set of named fields. Every record
//! carries the same columns in the same order ([`FlatIssueRecord::COLUMNS`]);
//! only the values differ, and a missing value is [`FieldValue::Null`].

use crate::{PullRequest, Repository, SecurityIssue};

/// A primitive cell value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(u64),
    Null,
}

impl FieldValue {
    /// Renders the value as a table cell. `Null` renders as an empty string.
    pub fn to_cell(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::Integer(n) => n.to_string(),
            FieldValue::Null => String::new(),
        }
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Text)
    }
}

impl From<Option<u64>> for FieldValue {
    fn from(value: Option<u64>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Integer)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_cell())
    }
}

// ---------------------------------------------------------------------------

/// One exported row: a security issue in the context of its pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatIssueRecord {
    fields: Vec<(String, FieldValue)>,
}

impl FlatIssueRecord {
    /// Column names in export order.
    pub const COLUMNS: [&'static str; 12] = [
        "Repository",
        "PR Number",
        "PR Title",
        "PR Status",
        "Issue ID",
        "File Path",
        "Line Number",
        "Message",
        "Pattern ID",
        "Category",
        "Severity",
        "Tool",
    ];

    /// Flattens an issue together with its repository and pull request.
    ///
    /// Null policy: any absent scalar, and every field of an absent
    /// `patternInfo` / `toolInfo` object, becomes [`FieldValue::Null`].
    pub fn new(repository: &Repository, pull_request: &PullRequest, issue: &SecurityIssue) -> Self {
        let pattern = issue.pattern_info.clone().unwrap_or_default();
        let tool = issue.tool_info.clone().unwrap_or_default();

        let values: [FieldValue; 12] = [
            repository.name.as_str().into(),
            pull_request.number.map(|n| n.as_u64()).into(),
            pull_request.title.clone().into(),
            pull_request.status.clone().into(),
            issue.issue_id.clone().into(),
            issue.file_path.clone().into(),
            issue.line_number.into(),
            issue.message.clone().into(),
            pattern.id.into(),
            pattern.category.into(),
            pattern.severity_level.into(),
            tool.name.into(),
        ];

        let fields = Self::COLUMNS
            .iter()
            .map(|c| c.to_string())
            .zip(values)
            .collect();
        Self { fields }
    }

    /// Returns the fields in insertion order.
    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }

    /// Returns the field names in insertion order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Looks up a field by column name.
    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }
}
