//! The agenda data model.
//!
//! An [`Agenda`] maps subject names to their ledger of assignments. Ledgers
//! keep insertion order; chronological ordering only happens in the report.
//! A subject exists in the agenda only while its ledger is non-empty.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::date::DueDate;
use crate::error::StoreError;

/// One homework assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Free-text task label, displayed as entered.
    #[serde(alias = "devoir")]
    pub description: String,

    /// Due date, stored as `YYYY-MM-DD`.
    pub date: DueDate,
}

impl Assignment {
    pub fn new(description: impl Into<String>, date: DueDate) -> Self {
        Self {
            description: description.into(),
            date,
        }
    }

    /// Case-insensitive description match.
    pub fn matches(&self, description: &str) -> bool {
        self.description.to_lowercase() == description.to_lowercase()
    }
}

/// All subjects and their assignments.
///
/// Serializes as a plain JSON object: `{"Math": [{"description": .., "date": ..}]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Agenda {
    subjects: BTreeMap<String, Vec<Assignment>>,
}

impl Agenda {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an assignment to `subject`, creating the ledger if needed.
    ///
    /// Duplicates are allowed.
    pub fn add(&mut self, subject: impl Into<String>, assignment: Assignment) {
        self.subjects
            .entry(subject.into())
            .or_default()
            .push(assignment);
    }

    /// Remove the first assignment under `subject` whose description matches
    /// case-insensitively. Drops the subject once its ledger is empty.
    pub fn remove(&mut self, subject: &str, description: &str) -> Result<Assignment, StoreError> {
        let ledger = self
            .subjects
            .get_mut(subject)
            .ok_or_else(|| StoreError::SubjectNotFound(subject.to_string()))?;

        let index = ledger
            .iter()
            .position(|a| a.matches(description))
            .ok_or_else(|| StoreError::AssignmentNotFound {
                subject: subject.to_string(),
                description: description.to_string(),
            })?;

        let removed = ledger.remove(index);
        if ledger.is_empty() {
            self.subjects.remove(subject);
        }
        Ok(removed)
    }

    /// The ledger for one subject.
    pub fn ledger(&self, subject: &str) -> Option<&[Assignment]> {
        self.subjects.get(subject).map(Vec::as_slice)
    }

    /// Iterate `(subject, ledger)` pairs in subject order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Assignment])> {
        self.subjects
            .iter()
            .map(|(subject, ledger)| (subject.as_str(), ledger.as_slice()))
    }

    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }

    /// Total number of assignments across all subjects.
    pub fn len(&self) -> usize {
        self.subjects.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}
