//! Append-only conversation log.
//!
//! DESIGN
//! ======
//! The log is the single render input. Entries are never edited, removed,
//! or reordered; a failed analysis appends its own error-shaped bot entry.
//! Every append bumps `revision`, which view layers watch as the
//! "log changed" notification, and `since` hands them only the new tail.

use serde::{Deserialize, Serialize};

use crate::api::AnalysisReport;

#[cfg(test)]
#[path = "conversation_test.rs"]
mod conversation_test;

/// One line of the conversation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ConversationEntry {
    /// A product name the user submitted.
    User { text: String },
    /// The analysis report answering a submission.
    Bot(AnalysisReport),
}

impl ConversationEntry {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self::User { text: text.into() }
    }

    #[must_use]
    pub fn is_user(&self) -> bool {
        matches!(self, Self::User { .. })
    }

    #[must_use]
    pub fn is_bot(&self) -> bool {
        matches!(self, Self::Bot(_))
    }
}

#[derive(Clone, Debug, Default)]
pub struct ConversationLog {
    entries: Vec<ConversationEntry>,
    revision: u64,
}

impl ConversationLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return its index.
    pub fn append(&mut self, entry: ConversationEntry) -> usize {
        self.entries.push(entry);
        self.revision += 1;
        self.entries.len() - 1
    }

    /// All entries in append order.
    #[must_use]
    pub fn all(&self) -> &[ConversationEntry] {
        &self.entries
    }

    /// Entries appended at or after `cursor`. Out-of-range cursors yield an
    /// empty slice.
    #[must_use]
    pub fn since(&self, cursor: usize) -> &[ConversationEntry] {
        self.entries.get(cursor..).unwrap_or_default()
    }

    #[must_use]
    pub fn last(&self) -> Option<&ConversationEntry> {
        self.entries.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of appends so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
