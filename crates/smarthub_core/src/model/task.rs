//! Task record for the to-do tool.
//!
//! # Invariants
//! - `text`, `user_name` and `assigned_to` are non-empty.
//! - `due_date` is always present; it is required at creation.

use super::{require_text, Record, RecordValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task urgency. Unknown values are rejected on load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses a priority name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// One to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    /// Creator name.
    pub user_name: String,
    pub assigned_to: String,
    pub due_date: DateTime<Utc>,
    pub priority: Priority,
}

impl Task {
    /// Case-insensitive substring match on the assignee name.
    pub fn matches_assignee(&self, term: &str) -> bool {
        self.assigned_to
            .to_lowercase()
            .contains(&term.to_lowercase())
    }
}

impl Record for Task {
    const KIND: &'static str = "task";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), RecordValidationError> {
        require_text(Self::KIND, "id", &self.id)?;
        require_text(Self::KIND, "text", &self.text)?;
        require_text(Self::KIND, "userName", &self.user_name)?;
        require_text(Self::KIND, "assignedTo", &self.assigned_to)?;
        Ok(())
    }
}
