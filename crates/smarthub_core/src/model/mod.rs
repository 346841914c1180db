//! Domain records owned by the individual tools.
//!
//! # Responsibility
//! - Define the persisted record shapes (tasks, notes, polls) and the
//!   transient weather display model.
//! - Provide shape validation applied to every persisted record on load.
//!
//! # Invariants
//! - Record ids are unique within their list.
//! - JSON field names follow the storage contract (`createdAt`, `userName`...).

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod note;
pub mod poll;
pub mod task;
pub mod weather;

/// Generates a fresh record id.
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Validation error for a single persisted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// A required text field is empty or whitespace-only.
    EmptyField {
        record: &'static str,
        field: &'static str,
    },
    /// Two records (or options) in the same list share an id.
    DuplicateId { record: &'static str, id: String },
    /// Poll option count is outside `MIN_POLL_OPTIONS..=MAX_POLL_OPTIONS`.
    OptionCount(usize),
    /// A vote points at an option other than the one holding it.
    VoteOptionMismatch { option_id: String, vote_option_id: String },
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { record, field } => {
                write!(f, "{record}.{field} must not be empty")
            }
            Self::DuplicateId { record, id } => write!(f, "duplicate {record} id `{id}`"),
            Self::OptionCount(count) => write!(
                f,
                "poll must have between {} and {} options, got {count}",
                poll::MIN_POLL_OPTIONS,
                poll::MAX_POLL_OPTIONS
            ),
            Self::VoteOptionMismatch {
                option_id,
                vote_option_id,
            } => write!(
                f,
                "vote for option `{vote_option_id}` stored under option `{option_id}`"
            ),
        }
    }
}

impl Error for RecordValidationError {}

/// Persisted list element with a stable id and a shape check.
pub trait Record {
    /// Record kind used in logs and validation messages.
    const KIND: &'static str;

    fn id(&self) -> &str;

    fn validate(&self) -> Result<(), RecordValidationError>;
}

/// Validates every record and id uniqueness across the list.
pub fn validate_records<T: Record>(records: &[T]) -> Result<(), RecordValidationError> {
    let mut seen = std::collections::HashSet::with_capacity(records.len());
    for record in records {
        record.validate()?;
        if !seen.insert(record.id()) {
            return Err(RecordValidationError::DuplicateId {
                record: T::KIND,
                id: record.id().to_string(),
            });
        }
    }
    Ok(())
}

pub(crate) fn require_text(
    record: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), RecordValidationError> {
    if value.trim().is_empty() {
        return Err(RecordValidationError::EmptyField { record, field });
    }
    Ok(())
}
