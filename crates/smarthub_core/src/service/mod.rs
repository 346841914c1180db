//! Tool use-case services.
//!
//! # Responsibility
//! - Own each tool's in-memory state and orchestrate persistence.
//! - Keep front ends decoupled from storage and encoding details.
//!
//! # Invariants
//! - Validation failures leave state and storage untouched.
//! - Unknown ids on toggle/delete/vote are no-ops, not errors.

use crate::calc::CalcError;
use crate::model::RecordValidationError;
use crate::repo::kv_store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod calculator_service;
pub mod note_service;
pub mod poll_service;
pub mod todo_service;
pub mod weather_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error shared by the list-backed tools.
#[derive(Debug)]
pub enum ServiceError {
    /// A required form field is empty.
    MissingField(&'static str),
    /// Input is present but outside the allowed domain.
    InvalidInput(String),
    /// A freshly built record failed its own shape check.
    Validation(RecordValidationError),
    /// Calculator expression failed to parse or evaluate.
    Calc(CalcError),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field `{field}` is empty"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Calc(err) => write!(f, "invalid expression: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Calc(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<CalcError> for ServiceError {
    fn from(value: CalcError) -> Self {
        Self::Calc(value)
    }
}

impl From<RecordValidationError> for ServiceError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

pub(crate) fn require_field(field: &'static str, value: &str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::MissingField(field));
    }
    Ok(())
}
