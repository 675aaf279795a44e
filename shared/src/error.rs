//! Errors raised while resolving and computing derived plans

use thiserror::Error;

use crate::models::FactKind;
use crate::types::PlanningMonth;

/// A record the resolver could not find
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingRecord {
    Fact(FactKind),
    Regulation,
}

impl std::fmt::Display for MissingRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingRecord::Fact(kind) => write!(f, "{}", kind),
            MissingRecord::Regulation => write!(f, "Regulation"),
        }
    }
}

/// Composite key of a missing record. Regulations have no month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactKey {
    pub subdivision_id: i32,
    pub material_id: i32,
    pub month: Option<PlanningMonth>,
}

impl std::fmt::Display for FactKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "subdivision {}, material {}",
            self.subdivision_id, self.material_id
        )?;
        if let Some(month) = self.month {
            write!(f, ", month {}", month)?;
        }
        Ok(())
    }
}

/// Failure of the planning data store itself
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("planning store unavailable: {0}")]
    Unavailable(String),
}

/// Errors of the calculation pipeline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanningError {
    #[error("{record} not found for {key}")]
    MissingFact { record: MissingRecord, key: FactKey },

    #[error("backing store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("invalid input for {field}: {message}")]
    InvalidInput { field: String, message: String },
}

impl PlanningError {
    pub fn is_missing_fact(&self) -> bool {
        matches!(self, PlanningError::MissingFact { .. })
    }
}

impl From<StoreError> for PlanningError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => PlanningError::StoreUnavailable(msg),
        }
    }
}

impl From<validator::ValidationErrors> for PlanningError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);

        match fields.first() {
            Some((field, errs)) => PlanningError::InvalidInput {
                field: field.to_string(),
                message: errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "invalid value".to_string()),
            },
            None => PlanningError::InvalidInput {
                field: "request".to_string(),
                message: errors.to_string(),
            },
        }
    }
}

/// Unknown string value for a domain enum
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {what}: {value}")]
pub struct ParseEnumError {
    what: &'static str,
    value: String,
}

impl ParseEnumError {
    pub fn new(what: &'static str, value: &str) -> Self {
        Self {
            what,
            value: value.to_string(),
        }
    }
}
