//! Parsing error types
//!
//! Extraction itself never fails: missing fields degrade to empty strings and
//! unresolvable links go to the unlinked bucket. The only hard failure is a
//! selector configuration that leaves a field with nothing to match against.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    #[error("Invalid CSS selector for '{field}': {selector} - {reason}")]
    InvalidSelector {
        field: String,
        selector: String,
        reason: String,
    },

    #[error("No valid selectors compiled for '{field}'. Errors: {}", errors.join(", "))]
    NoValidSelectors { field: String, errors: Vec<String> },
}

impl ParsingError {
    pub fn invalid_selector(field: &str, selector: &str, reason: &str) -> Self {
        Self::InvalidSelector {
            field: field.to_string(),
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn no_valid_selectors(field: &str, errors: Vec<String>) -> Self {
        Self::NoValidSelectors {
            field: field.to_string(),
            errors,
        }
    }

    /// Name of the selector field the error refers to
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidSelector { field, .. } | Self::NoValidSelectors { field, .. } => field,
        }
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;
