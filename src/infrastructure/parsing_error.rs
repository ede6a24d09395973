//! Parsing error types for vacancy pages
//!
//! Missing optional fields are not errors: extractors resolve them to their
//! null/default value. Only the conditions below ever leave an extractor.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    #[error("Required field '{field}' not found in HTML")]
    RequiredFieldMissing {
        field: String,
        context: Option<String>,
    },

    #[error("Malformed document: {reason}")]
    MalformedDocument { reason: String, url: Option<String> },

    #[error("Invalid CSS selector: {selector} - {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Invalid pattern for '{field}': {reason}")]
    InvalidPattern { field: String, reason: String },

    #[error("URL resolution failed: {url} - {reason}")]
    UrlResolutionFailed {
        url: String,
        reason: String,
        base_url: Option<String>,
    },

    #[error("Publication date '{input}' could not be parsed: {reason}")]
    DateParseFailed { input: String, reason: String },
}

impl ParsingError {
    /// Create a required field missing error with context
    pub fn required_field_missing(field: &str, context: Option<&str>) -> Self {
        Self::RequiredFieldMissing {
            field: field.to_string(),
            context: context.map(ToString::to_string),
        }
    }

    pub fn malformed_document(reason: &str, url: Option<&str>) -> Self {
        Self::MalformedDocument {
            reason: reason.to_string(),
            url: url.map(ToString::to_string),
        }
    }

    pub fn invalid_selector(selector: &str, reason: impl ToString) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn date_parse_failed(input: &str, reason: impl ToString) -> Self {
        Self::DateParseFailed {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error means the whole record is dropped (as opposed to one field or one link).
    pub fn skips_record(&self) -> bool {
        match self {
            Self::RequiredFieldMissing { .. } | Self::MalformedDocument { .. } => true,
            Self::UrlResolutionFailed { .. } | Self::DateParseFailed { .. } => false,
            // Configuration problems surface when parsers are built, not per page
            Self::InvalidSelector { .. } | Self::InvalidPattern { .. } => false,
        }
    }

    /// Configuration errors cannot be fixed by moving on to the next page.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidSelector { .. } | Self::InvalidPattern { .. }
        )
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;
