//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies and query strings arrive as loosely typed values; the
//! helpers here convert them into domain drafts and identifiers, turning each
//! failure into an [`Error`] whose `details` name the offending field and a
//! stable machine-readable code.

use credentials::SecretCode;
use serde::Deserialize;
use serde_json::json;

use crate::domain::complaint::{ComplaintValidationError, RATING_MAX, RATING_MIN};
use crate::domain::user::UserValidationError;
use crate::domain::{ComplaintDraft, ComplaintId, Error, Rating, RegistrationDraft};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    BlankField,
    InvalidUuid,
    RatingOutOfRange,
    MalformedSecretCode,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::BlankField => "blank_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::RatingOutOfRange => "rating_out_of_range",
            ErrorCode::MalformedSecretCode => "malformed_secret_code",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

const NAME_FIELD: FieldName = FieldName::new("name");
const EMAIL_FIELD: FieldName = FieldName::new("email");
const TITLE_FIELD: FieldName = FieldName::new("title");
const SUMMARY_FIELD: FieldName = FieldName::new("summary");
const RATING_FIELD: FieldName = FieldName::new("rating");
const SECRET_CODE_FIELD: FieldName = FieldName::new("secretCode");
const COMPLAINT_ID_FIELD: FieldName = FieldName::new("complaintID");

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn blank_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must not be blank"))
        .with_code(ErrorCode::BlankField)
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}

pub(crate) fn rating_out_of_range_error(field: FieldName, value: i64) -> Error {
    let field = field.as_str();
    ValidationError::new(
        field,
        format!("{field} must be between {RATING_MIN} and {RATING_MAX}"),
    )
    .with_value(ErrorCode::RatingOutOfRange, value.to_string())
}

/// Convert registration input into a validated draft.
pub(crate) fn registration_draft(name: String, email: String) -> Result<RegistrationDraft, Error> {
    RegistrationDraft::new(name, email).map_err(|err| match err {
        UserValidationError::EmptyName => blank_field_error(NAME_FIELD),
        UserValidationError::EmptyEmail => blank_field_error(EMAIL_FIELD),
        UserValidationError::EmptyId | UserValidationError::InvalidId => {
            Error::invalid_request(err.to_string())
        }
    })
}

/// Convert complaint input into a validated draft.
pub(crate) fn complaint_draft(
    title: String,
    summary: String,
    rating: i64,
) -> Result<ComplaintDraft, Error> {
    let rating = parse_rating(rating, RATING_FIELD)?;
    ComplaintDraft::new(title, summary, rating).map_err(|err| match err {
        ComplaintValidationError::EmptyTitle => blank_field_error(TITLE_FIELD),
        ComplaintValidationError::EmptySummary => blank_field_error(SUMMARY_FIELD),
        ComplaintValidationError::RatingOutOfRange { .. } => {
            rating_out_of_range_error(RATING_FIELD, i64::from(rating))
        }
        ComplaintValidationError::EmptyId | ComplaintValidationError::InvalidId => {
            Error::invalid_request(err.to_string())
        }
    })
}

pub(crate) fn parse_rating(value: i64, field: FieldName) -> Result<Rating, Error> {
    Rating::try_from(value).map_err(|_| rating_out_of_range_error(field, value))
}

pub(crate) fn parse_complaint_id(value: &str, field: FieldName) -> Result<ComplaintId, Error> {
    ComplaintId::new(value).map_err(|_| invalid_uuid_error(field, value))
}

/// Validate a candidate secret code without echoing it back.
///
/// The candidate is a credential, so the error details carry only the field
/// name and code, never the rejected value.
pub(crate) fn parse_secret_code(value: String) -> Result<SecretCode, Error> {
    SecretCode::new(value).map_err(|err| {
        let field = SECRET_CODE_FIELD.as_str();
        ValidationError::new(field, err.to_string()).with_code(ErrorCode::MalformedSecretCode)
    })
}

/// Query parameters selecting a single complaint.
#[derive(Debug, Deserialize)]
pub(crate) struct ComplaintSelector {
    /// Identifier of the complaint to act on.
    #[serde(rename = "complaintID")]
    complaint_id: Option<String>,
}

impl ComplaintSelector {
    /// Resolve the selector into a validated [`ComplaintId`].
    ///
    /// An absent parameter is reported as a missing-field validation error so
    /// clients receive the standard JSON envelope rather than the framework's
    /// plain-text query rejection.
    pub(crate) fn complaint_id(&self) -> Result<ComplaintId, Error> {
        self.complaint_id.as_deref().map_or_else(
            || Err(missing_field_error(COMPLAINT_ID_FIELD)),
            |raw| parse_complaint_id(raw, COMPLAINT_ID_FIELD),
        )
    }
}
