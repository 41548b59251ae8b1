//! User data model.

use std::fmt;

use credentials::SecretCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::complaint::Complaint;

/// Validation errors returned by user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The identifier string was empty.
    EmptyId,
    /// The identifier string was not a valid UUID.
    InvalidId,
    /// The display name was blank once trimmed.
    EmptyName,
    /// The email address was blank once trimmed.
    EmptyEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyName => write!(f, "name must not be blank"),
            Self::EmptyEmail => write!(f, "email must not be blank"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    ///
    /// # Errors
    /// Returns [`UserValidationError`] when the input is empty or not a UUID.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        let uuid = Uuid::new_v4();
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Validated registration input: a display name and an email address.
///
/// Both fields must be non-blank once trimmed; no further format checks are
/// applied.
#[derive(Debug, Clone)]
pub struct RegistrationDraft {
    name: String,
    email: String,
}

impl RegistrationDraft {
    /// Validate registration input.
    ///
    /// # Errors
    /// Returns [`UserValidationError`] when either field is blank.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let name = name.into();
        let email = email.into();
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }

        Ok(Self { name, email })
    }

    /// Display name supplied at registration.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Email address supplied at registration.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Registered user together with their credential and complaint history.
///
/// ## Invariants
/// - `id` is a server-minted UUID; clients never choose it.
/// - `secret_code` is the only credential; it is returned exactly once, in
///   the registration response.
/// - `complaints` preserves submission order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct User {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: UserId,
    #[schema(value_type = String, example = "h9dGk2Lm4Qr7Tx1Vw3Yz5Bc8")]
    secret_code: SecretCode,
    #[schema(example = "Ada Lovelace")]
    name: String,
    #[schema(example = "ada@example.com")]
    email: String,
    complaints: Vec<Complaint>,
}

impl User {
    /// Build a new [`User`] with no complaints yet.
    #[must_use]
    pub fn new(id: UserId, secret_code: SecretCode, draft: RegistrationDraft) -> Self {
        let RegistrationDraft { name, email } = draft;
        Self {
            id,
            secret_code,
            name,
            email,
            complaints: Vec::new(),
        }
    }

    /// Replace the complaint history, preserving the given order.
    #[must_use]
    pub fn with_complaints(mut self, complaints: Vec<Complaint>) -> Self {
        self.complaints = complaints;
        self
    }

    /// Stable user identifier.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Credential issued at registration.
    #[must_use]
    pub fn secret_code(&self) -> &SecretCode {
        &self.secret_code
    }

    /// Display name supplied at registration.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Email address supplied at registration.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Complaints submitted by this user, oldest first.
    #[must_use]
    pub fn complaints(&self) -> &[Complaint] {
        &self.complaints
    }
}
