//! Complaint data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Lowest accepted complaint rating.
pub const RATING_MIN: u8 = 1;
/// Highest accepted complaint rating.
pub const RATING_MAX: u8 = 5;

/// Validation errors returned by complaint constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComplaintValidationError {
    /// The identifier string was empty.
    EmptyId,
    /// The identifier string was not a valid UUID.
    InvalidId,
    /// The title was blank once trimmed.
    EmptyTitle,
    /// The summary was blank once trimmed.
    EmptySummary,
    /// The rating fell outside the accepted range.
    RatingOutOfRange {
        /// Lowest accepted rating.
        min: u8,
        /// Highest accepted rating.
        max: u8,
    },
}

impl fmt::Display for ComplaintValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "complaint id must not be empty"),
            Self::InvalidId => write!(f, "complaint id must be a valid UUID"),
            Self::EmptyTitle => write!(f, "title must not be blank"),
            Self::EmptySummary => write!(f, "summary must not be blank"),
            Self::RatingOutOfRange { min, max } => {
                write!(f, "rating must be between {min} and {max}")
            }
        }
    }
}

impl std::error::Error for ComplaintValidationError {}

/// Stable complaint identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComplaintId(Uuid, String);

impl ComplaintId {
    /// Validate and construct a [`ComplaintId`] from borrowed input.
    ///
    /// # Errors
    /// Returns [`ComplaintValidationError`] when the input is empty or not a
    /// UUID.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ComplaintValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`ComplaintId`].
    #[must_use]
    pub fn random() -> Self {
        let uuid = Uuid::new_v4();
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, ComplaintValidationError> {
        if id.is_empty() {
            return Err(ComplaintValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(ComplaintValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| ComplaintValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for ComplaintId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ComplaintId> for String {
    fn from(value: ComplaintId) -> Self {
        let ComplaintId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for ComplaintId {
    type Error = ComplaintValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Severity rating attached to a complaint, between [`RATING_MIN`] and
/// [`RATING_MAX`] inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(u8);

impl Rating {
    /// Validate and construct a [`Rating`].
    ///
    /// # Errors
    /// Returns [`ComplaintValidationError::RatingOutOfRange`] when the value
    /// is outside `RATING_MIN..=RATING_MAX`.
    pub fn new(value: u8) -> Result<Self, ComplaintValidationError> {
        if !(RATING_MIN..=RATING_MAX).contains(&value) {
            return Err(ComplaintValidationError::RatingOutOfRange {
                min: RATING_MIN,
                max: RATING_MAX,
            });
        }
        Ok(Self(value))
    }

    /// Numeric rating value.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Rating> for i64 {
    fn from(value: Rating) -> Self {
        Self::from(value.0)
    }
}

impl TryFrom<i64> for Rating {
    type Error = ComplaintValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let narrowed = u8::try_from(value).map_err(|_| {
            ComplaintValidationError::RatingOutOfRange {
                min: RATING_MIN,
                max: RATING_MAX,
            }
        })?;
        Self::new(narrowed)
    }
}

/// Validated complaint input: a title, a summary, and a severity rating.
///
/// Title and summary must be non-blank once trimmed.
#[derive(Debug, Clone)]
pub struct ComplaintDraft {
    title: String,
    summary: String,
    rating: Rating,
}

impl ComplaintDraft {
    /// Validate complaint input.
    ///
    /// # Errors
    /// Returns [`ComplaintValidationError`] when the title or summary is
    /// blank.
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        rating: Rating,
    ) -> Result<Self, ComplaintValidationError> {
        let title = title.into();
        let summary = summary.into();
        if title.trim().is_empty() {
            return Err(ComplaintValidationError::EmptyTitle);
        }
        if summary.trim().is_empty() {
            return Err(ComplaintValidationError::EmptySummary);
        }

        Ok(Self {
            title,
            summary,
            rating,
        })
    }

    /// Complaint title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Complaint summary.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Severity rating.
    #[must_use]
    pub fn rating(&self) -> Rating {
        self.rating
    }
}

/// Submitted complaint.
///
/// ## Invariants
/// - `id` is a server-minted UUID; clients never choose it.
/// - `resolved` starts `false` and only ever transitions to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Complaint {
    #[schema(value_type = String, example = "7c9e6679-7425-40de-944b-e07fc1f90ae7")]
    id: ComplaintId,
    #[schema(example = "Broken lift")]
    title: String,
    #[schema(example = "The lift has been stuck on floor 3 since Monday.")]
    summary: String,
    #[schema(value_type = i64, minimum = 1, maximum = 5, example = 4)]
    rating: Rating,
    resolved: bool,
}

impl Complaint {
    /// Build a new unresolved [`Complaint`] from validated input.
    #[must_use]
    pub fn new(id: ComplaintId, draft: ComplaintDraft) -> Self {
        let ComplaintDraft {
            title,
            summary,
            rating,
        } = draft;
        Self {
            id,
            title,
            summary,
            rating,
            resolved: false,
        }
    }

    /// Mark the complaint as resolved.
    ///
    /// Resolving an already-resolved complaint is a no-op.
    pub fn resolve(&mut self) {
        self.resolved = true;
    }

    /// Stable complaint identifier.
    #[must_use]
    pub fn id(&self) -> &ComplaintId {
        &self.id
    }

    /// Complaint title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Complaint summary.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Severity rating.
    #[must_use]
    pub fn rating(&self) -> Rating {
        self.rating
    }

    /// Whether an administrator has resolved the complaint.
    #[must_use]
    pub fn resolved(&self) -> bool {
        self.resolved
    }
}
