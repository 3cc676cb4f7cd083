//! Course data model.
//!
//! A [`Course`] is a server-assigned identity and creation timestamp wrapped
//! around a [`CourseDraft`], the set of fields an administrator edits. Drafts
//! are validated on construction so gateways only ever see well-formed field
//! sets.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use super::list_filter::Filterable;

/// Validation errors returned by the course constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseValidationError {
    InvalidId,
    EmptyTitle,
    EmptyDescription,
    InvalidImageUrl { reason: String },
    InvalidDuration { value: String },
    NonPositiveDuration,
    UnknownLevel { value: String },
}

impl fmt::Display for CourseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "course id must be a valid UUID"),
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyDescription => write!(f, "description must not be empty"),
            Self::InvalidImageUrl { reason } => write!(f, "image url is invalid: {reason}"),
            Self::InvalidDuration { value } => {
                write!(f, "duration '{value}' must be a whole number of days")
            }
            Self::NonPositiveDuration => write!(f, "duration must be at least 1 day"),
            Self::UnknownLevel { value } => write!(
                f,
                "unknown level '{value}' (expected beginner, intermediate, or advanced)"
            ),
        }
    }
}

impl std::error::Error for CourseValidationError {}

/// Stable course identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CourseId(Uuid);

impl CourseId {
    /// Parse a [`CourseId`] from its textual UUID form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, CourseValidationError> {
        Uuid::parse_str(id.as_ref().trim())
            .map(Self)
            .map_err(|_| CourseValidationError::InvalidId)
    }

    /// Generate a new random [`CourseId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for CourseId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for CourseId {
    type Err = CourseValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Difficulty level of a course.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl CourseLevel {
    /// Every level in the order the level picker lists them.
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    /// Wire representation used by the backend.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourseLevel {
    type Err = CourseValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| CourseValidationError::UnknownLevel {
                value: s.to_owned(),
            })
    }
}

/// Editable course fields.
///
/// ## Invariants
/// - `title` and `description` are non-empty once trimmed.
/// - `image_url` is an absolute URL.
/// - `duration_days` is at least one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDraft {
    title: String,
    description: String,
    image_url: Url,
    level: CourseLevel,
    duration_days: NonZeroU32,
    is_active: bool,
}

impl CourseDraft {
    /// Fallible constructor enforcing the text invariants.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        image_url: Url,
        level: CourseLevel,
        duration_days: NonZeroU32,
        is_active: bool,
    ) -> Result<Self, CourseValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CourseValidationError::EmptyTitle);
        }
        let description = description.into();
        if description.trim().is_empty() {
            return Err(CourseValidationError::EmptyDescription);
        }

        Ok(Self {
            title,
            description,
            image_url,
            level,
            duration_days,
            is_active,
        })
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    pub fn image_url(&self) -> &Url {
        &self.image_url
    }

    pub fn level(&self) -> CourseLevel {
        self.level
    }

    /// Course length in days.
    pub fn duration_days(&self) -> NonZeroU32 {
        self.duration_days
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

/// Course as stored by the Gateway.
#[derive(Debug, Clone)]
pub struct Course {
    id: CourseId,
    draft: CourseDraft,
    created_at: DateTime<Utc>,
}

impl Course {
    /// Assemble a stored course from its parts.
    pub fn new(id: CourseId, draft: CourseDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            draft,
            created_at,
        }
    }

    pub fn id(&self) -> CourseId {
        self.id
    }

    /// Editable fields as last stored.
    pub fn draft(&self) -> &CourseDraft {
        &self.draft
    }

    pub fn title(&self) -> &str {
        self.draft.title()
    }

    pub fn description(&self) -> &str {
        self.draft.description()
    }

    pub fn level(&self) -> CourseLevel {
        self.draft.level()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Course {}

impl Filterable for Course {
    type Id = CourseId;
    type Category = CourseLevel;

    fn id(&self) -> &CourseId {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title(), self.description()]
    }

    fn category(&self) -> CourseLevel {
        self.level()
    }
}
