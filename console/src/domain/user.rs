//! User data model as seen by the console.
//!
//! The console never creates users; it lists them and changes their role.
//! Identity is the [`UserId`]; two [`User`] values with the same id are equal
//! even when one of them is a stale copy.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use super::list_filter::Filterable;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    EmptyUsername,
    InvalidEmail,
    InvalidAvatarUrl { reason: String },
    UnknownRole { value: String },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::InvalidEmail => write!(f, "email must contain a local part and a domain"),
            Self::InvalidAvatarUrl { reason } => write!(f, "avatar url is invalid: {reason}"),
            Self::UnknownRole { value } => write!(
                f,
                "unknown role '{value}' (expected user, moderator, or admin)"
            ),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
///
/// Ids compare by value, so upper- and lower-case spellings of the same UUID
/// are equal and render in the backend's lower-case form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        Uuid::parse_str(id)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Access level assigned to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Moderator,
    Admin,
}

impl UserRole {
    /// Every role in the order the role picker lists them.
    pub const ALL: [Self; 3] = [Self::User, Self::Moderator, Self::Admin];

    /// Wire representation used by the backend.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Moderator => "moderator",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UserValidationError::UnknownRole {
                value: s.to_owned(),
            })
    }
}

/// Platform user.
///
/// ## Invariants
/// - `username` is non-empty once trimmed.
/// - `email` has a non-empty local part and domain around a single `@`.
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    username: String,
    email: String,
    avatar_url: Option<Url>,
    role: UserRole,
    created_at: DateTime<Utc>,
}

impl User {
    /// Fallible constructor enforcing the username and email invariants.
    pub fn try_new(
        id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
        created_at: DateTime<Utc>,
    ) -> Result<Self, UserValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        let email = email.into();
        if !is_plausible_email(&email) {
            return Err(UserValidationError::InvalidEmail);
        }

        Ok(Self {
            id,
            username,
            email,
            avatar_url: None,
            role,
            created_at,
        })
    }

    /// Attach an avatar reference.
    #[must_use]
    pub fn with_avatar_url(mut self, avatar_url: Url) -> Self {
        self.avatar_url = Some(avatar_url);
        self
    }

    /// Return a copy carrying a different role.
    #[must_use]
    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn avatar_url(&self) -> Option<&Url> {
        self.avatar_url.as_ref()
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    /// Server-assigned registration timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

impl Filterable for User {
    type Id = UserId;
    type Category = UserRole;

    fn id(&self) -> &UserId {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.username(), self.email()]
    }

    fn category(&self) -> UserRole {
        self.role
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.trim().is_empty() && !domain.trim().is_empty() && !domain.contains('@')
        }
        None => false,
    }
}
