//! DTOs for the Gateway's JSON rows.
//!
//! The adapter decodes into these transport DTOs first, then maps into domain
//! records in one pass. Mapping failures are reported as plain strings; the
//! caller skips such rows in list responses and reports them as
//! `GatewayError::Decode` for single-row writes.

use std::num::NonZeroU32;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::domain::{
    Course, CourseDraft, CourseId, CourseLevel, DashboardStats, User, UserId, UserRole,
};

#[derive(Debug, Deserialize)]
pub(super) struct CourseRowDto {
    pub(super) id: Uuid,
    pub(super) title: String,
    pub(super) description: String,
    pub(super) image_url: String,
    pub(super) level: CourseLevel,
    pub(super) duration: u32,
    #[serde(default)]
    pub(super) is_active: Option<bool>,
    pub(super) created_at: DateTime<Utc>,
}

impl CourseRowDto {
    pub(super) fn into_domain(self) -> Result<Course, String> {
        let image_url = Url::parse(&self.image_url)
            .map_err(|err| format!("course {} has invalid image_url: {err}", self.id))?;
        let duration = NonZeroU32::new(self.duration)
            .ok_or_else(|| format!("course {} has zero duration", self.id))?;
        let draft = CourseDraft::new(
            self.title,
            self.description,
            image_url,
            self.level,
            duration,
            self.is_active.unwrap_or(true),
        )
        .map_err(|err| format!("course {}: {err}", self.id))?;
        Ok(Course::new(CourseId::from(self.id), draft, self.created_at))
    }
}

/// Field set sent on create and update.
#[derive(Debug, Serialize)]
pub(super) struct CourseFieldsDto<'a> {
    title: &'a str,
    description: &'a str,
    image_url: &'a str,
    level: CourseLevel,
    duration: u32,
    is_active: bool,
}

impl<'a> From<&'a CourseDraft> for CourseFieldsDto<'a> {
    fn from(draft: &'a CourseDraft) -> Self {
        Self {
            title: draft.title(),
            description: draft.description(),
            image_url: draft.image_url().as_str(),
            level: draft.level(),
            duration: draft.duration_days().get(),
            is_active: draft.is_active(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct UserRowDto {
    pub(super) id: String,
    pub(super) username: String,
    pub(super) email: String,
    #[serde(default)]
    pub(super) avatar_url: Option<String>,
    pub(super) role: UserRole,
    pub(super) created_at: DateTime<Utc>,
}

impl UserRowDto {
    pub(super) fn into_domain(self) -> Result<User, String> {
        let id = UserId::new(&self.id).map_err(|err| format!("user '{}': {err}", self.id))?;
        let user = User::try_new(id, self.username, self.email, self.role, self.created_at)
            .map_err(|err| format!("user '{}': {err}", self.id))?;
        match self.avatar_url.as_deref().map(str::trim) {
            None | Some("") => Ok(user),
            Some(raw) => {
                let avatar = Url::parse(raw)
                    .map_err(|err| format!("user '{}' has invalid avatar_url: {err}", self.id))?;
                Ok(user.with_avatar_url(avatar))
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct RoleChangeDto {
    pub(super) role: UserRole,
}

/// Counters returned by the `admin_stats` RPC. Missing counters read as zero.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StatsDto {
    #[serde(default)]
    pub(super) users: u64,
    #[serde(default)]
    pub(super) courses: u64,
    #[serde(default)]
    pub(super) messages: u64,
    #[serde(default)]
    pub(super) pending_messages: u64,
}

impl From<StatsDto> for DashboardStats {
    fn from(value: StatsDto) -> Self {
        Self {
            users: value.users,
            courses: value.courses,
            messages: value.messages,
            pending_messages: value.pending_messages,
        }
    }
}

/// Error envelope returned by PostgREST.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBodyDto {
    #[serde(default)]
    pub(super) message: Option<String>,
}
