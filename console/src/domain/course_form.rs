//! Create and edit form for courses.
//!
//! The form holds raw operator input. Validation turns it into a
//! [`CourseDraft`] before any Gateway call; a failed submit leaves every
//! entered value in place so the operator can correct and resubmit.

use std::num::NonZeroU32;

use tracing::{debug, warn};
use url::Url;

use super::course::{Course, CourseDraft, CourseId, CourseLevel, CourseValidationError};
use super::form_error::FormError;
use super::localization::{Locale, Message};
use super::ports::CourseGateway;

/// Duration prefilled for new courses, in days.
pub const DEFAULT_DURATION_DAYS: u32 = 30;

/// Whether the form creates a course or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(CourseId),
}

/// Operator input as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseFormInput {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub level: CourseLevel,
    /// Raw duration text; parsed on validation.
    pub duration_days: String,
    pub is_active: bool,
}

impl Default for CourseFormInput {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            image_url: String::new(),
            level: CourseLevel::default(),
            duration_days: DEFAULT_DURATION_DAYS.to_string(),
            is_active: true,
        }
    }
}

impl From<&CourseDraft> for CourseFormInput {
    fn from(draft: &CourseDraft) -> Self {
        Self {
            title: draft.title().to_owned(),
            description: draft.description().to_owned(),
            image_url: draft.image_url().to_string(),
            level: draft.level(),
            duration_days: draft.duration_days().to_string(),
            is_active: draft.is_active(),
        }
    }
}

/// Course mutation form.
#[derive(Debug, Clone)]
pub struct CourseForm {
    mode: FormMode,
    input: CourseFormInput,
    locale: Locale,
    error: Option<String>,
}

impl CourseForm {
    /// Blank form prefilled with creation defaults.
    pub fn create(locale: Locale) -> Self {
        Self {
            mode: FormMode::Create,
            input: CourseFormInput::default(),
            locale,
            error: None,
        }
    }

    /// Form prefilled with the editable fields of `course`.
    pub fn edit(course: &Course, locale: Locale) -> Self {
        Self {
            mode: FormMode::Edit(course.id()),
            input: CourseFormInput::from(course.draft()),
            locale,
            error: None,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn input(&self) -> &CourseFormInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut CourseFormInput {
        &mut self.input
    }

    /// Message from the last failed submit.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Check the entered values and build the draft the Gateway receives.
    pub fn validate(&self) -> Result<CourseDraft, CourseValidationError> {
        let input = &self.input;
        let image_url = parse_image_url(&input.image_url)?;
        let duration = parse_duration(&input.duration_days)?;
        CourseDraft::new(
            input.title.as_str(),
            input.description.as_str(),
            image_url,
            input.level,
            duration,
            input.is_active,
        )
    }

    /// Validate and send the form to the Gateway.
    ///
    /// Create mode calls `create_course`; edit mode calls `update_course`
    /// for the edited id. On failure the entered values are kept and
    /// [`CourseForm::error`] carries the Gateway message, or the localised
    /// fallback when the Gateway gave none.
    pub async fn submit<G>(&mut self, gateway: &G) -> Result<Course, FormError>
    where
        G: CourseGateway + ?Sized,
    {
        let draft = match self.validate() {
            Ok(draft) => draft,
            Err(err) => {
                self.error = Some(err.to_string());
                return Err(FormError::Invalid(err));
            }
        };

        let result = match self.mode {
            FormMode::Create => gateway.create_course(&draft).await,
            FormMode::Edit(id) => gateway.update_course(&id, &draft).await,
        };

        match result {
            Ok(course) => {
                debug!(course_id = %course.id(), mode = ?self.mode, "course saved");
                self.error = None;
                Ok(course)
            }
            Err(err) => {
                warn!(mode = ?self.mode, error = %err, "course save failed");
                let failure =
                    FormError::gateway(err, Message::CourseSaveFailed.text(self.locale));
                self.error = Some(failure.to_string());
                Err(failure)
            }
        }
    }
}

fn parse_image_url(raw: &str) -> Result<Url, CourseValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CourseValidationError::InvalidImageUrl {
            reason: "must not be empty".to_owned(),
        });
    }
    Url::parse(raw).map_err(|err| CourseValidationError::InvalidImageUrl {
        reason: err.to_string(),
    })
}

fn parse_duration(raw: &str) -> Result<NonZeroU32, CourseValidationError> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| CourseValidationError::InvalidDuration {
            value: raw.to_owned(),
        })?;
    if value < 1 {
        return Err(CourseValidationError::NonPositiveDuration);
    }
    u32::try_from(value)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or_else(|| CourseValidationError::InvalidDuration {
            value: raw.to_owned(),
        })
}
