//! Controller for the course management screen.
//!
//! One [`CoursesScreen`] lives for one visit. It gates entry with the access
//! guard, fetches the full collection once, and applies create, edit, and
//! delete results: saves refetch, deletes remove the item locally.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::access::{Access, AccessGuard, Viewer};
use super::course::{Course, CourseId, CourseLevel};
use super::course_form::CourseForm;
use super::delete_confirmation::DeleteConfirmation;
use super::error::Error;
use super::form_error::FormError;
use super::list_view::ListViewModel;
use super::localization::{Locale, Message};
use super::ports::CourseGateway;

/// State of one visit to the courses screen.
pub struct CoursesScreen<G: CourseGateway + ?Sized> {
    gateway: Arc<G>,
    guard: AccessGuard,
    locale: Locale,
    list: ListViewModel<Course>,
    form: Option<CourseForm>,
    confirmation: DeleteConfirmation<CourseId>,
    action_error: Option<String>,
}

impl<G: CourseGateway + ?Sized> CoursesScreen<G> {
    pub fn new(gateway: Arc<G>, locale: Locale) -> Self {
        Self {
            gateway,
            guard: AccessGuard::default(),
            locale,
            list: ListViewModel::new(),
            form: None,
            confirmation: DeleteConfirmation::Idle,
            action_error: None,
        }
    }

    #[must_use]
    pub fn with_guard(mut self, guard: AccessGuard) -> Self {
        self.guard = guard;
        self
    }

    /// Enter the screen. Redirected viewers cause no Gateway traffic.
    pub async fn open(&mut self, viewer: Option<&Viewer>) -> Access {
        let access = self.guard.check(viewer);
        if let Access::Redirect(route) = access {
            info!(%route, "courses screen redirected");
            return access;
        }
        self.reload().await;
        access
    }

    /// Fetch the full collection. Failure keeps the previous items.
    pub async fn reload(&mut self) {
        self.list.begin_load();
        match self.gateway.list_courses().await {
            Ok(courses) => {
                debug!(count = courses.len(), "courses loaded");
                self.list.apply_loaded(courses);
            }
            Err(err) => {
                warn!(error = %err, "courses fetch failed");
                self.list
                    .apply_failure(Message::CoursesLoadFailed.text(self.locale));
            }
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn list(&self) -> &ListViewModel<Course> {
        &self.list
    }

    pub fn visible_courses(&self) -> Vec<&Course> {
        self.list.visible_items()
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.list.set_search_term(term);
    }

    pub fn set_level(&mut self, level: Option<CourseLevel>) {
        self.list.set_category(level);
    }

    pub fn toggle_filter_panel(&mut self) {
        self.list.toggle_filter_panel();
    }

    pub fn apply_filters(&mut self) {
        self.list.apply_filters();
    }

    pub fn reset_filters(&mut self) {
        self.list.reset_filters();
    }

    /// Banner text: the last failed fetch, else the last failed delete.
    pub fn error(&self) -> Option<&str> {
        self.list.error().or(self.action_error.as_deref())
    }

    pub fn dismiss_error(&mut self) {
        self.list.dismiss_error();
        self.action_error = None;
    }

    pub fn open_create_form(&mut self) {
        self.form = Some(CourseForm::create(self.locale));
    }

    /// Open the edit form for a loaded course.
    pub fn open_edit_form(&mut self, id: &CourseId) -> Result<(), Error> {
        let course = self
            .list
            .find(id)
            .ok_or_else(|| Error::not_found(format!("course {id} is not loaded")))?;
        self.form = Some(CourseForm::edit(course, self.locale));
        Ok(())
    }

    pub fn form(&self) -> Option<&CourseForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut CourseForm> {
        self.form.as_mut()
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Submit the open form. Success closes it and refetches the list; a
    /// refetch failure only raises the banner. Failure keeps the form open.
    pub async fn submit_form(&mut self) -> Result<Course, FormError> {
        let Some(form) = self.form.as_mut() else {
            return Err(FormError::Closed);
        };
        let course = form.submit(self.gateway.as_ref()).await?;
        self.form = None;
        self.reload().await;
        Ok(course)
    }

    /// Arm the delete confirmation for `id`.
    pub fn request_delete(&mut self, id: CourseId) {
        self.confirmation.arm(id);
    }

    pub fn cancel_delete(&mut self) {
        self.confirmation.cancel();
    }

    pub fn pending_delete(&self) -> Option<&CourseId> {
        self.confirmation.pending()
    }

    /// Delete the armed course.
    ///
    /// Returns `Ok(None)` when nothing was armed. On success the course is
    /// removed locally without a refetch. On failure the course stays, the
    /// banner shows the localised message, and the confirmation stays armed
    /// on the same id.
    pub async fn confirm_delete(&mut self) -> Result<Option<CourseId>, Error> {
        let Some(id) = self.confirmation.confirm() else {
            return Ok(None);
        };
        match self.gateway.delete_course(&id).await {
            Ok(()) => {
                info!(course_id = %id, "course deleted");
                self.list.remove(&id);
                self.action_error = None;
                Ok(Some(id))
            }
            Err(err) => {
                warn!(course_id = %id, error = %err, "course delete failed");
                self.confirmation.arm(id);
                self.action_error = Some(Message::CourseDeleteFailed.text(self.locale).to_owned());
                Err(Error::from(err))
            }
        }
    }
}

#[cfg(test)]
#[path = "courses_screen_tests.rs"]
mod tests;
