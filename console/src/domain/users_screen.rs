//! Controller for the user management screen.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::access::{Access, AccessGuard, Viewer};
use super::error::Error;
use super::form_error::FormError;
use super::list_view::ListViewModel;
use super::localization::{Locale, Message};
use super::ports::UserGateway;
use super::role_form::{RoleForm, RoleSubmit};
use super::user::{User, UserId, UserRole};

/// State of one visit to the users screen.
pub struct UsersScreen<G: UserGateway + ?Sized> {
    gateway: Arc<G>,
    guard: AccessGuard,
    locale: Locale,
    list: ListViewModel<User>,
    role_form: Option<RoleForm>,
}

impl<G: UserGateway + ?Sized> UsersScreen<G> {
    pub fn new(gateway: Arc<G>, locale: Locale) -> Self {
        Self {
            gateway,
            guard: AccessGuard::default(),
            locale,
            list: ListViewModel::new(),
            role_form: None,
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
            info!(%route, "users screen redirected");
            return access;
        }
        self.reload().await;
        access
    }

    pub async fn reload(&mut self) {
        self.list.begin_load();
        match self.gateway.list_users().await {
            Ok(users) => {
                debug!(count = users.len(), "users loaded");
                self.list.apply_loaded(users);
            }
            Err(err) => {
                warn!(error = %err, "users fetch failed");
                self.list
                    .apply_failure(Message::UsersLoadFailed.text(self.locale));
            }
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn list(&self) -> &ListViewModel<User> {
        &self.list
    }

    pub fn visible_users(&self) -> Vec<&User> {
        self.list.visible_items()
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.list.set_search_term(term);
    }

    pub fn set_role_filter(&mut self, role: Option<UserRole>) {
        self.list.set_category(role);
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

    pub fn error(&self) -> Option<&str> {
        self.list.error()
    }

    pub fn dismiss_error(&mut self) {
        self.list.dismiss_error();
    }

    /// Open the role picker for a loaded user.
    pub fn open_role_form(&mut self, id: &UserId) -> Result<(), Error> {
        let user = self
            .list
            .find(id)
            .ok_or_else(|| Error::not_found(format!("user {id} is not loaded")))?;
        self.role_form = Some(RoleForm::new(user, self.locale));
        Ok(())
    }

    pub fn role_form(&self) -> Option<&RoleForm> {
        self.role_form.as_ref()
    }

    pub fn select_role(&mut self, role: UserRole) {
        if let Some(form) = self.role_form.as_mut() {
            form.select(role);
        }
    }

    pub fn close_role_form(&mut self) {
        self.role_form = None;
    }

    /// Submit the role picker. A stored change closes it and refetches; an
    /// unchanged selection leaves it open and sends nothing.
    pub async fn submit_role_form(&mut self) -> Result<RoleSubmit, FormError> {
        let Some(form) = self.role_form.as_mut() else {
            return Err(FormError::Closed);
        };
        let outcome = form.submit(self.gateway.as_ref()).await?;
        if let RoleSubmit::Updated(_) = outcome {
            self.role_form = None;
            self.reload().await;
        }
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "users_screen_tests.rs"]
mod tests;
