//! Access guard for the admin screens.
//!
//! The guard is a pure predicate over the signed-in viewer. Screens evaluate
//! it before issuing any Gateway call, so a redirected viewer never causes
//! network traffic.

use super::routes::AppRoute;
use super::user::{UserId, UserRole};

/// The identity currently using the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    id: UserId,
    role: UserRole,
}

impl Viewer {
    pub fn new(id: UserId, role: UserRole) -> Self {
        Self { id, role }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn role(&self) -> UserRole {
        self.role
    }
}

/// Guard verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    Redirect(AppRoute),
}

impl Access {
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Role-based gate with a fallback route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessGuard {
    required: UserRole,
    fallback: AppRoute,
}

impl Default for AccessGuard {
    /// Admin-only guard that sends everybody else home.
    fn default() -> Self {
        Self::new(UserRole::Admin, AppRoute::Home)
    }
}

impl AccessGuard {
    pub fn new(required: UserRole, fallback: AppRoute) -> Self {
        Self { required, fallback }
    }

    /// Decide whether `viewer` may enter.
    ///
    /// # Examples
    /// ```
    /// use admin_console::domain::{Access, AccessGuard, AppRoute};
    ///
    /// assert_eq!(AccessGuard::default().check(None), Access::Redirect(AppRoute::Home));
    /// ```
    pub fn check(&self, viewer: Option<&Viewer>) -> Access {
        match viewer {
            Some(viewer) if viewer.role() == self.required => Access::Granted,
            _ => Access::Redirect(self.fallback),
        }
    }
}
