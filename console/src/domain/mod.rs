//! Domain primitives, view models, and screen controllers.
//!
//! Purpose: hold everything the console knows about courses, users, and
//! dashboard counters without depending on a transport or a terminal.
//! Gateway access goes through the traits in [`ports`].
//!
//! Public surface:
//! - Course, User, DashboardStats: entities returned by the Gateway.
//! - ListViewModel, FilterState: the shared list-filter view model.
//! - CourseForm, RoleForm: mutation forms.
//! - AccessGuard, DeleteConfirmation: entry gate and two-step delete.
//! - CoursesScreen, UsersScreen, DashboardScreen: per-visit controllers.

pub mod access;
pub mod course;
pub mod course_form;
pub mod courses_screen;
pub mod dashboard_screen;
pub mod delete_confirmation;
pub mod error;
pub mod form_error;
pub mod list_filter;
pub mod list_view;
pub mod localization;
pub mod ports;
pub mod role_form;
pub mod routes;
pub mod stats;
pub mod user;
pub mod users_screen;

pub use self::access::{Access, AccessGuard, Viewer};
pub use self::course::{Course, CourseDraft, CourseId, CourseLevel, CourseValidationError};
pub use self::course_form::{CourseForm, CourseFormInput, DEFAULT_DURATION_DAYS, FormMode};
pub use self::courses_screen::CoursesScreen;
pub use self::dashboard_screen::DashboardScreen;
pub use self::delete_confirmation::DeleteConfirmation;
pub use self::error::{Error, ErrorCode};
pub use self::form_error::FormError;
pub use self::list_filter::{FilterState, Filterable, visible_items};
pub use self::list_view::{ListViewModel, LoadState};
pub use self::localization::{Locale, Message, UnknownLocale};
pub use self::role_form::{RoleForm, RoleSubmit};
pub use self::routes::{AppRoute, UnknownRoute};
pub use self::stats::DashboardStats;
pub use self::user::{User, UserId, UserRole, UserValidationError};
pub use self::users_screen::UsersScreen;
