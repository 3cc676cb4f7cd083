//! Console routes.
//!
//! Routes are plain values; the CLI adapter prints them and the access guard
//! redirects to them. Nothing here performs navigation.

use std::fmt;
use std::str::FromStr;

use super::course::CourseId;

/// Navigable destinations known to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppRoute {
    /// Public landing page; where unauthorised viewers are sent.
    Home,
    AdminDashboard,
    AdminUsers,
    AdminCourses,
    ModeratorChat,
    /// Public page of one course (the "view" action in the courses table).
    CourseDetails(CourseId),
}

/// Error returned when a path does not name a known route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRoute(pub String);

impl fmt::Display for UnknownRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown route '{}'", self.0)
    }
}

impl std::error::Error for UnknownRoute {}

impl AppRoute {
    /// Links offered on the dashboard, in display order.
    pub const DASHBOARD_LINKS: [Self; 3] =
        [Self::AdminUsers, Self::AdminCourses, Self::ModeratorChat];

    /// Whether the route belongs to the admin area guarded by
    /// [`super::AccessGuard`].
    pub fn is_admin_area(self) -> bool {
        matches!(
            self,
            Self::AdminDashboard | Self::AdminUsers | Self::AdminCourses
        )
    }
}

impl fmt::Display for AppRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => f.write_str("/"),
            Self::AdminDashboard => f.write_str("/admin/dashboard"),
            Self::AdminUsers => f.write_str("/admin/users"),
            Self::AdminCourses => f.write_str("/admin/courses"),
            Self::ModeratorChat => f.write_str("/moderator/chat"),
            Self::CourseDetails(id) => write!(f, "/courses/{id}"),
        }
    }
}

impl FromStr for AppRoute {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "/" {
            return Ok(Self::Home);
        }
        // One trailing slash is tolerated on the other routes.
        let path = s.strip_suffix('/').unwrap_or(s);
        match path {
            "/admin/dashboard" => Ok(Self::AdminDashboard),
            "/admin/users" => Ok(Self::AdminUsers),
            "/admin/courses" => Ok(Self::AdminCourses),
            "/moderator/chat" => Ok(Self::ModeratorChat),
            other => other
                .strip_prefix("/courses/")
                .and_then(|id| id.parse::<CourseId>().ok())
                .map(Self::CourseDetails)
                .ok_or_else(|| UnknownRoute(s.to_owned())),
        }
    }
}
