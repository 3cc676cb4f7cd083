//! Controller for the admin dashboard.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::access::{Access, AccessGuard, Viewer};
use super::localization::{Locale, Message};
use super::ports::StatsGateway;
use super::routes::AppRoute;
use super::stats::DashboardStats;

/// State of one visit to the dashboard.
pub struct DashboardScreen<G: StatsGateway + ?Sized> {
    gateway: Arc<G>,
    guard: AccessGuard,
    locale: Locale,
    stats: DashboardStats,
    loading: bool,
    error: Option<String>,
}

impl<G: StatsGateway + ?Sized> DashboardScreen<G> {
    pub fn new(gateway: Arc<G>, locale: Locale) -> Self {
        Self {
            gateway,
            guard: AccessGuard::default(),
            locale,
            stats: DashboardStats::default(),
            loading: false,
            error: None,
        }
    }

    #[must_use]
    pub fn with_guard(mut self, guard: AccessGuard) -> Self {
        self.guard = guard;
        self
    }

    pub async fn open(&mut self, viewer: Option<&Viewer>) -> Access {
        let access = self.guard.check(viewer);
        if let Access::Redirect(route) = access {
            info!(%route, "dashboard redirected");
            return access;
        }
        self.reload().await;
        access
    }

    /// Fetch the counters. Failure keeps the last values shown.
    pub async fn reload(&mut self) {
        self.loading = true;
        match self.gateway.aggregate_stats().await {
            Ok(stats) => {
                debug!(?stats, "dashboard stats loaded");
                self.stats = stats;
                self.error = None;
            }
            Err(err) => {
                warn!(error = %err, "dashboard stats fetch failed");
                self.error = Some(Message::StatsLoadFailed.text(self.locale).to_owned());
            }
        }
        self.loading = false;
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn stats(&self) -> DashboardStats {
        self.stats
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Shortcuts rendered under the counters.
    pub fn quick_links(&self) -> &'static [AppRoute] {
        &AppRoute::DASHBOARD_LINKS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{FixtureStatsGateway, GatewayError, MockStatsGateway};
    use crate::domain::{UserId, UserRole};

    fn admin() -> Viewer {
        Viewer::new(UserId::random(), UserRole::Admin)
    }

    #[tokio::test]
    async fn starts_at_zero_and_loads_counters() {
        let snapshot = DashboardStats {
            users: 3,
            courses: 2,
            messages: 40,
            pending_messages: 1,
        };
        let mut screen = DashboardScreen::new(
            Arc::new(FixtureStatsGateway::new(snapshot)),
            Locale::Ru,
        );
        assert_eq!(screen.stats(), DashboardStats::default());

        assert!(screen.open(Some(&admin())).await.is_granted());
        assert_eq!(screen.stats(), snapshot);
        assert!(!screen.is_loading());
    }

    #[tokio::test]
    async fn guests_are_redirected_without_gateway_calls() {
        let mut gateway = MockStatsGateway::new();
        gateway.expect_aggregate_stats().times(0);

        let mut screen = DashboardScreen::new(Arc::new(gateway), Locale::Ru);
        assert_eq!(screen.open(None).await, Access::Redirect(AppRoute::Home));
    }

    #[tokio::test]
    async fn failure_shows_banner_and_keeps_zeros() {
        let mut gateway = MockStatsGateway::new();
        gateway
            .expect_aggregate_stats()
            .times(1)
            .returning(|| Err(GatewayError::transport("connection refused")));

        let mut screen = DashboardScreen::new(Arc::new(gateway), Locale::Ru);
        screen.open(Some(&admin())).await;

        assert_eq!(screen.error(), Some("Не удалось загрузить статистику"));
        assert_eq!(screen.stats(), DashboardStats::default());
        screen.dismiss_error();
        assert_eq!(screen.error(), None);
    }

    #[test]
    fn quick_links_cover_users_courses_and_chat() {
        let screen = DashboardScreen::new(Arc::new(FixtureStatsGateway::default()), Locale::Ru);
        let paths: Vec<String> = screen
            .quick_links()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            paths,
            vec!["/admin/users", "/admin/courses", "/moderator/chat"]
        );
    }
}
