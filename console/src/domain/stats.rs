//! Aggregate platform statistics shown on the dashboard.

/// Counters returned by the Gateway's aggregate-stats call.
///
/// Defaults to all zeros so the dashboard can render before the first load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    /// Registered users.
    pub users: u64,
    /// Active courses.
    pub courses: u64,
    /// Chat messages across all rooms.
    pub messages: u64,
    /// Chat messages awaiting moderation.
    pub pending_messages: u64,
}
