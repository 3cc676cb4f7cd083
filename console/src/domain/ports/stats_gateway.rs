//! Port for the dashboard's aggregate statistics.

use async_trait::async_trait;

use super::GatewayError;
use crate::domain::DashboardStats;

/// Aggregate counters computed by the Gateway.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsGateway: Send + Sync {
    async fn aggregate_stats(&self) -> Result<DashboardStats, GatewayError>;
}

/// Fixture returning a fixed snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStatsGateway {
    stats: DashboardStats,
}

impl FixtureStatsGateway {
    pub fn new(stats: DashboardStats) -> Self {
        Self { stats }
    }
}

#[async_trait]
impl StatsGateway for FixtureStatsGateway {
    async fn aggregate_stats(&self) -> Result<DashboardStats, GatewayError> {
        Ok(self.stats)
    }
}
