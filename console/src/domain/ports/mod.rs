//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod course_gateway;
mod gateway_error;
mod stats_gateway;
mod user_gateway;

#[cfg(test)]
pub use course_gateway::MockCourseGateway;
pub use course_gateway::{CourseGateway, FixtureCourseGateway};
pub use gateway_error::GatewayError;
#[cfg(test)]
pub use stats_gateway::MockStatsGateway;
pub use stats_gateway::{FixtureStatsGateway, StatsGateway};
#[cfg(test)]
pub use user_gateway::MockUserGateway;
pub use user_gateway::{FixtureUserGateway, UserGateway};
