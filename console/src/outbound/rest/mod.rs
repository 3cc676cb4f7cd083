//! REST Gateway adapter.
//!
//! This module provides a thin HTTP implementation of the `CourseGateway`,
//! `UserGateway`, and `StatsGateway` ports.

mod dto;
mod http_gateway;

pub use http_gateway::{RestCredentials, RestGateway};
