//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **rest**: reqwest-backed Gateway speaking the hosted backend's
//!   PostgREST dialect
//!
//! Adapters are thin translators that convert between domain types and
//! wire representations. They contain no business logic.

pub mod rest;
