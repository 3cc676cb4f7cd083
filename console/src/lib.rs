//! Admin console library modules.
//!
//! The domain layer owns entities, view models, screen controllers, and the
//! Gateway ports. Inbound adapters drive screens from the command line;
//! outbound adapters implement the ports over HTTP.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
