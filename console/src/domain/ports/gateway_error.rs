//! Error contract shared by every Gateway port.

use super::define_port_error;

define_port_error! {
    /// Failures surfaced by Gateway adapters.
    pub enum GatewayError {
        /// The backend could not be reached or failed while serving the call.
        Transport => "gateway transport failed: {message}",
        /// The call exceeded the adapter's request timeout.
        Timeout => "gateway request timed out: {message}",
        /// The backend did not accept the console's credentials.
        Unauthorized => "gateway rejected credentials: {message}",
        /// The backend refused the operation for the current credentials.
        Forbidden => "gateway denied access: {message}",
        /// The addressed record does not exist.
        NotFound => "gateway record not found: {message}",
        /// The backend rejected the payload (constraint or business rule).
        Rejected => "gateway rejected request: {message}",
        /// The backend answered with a body the adapter could not decode.
        Decode => "gateway response decode failed: {message}",
    }
}

impl GatewayError {
    /// Return whether repeating the same call may succeed without changes.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
    }
}
