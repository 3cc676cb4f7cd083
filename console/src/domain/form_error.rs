//! Failures reported by the mutation forms.

use super::course::CourseValidationError;
use super::ports::GatewayError;

/// Why a form submission did not complete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// Entered values failed validation; the Gateway was not called.
    #[error("{0}")]
    Invalid(#[from] CourseValidationError),
    /// The Gateway refused or failed the call. `message` is what the form
    /// shows to the operator.
    #[error("{message}")]
    Gateway {
        message: String,
        #[source]
        source: GatewayError,
    },
    /// Submit was requested while no form is open.
    #[error("no form is open")]
    Closed,
}

impl FormError {
    /// Build a Gateway failure, falling back to `fallback` when the adapter
    /// supplied no detail.
    pub(crate) fn gateway(source: GatewayError, fallback: &str) -> Self {
        let detail = source.message().trim();
        let message = if detail.is_empty() {
            fallback.to_owned()
        } else {
            detail.to_owned()
        };
        Self::Gateway { message, source }
    }
}
