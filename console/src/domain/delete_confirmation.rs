//! Two-step delete confirmation.
//!
//! Deleting a record is a separate `arm` then `confirm` interaction. The
//! state is an explicit variant rather than a nullable id so the "nothing
//! pending" case cannot be confused with a real identifier.

/// Whether a delete is waiting for the operator's confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteConfirmation<Id> {
    Idle,
    Pending(Id),
}

impl<Id> Default for DeleteConfirmation<Id> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<Id> DeleteConfirmation<Id> {
    /// Ask for confirmation before deleting `id`. Re-arming replaces any
    /// previously pending id.
    pub fn arm(&mut self, id: Id) {
        *self = Self::Pending(id);
    }

    /// Drop the pending request without side effects.
    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    pub fn pending(&self) -> Option<&Id> {
        match self {
            Self::Pending(id) => Some(id),
            Self::Idle => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Consume the confirmation, returning the id to delete and resetting to
    /// [`DeleteConfirmation::Idle`].
    ///
    /// # Examples
    /// ```
    /// use admin_console::domain::DeleteConfirmation;
    ///
    /// let mut confirmation = DeleteConfirmation::Idle;
    /// confirmation.arm(42);
    /// assert_eq!(confirmation.confirm(), Some(42));
    /// assert_eq!(confirmation.confirm(), None);
    /// ```
    pub fn confirm(&mut self) -> Option<Id> {
        match std::mem::replace(self, Self::Idle) {
            Self::Pending(id) => Some(id),
            Self::Idle => None,
        }
    }
}
