//! Port for user listing and role changes on the remote Gateway.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::GatewayError;
use crate::domain::{User, UserId, UserRole};

/// User operations exposed by the Gateway. Role is the only mutable field.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserGateway: Send + Sync {
    /// Return every user, most recently registered first.
    async fn list_users(&self) -> Result<Vec<User>, GatewayError>;

    async fn update_user_role(&self, id: &UserId, role: UserRole) -> Result<(), GatewayError>;
}

/// In-memory user directory.
#[derive(Debug, Default)]
pub struct FixtureUserGateway {
    users: Mutex<Vec<User>>,
}

impl FixtureUserGateway {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }
}

#[async_trait]
impl UserGateway for FixtureUserGateway {
    async fn list_users(&self) -> Result<Vec<User>, GatewayError> {
        let mut users = self
            .users
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        users.sort_by_key(|user| std::cmp::Reverse(user.created_at()));
        Ok(users)
    }

    async fn update_user_role(&self, id: &UserId, role: UserRole) -> Result<(), GatewayError> {
        let mut users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = users
            .iter_mut()
            .find(|user| user.id() == id)
            .ok_or_else(|| GatewayError::not_found(format!("user {id}")))?;
        *slot = slot.clone().with_role(role);
        Ok(())
    }
}
