//! Role change form for a single user.

use tracing::{debug, warn};

use super::form_error::FormError;
use super::localization::{Locale, Message};
use super::ports::UserGateway;
use super::user::{User, UserId, UserRole};

/// Outcome of a role form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleSubmit {
    /// The Gateway stored the new role.
    Updated(UserRole),
    /// The selected role equals the current one; nothing was sent.
    Unchanged,
}

/// Role picker preselected with the user's current role.
#[derive(Debug, Clone)]
pub struct RoleForm {
    user_id: UserId,
    username: String,
    current: UserRole,
    selected: UserRole,
    locale: Locale,
    error: Option<String>,
}

impl RoleForm {
    pub fn new(user: &User, locale: Locale) -> Self {
        Self {
            user_id: user.id().clone(),
            username: user.username().to_owned(),
            current: user.role(),
            selected: user.role(),
            locale,
            error: None,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    pub fn current_role(&self) -> UserRole {
        self.current
    }

    pub fn selected_role(&self) -> UserRole {
        self.selected
    }

    pub fn select(&mut self, role: UserRole) {
        self.selected = role;
    }

    /// Submit is offered only when the selection differs from the current
    /// role.
    pub fn can_submit(&self) -> bool {
        self.selected != self.current
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Send the selected role to the Gateway.
    ///
    /// A no-op selection returns [`RoleSubmit::Unchanged`] without calling
    /// the Gateway.
    pub async fn submit<G>(&mut self, gateway: &G) -> Result<RoleSubmit, FormError>
    where
        G: UserGateway + ?Sized,
    {
        if !self.can_submit() {
            return Ok(RoleSubmit::Unchanged);
        }

        let role = self.selected;
        match gateway.update_user_role(&self.user_id, role).await {
            Ok(()) => {
                debug!(user_id = %self.user_id, role = %role, "user role updated");
                self.current = role;
                self.error = None;
                Ok(RoleSubmit::Updated(role))
            }
            Err(err) => {
                warn!(user_id = %self.user_id, role = %role, error = %err, "role change failed");
                let failure =
                    FormError::gateway(err, Message::RoleChangeFailed.text(self.locale));
                self.error = Some(failure.to_string());
                Err(failure)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::predicate::eq;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ports::{GatewayError, MockUserGateway};

    #[fixture]
    fn moderator() -> User {
        User::try_new(
            UserId::random(),
            "grace",
            "grace@example.com",
            UserRole::Moderator,
            Utc::now(),
        )
        .expect("valid user")
    }

    #[rstest]
    fn preselects_the_current_role(moderator: User) {
        let form = RoleForm::new(&moderator, Locale::Ru);
        assert_eq!(form.selected_role(), UserRole::Moderator);
        assert_eq!(form.current_role(), UserRole::Moderator);
        assert!(!form.can_submit());
    }

    #[rstest]
    #[tokio::test]
    async fn unchanged_role_makes_no_gateway_call(moderator: User) {
        let mut form = RoleForm::new(&moderator, Locale::Ru);
        form.select(UserRole::Admin);
        form.select(UserRole::Moderator);

        let mut gateway = MockUserGateway::new();
        gateway.expect_update_user_role().times(0);

        assert_eq!(form.submit(&gateway).await, Ok(RoleSubmit::Unchanged));
    }

    #[rstest]
    #[tokio::test]
    async fn changed_role_is_sent_once(moderator: User) {
        let id = moderator.id().clone();
        let mut form = RoleForm::new(&moderator, Locale::Ru);
        form.select(UserRole::Admin);
        assert!(form.can_submit());

        let mut gateway = MockUserGateway::new();
        gateway
            .expect_update_user_role()
            .with(eq(id), eq(UserRole::Admin))
            .times(1)
            .returning(|_, _| Ok(()));

        assert_eq!(
            form.submit(&gateway).await,
            Ok(RoleSubmit::Updated(UserRole::Admin))
        );
        assert_eq!(form.current_role(), UserRole::Admin);
        assert!(!form.can_submit());
    }

    #[rstest]
    #[case(Locale::Ru, "Произошла ошибка при изменении роли пользователя")]
    #[case(Locale::En, "An error occurred while changing the user's role")]
    #[tokio::test]
    async fn blank_gateway_message_uses_fallback(
        moderator: User,
        #[case] locale: Locale,
        #[case] expected: &str,
    ) {
        let mut form = RoleForm::new(&moderator, locale);
        form.select(UserRole::User);

        let mut gateway = MockUserGateway::new();
        gateway
            .expect_update_user_role()
            .times(1)
            .returning(|_, _| Err(GatewayError::transport("")));

        assert!(form.submit(&gateway).await.is_err());
        assert_eq!(form.error(), Some(expected));
        assert_eq!(form.selected_role(), UserRole::User);
        assert_eq!(form.current_role(), UserRole::Moderator);
    }
}
