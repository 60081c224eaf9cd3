//! Which user-administration actions the acting user may take on another
//! user.

use serde::Serialize;

use crate::models::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserAction {
    SendMessage,
    SendInvitation,
    ToggleRole,
    ToggleStatus,
    Edit,
    Delete,
}

impl UserAction {
    pub fn requires_admin(self) -> bool {
        matches!(
            self,
            UserAction::ToggleRole | UserAction::ToggleStatus | UserAction::Edit | UserAction::Delete
        )
    }
}

/// Actions offered to `actor` for `target`.
///
/// Nothing is offered on oneself. Messaging and invitations are open to any
/// signed-in user; the rest is admin-only. With no signed-in actor only the
/// open actions remain.
pub fn available_actions(actor: Option<&User>, target: &User) -> Vec<UserAction> {
    if actor.is_some_and(|a| a.id == target.id) {
        return Vec::new();
    }

    let mut actions = vec![UserAction::SendMessage, UserAction::SendInvitation];
    if actor.is_some_and(User::is_admin) {
        actions.extend([
            UserAction::ToggleRole,
            UserAction::ToggleStatus,
            UserAction::Edit,
            UserAction::Delete,
        ]);
    }
    actions
}

pub fn is_allowed(actor: Option<&User>, target: &User, action: UserAction) -> bool {
    available_actions(actor, target).contains(&action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::test_support::user;

    fn admin() -> User {
        User {
            role: Role::Admin,
            ..user("a1", "Root", "root@acme.io")
        }
    }

    #[test]
    fn no_actions_on_self() {
        let me = admin();
        assert!(available_actions(Some(&me), &me).is_empty());
    }

    #[test]
    fn members_only_get_open_actions() {
        let member = user("u1", "Ana", "ana@acme.io");
        let target = user("u2", "Bo", "bo@acme.io");
        assert_eq!(
            available_actions(Some(&member), &target),
            vec![UserAction::SendMessage, UserAction::SendInvitation]
        );
        assert!(!is_allowed(Some(&member), &target, UserAction::Delete));
    }

    #[test]
    fn admins_get_everything() {
        let target = user("u2", "Bo", "bo@acme.io");
        let actions = available_actions(Some(&admin()), &target);
        assert_eq!(actions.len(), 6);
        assert!(actions.iter().filter(|a| a.requires_admin()).count() == 4);
    }
}
