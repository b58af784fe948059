//! Role gate.

use crate::api::v1::extractors::Identity;
use crate::error::AppError;
use crate::messages;
use crate::middleware::pipeline::{Gate, RequestCtx};
use crate::services::auth::Role;

/// Roles allowed through a route. Fixed at route-table construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolePolicy {
    /// Explicit pass-through: no role restriction.
    Any,
    OneOf(&'static [Role]),
}

impl RolePolicy {
    pub fn one_of(roles: &'static [Role]) -> Self {
        if roles.is_empty() {
            RolePolicy::Any
        } else {
            RolePolicy::OneOf(roles)
        }
    }

    /// `None` is a role outside the registry and is never permitted by a restricted policy.
    pub fn permits(&self, role: Option<Role>) -> bool {
        match self {
            RolePolicy::Any => true,
            RolePolicy::OneOf(roles) => role.is_some_and(|role| roles.contains(&role)),
        }
    }
}

/// An empty role list yields a pass-through gate.
pub fn authorize(roles: &'static [Role]) -> Gate {
    Gate::Authorize(RolePolicy::one_of(roles))
}

pub(crate) fn check(policy: &RolePolicy, ctx: &RequestCtx) -> Result<(), AppError> {
    if *policy == RolePolicy::Any {
        return Ok(());
    }

    let identity = ctx
        .extensions()
        .get::<Identity>()
        .ok_or(AppError::Unauthorized(messages::UNAUTHORIZED))?;

    if policy.permits(identity.role) {
        Ok(())
    } else {
        tracing::info!(
            user_id = %identity.user_id,
            role = ?identity.role,
            "role not permitted on route"
        );
        // never reveal which roles would have been accepted
        Err(AppError::Forbidden(messages::FORBIDDEN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use uuid::Uuid;

    const ADMINS: &[Role] = &[Role::TravelAdmin, Role::SuperAdmin];

    fn ctx_with(role: Option<Option<Role>>) -> RequestCtx {
        let (mut parts, _) = Request::new(()).into_parts();
        if let Some(role) = role {
            parts.extensions.insert(Identity {
                user_id: Uuid::new_v4(),
                email: "a@example.com".into(),
                role,
                expires_at: 0,
            });
        }
        RequestCtx::new(parts)
    }

    #[test]
    fn permitted_role_passes() {
        let policy = RolePolicy::one_of(ADMINS);
        assert!(check(&policy, &ctx_with(Some(Some(Role::SuperAdmin)))).is_ok());
    }

    #[test]
    fn other_role_is_forbidden() {
        let policy = RolePolicy::one_of(ADMINS);
        let err = check(&policy, &ctx_with(Some(Some(Role::Requester)))).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(messages::FORBIDDEN)));
    }

    #[test]
    fn unknown_role_is_forbidden() {
        let policy = RolePolicy::one_of(ADMINS);
        let err = check(&policy, &ctx_with(Some(None))).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn missing_identity_is_unauthorized_not_forbidden() {
        let policy = RolePolicy::one_of(ADMINS);
        let err = check(&policy, &ctx_with(None)).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(messages::UNAUTHORIZED)));
    }

    #[test]
    fn empty_role_list_is_an_explicit_pass_through() {
        assert_eq!(RolePolicy::one_of(&[]), RolePolicy::Any);
        assert!(check(&RolePolicy::Any, &ctx_with(None)).is_ok());
        assert!(check(&RolePolicy::Any, &ctx_with(Some(None))).is_ok());
    }
}
