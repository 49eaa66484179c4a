/// Role gating
///
/// Role-checked endpoints previously tended to grow their own ad-hoc string
/// comparisons; every gate now goes through [`require_role`] so the check
/// cannot drift between endpoints.
///
/// # Example
///
/// ```
/// use workhub_shared::auth::authorization::require_role;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum UserType { Ops, Client }
///
/// assert!(require_role(UserType::Ops, UserType::Ops).is_ok());
/// assert!(require_role(UserType::Client, UserType::Ops).is_err());
/// ```

use std::fmt::Debug;

/// Error type for role checks
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// Caller doesn't hold the required role
    #[error("Permission denied: requires {required}, caller has {actual}")]
    InsufficientRole {
        /// Role the endpoint requires
        required: String,
        /// Role the caller actually holds
        actual: String,
    },
}

/// Checks that the caller's role equals the role an endpoint requires
///
/// Roles in WorkHub are flat, not hierarchical: an ops user is not a
/// superset of a client user. Equality is the whole check.
///
/// # Errors
///
/// Returns `AccessError::InsufficientRole` when the roles differ
pub fn require_role<R>(actual: R, required: R) -> Result<(), AccessError>
where
    R: PartialEq + Debug,
{
    if actual == required {
        Ok(())
    } else {
        Err(AccessError::InsufficientRole {
            required: format!("{:?}", required),
            actual: format!("{:?}", actual),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Role {
        Ops,
        Client,
    }

    #[test]
    fn test_matching_role_passes() {
        assert!(require_role(Role::Ops, Role::Ops).is_ok());
        assert!(require_role(Role::Client, Role::Client).is_ok());
    }

    #[test]
    fn test_mismatched_role_fails() {
        let err = require_role(Role::Client, Role::Ops).unwrap_err();
        let AccessError::InsufficientRole { required, actual } = err;
        assert_eq!(required, "Ops");
        assert_eq!(actual, "Client");
    }

    #[test]
    fn test_works_for_plain_strings() {
        assert!(require_role("ops", "ops").is_ok());
        assert!(require_role("client", "ops").is_err());
    }
}
