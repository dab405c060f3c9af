//! Well-known role name constants.
//!
//! These must match the `chk_users_role` constraint in the users migration.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CONTRIBUTOR: &str = "contributor";

/// All assignable roles.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_CONTRIBUTOR];

/// Validate that a role name is one of the assignable roles.
pub fn validate_role(role: &str) -> Result<(), String> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        ))
    }
}
