use anyhow::{bail, Context};
use renungan_api::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use renungan_core::roles::validate_role;
use renungan_db::models::user::CreateUser;
use renungan_db::repositories::{SessionRepo, UserRepo};
use renungan_db::DbPool;

/// Hash a password after checking its length.
fn checked_hash(password: &str) -> anyhow::Result<String> {
    validate_password_strength(password, MIN_PASSWORD_LENGTH).map_err(anyhow::Error::msg)?;
    hash_password(password).map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))
}

pub async fn create(
    pool: &DbPool,
    email: &str,
    password: &str,
    role: &str,
    name: Option<String>,
) -> anyhow::Result<()> {
    let email = email.trim();
    validate_role(role).map_err(anyhow::Error::msg)?;
    if UserRepo::find_by_email(pool, email).await?.is_some() {
        bail!("User with email {email} already exists");
    }

    let user = UserRepo::create(
        pool,
        &CreateUser {
            full_name: name,
            email: email.to_string(),
            password_hash: checked_hash(password)?,
            role: role.to_string(),
        },
    )
    .await
    .context("Failed to create user")?;

    tracing::info!(user_id = user.id, email = %user.email, role = %user.role, "User created");
    Ok(())
}

pub async fn delete(pool: &DbPool, email: &str) -> anyhow::Result<()> {
    if !UserRepo::delete_by_email(pool, email).await? {
        bail!("User with email {email} not found");
    }
    tracing::info!(%email, "User deleted");
    Ok(())
}

pub async fn delete_all(pool: &DbPool, confirmed: bool) -> anyhow::Result<()> {
    if !confirmed {
        bail!("Refusing to delete every user without --yes");
    }
    let removed = UserRepo::delete_all(pool).await?;
    tracing::info!(count = removed, "All users deleted");
    Ok(())
}

/// Replace a user's password and revoke their open sessions.
pub async fn reset_password(pool: &DbPool, email: &str, password: &str) -> anyhow::Result<()> {
    let hash = checked_hash(password)?;
    let Some(user) = UserRepo::find_by_email(pool, email).await? else {
        bail!("User with email {email} not found");
    };

    UserRepo::update_password(pool, user.id, &hash).await?;
    let revoked = SessionRepo::revoke_all_for_user(pool, user.id).await?;
    tracing::info!(user_id = user.id, sessions_revoked = revoked, "Password updated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_password_rejected_before_hashing() {
        let err = checked_hash("short").unwrap_err();
        assert!(err.to_string().contains("at least 8 characters"));
    }

    #[test]
    fn long_password_hashes() {
        assert!(checked_hash("long-enough").unwrap().starts_with("$argon2id$"));
    }
}
