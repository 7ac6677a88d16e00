//! Idempotent admin account bootstrap.
//!
//! Ensures one administrative account exists at process start, keyed on a
//! fixed email. Runs every startup; an existing account short-circuits.
//! There is no baked-in credential: without `ADMIN_PASSWORD` in the
//! environment, seeding is skipped with a warning.

use chrono::NaiveDate;

use innovatehub_core::roles::Role;
use innovatehub_db::models::user::CreateUser;
use innovatehub_db::repositories::UserRepo;
use innovatehub_db::DbPool;

use crate::auth::password::hash_password;

/// Email the admin account is keyed on when `ADMIN_EMAIL` is unset.
const DEFAULT_ADMIN_EMAIL: &str = "admin@innovatehub.com";

/// Ensure the admin account exists, creating it when absent.
pub async fn ensure_admin(pool: &DbPool) -> anyhow::Result<()> {
    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string());

    if UserRepo::find_by_email(pool, &email).await?.is_some() {
        tracing::debug!(%email, "Admin account already present");
        return Ok(());
    }

    let Ok(password) = std::env::var("ADMIN_PASSWORD") else {
        tracing::warn!(
            %email,
            "No admin account exists and ADMIN_PASSWORD is not set; skipping bootstrap"
        );
        return Ok(());
    };

    let password_hash =
        hash_password(&password).map_err(|e| anyhow::anyhow!("Password hashing error: {e}"))?;

    let input = CreateUser {
        name: "Administrator".to_string(),
        email: email.clone(),
        cpf: "000.000.000-00".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).expect("valid seed birth date"),
        phone: "(00) 00000-0000".to_string(),
        country: "Brasil".to_string(),
        city: "São Paulo".to_string(),
        state: "SP".to_string(),
        street: None,
        avenue: None,
        lot: None,
        number: None,
        password_hash,
        role: Role::Admin.as_str().to_string(),
        specialty: None,
    };

    let admin = UserRepo::create(pool, &input).await?;
    tracing::info!(admin_id = admin.id, %email, "Admin account created");
    Ok(())
}
