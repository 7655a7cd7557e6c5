//! Startup bootstrap
//!
//! Runs after migrations. The portfolio has one owner: one active admin
//! credential and one live profile. An empty database is seeded from the
//! `ADMIN_*` / `OWNER_FULL_NAME` settings; without a credential or the
//! settings to create one, startup fails.

use anyhow::{Context, bail};
use auth::domain::repository::CredentialRepository;
use auth::models::{Email, NewAdminCredential};
use kernel::audit::Actor;
use kernel::principal::Role;
use platform::password::{ClearTextPassword, PasswordHasher};
use portfolio::ProfileRepository;
use portfolio::models::NewProfile;

use crate::config::BootstrapConfig;

/// Ensure the single-owner invariants hold, seeding where allowed
pub async fn run<C, P>(
    credentials: &C,
    profiles: &P,
    hasher: &PasswordHasher,
    config: &BootstrapConfig,
) -> anyhow::Result<()>
where
    C: CredentialRepository,
    P: ProfileRepository,
{
    ensure_credential(credentials, hasher, config).await?;
    ensure_owner_profile(profiles, config).await?;
    Ok(())
}

async fn ensure_credential<C>(
    credentials: &C,
    hasher: &PasswordHasher,
    config: &BootstrapConfig,
) -> anyhow::Result<()>
where
    C: CredentialRepository,
{
    let active = credentials.count_active().await?;
    if active > 1 {
        tracing::warn!(
            active,
            "More than one active admin credential; the lowest id is used for password changes"
        );
        return Ok(());
    }
    if active == 1 {
        return Ok(());
    }

    let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) else {
        bail!("No active admin credential; set ADMIN_EMAIL and ADMIN_PASSWORD to seed one");
    };

    let email = Email::new(email.as_str()).context("ADMIN_EMAIL is not a valid email address")?;
    let password =
        ClearTextPassword::new(password.clone()).context("ADMIN_PASSWORD violates the password policy")?;
    let hash = hasher.hash(&password)?;

    let credential = credentials
        .insert(
            NewAdminCredential {
                email,
                password_hash: hash.into_phc_string(),
                role: Role::Admin,
            },
            &Actor::system(),
        )
        .await?;

    tracing::info!(
        credential_id = %credential.id,
        email = %credential.email,
        "Seeded admin credential"
    );
    Ok(())
}

async fn ensure_owner_profile<P>(profiles: &P, config: &BootstrapConfig) -> anyhow::Result<()>
where
    P: ProfileRepository,
{
    let live = profiles.count_active_profiles().await?;
    if live > 1 {
        tracing::warn!(live, "More than one live profile; the lowest id is the owner");
        return Ok(());
    }
    if live == 1 {
        return Ok(());
    }

    match &config.owner_full_name {
        Some(full_name) => {
            let profile = profiles
                .insert_profile(
                    NewProfile {
                        full_name: full_name.clone(),
                    },
                    &Actor::system(),
                )
                .await?;
            tracing::info!(profile_id = %profile.id, "Seeded owner profile");
        }
        None => {
            tracing::warn!("No owner profile; profile reads return 404 until one is created");
        }
    }
    Ok(())
}
