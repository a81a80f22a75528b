//! One-shot bootstrap for the first admin account.
//!
//! Run once after deployment with ADMIN_USERNAME / ADMIN_PASSWORD set.

use anyhow::Context;
use bcrypt::{DEFAULT_COST, hash};
use storage::{Database, repository::participant::ParticipantRepository};

const PLACEHOLDER_WALLET: &str = "0x0000000000000000000000000000000000000000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let database_url =
        std::env::var("DATABASE_URL").context("Cannot load DATABASE_URL env variable")?;
    let username =
        std::env::var("ADMIN_USERNAME").context("Cannot load ADMIN_USERNAME env variable")?;
    let password =
        std::env::var("ADMIN_PASSWORD").context("Cannot load ADMIN_PASSWORD env variable")?;
    let wallet =
        std::env::var("ADMIN_WALLET").unwrap_or_else(|_| PLACEHOLDER_WALLET.to_string());

    let db = Database::new(&database_url)
        .await
        .context("Failed to initialize database")?;
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;

    let password_hash = hash(&password, DEFAULT_COST).context("Failed to hash admin password")?;

    let repo = ParticipantRepository::new(db.pool());
    let admin = repo
        .create_admin(&username, &password_hash, &wallet)
        .await
        .context("Failed to create admin account")?;

    if admin.is_admin() {
        tracing::info!(username = %admin.username, "admin account ready");
    } else {
        tracing::warn!(
            username = %admin.username,
            "username already belongs to a non-admin account, nothing changed"
        );
    }

    Ok(())
}
