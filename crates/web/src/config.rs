use anyhow::{Context, Result};
use storage::services::ranking::FailedFetchPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub oracle_api_url: String,
    pub oracle_timeout_secs: u64,
    pub failed_fetch_policy: FailedFetchPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            jwt_secret: std::env::var("JWT_SECRET")
                .context("Cannot load JWT_SECRET env variable")?,
            oracle_api_url: std::env::var("ORACLE_API_URL")
                .unwrap_or_else(|_| oracle::MAINNET_API_URL.to_string()),
            oracle_timeout_secs: match std::env::var("ORACLE_TIMEOUT_SECS") {
                Ok(value) => value
                    .parse()
                    .context("ORACLE_TIMEOUT_SECS must be a number")?,
                Err(_) => 10,
            },
            failed_fetch_policy: match std::env::var("FAILED_FETCH_POLICY") {
                Ok(value) => FailedFetchPolicy::parse(&value).map_err(anyhow::Error::msg)?,
                Err(_) => FailedFetchPolicy::default(),
            },
        })
    }
}
