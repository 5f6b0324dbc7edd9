use std::env;

use crate::error::{AppError, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    /// Shared secret for webhook signature verification. Must match the
    /// value configured on the payment provider's side.
    pub webhook_secret: String,
    /// Secret for signing session tokens.
    pub token_secret: String,
    /// Reject webhooks whose account exists but belongs to a different user.
    pub enforce_account_ownership: bool,
    pub dev_mode: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let dev_mode = env::var("TILLBOX_ENV")
            .map(|v| v == "dev" || v == "development")
            .unwrap_or(false);

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        Ok(Self {
            host,
            port,
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "tillbox.db".to_string()),
            webhook_secret: require_env("WEBHOOK_SECRET")?,
            token_secret: require_env("TOKEN_SECRET")?,
            enforce_account_ownership: env::var("STRICT_ACCOUNT_OWNERSHIP")
                .map(|v| v == "1" || v == "true")
                .unwrap_or(false),
            dev_mode,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn require_env(name: &'static str) -> Result<String> {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Config(format!("{} must be set", name)))
}
