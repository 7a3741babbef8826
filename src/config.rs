// src/config.rs
use std::env;

use chrono::Duration as ChronoDuration;
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::signer::Secret;
use crate::token::Codec;

const SECRET_VAR: &str = "TOCOOKIE_SECRET";
const TTL_VAR: &str = "TOCOOKIE_TTL";

const DEV_SECRET: &str = "dev-secret-change-me";
const DEFAULT_TTL_SECS: u32 = 3600;
const MIN_TTL_SECS: i64 = 60;

#[derive(Clone, Debug)]
pub struct Config {
    // ===== Session & security =====
    pub secret: Secret,
    pub session_token_ttl: ChronoDuration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Same as [`Config::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret = match lookup(SECRET_VAR) {
            Some(s) if s.is_empty() => return Err(ConfigError::EmptySecret { var: SECRET_VAR }),
            Some(s) => Secret::from(s),
            None => {
                warn!("{SECRET_VAR} not set, using the development secret");
                Secret::from(DEV_SECRET)
            }
        };

        let ttl_secs = match lookup(TTL_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|source| ConfigError::InvalidTtl {
                    var: TTL_VAR,
                    value: raw.clone(),
                    source,
                })?,
            None => DEFAULT_TTL_SECS,
        };
        let session_token_ttl =
            ChronoDuration::seconds(i64::from(ttl_secs)).max(ChronoDuration::seconds(MIN_TTL_SECS));

        let cfg = Self {
            secret,
            session_token_ttl,
        };
        info!(
            secret_len = cfg.secret.as_bytes().len(),
            ttl_secs = cfg.session_token_ttl.num_seconds(),
            "[config] loaded"
        );
        Ok(cfg)
    }

    pub fn codec(&self) -> Codec {
        Codec::new(self.secret.clone()).with_validity(self.session_token_ttl)
    }
}
