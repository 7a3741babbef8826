use std::num::ParseIntError;
use thiserror::Error;

/// Reasons a token is rejected (or, rarely, cannot be produced).
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("malformed token: {0}")]
    Malformed(&'static str),
    #[error("error decoding signature: {0}")]
    MalformedSignature(#[source] hex::FromHexError),
    #[error("bad signature")]
    BadSignature,
    #[error("error decoding base64 data: {0}")]
    PayloadDecode(#[source] base64::DecodeError),
    #[error("error decoding payload JSON: {0}")]
    PayloadFormat(#[source] serde_json::Error),
    #[error("signature expired: {expires_at} < {now}")]
    Expired { expires_at: i64, now: i64 },
    #[error("error encoding payload JSON: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is set but empty")]
    EmptySecret { var: &'static str },
    #[error("invalid {var}={value:?}: {source}")]
    InvalidTtl {
        var: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
}
