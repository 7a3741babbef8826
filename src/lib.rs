//! Signed session cookie codec.
//!
//! Tokens have the legacy wire form
//! `<base64 payload, '-' padded>--<lowercase hex HMAC-SHA1>` and carry a JSON
//! payload of `{"auth_data", "expires", "by"}`. See [`token`] for the codec and
//! [`signer`] for the keyed hash underneath it.

pub mod config;
pub mod error;
pub mod signer;
pub mod token;

#[cfg(test)]
mod test_logs;

pub use config::Config;
pub use error::{ConfigError, TokenError};
pub use signer::Secret;
pub use token::{
    decode, decode_at, encode, encode_with_issuer, refresh, refresh_at, sign_raw, Codec,
    TokenRecord, COOKIE_NAME, DEFAULT_DURATION_SECS, GENERATED_BY,
};
