// src/token.rs
use base64::{
    alphabet::Alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::TokenError;
use crate::signer::{self, Secret};

/// Issuer tag written into every token this crate mints.
pub const GENERATED_BY: &str = "trafficcontrol-go-tocookie";

/// Name of the cookie the token conventionally travels in.
pub const COOKIE_NAME: &str = "mojolicious";

/// Validity window used by [`refresh`] (one hour).
pub const DEFAULT_DURATION_SECS: i64 = 60 * 60;

const SEPARATOR: &str = "--";
const DASH: char = '-';

// URL-safe base64 with '.' in place of '-', so '-' only ever appears as padding or separator.
const ALPHABET: Alphabet =
    match Alphabet::new("ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789._") {
        Ok(alphabet) => alphabet,
        Err(_) => panic!("invalid token alphabet"),
    };

// Pads on encode ('=' is rewritten to '-'); decoding sees the text cut before the first
// dash, so padding must be optional there.
const ENGINE: GeneralPurpose = GeneralPurpose::new(
    &ALPHABET,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decoded token payload.
///
/// Only trust a record returned by [`decode`]/[`decode_at`]: those check the
/// signature and the expiration before handing it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    #[serde(rename = "auth_data")]
    pub identity: String,
    /// Unix seconds.
    #[serde(rename = "expires")]
    pub expires_at: i64,
    #[serde(rename = "by")]
    pub issuer: String,
}

/// Signs an arbitrary message: `<base64 text>--<hex tag>`.
///
/// The tag covers the base64 text including its '-' padding.
pub fn sign_raw(message: &[u8], key: &Secret) -> String {
    let text = ENGINE.encode(message).replace('=', "-");
    let tag = signer::sign(text.as_bytes(), key);
    format!("{text}{SEPARATOR}{}", hex::encode(tag))
}

/// Mints a token for `identity` expiring at `expires_at` (Unix seconds).
pub fn encode(identity: &str, expires_at: i64, key: &Secret) -> Result<String, TokenError> {
    encode_with_issuer(identity, expires_at, GENERATED_BY, key)
}

pub fn encode_with_issuer(
    identity: &str,
    expires_at: i64,
    issuer: &str,
    key: &Secret,
) -> Result<String, TokenError> {
    let record = TokenRecord {
        identity: identity.to_owned(),
        expires_at,
        issuer: issuer.to_owned(),
    };
    let payload = serde_json::to_vec(&record).map_err(TokenError::Encode)?;
    Ok(sign_raw(&payload, key))
}

/// Parses and verifies `token` against the current wall clock.
pub fn decode(token: &str, key: &Secret) -> Result<TokenRecord, TokenError> {
    decode_at(token, key, Utc::now().timestamp())
}

/// Parses and verifies `token` as of `now` (Unix seconds).
///
/// The signed scope runs up to the *last* dash minus one (the `--` separator),
/// which keeps any '-' padding inside it; hex never contains '-', so the last
/// dash always belongs to the separator. The payload is read only up to the
/// *first* dash, dropping padding the decoder doesn't need. A token expiring
/// exactly at `now` is still valid.
pub fn decode_at(token: &str, key: &Secret, now: i64) -> Result<TokenRecord, TokenError> {
    let (Some(first_dash), Some(last_dash)) = (token.find(DASH), token.rfind(DASH)) else {
        return Err(TokenError::Malformed("no dashes"));
    };
    if last_dash + 1 >= token.len() {
        return Err(TokenError::Malformed("no signature"));
    }
    if last_dash == 0 {
        return Err(TokenError::Malformed("no signed text"));
    }

    let signed = &token.as_bytes()[..last_dash - 1];
    let sig = decode_signature(&token[last_dash + 1..])?;
    if !signer::verify(signed, &sig, key) {
        debug!("token rejected: bad signature");
        return Err(TokenError::BadSignature);
    }

    let payload = ENGINE
        .decode(&token[..first_dash])
        .map_err(TokenError::PayloadDecode)?;
    let record: TokenRecord =
        serde_json::from_slice(&payload).map_err(TokenError::PayloadFormat)?;

    if record.expires_at < now {
        info!(
            expires = %rfc3339(record.expires_at),
            now = %rfc3339(now),
            "signature expired"
        );
        return Err(TokenError::Expired {
            expires_at: record.expires_at,
            now,
        });
    }

    Ok(record)
}

// Lowercase only: accepting 'A'-'F' would let a case-flipped signature verify.
fn decode_signature(sig: &str) -> Result<Vec<u8>, TokenError> {
    if let Some((index, c)) = sig
        .char_indices()
        .find(|&(_, c)| !matches!(c, '0'..='9' | 'a'..='f'))
    {
        return Err(TokenError::MalformedSignature(
            hex::FromHexError::InvalidHexCharacter { c, index },
        ));
    }
    hex::decode(sig).map_err(TokenError::MalformedSignature)
}

/// Re-mints `record`'s identity for another [`DEFAULT_DURATION_SECS`] from now.
pub fn refresh(record: &TokenRecord, key: &Secret) -> Result<String, TokenError> {
    refresh_at(record, key, Utc::now().timestamp())
}

pub fn refresh_at(record: &TokenRecord, key: &Secret, now: i64) -> Result<String, TokenError> {
    encode(
        &record.identity,
        now.saturating_add(DEFAULT_DURATION_SECS),
        key,
    )
}

fn rfc3339(secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| secs.to_string())
}

/// A secret key bundled with the validity window for newly minted tokens.
#[derive(Debug, Clone)]
pub struct Codec {
    secret: Secret,
    validity: ChronoDuration,
}

impl Codec {
    pub fn new(secret: impl Into<Secret>) -> Self {
        Self {
            secret: secret.into(),
            validity: ChronoDuration::seconds(DEFAULT_DURATION_SECS),
        }
    }

    pub fn with_validity(mut self, validity: ChronoDuration) -> Self {
        self.validity = validity;
        self
    }

    pub fn secret(&self) -> &Secret {
        &self.secret
    }

    pub fn validity(&self) -> ChronoDuration {
        self.validity
    }

    pub fn mint(&self, identity: &str) -> Result<String, TokenError> {
        self.mint_at(identity, Utc::now().timestamp())
    }

    pub fn mint_at(&self, identity: &str, now: i64) -> Result<String, TokenError> {
        encode(identity, self.expiry_from(now), &self.secret)
    }

    pub fn mint_until(&self, identity: &str, expires_at: i64) -> Result<String, TokenError> {
        encode(identity, expires_at, &self.secret)
    }

    pub fn parse(&self, token: &str) -> Result<TokenRecord, TokenError> {
        decode(token, &self.secret)
    }

    pub fn parse_at(&self, token: &str, now: i64) -> Result<TokenRecord, TokenError> {
        decode_at(token, &self.secret, now)
    }

    /// Like [`refresh`], but with this codec's validity window.
    pub fn refresh(&self, record: &TokenRecord) -> Result<String, TokenError> {
        self.refresh_at(record, Utc::now().timestamp())
    }

    pub fn refresh_at(&self, record: &TokenRecord, now: i64) -> Result<String, TokenError> {
        self.mint_at(&record.identity, now)
    }

    fn expiry_from(&self, now: i64) -> i64 {
        now.saturating_add(self.validity.num_seconds())
    }
}
