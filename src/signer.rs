// src/signer.rs
use hmac::{Hmac, Mac};
use sha1::Sha1;
use std::fmt;

// SHA-1 is fixed by the existing cookie verifiers; switching hashes breaks the wire format.
type HmacSha1 = Hmac<Sha1>;

/// Tag length in bytes (SHA-1 output).
pub const TAG_LEN: usize = 20;

/// Secret key used to sign and verify tokens.
///
/// Loaded once by the caller and passed explicitly to every codec call.
/// `Debug` never prints the key bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Vec<u8>);

impl Secret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret(<{} bytes redacted>)", self.0.len())
    }
}

impl From<&str> for Secret {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Self {
        Self::new(s.into_bytes())
    }
}

impl From<Vec<u8>> for Secret {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

fn keyed(key: &Secret) -> HmacSha1 {
    // HMAC hashes long keys and zero-pads short ones; no length is rejected.
    HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts keys of any length")
}

/// HMAC-SHA1 tag over `message`.
pub fn sign(message: &[u8], key: &Secret) -> Vec<u8> {
    let mut mac = keyed(key);
    mac.update(message);
    mac.finalize().into_bytes().to_vec()
}

/// Checks `tag` against the HMAC of `message` in constant time.
pub fn verify(message: &[u8], tag: &[u8], key: &Secret) -> bool {
    let mut mac = keyed(key);
    mac.update(message);
    mac.verify_slice(tag).is_ok()
}
