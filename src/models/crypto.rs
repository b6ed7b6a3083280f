// Cryptographic utility functions and data types

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::{rngs::OsRng, RngCore};
use ring::{constant_time::verify_slices_are_equal, hmac};
use sha2::{Digest, Sha256, Sha512};
use std::fmt;

// Bound on the nonce-derived offset folded into the signed timestamp (1 hour)
pub const NONCE_OFFSET_MODULUS: u64 = 3_600_000;

// Number of leading nonce hex chars parsed into the timestamp offset
const NONCE_OFFSET_DIGITS: usize = 8;

// Number of hex chars of the User-Agent hash bound into the derivation context
const USER_AGENT_HASH_LEN: usize = 16;

// Process-wide signing secret. Only lives in memory, has no Serialize impl
// and its Debug output is redacted.
pub struct MasterSecret(Vec<u8>);

// Session scoped key handed to the client with its challenge
// Flow:
//
//   sessionId:nonce:timestamp:uaHash -> |HMAC-SHA256| -> hex -> Derived Key
//                                              ^
//                                              |
//                                        as signing key
//                                              |
//                                        Master Secret
#[derive(Clone, PartialEq, Eq)]
pub struct DerivedKey(String);

impl MasterSecret {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(secret.into())
    }

    pub fn from_str(secret: &str) -> Self {
        Self::new(secret.as_bytes())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn hmac_key(&self) -> hmac::Key {
        hmac::Key::new(hmac::HMAC_SHA256, &self.0)
    }
}

impl fmt::Debug for MasterSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterSecret(<redacted>)")
    }
}

impl DerivedKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for DerivedKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey(<redacted>)")
    }
}

// Hex string of `len` random bytes from the OS RNG
pub fn random_hex(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

// First 16 hex chars of SHA256(user agent)
fn user_agent_hash(user_agent: &str) -> String {
    let digest = Sha256::digest(user_agent.as_bytes());
    let mut encoded = hex::encode(digest);
    encoded.truncate(USER_AGENT_HASH_LEN);
    encoded
}

/// Derives the per-session key.
///
/// The session id is a direct input of the HMAC message, so two sessions
/// never share a key even when their nonce and timestamp collide.
pub fn derive_key(
    master: &MasterSecret,
    session_id: &str,
    nonce: &str,
    timestamp: i64,
    user_agent: &str,
) -> DerivedKey {
    let context = format!(
        "{}:{}:{}:{}",
        session_id,
        nonce,
        timestamp,
        user_agent_hash(user_agent)
    );
    let tag = hmac::sign(&master.hmac_key(), context.as_bytes());
    DerivedKey(hex::encode(tag.as_ref()))
}

// Offset folded into the signed timestamp: first 8 hex chars of the nonce
// mod one hour. `None` when the nonce is too short or not hex.
pub fn nonce_offset(nonce: &str) -> Option<u64> {
    let prefix = nonce.get(..NONCE_OFFSET_DIGITS)?;
    let value = u64::from_str_radix(prefix, 16).ok()?;
    Some(value % NONCE_OFFSET_MODULUS)
}

pub fn complex_timestamp(timestamp: i64, nonce: &str) -> Option<i64> {
    let offset = nonce_offset(nonce)?;
    timestamp.checked_add(offset as i64)
}

// Creates the request signature
// Flow:
// 1. Fold nonce entropy into the timestamp
// 2. Concatenate: derived key + source + complex timestamp + nonce
// 3. SHA512 the payload
// 4. Encode in URL-safe base64 without padding
pub fn compute_signature(
    derived_key: &str,
    source: &str,
    timestamp: i64,
    nonce: &str,
) -> Option<String> {
    let complex_timestamp = complex_timestamp(timestamp, nonce)?;
    let payload = format!("{}{}{}{}", derived_key, source, complex_timestamp, nonce);
    let digest = Sha512::digest(payload.as_bytes());
    Some(URL_SAFE_NO_PAD.encode(digest))
}

// Constant-time string equality, prevents timing attacks on signatures
pub fn verify_eq(a: &str, b: &str) -> bool {
    verify_slices_are_equal(a.as_bytes(), b.as_bytes()).is_ok()
}
