//! Client-held session state.
//!
//! The session is a small key→value bag serialized to JSON and sealed
//! into the `__session` cookie with AES-256-GCM (random 12-byte nonce
//! prepended to the ciphertext, base64-encoded). The cookie is the only
//! session store: there is no server-side session table to coordinate,
//! at the cost of careful sealing and a payload well under the 4 KiB
//! cookie ceiling.
//!
//! Decoding is fail-soft. An absent, malformed, or tampered cookie
//! decodes to the empty session, which the access gate treats as the
//! unauthenticated state.

use std::collections::BTreeMap;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Cookie name carrying the sealed session bag.
pub const SESSION_COOKIE: &str = "__session";

/// Session key holding the authenticated login id.
pub const USER_ID_KEY: &str = "userId";

/// Nonce size for AES-256-GCM (12 bytes).
const NONCE_SIZE: usize = 12;
/// AES-256 key size (32 bytes).
const KEY_SIZE: usize = 32;
/// GCM tag size (16 bytes).
const TAG_SIZE: usize = 16;

/// Session sealing errors. Only encoding can fail; decoding is fail-soft.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session encode failed: {0}")]
    Encode(String),
}

/// In-memory session bag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
    values: BTreeMap<String, Value>,
}

impl Session {
    /// An empty session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The identity key, if present.
    ///
    /// The bag is JSON, so the id may arrive as an integer or as a
    /// numeric string; both are accepted.
    pub fn user_id(&self) -> Option<i64> {
        match self.values.get(USER_ID_KEY)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Store the identity key.
    pub fn set_user_id(&mut self, login_id: i64) {
        self.insert(USER_ID_KEY, Value::from(login_id));
    }
}

/// Seals and opens session bags with a key derived from the signing
/// secret.
#[derive(Clone)]
pub struct SessionCodec {
    key: [u8; KEY_SIZE],
}

impl SessionCodec {
    /// Derive the sealing key from the configured secret with SHA-256.
    pub fn new(secret: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(secret.as_bytes());
        let digest = hasher.finalize();
        let mut key = [0u8; KEY_SIZE];
        key.copy_from_slice(&digest);
        Self { key }
    }

    /// Seal a session bag into a cookie value.
    pub fn encode(&self, session: &Session) -> Result<String, SessionError> {
        let plaintext = serde_json::to_vec(session)
            .map_err(|e| SessionError::Encode(format!("serialize: {e}")))?;
        self.seal(&plaintext)
    }

    /// Open a cookie value into a session bag. Fail-soft: `None`, bad
    /// base64, truncated payloads, a wrong key, tampering, and non-object
    /// plaintext all yield the empty session.
    pub fn decode(&self, cookie_value: Option<&str>) -> Session {
        cookie_value
            .and_then(|value| self.open(value))
            .unwrap_or_default()
    }

    /// Encrypt plaintext, returning base64 of `nonce || ciphertext || tag`.
    fn seal(&self, plaintext: &[u8]) -> Result<String, SessionError> {
        use aes_gcm::aead::Aead;
        use aes_gcm::{Aes256Gcm, KeyInit, Nonce};

        let cipher = Aes256Gcm::new_from_slice(&self.key)
            .map_err(|e| SessionError::Encode(format!("key init: {e}")))?;

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        rand::rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext)
            .map_err(|e| SessionError::Encode(format!("encrypt: {e}")))?;

        let mut combined = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        combined.extend_from_slice(&nonce_bytes);
        combined.extend_from_slice(&ciphertext);

        use base64::Engine;
        Ok(base64::engine::general_purpose::STANDARD.encode(&combined))
    }

    /// Decrypt and deserialize a cookie value, or `None` on any failure.
    fn open(&self, cookie_value: &str) -> Option<Session> {
        use aes_gcm::aead::Aead;
        use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
        use base64::Engine;

        let combined = base64::engine::general_purpose::STANDARD
            .decode(cookie_value)
            .ok()?;
        if combined.len() < NONCE_SIZE + TAG_SIZE {
            return None;
        }

        let cipher = Aes256Gcm::new_from_slice(&self.key).ok()?;
        let nonce = Nonce::from_slice(&combined[..NONCE_SIZE]);
        let plaintext = cipher.decrypt(nonce, &combined[NONCE_SIZE..]).ok()?;

        // A non-object plaintext is not a session bag.
        serde_json::from_slice::<Session>(&plaintext).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> SessionCodec {
        SessionCodec::new("test-session-secret")
    }

    #[test]
    fn seal_open_round_trip() {
        let mut session = Session::new();
        session.set_user_id(42);
        session.insert("flash", Value::from("welcome"));

        let sealed = codec().encode(&session).unwrap();
        let opened = codec().decode(Some(&sealed));

        assert_eq!(opened, session);
        assert_eq!(opened.user_id(), Some(42));
    }

    #[test]
    fn absent_cookie_is_empty_session() {
        let session = codec().decode(None);
        assert!(session.is_empty());
        assert_eq!(session.user_id(), None);
    }

    #[test]
    fn wrong_secret_is_empty_session() {
        let mut session = Session::new();
        session.set_user_id(7);
        let sealed = codec().encode(&session).unwrap();

        let other = SessionCodec::new("a-different-secret");
        assert!(other.decode(Some(&sealed)).is_empty());
    }

    #[test]
    fn tampered_payload_is_empty_session() {
        let mut session = Session::new();
        session.set_user_id(7);
        let sealed = codec().encode(&session).unwrap();

        use base64::Engine;
        let mut raw = base64::engine::general_purpose::STANDARD
            .decode(&sealed)
            .unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0x01;
        let tampered = base64::engine::general_purpose::STANDARD.encode(&raw);

        assert!(codec().decode(Some(&tampered)).is_empty());
    }

    #[test]
    fn garbage_values_are_empty_sessions() {
        let c = codec();
        assert!(c.decode(Some("not base64 at all!!")).is_empty());
        assert!(c.decode(Some("")).is_empty());
        // Valid base64 but shorter than nonce + tag.
        assert!(c.decode(Some("AAAA")).is_empty());
    }

    #[test]
    fn non_object_plaintext_is_empty_session() {
        let sealed = codec().seal(b"[1,2,3]").unwrap();
        assert!(codec().decode(Some(&sealed)).is_empty());
    }

    #[test]
    fn user_id_accepts_integer_and_numeric_string() {
        let mut session = Session::new();
        session.insert(USER_ID_KEY, Value::from(42));
        assert_eq!(session.user_id(), Some(42));

        session.insert(USER_ID_KEY, Value::from("42"));
        assert_eq!(session.user_id(), Some(42));

        session.insert(USER_ID_KEY, Value::from("not-a-number"));
        assert_eq!(session.user_id(), None);

        session.insert(USER_ID_KEY, Value::Bool(true));
        assert_eq!(session.user_id(), None);
    }
}
