//! Secret-code credential primitives for the Grumble backend.
//!
//! A [`SecretCode`] is the bearer credential handed to a user at
//! registration: a random alphanumeric string drawn from the operating
//! system's CSPRNG. The plaintext must survive long enough to be echoed
//! back to its owner, so the wrapper zeroises its buffer on drop and
//! redacts itself from `Debug` output.
//!
//! Lookup and verification never compare plaintext. Callers derive a
//! [`CodeFingerprint`] (hex-encoded SHA-256 of the code) and compare
//! digests instead; a timing side channel on the digest comparison leaks
//! at most a hash prefix, never usable plaintext structure.

use std::fmt;

use rand::Rng;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

/// Number of characters in a freshly generated secret code.
pub const SECRET_CODE_LEN: usize = 24;

/// Validation errors returned when constructing a [`SecretCode`] from
/// caller-supplied input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SecretCodeError {
    /// Code is empty after trimming whitespace.
    #[error("secret code must not be empty")]
    Empty,
    /// Code contains leading or trailing whitespace.
    #[error("secret code must not contain surrounding whitespace")]
    Padded,
}

/// Opaque bearer credential identifying a registered user.
///
/// ## Invariants
/// - Non-empty and free of surrounding whitespace.
/// - The plaintext is zeroised when the value is dropped.
///
/// # Examples
/// ```
/// use credentials::{SECRET_CODE_LEN, SecretCode};
///
/// let code = SecretCode::generate();
/// assert_eq!(code.as_str().len(), SECRET_CODE_LEN);
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SecretCode(String);

impl SecretCode {
    /// Draw a fresh code from the OS CSPRNG.
    ///
    /// Samples [`SECRET_CODE_LEN`] characters uniformly from the
    /// 62-character alphanumeric alphabet. `OsRng` needs no seeding or
    /// reseeding between calls.
    #[must_use]
    pub fn generate() -> Self {
        let raw: String = OsRng
            .sample_iter(&Alphanumeric)
            .take(SECRET_CODE_LEN)
            .map(char::from)
            .collect();
        Self(raw)
    }

    /// Validate and construct a code from caller-supplied input.
    ///
    /// # Errors
    /// Returns [`SecretCodeError`] when the input is empty or padded with
    /// whitespace.
    pub fn new(code: impl Into<String>) -> Result<Self, SecretCodeError> {
        let raw = code.into();
        if raw.trim().is_empty() {
            return Err(SecretCodeError::Empty);
        }
        if raw.trim() != raw {
            return Err(SecretCodeError::Padded);
        }
        Ok(Self(raw))
    }

    /// Borrow the plaintext code.
    ///
    /// Needed where the code is echoed back to its owner; everything else
    /// should work with [`SecretCode::fingerprint`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Derive the SHA-256 fingerprint used for lookup and verification.
    #[must_use]
    pub fn fingerprint(&self) -> CodeFingerprint {
        CodeFingerprint::digest(self.0.as_str())
    }
}

impl Drop for SecretCode {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for SecretCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never reveal the plaintext through derived logging.
        f.write_str("SecretCode(..)")
    }
}

impl TryFrom<String> for SecretCode {
    type Error = SecretCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SecretCode> for String {
    fn from(mut value: SecretCode) -> Self {
        // Leaves an empty buffer behind for the zeroising drop.
        std::mem::take(&mut value.0)
    }
}

/// Hex-encoded SHA-256 digest of a [`SecretCode`].
///
/// Fingerprints are safe to index, log, and compare. Equality operates on
/// fixed-length digests of the secret rather than the secret itself.
///
/// # Examples
/// ```
/// use credentials::SecretCode;
///
/// let code = SecretCode::generate();
/// let fingerprint = code.fingerprint();
/// assert!(fingerprint.matches(&code));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodeFingerprint(String);

impl CodeFingerprint {
    /// Digest arbitrary input into a fingerprint.
    #[must_use]
    pub fn digest(value: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(value.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Borrow the lowercase hex digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Check whether a candidate code digests to this fingerprint.
    #[must_use]
    pub fn matches(&self, code: &SecretCode) -> bool {
        Self::digest(code.as_str()) == *self
    }
}

impl fmt::Display for CodeFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
