//! Salted password hashing for stored credentials.
//!
//! Digests are bcrypt strings (`$2b$<cost>$<salt><hash>`), so the salt and
//! cost factor travel with the digest and nothing else needs to be stored.

use std::fmt;
use std::str::FromStr;

use bcrypt::BcryptError;
use tracing::debug;
use userdata_common::{Error, Result};

/// Cost factor used when none is given.
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

/// A self-describing password digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest(String);

impl Digest {
    /// The encoded digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Cost factor encoded in the digest, if it can be read.
    pub fn cost(&self) -> Option<u32> {
        self.0.split('$').nth(2)?.parse().ok()
    }
}

impl From<String> for Digest {
    fn from(s: String) -> Self {
        Digest(s)
    }
}

impl FromStr for Digest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Digest(s.trim().to_string()))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hashes and verifies passwords with bcrypt.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a hasher using the library default cost.
    pub fn new() -> Self {
        Self::with_cost(DEFAULT_COST)
    }

    /// Create a hasher with an explicit cost factor (4..=31).
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password with a freshly generated salt.
    pub fn hash(&self, password: &str) -> Result<Digest> {
        let digest = bcrypt::hash(password, self.cost).map_err(|e| match e {
            BcryptError::CostNotAllowed(cost) => {
                Error::Hashing(format!("cost {} is outside 4..=31", cost))
            }
            other => Error::Hashing(other.to_string()),
        })?;
        debug!("Hashed password with cost {}", self.cost);
        Ok(Digest(digest))
    }

    /// Check a password against a digest.
    ///
    /// A wrong password yields `Ok(false)`. A digest that cannot be parsed
    /// yields `Error::MalformedDigest`.
    pub fn verify(&self, digest: &Digest, password: &str) -> Result<bool> {
        bcrypt::verify(password, digest.as_str()).map_err(|e| match e {
            BcryptError::InvalidHash(_)
            | BcryptError::InvalidPrefix(_)
            | BcryptError::InvalidCost(_)
            | BcryptError::CostNotAllowed(_)
            | BcryptError::InvalidSaltLen(_)
            | BcryptError::InvalidBase64(_) => Error::MalformedDigest(e.to_string()),
            other => Error::Hashing(other.to_string()),
        })
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash a password at the default cost.
pub fn hash_password(password: &str) -> Result<Digest> {
    PasswordHasher::new().hash(password)
}

/// Check a password against a previously produced digest.
pub fn is_valid(digest: &Digest, password: &str) -> Result<bool> {
    PasswordHasher::new().verify(digest, password)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::with_cost(4)
    }

    #[test]
    fn test_hash_then_verify() {
        let hasher = hasher();
        let digest = hasher.hash("MyAmazingPassw0rd").unwrap();
        assert!(hasher.verify(&digest, "MyAmazingPassw0rd").unwrap());
    }

    #[test]
    fn test_wrong_password_is_false() {
        let hasher = hasher();
        let digest = hasher.hash("correct horse").unwrap();
        assert!(!hasher.verify(&digest, "battery staple").unwrap());
        assert!(!hasher.verify(&digest, "").unwrap());
    }

    #[test]
    fn test_fresh_salt_per_hash() {
        let hasher = hasher();
        let first = hasher.hash("same input").unwrap();
        let second = hasher.hash("same input").unwrap();
        assert_ne!(first, second);
        assert!(hasher.verify(&first, "same input").unwrap());
        assert!(hasher.verify(&second, "same input").unwrap());
    }

    #[test]
    fn test_digest_embeds_cost() {
        let digest = hasher().hash("pw").unwrap();
        assert!(digest.as_str().starts_with("$2"));
        assert_eq!(digest.cost(), Some(4));
        assert_eq!(digest.as_bytes().len(), 60);
    }

    #[test]
    fn test_malformed_digest_is_error() {
        let digest: Digest = "not-a-bcrypt-digest".parse().unwrap();
        let err = hasher().verify(&digest, "pw").unwrap_err();
        assert!(matches!(err, Error::MalformedDigest(_)));
    }

    #[test]
    fn test_out_of_range_cost_in_digest_is_malformed() {
        let digest = hasher().hash("pw").unwrap();
        let tampered: Digest = digest.as_str().replacen("$04$", "$99$", 1).parse().unwrap();
        let err = hasher().verify(&tampered, "pw").unwrap_err();
        assert!(matches!(err, Error::MalformedDigest(_)));
    }

    #[test]
    fn test_verify_uses_cost_from_digest() {
        let digest = PasswordHasher::with_cost(5).hash("pw").unwrap();
        assert!(hasher().verify(&digest, "pw").unwrap());
    }

    #[test]
    fn test_cost_out_of_range() {
        let err = PasswordHasher::with_cost(2).hash("pw").unwrap_err();
        assert!(matches!(err, Error::Hashing(_)));
    }

    #[test]
    fn test_default_cost_helpers() {
        let digest = hash_password("default path").unwrap();
        assert_eq!(digest.cost(), Some(DEFAULT_COST));
        assert!(is_valid(&digest, "default path").unwrap());
    }
}
