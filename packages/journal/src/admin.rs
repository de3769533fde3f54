//! # Admin gate: showing or hiding the write affordances
//!
//! The gate is a single boolean toggled by a password prompt. It only decides what the
//! UI shows; whatever the backend allows is enforced (or not) by the backend itself.
//!
//! How a candidate password is checked is pluggable through [`CredentialCheck`]:
//!
//! | Check | Compares against |
//! |-------|------------------|
//! | [`SharedSecret`] | a plaintext secret, exact string equality |
//! | [`HashedSecret`] | an Argon2id PHC string, so a client bundle never carries the plaintext |
//! | [`Locked`] | nothing; every attempt is rejected |
//!
//! [`hash_secret`] produces the PHC string to put in `JOURNAL_ADMIN_SECRET_HASH`.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use crate::error::AdminError;

/// Decides whether a candidate password unlocks admin mode.
pub trait CredentialCheck {
    fn verify(&self, candidate: &str) -> Result<bool, AdminError>;
}

/// Exact comparison with a configured secret.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SharedSecret(String);

impl SharedSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }
}

impl CredentialCheck for SharedSecret {
    fn verify(&self, candidate: &str) -> Result<bool, AdminError> {
        Ok(candidate == self.0)
    }
}

/// Argon2id verification against a PHC-format hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashedSecret(String);

impl HashedSecret {
    /// Wrap a PHC string, rejecting one that does not parse.
    pub fn new(phc: impl Into<String>) -> Result<Self, AdminError> {
        let phc = phc.into();
        PasswordHash::new(&phc).map_err(|e| AdminError::InvalidHash(e.to_string()))?;
        Ok(Self(phc))
    }
}

impl CredentialCheck for HashedSecret {
    fn verify(&self, candidate: &str) -> Result<bool, AdminError> {
        let parsed =
            PasswordHash::new(&self.0).map_err(|e| AdminError::InvalidHash(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok())
    }
}

/// No secret configured: the journal is read-only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Locked;

impl CredentialCheck for Locked {
    fn verify(&self, _candidate: &str) -> Result<bool, AdminError> {
        Ok(false)
    }
}

/// Whichever check the configuration selected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnyCredential {
    Shared(SharedSecret),
    Hashed(HashedSecret),
    Locked(Locked),
}

impl CredentialCheck for AnyCredential {
    fn verify(&self, candidate: &str) -> Result<bool, AdminError> {
        match self {
            Self::Shared(check) => check.verify(candidate),
            Self::Hashed(check) => check.verify(candidate),
            Self::Locked(check) => check.verify(candidate),
        }
    }
}

/// Hash a secret using Argon2id. Returns a PHC-format string.
pub fn hash_secret(secret: &str) -> Result<String, AdminError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| AdminError::Hashing(e.to_string()))?;
    Ok(hash.to_string())
}

/// Result of one press of the admin toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateOutcome {
    /// Correct password; write affordances are now visible.
    Enabled,
    /// Admin mode was on and has been switched off.
    Disabled,
    /// Wrong password. Nothing changed, but the user should be told.
    Rejected,
    /// Prompt cancelled or left empty. Nothing changed.
    Unchanged,
}

/// The admin flag plus the check that guards it.
#[derive(Clone, Debug)]
pub struct AdminGate<C> {
    check: C,
    active: bool,
}

impl<C: CredentialCheck> AdminGate<C> {
    pub fn new(check: C) -> Self {
        Self {
            check,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether pressing the toggle now needs a password.
    pub fn needs_prompt(&self) -> bool {
        !self.active
    }

    /// Press the toggle. `response` is what the prompt returned, `None` if cancelled.
    ///
    /// When admin mode is on the response is ignored and admin mode turns off.
    pub fn toggle(&mut self, response: Option<&str>) -> GateOutcome {
        if self.active {
            self.active = false;
            return GateOutcome::Disabled;
        }
        let Some(candidate) = response.filter(|r| !r.is_empty()) else {
            return GateOutcome::Unchanged;
        };
        match self.check.verify(candidate) {
            Ok(true) => {
                self.active = true;
                tracing::info!("admin mode enabled");
                GateOutcome::Enabled
            }
            Ok(false) => {
                tracing::warn!("admin password rejected");
                GateOutcome::Rejected
            }
            Err(e) => {
                tracing::error!("admin check failed: {e}");
                GateOutcome::Rejected
            }
        }
    }
}
