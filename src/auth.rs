//! Administrative gate
//!
//! Budget/category editing and project deletion are restricted to an
//! administrator. Verification is a pluggable capability; the shipped
//! implementation is a shared-secret equality check (no hashing, rate
//! limiting, or sessions — hardening is out of scope for this tool).

use crate::error::{LedgerError, LedgerResult};

/// A credential-verification capability
pub trait CredentialVerifier {
    /// Check a presented credential
    fn verify(&self, input: &str) -> bool;
}

/// Plain shared-secret comparison
#[derive(Debug, Clone)]
pub struct SharedSecret {
    secret: String,
}

impl SharedSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl CredentialVerifier for SharedSecret {
    fn verify(&self, input: &str) -> bool {
        input == self.secret
    }
}

/// Proof of a successful administrative check
///
/// Only this module can construct one, so state-layer operations that take a
/// token cannot be reached without passing the gate.
pub struct AdminToken(());

/// The gate guarding administrative operations
pub struct AdminGate {
    verifier: Box<dyn CredentialVerifier>,
}

impl AdminGate {
    /// Gate with a custom verifier
    pub fn new(verifier: impl CredentialVerifier + 'static) -> Self {
        Self {
            verifier: Box::new(verifier),
        }
    }

    /// Gate with the shared-secret verifier
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self::new(SharedSecret::new(secret))
    }

    /// Check a credential, yielding a token on success
    pub fn authorize(&self, input: &str) -> LedgerResult<AdminToken> {
        if self.verifier.verify(input) {
            Ok(AdminToken(()))
        } else {
            Err(LedgerError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_secret_equality() {
        let gate = AdminGate::with_secret("admin123");
        assert!(gate.authorize("admin123").is_ok());
        assert!(matches!(
            gate.authorize("wrong"),
            Err(LedgerError::Unauthorized)
        ));
        assert!(gate.authorize("").is_err());
    }

    #[test]
    fn test_custom_verifier() {
        struct AlwaysYes;
        impl CredentialVerifier for AlwaysYes {
            fn verify(&self, _input: &str) -> bool {
                true
            }
        }

        let gate = AdminGate::new(AlwaysYes);
        assert!(gate.authorize("anything").is_ok());
    }
}
