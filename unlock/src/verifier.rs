//! Credential verification boundary.

use async_trait::async_trait;

use crate::error::Result;

/// External credential check the guard calls out to and awaits.
///
/// The guard treats implementations as a black box: an identity provider, a
/// password hash lookup, a directory bind. Nothing about the verification
/// mechanism leaks into the guard's state machine.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Verifies the current operator's credentials.
    ///
    /// Returns `Ok(())` on success, [`crate::UnlockError::InvalidCredentials`]
    /// when the backend rejects the pair, and
    /// [`crate::UnlockError::Verification`] when the backend itself fails.
    async fn reauthenticate(&self, identity: &str, secret: &str) -> Result<()>;
}
