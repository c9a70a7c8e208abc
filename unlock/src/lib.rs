//! Time-boxed re-authentication gate for the permission editor.
//!
//! Sensitive settings (the permission matrix among them) sit behind an
//! [`UnlockGuard`]: the operator re-enters their credentials, the guard
//! verifies them against an injected [`CredentialVerifier`], and on success
//! opens a fixed-duration unlock session. The session ends when the
//! countdown expires or the operator re-locks manually; both paths cancel
//! the pending timer so a lock event never fires twice.
//!
//! The guard is process-local and never persisted. Only content gated by
//! the guard is affected; the rest of the application ignores its state.
//!
//! Remaining time is always recomputed from the recorded expiry instant, so
//! a delayed tick cannot drift the display, and [`UnlockGuard::is_unlocked`]
//! cannot report a stale session even if the timer task has not run yet.
//!
//! Repeated failed re-authentication attempts are not rate limited here;
//! lockout policy, if wanted, belongs to the identity backend.

pub mod error;
pub mod verifier;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

pub use error::{Result, UnlockError};
pub use verifier::CredentialVerifier;

/// Unlock session configuration.
#[derive(Debug, Clone, Copy)]
pub struct UnlockConfig {
    /// How long one successful re-authentication keeps the editor open.
    pub session_duration: Duration,
}

impl Default for UnlockConfig {
    fn default() -> Self {
        Self {
            session_duration: Duration::from_secs(15 * 60),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnlockState {
    Locked,
    Unlocked { expires_at: Instant },
}

/// Re-authentication gate with an auto-expiring unlock session.
///
/// One guard instance exists per mounted editor; dropping it cancels any
/// pending auto-lock timer.
pub struct UnlockGuard {
    verifier: Arc<dyn CredentialVerifier>,
    config: UnlockConfig,
    state: Arc<Mutex<UnlockState>>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl UnlockGuard {
    /// Creates a guard in the Locked state.
    pub fn new(verifier: Arc<dyn CredentialVerifier>, config: UnlockConfig) -> Self {
        Self {
            verifier,
            config,
            state: Arc::new(Mutex::new(UnlockState::Locked)),
            timer: Mutex::new(None),
        }
    }

    /// Re-authenticates and, on success, opens an unlock session.
    ///
    /// On failure the guard stays Locked and the verifier's typed reason is
    /// returned. Calling this while already Unlocked restarts the session
    /// from now.
    pub async fn unlock(&self, identity: &str, secret: &str) -> Result<()> {
        if let Err(err) = self.verifier.reauthenticate(identity, secret).await {
            warn!(identity, "re-authentication failed: {}", err);
            return Err(err);
        }

        let expires_at = Instant::now() + self.config.session_duration;
        *self.state() = UnlockState::Unlocked { expires_at };
        self.restart_timer(expires_at);

        info!(
            identity,
            duration_secs = self.config.session_duration.as_secs(),
            "settings unlocked"
        );
        Ok(())
    }

    /// Manually ends the unlock session.
    pub fn relock(&self) {
        self.cancel_timer();
        let mut state = self.state();
        if *state != UnlockState::Locked {
            *state = UnlockState::Locked;
            info!("settings re-locked manually");
        }
    }

    /// Returns `true` while an unexpired unlock session is active.
    pub fn is_unlocked(&self) -> bool {
        match *self.state() {
            UnlockState::Unlocked { expires_at } => Instant::now() < expires_at,
            UnlockState::Locked => false,
        }
    }

    /// Remaining session time, `None` when locked or already expired.
    pub fn time_left(&self) -> Option<Duration> {
        match *self.state() {
            UnlockState::Unlocked { expires_at } => {
                let now = Instant::now();
                (now < expires_at).then(|| expires_at - now)
            }
            UnlockState::Locked => None,
        }
    }

    fn state(&self) -> MutexGuard<'_, UnlockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn restart_timer(&self, expires_at: Instant) {
        self.cancel_timer();

        let state = Arc::clone(&self.state);
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(expires_at).await;
            let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
            // Only lock the session this timer was armed for; a manual
            // relock or a newer unlock already superseded it otherwise.
            if *state == (UnlockState::Unlocked { expires_at }) {
                *state = UnlockState::Locked;
                info!("unlock session expired, settings re-locked");
            }
        });

        let mut timer = self
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *timer = Some(handle);
        debug!("auto-lock timer armed");
    }

    fn cancel_timer(&self) {
        let mut timer = self
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = timer.take() {
            handle.abort();
            debug!("auto-lock timer canceled");
        }
    }
}

impl Drop for UnlockGuard {
    fn drop(&mut self) {
        // The editor is gone; nothing may fire after teardown.
        self.cancel_timer();
    }
}
