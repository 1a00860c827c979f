//! Run-wide credential failover
//!
//! The pool starts on the primary credential. Rotation switches to the
//! secondary for the rest of the run and is never undone, so every caller
//! holding the pool sees the switch.

use canon_domain::Credential;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

/// Primary and optional secondary credential with one active at a time
#[derive(Debug)]
pub struct CredentialPool {
    primary: Credential,
    secondary: Option<Credential>,
    rotated: AtomicBool,
}

impl CredentialPool {
    /// Create a pool that starts on `primary`
    ///
    /// # Examples
    ///
    /// ```
    /// use canon_domain::Credential;
    /// use canon_llm::CredentialPool;
    ///
    /// let pool = CredentialPool::new(
    ///     Credential::new("primary", "sk-1"),
    ///     Some(Credential::new("secondary", "sk-2")),
    /// );
    /// assert_eq!(pool.active().label(), "primary");
    /// assert!(pool.rotate());
    /// assert_eq!(pool.active().label(), "secondary");
    /// ```
    pub fn new(primary: Credential, secondary: Option<Credential>) -> Self {
        Self {
            primary,
            secondary,
            rotated: AtomicBool::new(false),
        }
    }

    /// Pool with only a primary credential
    pub fn single(primary: Credential) -> Self {
        Self::new(primary, None)
    }

    /// The credential calls should use now
    pub fn active(&self) -> Credential {
        match &self.secondary {
            Some(secondary) if self.rotated.load(Ordering::Acquire) => secondary.clone(),
            _ => self.primary.clone(),
        }
    }

    /// Whether a secondary credential is configured
    pub fn has_secondary(&self) -> bool {
        self.secondary.is_some()
    }

    /// Switch to the secondary credential
    ///
    /// Returns `false` when no secondary is configured. Rotating again after
    /// a switch is a no-op that still returns `true`.
    pub fn rotate(&self) -> bool {
        let Some(secondary) = &self.secondary else {
            warn!("No secondary credential configured, staying on {}", self.primary);
            return false;
        };
        if !self.rotated.swap(true, Ordering::AcqRel) {
            info!("Switching reasoning-service credential to {}", secondary);
        }
        true
    }
}
