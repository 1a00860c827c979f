//! Reasoning-service credentials

use std::fmt;

/// An API credential with a human-readable label
///
/// The secret never appears in `Debug` or `Display` output, so credentials
/// can be logged safely by label.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    label: String,
    secret: String,
}

impl Credential {
    /// Create a new credential
    ///
    /// # Examples
    ///
    /// ```
    /// use canon_domain::Credential;
    ///
    /// let key = Credential::new("primary", "sk-123");
    /// assert_eq!(key.label(), "primary");
    /// assert_eq!(key.secret(), "sk-123");
    /// assert!(!format!("{:?}", key).contains("sk-123"));
    /// ```
    pub fn new(label: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            secret: secret.into(),
        }
    }

    /// Label used in logs
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The secret value sent to the service
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("label", &self.label)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}
