//! Session cookie configuration.

use std::fmt;

use axum_extra::extract::cookie::Key;

/// Cookie name used when none is configured.
pub const DEFAULT_SESSION_COOKIE_NAME: &str = "sid";

/// Minimum length of the cookie signing secret, in bytes.
pub const MIN_COOKIE_SECRET_LEN: usize = 64;

/// Errors building a [`SessionConfig`].
#[derive(Debug, thiserror::Error)]
pub enum SessionConfigError {
    #[error("session cookie name must not be empty")]
    EmptyCookieName,
    #[error("cookie secret must be at least {MIN_COOKIE_SECRET_LEN} bytes, got {len}")]
    SecretTooShort { len: usize },
}

/// Where the storefront session identifier lives and how its cookie is
/// verified.
#[derive(Clone)]
pub struct SessionConfig {
    /// Name of the signed cookie carrying the session identifier.
    pub cookie_name: String,
    /// Key used to verify cookie signatures.
    pub key: Key,
}

impl SessionConfig {
    /// Builds a configuration from a cookie name and a raw signing secret.
    ///
    /// # Errors
    ///
    /// Returns an error if the cookie name is empty or the secret is shorter
    /// than [`MIN_COOKIE_SECRET_LEN`] bytes.
    pub fn from_secret(
        cookie_name: impl Into<String>,
        secret: &[u8],
    ) -> Result<Self, SessionConfigError> {
        let cookie_name = cookie_name.into();
        if cookie_name.is_empty() {
            return Err(SessionConfigError::EmptyCookieName);
        }
        if secret.len() < MIN_COOKIE_SECRET_LEN {
            return Err(SessionConfigError::SecretTooShort { len: secret.len() });
        }

        Ok(Self {
            cookie_name,
            key: Key::from(secret),
        })
    }
}

impl Default for SessionConfig {
    /// Default cookie name with a freshly generated key. Cookies signed by a
    /// previous process will not verify.
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_SESSION_COOKIE_NAME.to_string(),
            key: Key::generate(),
        }
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("cookie_name", &self.cookie_name)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_sid_cookie() {
        let config = SessionConfig::default();
        assert_eq!(config.cookie_name, "sid");
    }

    #[test]
    fn from_secret_accepts_long_secret() {
        let secret = [7u8; 64];
        let config = SessionConfig::from_secret("asid", &secret).unwrap();
        assert_eq!(config.cookie_name, "asid");
    }

    #[test]
    fn from_secret_rejects_short_secret() {
        let err = SessionConfig::from_secret("sid", b"too short").unwrap_err();
        assert!(matches!(err, SessionConfigError::SecretTooShort { len: 9 }));
    }

    #[test]
    fn from_secret_rejects_empty_name() {
        let secret = [7u8; 64];
        let err = SessionConfig::from_secret("", &secret).unwrap_err();
        assert!(matches!(err, SessionConfigError::EmptyCookieName));
    }

    #[test]
    fn debug_hides_key() {
        let printed = format!("{:?}", SessionConfig::default());
        assert!(printed.contains("[REDACTED]"));
        assert!(printed.contains("sid"));
    }
}
