//! Secure credential handling using the secrecy crate
//!
//! The NerdGraph API key is held in a [`SecretString`]: it is zeroed on
//! drop, redacted from `Debug` output, and only readable through
//! `expose_secret()`.
//!
//! # Example
//!
//! ```rust
//! use secrecy::ExposeSecret;
//! use tfsynth::config::secret_string;
//!
//! let api_key = secret_string("NRAK-EXAMPLE".to_string());
//! assert_eq!(api_key.expose_secret().as_ref(), "NRAK-EXAMPLE");
//! assert!(!format!("{api_key:?}").contains("NRAK-EXAMPLE"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret};
use serde::{Deserialize, Deserializer};
use zeroize::Zeroize;

/// String wrapper implementing the marker traits [`Secret`] needs
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl SecretValue {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Short, non-sensitive hint for diagnostics, e.g. `NRAK-****`
    pub fn masked(&self) -> String {
        match self.0.split_once('-') {
            Some((prefix, _)) if !prefix.is_empty() && prefix.len() <= 4 => format!("{prefix}-****"),
            _ => "****".to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// A secret string, zeroed on drop and redacted in `Debug`
pub type SecretString = Secret<SecretValue>;

/// Wrap a `String` as a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_secret_string_creation() {
        let secret = secret_string("NRAK-123".to_string());
        assert_eq!(secret.expose_secret(), "NRAK-123");
        assert!(!secret.expose_secret().is_empty());
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("NRAK-sensitive".to_string());
        let debug_output = format!("{secret:?}");

        assert!(!debug_output.contains("sensitive"));
        assert!(debug_output.contains("REDACTED"));
    }

    #[test]
    fn test_masked() {
        assert_eq!(secret_string("NRAK-ABCDEF".to_string()).expose_secret().masked(), "NRAK-****");
        assert_eq!(secret_string("plainkey".to_string()).expose_secret().masked(), "****");
        assert_eq!(secret_string(String::new()).expose_secret().masked(), "****");
    }

    #[test]
    fn test_secret_deserializes_from_toml() {
        #[derive(Deserialize)]
        struct Section {
            api_key: SecretString,
        }

        let section: Section = toml::from_str("api_key = \"NRAK-TOML\"").unwrap();
        assert_eq!(section.api_key.expose_secret(), "NRAK-TOML");
    }
}
