//! Domain identifier types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Monitor entity GUID newtype wrapper
///
/// NerdGraph entity GUIDs are opaque, globally unique strings. They're used
/// verbatim as the import id of the generated Terraform resource.
///
/// # Examples
///
/// ```
/// use tfsynth::domain::ids::MonitorGuid;
/// use std::str::FromStr;
///
/// let guid = MonitorGuid::from_str("MTIzNDV8U1lOVEh8TU9OSVRPUnxhYmM").unwrap();
/// assert_eq!(guid.as_str(), "MTIzNDV8U1lOVEh8TU9OSVRPUnxhYmM");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonitorGuid(String);

impl MonitorGuid {
    /// Creates a new MonitorGuid, rejecting blank input
    pub fn new(guid: impl Into<String>) -> Result<Self, String> {
        let guid = guid.into();
        if guid.trim().is_empty() {
            return Err("Monitor GUID cannot be empty".to_string());
        }
        Ok(Self(guid))
    }

    /// Returns the GUID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for MonitorGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MonitorGuid {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for MonitorGuid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
