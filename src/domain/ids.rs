//! Identifier types with validation
//!
//! Newtype wrappers that validate values crossing the command-line boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Student account username
///
/// The username is handed to an external process as an argument, so anything that
/// could be read as a flag or split by a shell is rejected.
///
/// # Examples
///
/// ```
/// use roster_notify::domain::ids::Username;
/// use std::str::FromStr;
///
/// let username = Username::from_str("jdoe26").unwrap();
/// assert_eq!(username.as_str(), "jdoe26");
/// assert!(Username::from_str("-Force").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// Creates a new Username from a string
    ///
    /// # Returns
    ///
    /// Returns `Ok(Username)` if the username is valid, `Err` otherwise
    pub fn new(username: impl Into<String>) -> Result<Self, String> {
        let username = username.into().trim().to_string();
        if username.is_empty() {
            return Err("Username cannot be empty".to_string());
        }
        if username.starts_with('-') {
            return Err(format!("Username '{username}' cannot start with '-'"));
        }
        if username.chars().any(char::is_whitespace) {
            return Err(format!("Username '{username}' cannot contain whitespace"));
        }
        Ok(Self(username))
    }

    /// Returns the username as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Username {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
