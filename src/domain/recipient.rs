//! Email recipients

use serde::{Deserialize, Serialize};
use std::fmt;

/// One or more email addresses
///
/// Stored as a comma-joined string of trimmed, non-empty entries. Config values often
/// span several lines, so all surrounding whitespace (newlines included) is removed.
///
/// # Examples
///
/// ```
/// use roster_notify::domain::Recipient;
///
/// let recipient = Recipient::parse("a@school.org,\n  b@school.org ").unwrap();
/// assert_eq!(recipient.as_str(), "a@school.org,b@school.org");
/// assert!(Recipient::parse(" , ").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recipient(String);

impl Recipient {
    /// Normalizes a raw address list; `None` when no address remains
    pub fn parse(raw: &str) -> Option<Self> {
        let joined = raw
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .collect::<Vec<_>>()
            .join(",");

        if joined.is_empty() {
            None
        } else {
            Some(Self(joined))
        }
    }

    /// The comma-joined address list
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Individual addresses
    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.0.split(',')
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Recipient {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
