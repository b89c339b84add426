//! Credential reset results
//!
//! The reset tool writes exactly two lines to stdout:
//!
//! ```text
//! Success
//! Jane Doe,Abc123!
//! ```
//!
//! Any first line other than `Success` means failure, with the second line holding
//! free-text diagnostics. [`ResetResult::decode`] is the only place that knows this
//! shape.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const SUCCESS_STATUS: &str = "Success";

/// Decoded outcome of a reset
#[derive(Debug, Clone)]
pub enum ResetResult {
    /// The account now has a new password
    Success {
        /// Account display name as reported by the identity provider
        display_name: String,
        /// The new password
        password: SecretString,
    },
    /// The tool reported a failure
    Failure {
        /// Free-text diagnostic from the tool
        diagnostic: String,
    },
}

/// Tool output that does not follow the two-line contract
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected reset tool output ({reason}): {raw:?}")]
pub struct MalformedResetPayload {
    /// What was wrong with the shape
    pub reason: &'static str,
    /// The untouched payload
    pub raw: String,
}

impl ResetResult {
    /// Strictly decodes the tool's stdout
    pub fn decode(payload: &str) -> Result<Self, MalformedResetPayload> {
        let malformed = |reason| MalformedResetPayload {
            reason,
            raw: payload.to_string(),
        };

        let lines: Vec<&str> = payload.trim().lines().collect();
        let [status, detail] = lines.as_slice() else {
            return Err(malformed("expected exactly two lines"));
        };

        if status.trim() != SUCCESS_STATUS {
            return Ok(ResetResult::Failure {
                diagnostic: detail.trim().to_string(),
            });
        }

        let (display_name, password) = detail
            .split_once(',')
            .ok_or_else(|| malformed("success line is not 'displayName,password'"))?;
        let display_name = display_name.trim();
        let password = password.trim();
        if display_name.is_empty() || password.is_empty() {
            return Err(malformed("empty display name or password"));
        }

        Ok(ResetResult::Success {
            display_name: display_name.to_string(),
            password: SecretString::new(password.to_string()),
        })
    }

    /// Whether the reset succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, ResetResult::Success { .. })
    }

    /// Password, for the success variant
    pub fn password(&self) -> Option<&str> {
        match self {
            ResetResult::Success { password, .. } => Some(password.expose_secret().as_str()),
            ResetResult::Failure { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_decode_success() {
        let result = ResetResult::decode("Success\r\nJane Doe,Abc123!").unwrap();
        match &result {
            ResetResult::Success { display_name, .. } => assert_eq!(display_name, "Jane Doe"),
            other => panic!("expected success, got {other:?}"),
        }
        assert_eq!(result.password(), Some("Abc123!"));
    }

    #[test]
    fn test_decode_success_with_trailing_newline() {
        let result = ResetResult::decode("Success\r\nJane Doe,Abc123!\r\n").unwrap();
        assert!(result.is_success());
    }

    #[test]
    fn test_decode_password_may_contain_commas() {
        let result = ResetResult::decode("Success\nJane Doe,a,b,c").unwrap();
        assert_eq!(result.password(), Some("a,b,c"));
    }

    #[test_case("failure\r\naccount locked", "account locked" ; "lower case failure")]
    #[test_case("Error\nUser not found in directory", "User not found in directory" ; "other status")]
    #[test_case("success\r\nJane Doe,pw", "Jane Doe,pw" ; "status is case sensitive")]
    fn test_decode_failure(payload: &str, diagnostic: &str) {
        match ResetResult::decode(payload).unwrap() {
            ResetResult::Failure { diagnostic: d } => assert_eq!(d, diagnostic),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test_case("" ; "empty")]
    #[test_case("Success" ; "one line")]
    #[test_case("Success\r\nJane Doe,pw\r\nextra" ; "three lines")]
    #[test_case("Success\r\nJane Doe" ; "no comma")]
    #[test_case("Success\r\n,pw" ; "empty name")]
    #[test_case("Success\r\nJane Doe, " ; "empty password")]
    fn test_decode_malformed(payload: &str) {
        let err = ResetResult::decode(payload).unwrap_err();
        assert_eq!(err.raw, payload);
    }

    #[test]
    fn test_password_is_redacted_in_debug() {
        let result = ResetResult::decode("Success\nJane Doe,Sup3rSecret").unwrap();
        assert!(!format!("{result:?}").contains("Sup3rSecret"));
    }
}
