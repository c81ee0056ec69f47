//! Client-side username checks run before anything is sent to the server.

use crate::error::NamingError;

/// Longest name accepted when the config does not override it.
pub const DEFAULT_MAX_NAME_LEN: usize = 50;

/// Reject names the server would never accept.
///
/// The empty name is let through on purpose; the server decides what to do
/// with it.
pub fn validate_name(name: &str, max_len: usize) -> Result<(), NamingError> {
    let len = name.chars().count();
    if len > max_len {
        return Err(NamingError::InvalidName(format!(
            "must be at most {} characters (got {})",
            max_len, len
        )));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(NamingError::InvalidName("must not contain spaces".into()));
    }
    if name.chars().any(char::is_control) {
        return Err(NamingError::InvalidName(
            "must not contain control characters".into(),
        ));
    }
    Ok(())
}
