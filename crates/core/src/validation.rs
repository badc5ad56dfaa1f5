//! Input validation for list and item payloads.
//!
//! Pure functions shared by the API handlers. Kept in `core` so the rules
//! live next to the domain types rather than inside any one handler.

use crate::error::CoreError;

/// Maximum length of a list name.
const MAX_LIST_NAME_LEN: usize = 256;

/// Maximum length of an item description.
const MAX_DESCRIPTION_LEN: usize = 1024;

/// Validate a list name.
///
/// Rules:
/// - Must not be empty or whitespace-only.
/// - Must not exceed `MAX_LIST_NAME_LEN` characters.
pub fn validate_list_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "List name must not be empty".to_string(),
        ));
    }
    if name.len() > MAX_LIST_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "List name must not exceed {MAX_LIST_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate an item description.
///
/// Rules:
/// - Must not be empty or whitespace-only.
/// - Must not exceed `MAX_DESCRIPTION_LEN` characters.
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.trim().is_empty() {
        return Err(CoreError::Validation(
            "Item description must not be empty".to_string(),
        ));
    }
    if description.len() > MAX_DESCRIPTION_LEN {
        return Err(CoreError::Validation(format!(
            "Item description must not exceed {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
