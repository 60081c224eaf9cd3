//! Local validation run before any request is sent.

use crate::error::CoreError;
use crate::models::{CreateComment, CreateUser};

/// Validate and normalize a new user.
///
/// Rules are checked in a fixed order and the first violation is reported:
/// name present, email present, email contains `@`. On success the name is
/// trimmed and the email trimmed and lowercased.
pub fn validate_new_user(input: &CreateUser) -> Result<CreateUser, CoreError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("Name is required".to_string()));
    }

    let email = input.email.trim();
    if email.is_empty() {
        return Err(CoreError::Validation("Email is required".to_string()));
    }
    if !email.contains('@') {
        return Err(CoreError::Validation(
            "Email must be a valid address".to_string(),
        ));
    }

    Ok(CreateUser {
        name: name.to_string(),
        email: email.to_lowercase(),
        role: input.role.clone(),
        avatar: input
            .avatar
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string),
    })
}

/// Reject blank comments.
pub fn validate_new_comment(input: &CreateComment) -> Result<(), CoreError> {
    if input.content.trim().is_empty() {
        return Err(CoreError::Validation(
            "Comment content is required".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
