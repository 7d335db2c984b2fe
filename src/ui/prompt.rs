//! Interactive password prompts.

use anyhow::{Context, Result};
use inquire::{Password as PasswordPrompt, PasswordDisplayMode, required};

use crate::secret::Password;

/// Prompts for a password to hash.
///
/// The password is entered twice; differing entries are rejected by the
/// prompt itself and the user is asked again.
pub fn prompt_hash_password() -> Result<Password> {
    PasswordPrompt::new("Enter password")
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_validator(required!("password cannot be empty"))
        .with_custom_confirmation_message("Confirm password")
        .with_custom_confirmation_error_message("passwords do not match")
        .prompt()
        .map(Password::from_string)
        .context("failed to read password")
}

/// Prompts for a password to verify. No confirmation is needed: a typo
/// simply fails verification.
pub fn prompt_verify_password() -> Result<Password> {
    PasswordPrompt::new("Enter password")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .map(Password::from_string)
        .context("failed to read password")
}
