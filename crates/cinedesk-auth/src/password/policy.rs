//! Minimum requirements for new passwords.

use cinedesk_core::error::AppError;

/// Password rules applied when an admin sets a password.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}

impl PasswordPolicy {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Return the first rule the password breaks.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::invalid_field(
                "password",
                format!(
                    "Password must be at least {} characters long",
                    self.min_length
                ),
            ));
        }
        if !password.chars().any(char::is_alphabetic) {
            return Err(AppError::invalid_field(
                "password",
                "Password must contain at least one letter",
            ));
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::invalid_field(
                "password",
                "Password must contain at least one digit",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy() {
        let policy = PasswordPolicy::default();
        assert!(policy.validate("short1").is_err());
        assert!(policy.validate("allletters").is_err());
        assert!(policy.validate("12345678").is_err());
        assert!(policy.validate("letters123").is_ok());
    }
}
