use crate::MIN_PASSWORD_LENGTH;

/// Registration input problems, checked in the order the form reports them.
#[derive(Debug, PartialEq)]
pub enum ValidationError {
    EmptyName,
    EmptyEmail,
    InvalidEmail,
    EmptyPassword,
    PasswordTooShort,
}

impl ValidationError {
    /// The message shown to the user for this violation.
    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::EmptyName => "Name is required.",
            ValidationError::EmptyEmail => "Email is required.",
            ValidationError::InvalidEmail => "Email format is invalid.",
            ValidationError::EmptyPassword => "Password is required.",
            ValidationError::PasswordTooShort => "Password must be at least 6 characters.",
        }
    }
}

/// Check registration fields, stopping at the first violation.
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if email.trim().is_empty() {
        return Err(ValidationError::EmptyEmail);
    }
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    if password.is_empty() {
        return Err(ValidationError::EmptyPassword);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// Simple `local@domain.tld` shape check: no whitespace anywhere, exactly
/// one `@` with text on both sides, and a dot inside the domain part.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let (local, domain) = match email.split_once('@') {
        Some(parts) => parts,
        None => return false,
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Canonical form of an email for lookups and storage.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
