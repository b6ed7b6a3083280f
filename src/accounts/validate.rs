use regex::Regex;
use std::sync::OnceLock;

use super::error::RegistrationError;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_NICKNAME_WEIGHT: usize = 16;

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

// CJK unified ideographs count double
pub fn nickname_weight(nickname: &str) -> usize {
    nickname
        .chars()
        .map(|c| if ('\u{4e00}'..='\u{9fff}').contains(&c) { 2 } else { 1 })
        .sum()
}

pub fn validate_registration(
    email: &str,
    password: &str,
    nickname: &str,
) -> Result<(), RegistrationError> {
    if email.is_empty() || password.is_empty() || nickname.is_empty() {
        return Err(RegistrationError::MissingFields);
    }
    if !email_regex().is_match(email) {
        return Err(RegistrationError::InvalidEmail);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(RegistrationError::PasswordTooShort);
    }
    if nickname_weight(nickname) > MAX_NICKNAME_WEIGHT {
        return Err(RegistrationError::NicknameTooLong);
    }
    Ok(())
}
