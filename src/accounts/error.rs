use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    MissingFields,
    InvalidEmail,
    PasswordTooShort,
    NicknameTooLong,
    EmailTaken,
    NicknameTaken,
}

impl Display for RegistrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrationError::MissingFields => write!(f, "Please fill in all required fields"),
            RegistrationError::InvalidEmail => write!(f, "Invalid email format"),
            RegistrationError::PasswordTooShort => {
                write!(f, "Password must be at least 6 characters")
            }
            RegistrationError::NicknameTooLong => write!(
                f,
                "Nickname too long! At most 16 characters (CJK characters count as 2)"
            ),
            RegistrationError::EmailTaken => write!(f, "This email is already registered"),
            RegistrationError::NicknameTaken => {
                write!(f, "This nickname is already taken, please choose another")
            }
        }
    }
}

impl std::error::Error for RegistrationError {}
