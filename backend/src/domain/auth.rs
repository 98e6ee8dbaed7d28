//! Authentication primitives: signup forms, login credentials, and the
//! password policy.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a service.

use std::fmt;

use zeroize::Zeroizing;

use super::media::ImageUpload;
use super::user::{EmailAddress, UserValidationError, Username};

/// Domain error returned when signup payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupValidationError {
    /// One or more of username/email/password was absent or blank.
    MissingFields,
    /// The password failed the strength policy.
    WeakPassword,
    /// The username failed shape validation.
    InvalidUsername(UserValidationError),
    /// The email failed shape validation.
    InvalidEmail(UserValidationError),
}

impl fmt::Display for SignupValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields => write!(
                f,
                "all fields are mandatory; please provide your username, email and password",
            ),
            Self::WeakPassword => write!(
                f,
                "password needs at least 6 characters and must contain at least one number, \
                 one lowercase and one uppercase letter",
            ),
            Self::InvalidUsername(err) | Self::InvalidEmail(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SignupValidationError {}

/// Password strength policy: length ≥ 6 with at least one digit, one
/// lowercase letter, and one uppercase letter.
///
/// Checked before any hashing happens; a weak password never reaches the
/// hasher.
#[must_use]
pub fn password_meets_policy(password: &str) -> bool {
    password.chars().count() >= 6
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(char::is_lowercase)
        && password.chars().any(char::is_uppercase)
}

/// Validated signup form.
#[derive(Debug)]
pub struct SignupForm {
    username: Username,
    email: EmailAddress,
    password: Zeroizing<String>,
    image: Option<ImageUpload>,
}

impl SignupForm {
    /// Construct a form from raw request inputs.
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
        image: Option<ImageUpload>,
    ) -> Result<Self, SignupValidationError> {
        if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(SignupValidationError::MissingFields);
        }
        if !password_meets_policy(password) {
            return Err(SignupValidationError::WeakPassword);
        }
        let username = Username::new(username).map_err(SignupValidationError::InvalidUsername)?;
        let email = EmailAddress::new(email).map_err(SignupValidationError::InvalidEmail)?;
        Ok(Self {
            username,
            email,
            password: Zeroizing::new(password.to_owned()),
            image,
        })
    }

    /// Raw password for hashing.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Consume the form into its validated parts.
    #[must_use]
    pub fn into_parts(self) -> (Username, EmailAddress, Zeroizing<String>, Option<ImageUpload>) {
        (self.username, self.email, self.password, self.image)
    }
}

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email or password was empty.
    MissingCredentials,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredentials => {
                write!(f, "please enter both email and password to log in")
            }
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed, lowercased, and non-empty; shape validation is
///   deferred to the lookup (an unregistered shape simply finds no user).
/// - `password` is non-empty and retains caller-provided whitespace to avoid
///   surprising credential comparisons.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() || password.is_empty() {
            return Err(LoginValidationError::MissingCredentials);
        }
        Ok(Self {
            email: normalized.to_ascii_lowercase(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email string for user lookup.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("abcdef", false)] // no digit, no uppercase
    #[case("ABCDEF1", false)] // no lowercase
    #[case("abc12", false)] // too short
    #[case("Abcdef1", true)]
    #[case("aB3", false)]
    #[case("sixsix", false)]
    fn policy_matches_the_reference_table(#[case] password: &str, #[case] expected: bool) {
        assert_eq!(password_meets_policy(password), expected);
    }

    #[rstest]
    #[case("", "ada@example.com", "Abcdef1")]
    #[case("ada", "", "Abcdef1")]
    #[case("ada", "ada@example.com", "")]
    #[case("   ", "ada@example.com", "Abcdef1")]
    fn signup_rejects_missing_fields(
        #[case] username: &str,
        #[case] email: &str,
        #[case] password: &str,
    ) {
        let err = SignupForm::try_from_parts(username, email, password, None)
            .expect_err("missing fields must fail");
        assert_eq!(err, SignupValidationError::MissingFields);
    }

    #[test]
    fn signup_rejects_weak_passwords_before_shape_checks() {
        let err = SignupForm::try_from_parts("bad name!", "ada@example.com", "abcdef", None)
            .expect_err("weak password must fail");
        assert_eq!(err, SignupValidationError::WeakPassword);
    }

    #[test]
    fn signup_surfaces_shape_violations() {
        let err = SignupForm::try_from_parts("bad name!", "ada@example.com", "Abcdef1", None)
            .expect_err("invalid username must fail");
        assert!(matches!(err, SignupValidationError::InvalidUsername(_)));

        let err = SignupForm::try_from_parts("ada", "nonsense", "Abcdef1", None)
            .expect_err("invalid email must fail");
        assert!(matches!(err, SignupValidationError::InvalidEmail(_)));
    }

    #[test]
    fn signup_accepts_a_valid_form() {
        let form = SignupForm::try_from_parts("ada", "Ada@Example.com", "Abcdef1", None)
            .expect("valid form");
        let (username, email, password, image) = form.into_parts();
        assert_eq!(username.as_ref(), "ada");
        assert_eq!(email.as_ref(), "ada@example.com");
        assert_eq!(password.as_str(), "Abcdef1");
        assert!(image.is_none());
    }

    #[rstest]
    #[case("", "pw")]
    #[case("   ", "pw")]
    #[case("ada@example.com", "")]
    fn login_rejects_missing_credentials(#[case] email: &str, #[case] password: &str) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("missing credentials must fail");
        assert_eq!(err, LoginValidationError::MissingCredentials);
    }

    #[test]
    fn login_normalises_the_email() {
        let creds =
            LoginCredentials::try_from_parts("  Ada@Example.COM ", "secret").expect("valid creds");
        assert_eq!(creds.email(), "ada@example.com");
        assert_eq!(creds.password(), "secret");
    }
}
