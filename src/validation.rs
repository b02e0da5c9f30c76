//! Client-side checks for the login and signup forms.
//!
//! These run before any request is sent; the server still has the final say.

use regex::Regex;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

pub const LOGIN_MIN_PASSWORD: usize = 6;
pub const SIGNUP_MIN_PASSWORD: usize = 8;

/// A rejected form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn check_email(email: &str, errors: &mut Vec<FieldError>) {
    if email.trim().is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !EMAIL_REGEX.is_match(email) {
        errors.push(FieldError::new("email", "Email is invalid"));
    }
}

fn check_password(password: &str, min: usize, errors: &mut Vec<FieldError>) {
    if password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    } else if password.chars().count() < min {
        errors.push(FieldError::new(
            "password",
            format!("Password must be at least {} characters", min),
        ));
    }
}

/// Validate login credentials. Returns every failing field, in form order.
pub fn validate_login(email: &str, password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    check_email(email, &mut errors);
    check_password(password, LOGIN_MIN_PASSWORD, &mut errors);
    errors
}

pub fn validate_signup(name: &str, email: &str, password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    }
    check_email(email, &mut errors);
    check_password(password, SIGNUP_MIN_PASSWORD, &mut errors);
    errors
}

/// Password strength on a 0..=5 scale: one point each for length >= 8, an
/// uppercase letter, a lowercase letter, a digit and a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Strength(u8);

impl Strength {
    pub fn of(password: &str) -> Self {
        let checks = [
            password.chars().count() >= SIGNUP_MIN_PASSWORD,
            password.chars().any(|c| c.is_ascii_uppercase()),
            password.chars().any(|c| c.is_ascii_lowercase()),
            password.chars().any(|c| c.is_ascii_digit()),
            password.chars().any(|c| !c.is_ascii_alphanumeric()),
        ];
        Self(checks.iter().filter(|passed| **passed).count() as u8)
    }

    pub fn score(&self) -> u8 {
        self.0
    }

    pub fn label(&self) -> &'static str {
        match self.0 {
            0 => "Very weak",
            1 => "Weak",
            2 => "Fair",
            3 => "Good",
            _ => "Strong",
        }
    }
}
