//! Per-field validation rules.
//!
//! Every rule is a pure function from raw input to a [`ValidationResult`].
//! Checks run in a fixed order and the first failing one decides the error.
//! Rules never panic and never return `Err`: bad input is an ordinary,
//! typed outcome.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{ValidationErrorType, ValidationResult};

/// Minimum number of characters in a name.
pub const MIN_NAME_LENGTH: usize = 2;

/// Minimum number of characters in any password.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Symbols that count towards a strong password.
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?`~";

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+$").expect("email pattern compiles"));

static NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L} .'-]+$").expect("name pattern compiles"));

static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{9,15}$").expect("phone pattern compiles"));

static STREET_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w\s]+\s[0-9]+[A-Za-z]?$").expect("street pattern compiles"));

static CITY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\s-]+$").expect("city pattern compiles"));

static ZIP_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{5}$").expect("zip pattern compiles"));

/// True for the empty string and for strings made only of whitespace.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Stateless collection of the form rules.
pub struct FormValidator;

impl FormValidator {
    pub fn validate_email(email: &str) -> ValidationResult {
        if is_blank(email) {
            return ValidationResult::invalid(ValidationErrorType::EmptyEmail);
        }
        if !EMAIL_REGEX.is_match(email) {
            return ValidationResult::invalid(ValidationErrorType::InvalidEmail);
        }
        ValidationResult::valid()
    }

    pub fn validate_name(name: &str) -> ValidationResult {
        if is_blank(name) {
            return ValidationResult::invalid(ValidationErrorType::EmptyName);
        }
        if name.chars().count() < MIN_NAME_LENGTH {
            return ValidationResult::invalid(ValidationErrorType::ShortName);
        }
        if !NAME_REGEX.is_match(name) {
            return ValidationResult::invalid(ValidationErrorType::InvalidNameFormat);
        }
        ValidationResult::valid()
    }

    /// Length-only check used by sign-up, login and the current password
    /// on the change-password screen.
    pub fn validate_password(password: &str) -> ValidationResult {
        if is_blank(password) {
            return ValidationResult::invalid(ValidationErrorType::EmptyPassword);
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return ValidationResult::invalid(ValidationErrorType::ShortPassword);
        }
        ValidationResult::valid()
    }

    /// Strength check for a newly chosen password: an uppercase letter, a
    /// digit, a symbol from [`PASSWORD_SYMBOLS`] and the minimum length.
    pub fn validate_strong_password(password: &str) -> ValidationResult {
        if is_blank(password) {
            return ValidationResult::invalid(ValidationErrorType::EmptyPassword);
        }

        let has_uppercase = password.chars().any(char::is_uppercase);
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        let has_symbol = password.chars().any(|c| PASSWORD_SYMBOLS.contains(c));
        let long_enough = password.chars().count() >= MIN_PASSWORD_LENGTH;

        if has_uppercase && has_digit && has_symbol && long_enough {
            ValidationResult::valid()
        } else {
            ValidationResult::invalid(ValidationErrorType::WeakPassword)
        }
    }

    pub fn validate_password_confirmation(password: &str, confirmation: &str) -> ValidationResult {
        if is_blank(confirmation) {
            return ValidationResult::invalid(ValidationErrorType::EmptyPassword);
        }
        if confirmation != password {
            return ValidationResult::invalid(ValidationErrorType::PasswordsDoNotMatch);
        }
        ValidationResult::valid()
    }

    pub fn validate_phone(phone: &str) -> ValidationResult {
        if is_blank(phone) {
            return ValidationResult::invalid(ValidationErrorType::EmptyPhone);
        }
        if !PHONE_REGEX.is_match(phone) {
            return ValidationResult::invalid(ValidationErrorType::InvalidPhoneFormat);
        }
        ValidationResult::valid()
    }

    pub fn validate_street(street: &str) -> ValidationResult {
        if is_blank(street) {
            return ValidationResult::invalid(ValidationErrorType::EmptyStreet);
        }
        if !STREET_REGEX.is_match(street) {
            return ValidationResult::invalid(ValidationErrorType::InvalidStreetFormat);
        }
        ValidationResult::valid()
    }

    pub fn validate_city(city: &str) -> ValidationResult {
        if is_blank(city) {
            return ValidationResult::invalid(ValidationErrorType::EmptyCity);
        }
        if !CITY_REGEX.is_match(city) {
            return ValidationResult::invalid(ValidationErrorType::InvalidCityFormat);
        }
        ValidationResult::valid()
    }

    pub fn validate_zip(zip: &str) -> ValidationResult {
        if is_blank(zip) {
            return ValidationResult::invalid(ValidationErrorType::EmptyZip);
        }
        if !ZIP_REGEX.is_match(zip) {
            return ValidationResult::invalid(ValidationErrorType::InvalidZipFormat);
        }
        ValidationResult::valid()
    }

    pub fn validate_title(title: &str) -> ValidationResult {
        if is_blank(title) {
            return ValidationResult::invalid(ValidationErrorType::EmptyTitle);
        }
        ValidationResult::valid()
    }

    pub fn validate_author(author: &str) -> ValidationResult {
        if is_blank(author) {
            return ValidationResult::invalid(ValidationErrorType::EmptyAuthor);
        }
        ValidationResult::valid()
    }

    pub fn validate_price(price: &str) -> ValidationResult {
        if is_blank(price) {
            return ValidationResult::invalid(ValidationErrorType::EmptyPrice);
        }
        match parse_price(price) {
            Some(_) => ValidationResult::valid(),
            None => ValidationResult::invalid(ValidationErrorType::InvalidPrice),
        }
    }

    pub fn validate_images(image_uris: &[String]) -> ValidationResult {
        if image_uris.iter().all(|uri| is_blank(uri)) {
            return ValidationResult::invalid(ValidationErrorType::MissingImage);
        }
        ValidationResult::valid()
    }
}

/// Parses a user-typed price. Accepts `,` or `.` as the decimal separator
/// and returns `None` unless the value is finite and strictly positive.
pub fn parse_price(price: &str) -> Option<f64> {
    let normalized = price.trim().replace(',', ".");
    if !normalized.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}
