//! Form-level validation built from the field rules.
//!
//! Each aggregate holds one [`ValidationResult`] per field and is valid only
//! when every field is. The only cross-field rule is password confirmation.

use super::{FormValidator, ValidationResult};

/// Sign-up form: name, email, password and its confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignupValidation {
    pub name: ValidationResult,
    pub email: ValidationResult,
    pub password: ValidationResult,
    pub confirm_password: ValidationResult,
}

impl SignupValidation {
    pub fn validate(name: &str, email: &str, password: &str, confirm_password: &str) -> Self {
        Self {
            name: FormValidator::validate_name(name),
            email: FormValidator::validate_email(email),
            password: FormValidator::validate_password(password),
            confirm_password: FormValidator::validate_password_confirmation(password, confirm_password),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.name.is_valid()
            && self.email.is_valid()
            && self.password.is_valid()
            && self.confirm_password.is_valid()
    }
}

/// Login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginValidation {
    pub email: ValidationResult,
    pub password: ValidationResult,
}

impl LoginValidation {
    pub fn validate(email: &str, password: &str) -> Self {
        Self {
            email: FormValidator::validate_email(email),
            password: FormValidator::validate_password(password),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.email.is_valid() && self.password.is_valid()
    }
}

/// Profile edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileEditValidation {
    pub name: ValidationResult,
    pub phone: ValidationResult,
    pub street: ValidationResult,
    pub city: ValidationResult,
    pub zip: ValidationResult,
}

impl ProfileEditValidation {
    pub fn validate(name: &str, phone: &str, street: &str, city: &str, zip: &str) -> Self {
        Self {
            name: FormValidator::validate_name(name),
            phone: FormValidator::validate_phone(phone),
            street: FormValidator::validate_street(street),
            city: FormValidator::validate_city(city),
            zip: FormValidator::validate_zip(zip),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.name.is_valid()
            && self.phone.is_valid()
            && self.street.is_valid()
            && self.city.is_valid()
            && self.zip.is_valid()
    }
}

/// Change password form. The current password only gets the length check,
/// the new one must be strong and the confirmation must repeat the new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangePasswordValidation {
    pub old_password: ValidationResult,
    pub new_password: ValidationResult,
    pub confirm_password: ValidationResult,
}

impl ChangePasswordValidation {
    pub fn validate(old_password: &str, new_password: &str, confirm_password: &str) -> Self {
        Self {
            old_password: FormValidator::validate_password(old_password),
            new_password: FormValidator::validate_strong_password(new_password),
            confirm_password: FormValidator::validate_password_confirmation(
                new_password,
                confirm_password,
            ),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.old_password.is_valid() && self.new_password.is_valid() && self.confirm_password.is_valid()
    }
}

/// New book listing form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddBookValidation {
    pub title: ValidationResult,
    pub author: ValidationResult,
    pub price: ValidationResult,
    pub images: ValidationResult,
}

impl AddBookValidation {
    pub fn validate(title: &str, author: &str, price: &str, image_uris: &[String]) -> Self {
        Self {
            title: FormValidator::validate_title(title),
            author: FormValidator::validate_author(author),
            price: FormValidator::validate_price(price),
            images: FormValidator::validate_images(image_uris),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.title.is_valid() && self.author.is_valid() && self.price.is_valid() && self.images.is_valid()
    }
}
