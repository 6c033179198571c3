//! Reason codes for failed field validation and their user-facing messages.

use std::fmt;

/// Why a single form field failed validation.
///
/// The UI looks up the text to show through [`ValidationErrorType::message`];
/// the code string from `Display` is what gets logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorType {
    EmptyEmail,
    InvalidEmail,
    EmptyName,
    ShortName,
    InvalidNameFormat,
    EmptyPassword,
    ShortPassword,
    WeakPassword,
    EmptyPhone,
    InvalidPhoneFormat,
    EmptyStreet,
    InvalidStreetFormat,
    EmptyCity,
    InvalidCityFormat,
    EmptyZip,
    InvalidZipFormat,
    PasswordsDoNotMatch,

    // Book listing form
    EmptyTitle,
    EmptyAuthor,
    EmptyPrice,
    InvalidPrice,
    MissingImage,
}

impl ValidationErrorType {
    /// Every reason code, in declaration order.
    pub const ALL: [ValidationErrorType; 22] = [
        Self::EmptyEmail,
        Self::InvalidEmail,
        Self::EmptyName,
        Self::ShortName,
        Self::InvalidNameFormat,
        Self::EmptyPassword,
        Self::ShortPassword,
        Self::WeakPassword,
        Self::EmptyPhone,
        Self::InvalidPhoneFormat,
        Self::EmptyStreet,
        Self::InvalidStreetFormat,
        Self::EmptyCity,
        Self::InvalidCityFormat,
        Self::EmptyZip,
        Self::InvalidZipFormat,
        Self::PasswordsDoNotMatch,
        Self::EmptyTitle,
        Self::EmptyAuthor,
        Self::EmptyPrice,
        Self::InvalidPrice,
        Self::MissingImage,
    ];

    /// Stable code string, e.g. `EMPTY_EMAIL`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyEmail => "EMPTY_EMAIL",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::EmptyName => "EMPTY_NAME",
            Self::ShortName => "SHORT_NAME",
            Self::InvalidNameFormat => "INVALID_NAME_FORMAT",
            Self::EmptyPassword => "EMPTY_PASSWORD",
            Self::ShortPassword => "SHORT_PASSWORD",
            Self::WeakPassword => "WEAK_PASSWORD",
            Self::EmptyPhone => "EMPTY_PHONE",
            Self::InvalidPhoneFormat => "INVALID_PHONE_FORMAT",
            Self::EmptyStreet => "EMPTY_STREET",
            Self::InvalidStreetFormat => "INVALID_STREET_FORMAT",
            Self::EmptyCity => "EMPTY_CITY",
            Self::InvalidCityFormat => "INVALID_CITY_FORMAT",
            Self::EmptyZip => "EMPTY_ZIP",
            Self::InvalidZipFormat => "INVALID_ZIP_FORMAT",
            Self::PasswordsDoNotMatch => "PASSWORDS_DO_NOT_MATCH",
            Self::EmptyTitle => "EMPTY_TITLE",
            Self::EmptyAuthor => "EMPTY_AUTHOR",
            Self::EmptyPrice => "EMPTY_PRICE",
            Self::InvalidPrice => "INVALID_PRICE",
            Self::MissingImage => "MISSING_IMAGE",
        }
    }

    /// Localized message shown under the offending field.
    pub fn message(&self) -> &'static str {
        match self {
            Self::EmptyEmail => "E-mail adresa je obavezna.",
            Self::InvalidEmail => "Unesite ispravnu e-mail adresu.",
            Self::EmptyName => "Ime je obavezno.",
            Self::ShortName => "Ime mora imati barem 2 znaka.",
            Self::InvalidNameFormat => "Ime smije sadržavati samo slova, razmake, točke, apostrofe i crtice.",
            Self::EmptyPassword => "Lozinka je obavezna.",
            Self::ShortPassword => "Lozinka mora imati barem 6 znakova.",
            Self::WeakPassword => {
                "Lozinka mora imati barem 6 znakova, jedno veliko slovo, jedan broj i jedan poseban znak."
            }
            Self::EmptyPhone => "Broj telefona je obavezan.",
            Self::InvalidPhoneFormat => "Broj telefona mora imati 9 do 15 znamenki.",
            Self::EmptyStreet => "Ulica je obavezna.",
            Self::InvalidStreetFormat => "Unesite ulicu i kućni broj (npr. Ilica 12A).",
            Self::EmptyCity => "Grad je obavezan.",
            Self::InvalidCityFormat => "Grad smije sadržavati samo slova, razmake i crtice.",
            Self::EmptyZip => "Poštanski broj je obavezan.",
            Self::InvalidZipFormat => "Poštanski broj mora imati točno 5 znamenki.",
            Self::PasswordsDoNotMatch => "Lozinke se ne podudaraju.",
            Self::EmptyTitle => "Naslov je obavezan.",
            Self::EmptyAuthor => "Autor je obavezan.",
            Self::EmptyPrice => "Cijena je obavezna.",
            Self::InvalidPrice => "Unesite ispravnu cijenu veću od nule.",
            Self::MissingImage => "Dodajte barem jednu sliku knjige.",
        }
    }
}

impl fmt::Display for ValidationErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
