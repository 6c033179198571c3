//! User-facing texts produced by the view models.
//!
//! Field-level validation texts live with
//! [`crate::domain::validation::ValidationErrorType::message`].

/// Shown when a form is submitted with at least one invalid field.
pub const FORM_INVALID: &str = "Molimo ispravno popunite sva polja.";

pub const PROFILE_NOT_LOADED: &str = "Profil još nije učitan.";

pub const EMAIL_NOT_VERIFIED: &str = "Molimo potvrdite svoju e-mail adresu.";

pub const NOT_SIGNED_IN: &str = "Korisnik nije prijavljen.";

pub const CART_ITEM_ADDED: &str = "Knjiga je dodana u košaricu.";

pub const CART_ITEM_REMOVED: &str = "Knjiga je uklonjena iz košarice.";

pub const CART_ITEM_ALREADY_PRESENT: &str = "Knjiga je već u košarici.";

pub const CANNOT_BUY_OWN_BOOK: &str = "Ne možete kupiti vlastitu knjigu.";
