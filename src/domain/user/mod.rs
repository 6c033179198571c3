//! User module - marketplace members and their auth accounts.

mod account;
mod profile;

pub use account::AuthAccount;
pub use profile::{ProfileDetails, User};
