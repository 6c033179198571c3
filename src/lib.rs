//! Book Marketplace - client core for a second-hand book marketplace
//!
//! This crate holds the form validation engine and the screen state
//! containers (auth, profile, password change, home listing, cart, new
//! listing) that sit between a UI and a managed auth/database/storage
//! backend reached through the traits in [`ports`].

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
