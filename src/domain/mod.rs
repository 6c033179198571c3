//! Domain layer - entities, value objects and the form validation engine.
//!
//! Nothing in here talks to the backend; it is pure data and rules.

pub mod book;
pub mod cart;
pub mod foundation;
pub mod user;
pub mod validation;
