//! Business logic services.
//!
//! Services validate input, apply the domain rules and talk to the store
//! through the repository traits. Route handlers stay thin.

pub mod auth;
pub mod contact;
pub mod content;
