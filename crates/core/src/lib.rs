//! MegaPrime Core - Shared types library.
//!
//! This crate provides common types used across all MegaPrime components:
//! - `server` - Public content API and admin endpoints
//! - `cli` - Command-line tools for migrations and content management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, section keys and
//!   the typed section payloads

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
