//! Domain models for the site backend.
//!
//! These types represent validated domain objects separate from database
//! row types. Their `Serialize` impls define the JSON wire format.

pub mod admin;
pub mod contact;
pub mod content;

pub use admin::AdminAccount;
pub use contact::{ContactSubmission, NewContactSubmission};
pub use content::{ContentDocument, ContentSummary};
