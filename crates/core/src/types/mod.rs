//! Core types for MegaPrime.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod section;

pub use email::{Email, EmailError};
pub use id::*;
pub use section::{
    AmenitiesSection, Amenity, ConnectivitySection, ConstructionPhase, ConstructionSection,
    ContactInfoSection, FaqItem, FaqSection, HeroSection, OverviewSection, PhaseStatus,
    SectionBody, SectionBodyError, SectionKey, SectionKeyError, SectionKind,
};
