//! Page section identifiers and payloads.
//!
//! Every editable block on the landing page is stored as one document keyed
//! by a [`SectionKey`]. The payload is a [`SectionBody`]: a typed variant when
//! the key is one of the known sections and the JSON matches its schema, or
//! the raw JSON otherwise so that nothing an editor writes is ever dropped.

use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Errors that can occur when parsing a [`SectionKey`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SectionKeyError {
    /// The key is empty.
    #[error("section key cannot be empty")]
    Empty,
    /// The key is too long.
    #[error("section key must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The key contains a character outside `[A-Za-z0-9_-]`.
    #[error("section key contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// Identifier of a page section (`hero`, `faq`, ...).
///
/// ## Constraints
///
/// - Length: 1-100 characters
/// - ASCII letters, digits, `-` and `_` only
///
/// ```
/// use megaprime_core::{SectionKey, SectionKind};
///
/// let key = SectionKey::parse("nearby-connectivity").unwrap();
/// assert_eq!(key.kind(), SectionKind::NearbyConnectivity);
///
/// assert!(SectionKey::parse("").is_err());
/// assert!(SectionKey::parse("../etc").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct SectionKey(String);

impl SectionKey {
    /// Maximum length of a section key.
    pub const MAX_LENGTH: usize = 100;

    /// Parse a `SectionKey` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty, too long, or contains characters
    /// other than ASCII alphanumerics, `-` and `_`.
    pub fn parse(s: &str) -> Result<Self, SectionKeyError> {
        if s.is_empty() {
            return Err(SectionKeyError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(SectionKeyError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(SectionKeyError::InvalidCharacter(c));
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns which known section this key addresses.
    #[must_use]
    pub fn kind(&self) -> SectionKind {
        SectionKind::from_key(&self.0)
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for SectionKey {
    type Err = SectionKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SectionKey {
    type Error = SectionKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SectionKey> for String {
    fn from(key: SectionKey) -> Self {
        key.0
    }
}

impl AsRef<str> for SectionKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The sections the landing page knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Hero,
    ProjectOverview,
    NearbyConnectivity,
    Amenities,
    AboutUs,
    ConstructionUpdates,
    Faq,
    ContactInfo,
    /// Any key the page does not know about.
    Custom,
}

impl SectionKind {
    /// Sections that ship with built-in default content.
    pub const SEEDED: [Self; 7] = [
        Self::Hero,
        Self::ProjectOverview,
        Self::NearbyConnectivity,
        Self::Amenities,
        Self::AboutUs,
        Self::ConstructionUpdates,
        Self::Faq,
    ];

    /// Classify a raw key.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key {
            "hero" => Self::Hero,
            "project-overview" => Self::ProjectOverview,
            "nearby-connectivity" => Self::NearbyConnectivity,
            "amenities" => Self::Amenities,
            "about-us" => Self::AboutUs,
            "construction-updates" => Self::ConstructionUpdates,
            "faq" => Self::Faq,
            "contact-info" => Self::ContactInfo,
            _ => Self::Custom,
        }
    }

    /// The canonical key of a known section; `None` for [`SectionKind::Custom`].
    #[must_use]
    pub const fn key(self) -> Option<&'static str> {
        match self {
            Self::Hero => Some("hero"),
            Self::ProjectOverview => Some("project-overview"),
            Self::NearbyConnectivity => Some("nearby-connectivity"),
            Self::Amenities => Some("amenities"),
            Self::AboutUs => Some("about-us"),
            Self::ConstructionUpdates => Some("construction-updates"),
            Self::Faq => Some("faq"),
            Self::ContactInfo => Some("contact-info"),
            Self::Custom => None,
        }
    }

    /// The canonical [`SectionKey`] of a known section.
    #[must_use]
    pub fn section_key(self) -> Option<SectionKey> {
        self.key().map(|k| SectionKey(k.to_owned()))
    }
}

// =============================================================================
// Typed payloads
// =============================================================================

/// `hero` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeroSection {
    pub heading: String,
    pub subheading: String,
    pub description: String,
}

/// Title plus paragraph, used by `project-overview` and `about-us`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverviewSection {
    pub title: String,
    pub description: String,
}

/// `nearby-connectivity` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectivitySection {
    pub title: String,
    pub locations: Vec<String>,
}

/// A single amenity card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Amenity {
    pub name: String,
    pub description: String,
}

/// `amenities` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AmenitiesSection {
    pub title: String,
    pub amenities: Vec<Amenity>,
}

/// Progress of one construction phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseStatus {
    Completed,
    #[serde(rename = "In Progress")]
    InProgress,
    Pending,
}

/// One row of the construction timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstructionPhase {
    pub name: String,
    pub status: PhaseStatus,
}

/// `construction-updates` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstructionSection {
    pub title: String,
    pub phases: Vec<ConstructionPhase>,
}

/// One question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

/// `faq` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FaqSection {
    pub title: String,
    pub questions: Vec<FaqItem>,
}

/// `contact-info` payload shown in the contact block and footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ContactInfoSection {
    pub address: String,
    pub phone: String,
    pub email: String,
    pub experience_center: String,
}

/// Errors that can occur when building a [`SectionBody`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SectionBodyError {
    /// The payload is `null`, a string, a number or a boolean.
    #[error("section content must be a JSON object or array")]
    NotStructured,
}

/// Payload of a content document.
///
/// Serializes as the bare payload (no tag): the section key stored next to
/// it selects the variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SectionBody {
    Hero(HeroSection),
    Overview(OverviewSection),
    Connectivity(ConnectivitySection),
    Amenities(AmenitiesSection),
    Construction(ConstructionSection),
    Faq(FaqSection),
    ContactInfo(ContactInfoSection),
    /// Custom sections, or known sections whose payload does not match the
    /// schema exactly.
    Other(Value),
}

impl SectionBody {
    /// Interpret a JSON payload for a section of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`SectionBodyError::NotStructured`] if the payload is not an
    /// object or array.
    pub fn from_json(kind: SectionKind, value: Value) -> Result<Self, SectionBodyError> {
        if !(value.is_object() || value.is_array()) {
            return Err(SectionBodyError::NotStructured);
        }

        let typed = match kind {
            SectionKind::Hero => typed::<HeroSection>(&value).map(Self::Hero),
            SectionKind::ProjectOverview | SectionKind::AboutUs => {
                typed::<OverviewSection>(&value).map(Self::Overview)
            }
            SectionKind::NearbyConnectivity => {
                typed::<ConnectivitySection>(&value).map(Self::Connectivity)
            }
            SectionKind::Amenities => typed::<AmenitiesSection>(&value).map(Self::Amenities),
            SectionKind::ConstructionUpdates => {
                typed::<ConstructionSection>(&value).map(Self::Construction)
            }
            SectionKind::Faq => typed::<FaqSection>(&value).map(Self::Faq),
            SectionKind::ContactInfo => typed::<ContactInfoSection>(&value).map(Self::ContactInfo),
            SectionKind::Custom => None,
        };

        Ok(typed.unwrap_or(Self::Other(value)))
    }

    /// Render the payload back to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Whether the payload matched a known schema.
    #[must_use]
    pub const fn is_typed(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

fn typed<T: serde::de::DeserializeOwned>(value: &Value) -> Option<T> {
    T::deserialize(value).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_section_key_valid() {
        for key in ["hero", "about-us", "promo_2026", "A1"] {
            assert!(SectionKey::parse(key).is_ok(), "{key} should be valid");
        }
    }

    #[test]
    fn test_section_key_invalid() {
        assert_eq!(SectionKey::parse(""), Err(SectionKeyError::Empty));
        assert_eq!(
            SectionKey::parse("two words"),
            Err(SectionKeyError::InvalidCharacter(' '))
        );
        assert_eq!(
            SectionKey::parse("a/b"),
            Err(SectionKeyError::InvalidCharacter('/'))
        );
        assert!(matches!(
            SectionKey::parse(&"k".repeat(101)),
            Err(SectionKeyError::TooLong { max: 100 })
        ));
    }

    #[test]
    fn test_kind_key_mapping_is_consistent() {
        for kind in SectionKind::SEEDED {
            let key = kind.key().unwrap();
            assert_eq!(SectionKind::from_key(key), kind);
        }
        assert_eq!(SectionKind::from_key("contact-info"), SectionKind::ContactInfo);
        assert_eq!(SectionKind::from_key("promo-banner"), SectionKind::Custom);
        assert_eq!(SectionKind::Custom.key(), None);
    }

    #[test]
    fn test_seeded_excludes_contact_info() {
        assert_eq!(SectionKind::SEEDED.len(), 7);
        assert!(!SectionKind::SEEDED.contains(&SectionKind::ContactInfo));
    }

    #[test]
    fn test_hero_payload_is_typed() {
        let value = json!({
            "heading": "Welcome",
            "subheading": "Luxury Living",
            "description": "Premium apartments"
        });

        let body = SectionBody::from_json(SectionKind::Hero, value.clone()).unwrap();
        assert!(matches!(body, SectionBody::Hero(ref h) if h.heading == "Welcome"));
        assert_eq!(body.to_json().unwrap(), value);
    }

    #[test]
    fn test_partial_hero_payload_falls_back_verbatim() {
        let value = json!({ "heading": "A" });

        let body = SectionBody::from_json(SectionKind::Hero, value.clone()).unwrap();
        assert!(!body.is_typed());
        assert_eq!(body.to_json().unwrap(), value);
    }

    #[test]
    fn test_extra_fields_are_not_dropped() {
        let value = json!({
            "title": "About",
            "description": "Developers",
            "image": "https://cdn.example/about.jpg"
        });

        let body = SectionBody::from_json(SectionKind::AboutUs, value.clone()).unwrap();
        assert!(!body.is_typed());
        assert_eq!(body.to_json().unwrap(), value);
    }

    #[test]
    fn test_construction_status_names() {
        let value = json!({
            "title": "Project Progress",
            "phases": [
                { "name": "Foundation Work", "status": "Completed" },
                { "name": "Structural Work", "status": "In Progress" }
            ]
        });

        let body = SectionBody::from_json(SectionKind::ConstructionUpdates, value.clone()).unwrap();
        let SectionBody::Construction(section) = &body else {
            panic!("expected construction payload");
        };
        assert_eq!(section.phases[1].status, PhaseStatus::InProgress);
        assert_eq!(body.to_json().unwrap(), value);
    }

    #[test]
    fn test_unknown_phase_status_falls_back() {
        let value = json!({
            "title": "Project Progress",
            "phases": [{ "name": "Roofing", "status": "Delayed" }]
        });

        let body = SectionBody::from_json(SectionKind::ConstructionUpdates, value).unwrap();
        assert!(!body.is_typed());
    }

    #[test]
    fn test_contact_info_uses_camel_case() {
        let value = json!({
            "address": "Plot 12, Sector 5",
            "phone": "+91 98765 43210",
            "email": "sales@megaprime.example",
            "experienceCenter": "Open daily 10am-7pm"
        });

        let body = SectionBody::from_json(SectionKind::ContactInfo, value.clone()).unwrap();
        assert!(matches!(body, SectionBody::ContactInfo(_)));
        assert_eq!(body.to_json().unwrap(), value);
    }

    #[test]
    fn test_custom_section_keeps_json() {
        let value = json!(["banner-1.jpg", "banner-2.jpg"]);
        let body = SectionBody::from_json(SectionKind::Custom, value.clone()).unwrap();
        assert_eq!(body, SectionBody::Other(value));
    }

    #[test]
    fn test_scalar_payload_rejected() {
        for value in [json!(null), json!("text"), json!(3), json!(true)] {
            assert_eq!(
                SectionBody::from_json(SectionKind::Hero, value),
                Err(SectionBodyError::NotStructured)
            );
        }
    }
}
