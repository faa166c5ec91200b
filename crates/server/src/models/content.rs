//! Content document types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use megaprime_core::{SectionBody, SectionKey};

/// One editable page section.
///
/// Serialized with the field names the front end reads:
/// `sectionId`, `title`, `content`, `lastUpdated`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDocument {
    /// Unique section key.
    #[serde(rename = "sectionId")]
    pub section_key: SectionKey,
    /// Human-readable title shown in the admin panel.
    pub title: String,
    /// Section payload.
    #[serde(rename = "content")]
    pub body: SectionBody,
    /// When the document was last written.
    pub last_updated: DateTime<Utc>,
}

/// Key and title of a section, without its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentSummary {
    #[serde(rename = "sectionId")]
    pub section_key: SectionKey,
    pub title: String,
}

impl From<&ContentDocument> for ContentSummary {
    fn from(doc: &ContentDocument) -> Self {
        Self {
            section_key: doc.section_key.clone(),
            title: doc.title.clone(),
        }
    }
}
