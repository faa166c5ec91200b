//! Built-in default content written by `seed_defaults`.

use megaprime_core::{
    AmenitiesSection, Amenity, ConnectivitySection, ConstructionPhase, ConstructionSection,
    FaqItem, FaqSection, HeroSection, OverviewSection, PhaseStatus, SectionBody, SectionKind,
};

/// A default document for one seeded section.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultSection {
    pub kind: SectionKind,
    pub title: &'static str,
    pub body: SectionBody,
}

fn s(text: &str) -> String {
    text.to_owned()
}

/// Default documents for every kind in [`SectionKind::SEEDED`], in seeding order.
#[must_use]
pub fn default_sections() -> Vec<DefaultSection> {
    SectionKind::SEEDED
        .into_iter()
        .filter_map(|kind| default_for(kind).map(|(title, body)| DefaultSection { kind, title, body }))
        .collect()
}

fn default_for(kind: SectionKind) -> Option<(&'static str, SectionBody)> {
    let entry = match kind {
        SectionKind::Hero => (
            "Hero Section",
            SectionBody::Hero(HeroSection {
                heading: s("Welcome to MegaPrime Residency"),
                subheading: s("Luxury Living Redefined"),
                description: s(
                    "Experience premium luxury apartments with world-class amenities and strategic location.",
                ),
            }),
        ),
        SectionKind::ProjectOverview => (
            "Project Overview",
            SectionBody::Overview(OverviewSection {
                title: s("Project Overview"),
                description: s(
                    "MegaPrime Residency is a premium residential project offering luxurious 2BHK and 3BHK apartments with modern amenities and excellent connectivity.",
                ),
            }),
        ),
        SectionKind::NearbyConnectivity => (
            "Nearby Connectivity",
            SectionBody::Connectivity(ConnectivitySection {
                title: s("Nearby Connectivity"),
                locations: [
                    "Metro Station - 2 km",
                    "Airport - 15 km",
                    "Shopping Mall - 3 km",
                    "Schools & Colleges - 1 km",
                    "Hospital - 5 km",
                ]
                .into_iter()
                .map(s)
                .collect(),
            }),
        ),
        SectionKind::Amenities => (
            "Amenities",
            SectionBody::Amenities(AmenitiesSection {
                title: s("World-Class Amenities"),
                amenities: [
                    ("Swimming Pool", "Olympic-size swimming pool for residents"),
                    ("Gymnasium", "Fully equipped modern fitness center"),
                    ("Club House", "Premium club house with recreational facilities"),
                    ("Children's Play Area", "Safe and fun play area for kids"),
                    ("Garden & Landscaping", "Beautifully landscaped gardens"),
                    ("24/7 Security", "Round-the-clock security services"),
                ]
                .into_iter()
                .map(|(name, description)| Amenity {
                    name: s(name),
                    description: s(description),
                })
                .collect(),
            }),
        ),
        SectionKind::AboutUs => (
            "About Us",
            SectionBody::Overview(OverviewSection {
                title: s("About MegaPrime Developers"),
                description: s(
                    "We are a premier real estate development company committed to delivering excellence in luxury residential projects with sustainable and innovative solutions.",
                ),
            }),
        ),
        SectionKind::ConstructionUpdates => (
            "Construction Updates",
            SectionBody::Construction(ConstructionSection {
                title: s("Project Progress"),
                phases: [
                    ("Foundation Work", PhaseStatus::Completed),
                    ("Structural Work", PhaseStatus::InProgress),
                    ("Electrical & Plumbing", PhaseStatus::Pending),
                    ("Interior Finishing", PhaseStatus::Pending),
                    ("Landscaping", PhaseStatus::Pending),
                ]
                .into_iter()
                .map(|(name, status)| ConstructionPhase {
                    name: s(name),
                    status,
                })
                .collect(),
            }),
        ),
        SectionKind::Faq => (
            "Frequently Asked Questions",
            SectionBody::Faq(FaqSection {
                title: s("FAQ"),
                questions: [
                    (
                        "What is the total project area?",
                        "The project spans across 10 acres of prime land.",
                    ),
                    (
                        "What are the apartment sizes available?",
                        "We offer 2BHK apartments (1200 sq.ft) and 3BHK apartments (1800 sq.ft).",
                    ),
                    (
                        "What is the expected possession date?",
                        "Expected possession date is December 2025.",
                    ),
                    (
                        "Are there any rental options available?",
                        "Yes, we offer flexible rental options for interested buyers.",
                    ),
                ]
                .into_iter()
                .map(|(question, answer)| FaqItem {
                    question: s(question),
                    answer: s(answer),
                })
                .collect(),
            }),
        ),
        SectionKind::ContactInfo | SectionKind::Custom => return None,
    };
    Some(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_seeded_kind_has_typed_default() {
        let defaults = default_sections();
        assert_eq!(defaults.len(), SectionKind::SEEDED.len());
        for section in &defaults {
            assert!(section.body.is_typed(), "{:?} default should be typed", section.kind);
            assert!(section.kind.section_key().is_some());
        }
    }

    #[test]
    fn test_defaults_survive_json_round_trip() {
        for section in default_sections() {
            let json = section.body.to_json().unwrap_or_default();
            let parsed = SectionBody::from_json(section.kind, json);
            assert_eq!(parsed.as_ref(), Ok(&section.body));
        }
    }
}
