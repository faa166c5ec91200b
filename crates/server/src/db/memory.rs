//! In-memory implementation of the document store.
//!
//! Used by tests and by `MEGAPRIME_STORE=memory` for local demos. Each
//! collection sits behind its own `RwLock`, so every write is atomic and
//! concurrent upserts to one key are last-write-wins.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use megaprime_core::{AdminId, ContactId, Email, SectionBody, SectionKey};

use super::{
    AdminRepository, ContactRepository, ContentRepository, DocumentStore, RepositoryError,
};
use crate::models::{
    AdminAccount, ContactSubmission, ContentDocument, ContentSummary, NewContactSubmission,
};

/// Document store held entirely in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    content: RwLock<Vec<ContentDocument>>,
    admins: RwLock<Vec<AdminAccount>>,
    contacts: RwLock<Vec<ContactSubmission>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_id(len: usize) -> Result<i32, RepositoryError> {
    i32::try_from(len + 1)
        .map_err(|_| RepositoryError::DataCorruption("id space exhausted".to_owned()))
}

#[async_trait]
impl ContentRepository for MemoryStore {
    async fn find_content(
        &self,
        key: &SectionKey,
    ) -> Result<Option<ContentDocument>, RepositoryError> {
        let content = self.content.read().await;
        Ok(content.iter().find(|doc| &doc.section_key == key).cloned())
    }

    async fn list_content(&self) -> Result<Vec<ContentSummary>, RepositoryError> {
        let content = self.content.read().await;
        Ok(content.iter().map(ContentSummary::from).collect())
    }

    async fn upsert_content(
        &self,
        key: &SectionKey,
        title: &str,
        body: &SectionBody,
    ) -> Result<ContentDocument, RepositoryError> {
        let mut content = self.content.write().await;
        let doc = ContentDocument {
            section_key: key.clone(),
            title: title.to_owned(),
            body: body.clone(),
            last_updated: Utc::now(),
        };

        match content.iter_mut().find(|existing| &existing.section_key == key) {
            Some(existing) => *existing = doc.clone(),
            None => content.push(doc.clone()),
        }

        Ok(doc)
    }

    async fn insert_content_if_absent(
        &self,
        key: &SectionKey,
        title: &str,
        body: &SectionBody,
    ) -> Result<bool, RepositoryError> {
        let mut content = self.content.write().await;
        if content.iter().any(|doc| &doc.section_key == key) {
            return Ok(false);
        }

        content.push(ContentDocument {
            section_key: key.clone(),
            title: title.to_owned(),
            body: body.clone(),
            last_updated: Utc::now(),
        });
        Ok(true)
    }
}

#[async_trait]
impl AdminRepository for MemoryStore {
    async fn find_admin_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<AdminAccount>, RepositoryError> {
        let admins = self.admins.read().await;
        Ok(admins.iter().find(|a| a.email.matches(email)).cloned())
    }

    async fn create_admin(
        &self,
        email: &Email,
        password_hash: &str,
    ) -> Result<AdminAccount, RepositoryError> {
        let mut admins = self.admins.write().await;
        if admins.iter().any(|a| a.email.matches(email)) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        let account = AdminAccount {
            id: AdminId::new(next_id(admins.len())?),
            email: email.normalized(),
            password_hash: password_hash.to_owned(),
            created_at: Utc::now(),
        };
        admins.push(account.clone());
        Ok(account)
    }
}

#[async_trait]
impl ContactRepository for MemoryStore {
    async fn insert_contact(
        &self,
        submission: &NewContactSubmission,
    ) -> Result<ContactSubmission, RepositoryError> {
        let mut contacts = self.contacts.write().await;
        let stored = ContactSubmission {
            id: ContactId::new(next_id(contacts.len())?),
            name: submission.name.clone(),
            email: submission.email.clone(),
            phone: submission.phone.clone(),
            message: submission.message.clone(),
            created_at: Utc::now(),
        };
        contacts.push(stored.clone());
        Ok(stored)
    }

    async fn list_contacts(&self) -> Result<Vec<ContactSubmission>, RepositoryError> {
        let mut contacts = self.contacts.read().await.clone();
        contacts.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(contacts)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use megaprime_core::{HeroSection, SectionKind};
    use serde_json::json;

    use super::*;

    fn key(s: &str) -> SectionKey {
        SectionKey::parse(s).unwrap()
    }

    fn hero(heading: &str) -> SectionBody {
        SectionBody::Hero(HeroSection {
            heading: heading.to_owned(),
            subheading: "sub".to_owned(),
            description: "desc".to_owned(),
        })
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing_document() {
        let store = MemoryStore::new();
        store.upsert_content(&key("hero"), "Hero", &hero("First")).await.unwrap();
        let second = store
            .upsert_content(&key("hero"), "Hero v2", &hero("Second"))
            .await
            .unwrap();

        let found = store.find_content(&key("hero")).await.unwrap().unwrap();
        assert_eq!(found, second);
        assert_eq!(found.title, "Hero v2");
        assert_eq!(store.list_content().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_content_keeps_insertion_order() {
        let store = MemoryStore::new();
        let body = SectionBody::from_json(SectionKind::Custom, json!({"a": 1})).unwrap();
        for k in ["zeta", "alpha", "mid"] {
            store.upsert_content(&key(k), k, &body).await.unwrap();
        }
        store.upsert_content(&key("alpha"), "again", &body).await.unwrap();

        let keys: Vec<_> = store
            .list_content()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.section_key.into())
            .collect::<Vec<String>>();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[tokio::test]
    async fn test_insert_if_absent_does_not_overwrite() {
        let store = MemoryStore::new();
        store.upsert_content(&key("hero"), "Edited", &hero("Mine")).await.unwrap();

        let written = store
            .insert_content_if_absent(&key("hero"), "Default", &hero("Default"))
            .await
            .unwrap();
        assert!(!written);

        let found = store.find_content(&key("hero")).await.unwrap().unwrap();
        assert_eq!(found.title, "Edited");
    }

    #[tokio::test]
    async fn test_create_admin_conflict_is_case_insensitive() {
        let store = MemoryStore::new();
        let email = Email::parse("Admin@Example.com").unwrap();
        let created = store.create_admin(&email, "hash").await.unwrap();
        assert_eq!(created.email.as_str(), "admin@example.com");

        let again = Email::parse("admin@example.com").unwrap();
        let err = store.create_admin(&again, "hash").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert!(store.find_admin_by_email(&email).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_contacts_listed_newest_first() {
        let store = MemoryStore::new();
        for name in ["first", "second", "third"] {
            store
                .insert_contact(&NewContactSubmission {
                    name: name.to_owned(),
                    email: "buyer@example.com".to_owned(),
                    phone: None,
                    message: "hello".to_owned(),
                })
                .await
                .unwrap();
        }

        let names: Vec<_> = store
            .list_contacts()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["third", "second", "first"]);
    }
}
