//! `PostgreSQL` implementation of the document store.
//!
//! Queries are checked at runtime (`query_as` + `FromRow`) so the crate
//! builds without a live database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;

use megaprime_core::{AdminId, ContactId, Email, SectionBody, SectionKey};

use super::{
    AdminRepository, ContactRepository, ContentRepository, DocumentStore, RepositoryError,
};
use crate::models::{
    AdminAccount, ContactSubmission, ContentDocument, ContentSummary, NewContactSubmission,
};

/// Document store backed by a `PostgreSQL` pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ContentRow {
    section_key: String,
    title: String,
    body: Value,
    last_updated: DateTime<Utc>,
}

impl TryFrom<ContentRow> for ContentDocument {
    type Error = RepositoryError;

    fn try_from(row: ContentRow) -> Result<Self, Self::Error> {
        let section_key = parse_section_key(&row.section_key)?;
        let body = SectionBody::from_json(section_key.kind(), row.body).map_err(|e| {
            RepositoryError::DataCorruption(format!(
                "invalid body for section {section_key}: {e}"
            ))
        })?;

        Ok(Self {
            section_key,
            title: row.title,
            body,
            last_updated: row.last_updated,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    section_key: String,
    title: String,
}

#[derive(sqlx::FromRow)]
struct AdminRow {
    id: i32,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AdminRow> for AdminAccount {
    type Error = RepositoryError;

    fn try_from(row: AdminRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AdminId::new(row.id),
            email: parse_email(&row.email)?,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ContactRow {
    id: i32,
    name: String,
    email: String,
    phone: Option<String>,
    message: String,
    created_at: DateTime<Utc>,
}

impl From<ContactRow> for ContactSubmission {
    fn from(row: ContactRow) -> Self {
        Self {
            id: ContactId::new(row.id),
            name: row.name,
            email: row.email,
            phone: row.phone,
            message: row.message,
            created_at: row.created_at,
        }
    }
}

fn parse_section_key(s: &str) -> Result<SectionKey, RepositoryError> {
    SectionKey::parse(s)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid section key in database: {e}")))
}

fn parse_email(s: &str) -> Result<Email, RepositoryError> {
    Email::parse(s)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid email in database: {e}")))
}

fn body_json(body: &SectionBody) -> Result<Value, RepositoryError> {
    body.to_json()
        .map_err(|e| RepositoryError::DataCorruption(format!("unserializable section body: {e}")))
}

#[async_trait]
impl ContentRepository for PgStore {
    async fn find_content(
        &self,
        key: &SectionKey,
    ) -> Result<Option<ContentDocument>, RepositoryError> {
        let row = sqlx::query_as::<_, ContentRow>(
            r"
            SELECT section_key, title, body, last_updated
            FROM megaprime.content_section
            WHERE section_key = $1
            ",
        )
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ContentDocument::try_from).transpose()
    }

    async fn list_content(&self) -> Result<Vec<ContentSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r"
            SELECT section_key, title
            FROM megaprime.content_section
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|r| {
                Ok(ContentSummary {
                    section_key: parse_section_key(&r.section_key)?,
                    title: r.title,
                })
            })
            .collect()
    }

    async fn upsert_content(
        &self,
        key: &SectionKey,
        title: &str,
        body: &SectionBody,
    ) -> Result<ContentDocument, RepositoryError> {
        let row = sqlx::query_as::<_, ContentRow>(
            r"
            INSERT INTO megaprime.content_section (section_key, title, body)
            VALUES ($1, $2, $3)
            ON CONFLICT (section_key) DO UPDATE
            SET title = EXCLUDED.title,
                body = EXCLUDED.body,
                last_updated = NOW()
            RETURNING section_key, title, body, last_updated
            ",
        )
        .bind(key.as_str())
        .bind(title)
        .bind(body_json(body)?)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn insert_content_if_absent(
        &self,
        key: &SectionKey,
        title: &str,
        body: &SectionBody,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO megaprime.content_section (section_key, title, body)
            VALUES ($1, $2, $3)
            ON CONFLICT (section_key) DO NOTHING
            ",
        )
        .bind(key.as_str())
        .bind(title)
        .bind(body_json(body)?)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl AdminRepository for PgStore {
    async fn find_admin_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<AdminAccount>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(
            r"
            SELECT id, email, password_hash, created_at
            FROM megaprime.admin_account
            WHERE email = $1
            ",
        )
        .bind(email.normalized().as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AdminAccount::try_from).transpose()
    }

    async fn create_admin(
        &self,
        email: &Email,
        password_hash: &str,
    ) -> Result<AdminAccount, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(
            r"
            INSERT INTO megaprime.admin_account (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at
            ",
        )
        .bind(email.normalized().as_str())
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }
}

#[async_trait]
impl ContactRepository for PgStore {
    async fn insert_contact(
        &self,
        submission: &NewContactSubmission,
    ) -> Result<ContactSubmission, RepositoryError> {
        let row = sqlx::query_as::<_, ContactRow>(
            r"
            INSERT INTO megaprime.contact_submission (name, email, phone, message)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, phone, message, created_at
            ",
        )
        .bind(&submission.name)
        .bind(&submission.email)
        .bind(submission.phone.as_deref())
        .bind(&submission.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list_contacts(&self) -> Result<Vec<ContactSubmission>, RepositoryError> {
        let rows = sqlx::query_as::<_, ContactRow>(
            r"
            SELECT id, name, email, phone, message, created_at
            FROM megaprime.contact_submission
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ContactSubmission::from).collect())
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
