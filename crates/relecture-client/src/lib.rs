//! REST data-store client for the relecture engine.
//!
//! Implements [`JournalStore`] against a PostgREST-style backend: one
//! table per entry collection plus a `links` table, owner scoping as a
//! query parameter (row-level security at the backend remains the real
//! enforcement). Transport and HTTP failures surface as
//! [`JournalError::Transport`]; a mutation against a vanished row as
//! [`JournalError::LinkNotFound`].
//!
//! # Example
//! ```rust,no_run
//! use relecture_client::RestStore;
//! use relecture_core::{Journal, OwnerId};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> relecture_core::Result<()> {
//!     let store = Arc::new(RestStore::new(
//!         "https://backend.example.com/rest/v1",
//!         "service-key",
//!     ));
//!     let owner: OwnerId = uuid::Uuid::now_v7();
//!     let journal = Journal::new(store, owner);
//!     journal.refresh().await?;
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use relecture_core::{
    Entry, EntryBody, EntryKind, EntryRef, JournalError, JournalStore, Link, LinkId, LinkKind,
    OwnerId, Result,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};
use uuid::Uuid;

/// The five entry collections, in fetch order.
const ENTRY_TABLES: [(&str, EntryKind); 5] = [
    ("graces", EntryKind::Grace),
    ("prayers", EntryKind::Prayer),
    ("scripture_words", EntryKind::Scripture),
    ("knowledge_words", EntryKind::Word),
    ("encounters", EntryKind::Encounter),
];

/// REST client for the journal backend.
pub struct RestStore {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    /// `base_url` is the REST root, e.g. `https://host/rest/v1`.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }

    async fn get_rows<T: for<'de> Deserialize<'de>>(
        &self,
        table: &str,
        owner: OwnerId,
    ) -> Result<Vec<T>> {
        let response = self
            .http
            .get(self.url(table))
            .bearer_auth(&self.api_key)
            .query(&[("owner", format!("eq.{owner}"))])
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(JournalError::Transport(format!(
                "GET {table}: HTTP {status}"
            )));
        }
        response.json().await.map_err(transport)
    }
}

fn transport(e: reqwest::Error) -> JournalError {
    JournalError::Transport(e.to_string())
}

/// Wire row shared by the five entry tables. Variant-specific columns
/// are optional and only present on their own table.
#[derive(Debug, Deserialize)]
struct EntryRow {
    id: Uuid,
    owner: Uuid,
    /// Malformed or absent dates are kept as None; the engine skips
    /// such records instead of failing the fetch.
    date: Option<NaiveDate>,
    created_at: DateTime<Utc>,

    // graces
    title: Option<String>,
    text: Option<String>,

    // prayers
    subject: Option<String>,
    person_first_name: Option<String>,
    answered: Option<bool>,

    // scripture_words
    reference: Option<String>,
    full_text: Option<String>,

    // knowledge_words
    fulfilled: Option<bool>,

    // encounters
    person: Option<String>,
    notes: Option<String>,
}

impl EntryRow {
    fn into_entry(self, kind: EntryKind) -> Entry {
        let body = match kind {
            EntryKind::Grace => EntryBody::Grace {
                title: self.title.unwrap_or_default(),
                text: self.text.unwrap_or_default(),
            },
            EntryKind::Prayer => EntryBody::Prayer {
                subject: self.subject.unwrap_or_default(),
                person_first_name: self.person_first_name,
                answered: self.answered.unwrap_or(false),
            },
            EntryKind::Scripture => EntryBody::Scripture {
                reference: self.reference.unwrap_or_default(),
                full_text: self.full_text.unwrap_or_default(),
            },
            EntryKind::Word => EntryBody::Word {
                text: self.text.unwrap_or_default(),
                fulfilled: self.fulfilled.unwrap_or(false),
            },
            EntryKind::Encounter => EntryBody::Encounter {
                person: self.person.unwrap_or_default(),
                notes: self.notes.unwrap_or_default(),
            },
        };
        Entry {
            id: self.id,
            owner: self.owner,
            date: self.date,
            body,
            created_at: self.created_at,
        }
    }
}

/// Wire row of the `links` table. Endpoints are stored flattened as
/// type + id column pairs.
#[derive(Debug, Serialize, Deserialize)]
struct LinkRow {
    id: Uuid,
    owner: Uuid,
    source_type: String,
    source_id: Uuid,
    target_type: String,
    target_id: Uuid,
    link_kind: String,
    description: String,
    created_at: DateTime<Utc>,
}

impl LinkRow {
    fn from_link(link: &Link) -> Self {
        Self {
            id: link.id,
            owner: link.owner,
            source_type: link.source.kind.as_str().to_string(),
            source_id: link.source.id,
            target_type: link.target.kind.as_str().to_string(),
            target_id: link.target.id,
            link_kind: link.kind.as_str().to_string(),
            description: link.description.clone(),
            created_at: link.created_at,
        }
    }

    /// None if a type or kind column holds a value outside the closed
    /// sets; such rows are skipped with a warning rather than failing
    /// the whole fetch.
    fn into_link(self) -> Option<Link> {
        let source = EntryRef::new(self.source_id, EntryKind::from_str(&self.source_type)?);
        let target = EntryRef::new(self.target_id, EntryKind::from_str(&self.target_type)?);
        let kind = LinkKind::from_str(&self.link_kind)?;
        Some(Link {
            id: self.id,
            owner: self.owner,
            source,
            target,
            kind,
            description: self.description,
            created_at: self.created_at,
        })
    }
}

#[async_trait]
impl JournalStore for RestStore {
    async fn list_entries(&self, owner: OwnerId) -> Result<Vec<Entry>> {
        let mut entries = Vec::new();
        for (table, kind) in ENTRY_TABLES {
            let rows: Vec<EntryRow> = self.get_rows(table, owner).await?;
            debug!(table, rows = rows.len(), "fetched entry collection");
            entries.extend(rows.into_iter().map(|r| r.into_entry(kind)));
        }
        Ok(entries)
    }

    async fn list_links(&self, owner: OwnerId) -> Result<Vec<Link>> {
        let rows: Vec<LinkRow> = self.get_rows("links", owner).await?;
        let mut links = Vec::with_capacity(rows.len());
        for row in rows {
            let id = row.id;
            match row.into_link() {
                Some(link) => links.push(link),
                None => warn!(%id, "skipping link row with unknown type or kind"),
            }
        }
        Ok(links)
    }

    async fn insert_link(&self, link: &Link) -> Result<()> {
        let response = self
            .http
            .post(self.url("links"))
            .bearer_auth(&self.api_key)
            .json(&LinkRow::from_link(link))
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(JournalError::Transport(format!(
                "POST links: HTTP {status}"
            )));
        }
        Ok(())
    }

    async fn update_link_kind(&self, id: LinkId, kind: LinkKind) -> Result<Link> {
        let response = self
            .http
            .patch(self.url("links"))
            .bearer_auth(&self.api_key)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(&json!({ "link_kind": kind.as_str() }))
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(JournalError::Transport(format!(
                "PATCH links: HTTP {status}"
            )));
        }

        let rows: Vec<LinkRow> = response.json().await.map_err(transport)?;
        // An empty representation means the row no longer exists.
        let row = rows.into_iter().next().ok_or(JournalError::LinkNotFound(id))?;
        row.into_link()
            .ok_or_else(|| JournalError::Validation("backend returned an unknown link kind".into()))
    }

    async fn delete_link(&self, id: LinkId) -> Result<()> {
        let response = self
            .http
            .delete(self.url("links"))
            .bearer_auth(&self.api_key)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(JournalError::Transport(format!(
                "DELETE links: HTTP {status}"
            )));
        }

        let rows: Vec<LinkRow> = response.json().await.map_err(transport)?;
        if rows.is_empty() {
            // Already gone. The service layer treats this as success.
            return Err(JournalError::LinkNotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_rows_round_trip() {
        let link = Link::new(
            Uuid::now_v7(),
            EntryRef::new(Uuid::now_v7(), EntryKind::Prayer),
            EntryRef::new(Uuid::now_v7(), EntryKind::Grace),
            LinkKind::Answers,
            "exaucée".into(),
        );
        let row = LinkRow::from_link(&link);
        assert_eq!(row.link_kind, "answers");
        assert_eq!(row.source_type, "prayer");

        let back = row.into_link().unwrap();
        assert_eq!(back, link);
    }

    #[test]
    fn unknown_kind_rows_are_rejected_not_fatal() {
        let link = Link::new(
            Uuid::now_v7(),
            EntryRef::new(Uuid::now_v7(), EntryKind::Word),
            EntryRef::new(Uuid::now_v7(), EntryKind::Grace),
            LinkKind::Fulfills,
            String::new(),
        );
        let mut row = LinkRow::from_link(&link);
        row.link_kind = "blesses".into();
        assert!(row.into_link().is_none());
    }

    #[test]
    fn entry_rows_map_to_their_variant() {
        let row = EntryRow {
            id: Uuid::now_v7(),
            owner: Uuid::now_v7(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1),
            created_at: Utc::now(),
            title: None,
            text: None,
            subject: Some("guérison".into()),
            person_first_name: Some("Marie".into()),
            answered: Some(false),
            reference: None,
            full_text: None,
            fulfilled: None,
            person: None,
            notes: None,
        };
        let entry = row.into_entry(EntryKind::Prayer);
        assert_eq!(entry.kind(), EntryKind::Prayer);
        assert_eq!(entry.display_text(), "guérison");
    }
}
