use crate::error::{JournalError, Result};
use crate::store::JournalStore;
use crate::types::{Entry, Link, LinkId, LinkKind, OwnerId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory backend for tests and demos.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<Vec<Entry>>,
    links: RwLock<HashMap<LinkId, Link>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entry. Entries are created through forms outside the
    /// core's scope, so the store only needs this for test setup.
    pub fn put_entry(&self, entry: Entry) -> Result<()> {
        self.entries
            .write()
            .map_err(|_| JournalError::Validation("entry lock poisoned".into()))?
            .push(entry);
        Ok(())
    }

    pub fn link_count(&self) -> usize {
        self.links.read().map(|m| m.len()).unwrap_or(0)
    }
}

#[async_trait]
impl JournalStore for MemoryStore {
    async fn list_entries(&self, owner: OwnerId) -> Result<Vec<Entry>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| JournalError::Validation("entry lock poisoned".into()))?;
        Ok(entries.iter().filter(|e| e.owner == owner).cloned().collect())
    }

    async fn list_links(&self, owner: OwnerId) -> Result<Vec<Link>> {
        let links = self
            .links
            .read()
            .map_err(|_| JournalError::Validation("link lock poisoned".into()))?;
        let mut out: Vec<Link> = links.values().filter(|l| l.owner == owner).cloned().collect();
        // HashMap iteration order is arbitrary; creation order is the
        // natural order for display.
        out.sort_by_key(|l| l.created_at);
        Ok(out)
    }

    async fn insert_link(&self, link: &Link) -> Result<()> {
        link.validate().map_err(JournalError::Validation)?;
        self.links
            .write()
            .map_err(|_| JournalError::Validation("link lock poisoned".into()))?
            .insert(link.id, link.clone());
        Ok(())
    }

    async fn update_link_kind(&self, id: LinkId, kind: LinkKind) -> Result<Link> {
        let mut links = self
            .links
            .write()
            .map_err(|_| JournalError::Validation("link lock poisoned".into()))?;
        let link = links.get_mut(&id).ok_or(JournalError::LinkNotFound(id))?;
        link.kind = kind;
        Ok(link.clone())
    }

    async fn delete_link(&self, id: LinkId) -> Result<()> {
        let mut links = self
            .links
            .write()
            .map_err(|_| JournalError::Validation("link lock poisoned".into()))?;
        if links.remove(&id).is_none() {
            return Err(JournalError::LinkNotFound(id));
        }
        Ok(())
    }
}
