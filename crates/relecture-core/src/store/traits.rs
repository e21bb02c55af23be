use crate::error::Result;
use crate::types::{Entry, Link, LinkId, LinkKind, OwnerId};
use async_trait::async_trait;

/// Data-store seam for one owner's journal.
#[async_trait]
pub trait JournalStore: Send + Sync {
    // === Entries (read-only from the core's point of view) ===

    /// All entries for the owner, the five collections concatenated
    /// with their kind tag attached. No pagination; the whole set is
    /// loaded.
    async fn list_entries(&self, owner: OwnerId) -> Result<Vec<Entry>>;

    // === Links ===

    /// All links for the owner.
    async fn list_links(&self, owner: OwnerId) -> Result<Vec<Link>>;

    /// Insert a new link. Dedup-before-insert is the caller's contract
    /// (see `Journal::create_link`); the store does not guard the pair.
    async fn insert_link(&self, link: &Link) -> Result<()>;

    /// Change a link's kind, the only mutable field. Fails with
    /// `LinkNotFound` if the record no longer exists.
    async fn update_link_kind(&self, id: LinkId, kind: LinkKind) -> Result<Link>;

    /// Delete a link. The store may report `LinkNotFound` for a record
    /// already gone; the service layer treats that as success.
    async fn delete_link(&self, id: LinkId) -> Result<()>;
}
