//! High-level journal API: one owner's loaded snapshot plus the
//! mutations the linking surfaces need. Mutations go through the store
//! and the link set is refetched afterwards, so a successful write
//! never leaves the displayed links stale.

use crate::error::{JournalError, Result};
use crate::links::{are_linked, count_links_touching, kind_between, links_touching, resolve_other_endpoint};
use crate::store::JournalStore;
use crate::suggest::{Candidate, SuggestionEngine};
use crate::types::{Entry, EntryId, Link, LinkDraft, LinkId, LinkKind, OwnerId};
use log::{debug, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// One owner's loaded data.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub entries: Vec<Entry>,
    pub links: Vec<Link>,
}

/// Journal service for a single owner.
pub struct Journal<S: JournalStore> {
    store: Arc<S>,
    owner: OwnerId,
    engine: SuggestionEngine,
    snapshot: RwLock<Snapshot>,
    /// Bumped at the start of every full refresh. An in-flight fetch
    /// whose generation is no longer current is discarded — the
    /// "navigated away mid-fetch" guard.
    generation: AtomicU64,
}

impl<S: JournalStore> Journal<S> {
    pub fn new(store: Arc<S>, owner: OwnerId) -> Self {
        Self {
            store,
            owner,
            engine: SuggestionEngine::new(),
            snapshot: RwLock::new(Snapshot::default()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn with_engine(mut self, engine: SuggestionEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Reload entries and links from the store. Returns false if the
    /// result was discarded because a newer refresh started meanwhile.
    pub async fn refresh(&self) -> Result<bool> {
        let generation = self.begin_refresh();
        let entries = self.store.list_entries(self.owner).await?;
        let links = self.store.list_links(self.owner).await?;
        Ok(self.install(generation, Snapshot { entries, links }))
    }

    fn begin_refresh(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn install(&self, generation: u64, snapshot: Snapshot) -> bool {
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(
                "discarding stale snapshot for generation {} (owner {})",
                generation, self.owner
            );
            return false;
        }
        if let Ok(mut guard) = self.snapshot.write() {
            *guard = snapshot;
            true
        } else {
            false
        }
    }

    /// Refetch only the link set, after a mutation.
    async fn refresh_links(&self) -> Result<()> {
        let links = self.store.list_links(self.owner).await?;
        if let Ok(mut guard) = self.snapshot.write() {
            guard.links = links;
        }
        Ok(())
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.snapshot.read().map(|s| s.entries.clone()).unwrap_or_default()
    }

    pub fn links(&self) -> Vec<Link> {
        self.snapshot.read().map(|s| s.links.clone()).unwrap_or_default()
    }

    /// Badge count for an entry card.
    pub fn link_count_for(&self, entry_id: EntryId) -> usize {
        self.snapshot
            .read()
            .map(|s| count_links_touching(entry_id, &s.links))
            .unwrap_or(0)
    }

    /// Links touching an entry with the other endpoint resolved.
    /// Links whose other endpoint is missing from the loaded set are
    /// omitted, never an error.
    pub fn linked_entries(&self, entry_id: EntryId) -> Vec<(Link, Entry)> {
        let Ok(snapshot) = self.snapshot.read() else {
            return Vec::new();
        };
        links_touching(entry_id, &snapshot.links)
            .into_iter()
            .filter_map(|link| {
                resolve_other_endpoint(entry_id, link, &snapshot.entries)
                    .map(|other| (link.clone(), other.clone()))
            })
            .collect()
    }

    /// Candidate links for one entry, over the current snapshot.
    pub fn suggestions_for(&self, entry_id: EntryId) -> Vec<Candidate> {
        let Ok(snapshot) = self.snapshot.read() else {
            return Vec::new();
        };
        let Some(focal) = snapshot.entries.iter().find(|e| e.id == entry_id) else {
            return Vec::new();
        };
        self.engine.suggest(focal, &snapshot.entries, &snapshot.links)
    }

    /// Create a link after the dedup check. Refused with
    /// `DuplicateLink` naming the existing kind if any link already
    /// joins the pair, in either direction. The check is advisory and
    /// client-side only; two sessions racing past it is accepted
    /// behavior at this scale.
    pub async fn create_link(&self, draft: LinkDraft) -> Result<Link> {
        if draft.source == draft.target {
            return Err(JournalError::Validation("self-links are not allowed".into()));
        }

        {
            let snapshot = self
                .snapshot
                .read()
                .map_err(|_| JournalError::Validation("snapshot lock poisoned".into()))?;
            if are_linked(draft.source, draft.target, &snapshot.links) {
                let existing = kind_between(draft.source.id, draft.target.id, &snapshot.links)
                    .unwrap_or(LinkKind::Echoes);
                return Err(JournalError::DuplicateLink {
                    source: draft.source,
                    target: draft.target,
                    existing,
                });
            }
        }

        let link = draft.into_link(self.owner);
        self.store.insert_link(&link).await?;
        self.refresh_links().await?;
        debug!("created link {} ({})", link.id, link.kind);
        Ok(link)
    }

    /// Change a link's kind. A concurrent deletion surfaces as
    /// `LinkNotFound`; the link set is refetched either way so the
    /// stale record disappears from display.
    pub async fn update_link_kind(&self, id: LinkId, kind: LinkKind) -> Result<Link> {
        match self.store.update_link_kind(id, kind).await {
            Ok(link) => {
                self.refresh_links().await?;
                Ok(link)
            }
            Err(JournalError::LinkNotFound(id)) => {
                warn!("link {id} vanished under a kind update, refetching");
                self.refresh_links().await?;
                Err(JournalError::LinkNotFound(id))
            }
            Err(e) => Err(e),
        }
    }

    /// Delete a link. Idempotent on missing: deleting an
    /// already-deleted link succeeds.
    pub async fn delete_link(&self, id: LinkId) -> Result<()> {
        match self.store.delete_link(id).await {
            Ok(()) | Err(JournalError::LinkNotFound(_)) => {
                self.refresh_links().await?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::{EntryBody, EntryKind, EntryRef};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn owner() -> OwnerId {
        Uuid::from_u128(0xCAFE)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(source: EntryRef, target: EntryRef, kind: LinkKind) -> LinkDraft {
        LinkDraft {
            source,
            target,
            kind,
            description: String::new(),
        }
    }

    async fn journal_with_prayer_and_grace() -> (Journal<MemoryStore>, Entry, Entry) {
        let store = Arc::new(MemoryStore::new());
        let prayer = Entry::new(
            owner(),
            date(2024, 1, 1),
            EntryBody::Prayer {
                subject: "guérison Marie".into(),
                person_first_name: Some("Marie".into()),
                answered: false,
            },
        );
        let grace = Entry::new(
            owner(),
            date(2024, 1, 10),
            EntryBody::Grace {
                title: String::new(),
                text: "Marie est guérie".into(),
            },
        );
        store.put_entry(prayer.clone()).unwrap();
        store.put_entry(grace.clone()).unwrap();

        let journal = Journal::new(store, owner());
        assert!(journal.refresh().await.unwrap());
        (journal, prayer, grace)
    }

    #[tokio::test]
    async fn duplicate_creation_is_refused_naming_the_existing_kind() {
        let (journal, prayer, grace) = journal_with_prayer_and_grace().await;

        journal
            .create_link(draft(prayer.entry_ref(), grace.entry_ref(), LinkKind::Answers))
            .await
            .unwrap();
        let before = journal.links().len();

        // Reversed direction, different kind: still the same pair.
        let err = journal
            .create_link(draft(grace.entry_ref(), prayer.entry_ref(), LinkKind::Echoes))
            .await
            .unwrap_err();
        match err {
            JournalError::DuplicateLink { existing, .. } => {
                assert_eq!(existing, LinkKind::Answers)
            }
            other => panic!("expected DuplicateLink, got {other:?}"),
        }
        assert_eq!(journal.links().len(), before);
    }

    #[tokio::test]
    async fn successful_mutations_refresh_the_link_set() {
        let (journal, prayer, grace) = journal_with_prayer_and_grace().await;

        let link = journal
            .create_link(draft(prayer.entry_ref(), grace.entry_ref(), LinkKind::Answers))
            .await
            .unwrap();
        assert_eq!(journal.link_count_for(prayer.id), 1);

        journal
            .update_link_kind(link.id, LinkKind::Echoes)
            .await
            .unwrap();
        assert_eq!(journal.links()[0].kind, LinkKind::Echoes);

        journal.delete_link(link.id).await.unwrap();
        assert_eq!(journal.link_count_for(prayer.id), 0);
    }

    #[tokio::test]
    async fn delete_is_idempotent_on_missing() {
        let (journal, _, _) = journal_with_prayer_and_grace().await;
        journal.delete_link(Uuid::now_v7()).await.unwrap();
    }

    #[tokio::test]
    async fn updating_a_vanished_link_reports_not_found() {
        let (journal, _, _) = journal_with_prayer_and_grace().await;
        let err = journal
            .update_link_kind(Uuid::now_v7(), LinkKind::Echoes)
            .await
            .unwrap_err();
        assert!(matches!(err, JournalError::LinkNotFound(_)));
    }

    #[tokio::test]
    async fn self_link_creation_is_rejected() {
        let (journal, prayer, _) = journal_with_prayer_and_grace().await;
        let err = journal
            .create_link(draft(prayer.entry_ref(), prayer.entry_ref(), LinkKind::Echoes))
            .await
            .unwrap_err();
        assert!(matches!(err, JournalError::Validation(_)));
    }

    #[tokio::test]
    async fn linked_entries_skip_dangling_references() {
        let (journal, prayer, grace) = journal_with_prayer_and_grace().await;
        journal
            .create_link(draft(prayer.entry_ref(), grace.entry_ref(), LinkKind::Answers))
            .await
            .unwrap();

        // A second link whose other endpoint was never loaded.
        let ghost = EntryRef::new(Uuid::now_v7(), EntryKind::Encounter);
        journal
            .create_link(draft(prayer.entry_ref(), ghost, LinkKind::Echoes))
            .await
            .unwrap();

        // Both links touch the prayer, only the resolvable one renders.
        assert_eq!(journal.link_count_for(prayer.id), 2);
        let resolved = journal.linked_entries(prayer.id);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].1.id, grace.id);
    }

    #[tokio::test]
    async fn suggestions_run_over_the_snapshot() {
        let (journal, prayer, grace) = journal_with_prayer_and_grace().await;

        let out = journal.suggestions_for(prayer.id);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].target, grace.entry_ref());

        // Once linked, the pair disappears from suggestions.
        journal
            .create_link(draft(prayer.entry_ref(), grace.entry_ref(), LinkKind::Answers))
            .await
            .unwrap();
        assert!(journal.suggestions_for(prayer.id).is_empty());
    }

    #[tokio::test]
    async fn stale_refresh_results_are_discarded() {
        let (journal, _, _) = journal_with_prayer_and_grace().await;

        // A fetch that started first but lands after a newer one began.
        let stale = journal.begin_refresh();
        let current = journal.begin_refresh();

        assert!(!journal.install(stale, Snapshot::default()));
        assert!(journal.install(current, Snapshot::default()));
    }
}
