use crate::types::{EntryRef, LinkKind};
use std::fmt;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, JournalError>;

#[derive(Debug)]
pub enum JournalError {
    /// Network or auth failure reaching the data store. Surfaced as a
    /// generic "could not load/save" banner; never retried here.
    Transport(String),

    /// Mutation against a link that no longer exists, e.g. deleted by a
    /// concurrent session. Callers refetch after seeing this.
    LinkNotFound(Uuid),

    /// Creation refused because a link already joins the pair. The
    /// existing kind is named so the user understands the refusal.
    DuplicateLink {
        source: EntryRef,
        target: EntryRef,
        existing: LinkKind,
    },

    Validation(String),
}

// Hand-written instead of `#[derive(thiserror::Error)]`: thiserror treats
// any field named `source` as the error source and requires it to
// implement `Error`, but `DuplicateLink.source` is an `EntryRef` endpoint,
// not a cause.
impl fmt::Display for JournalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JournalError::Transport(msg) => write!(f, "transport error: {msg}"),
            JournalError::LinkNotFound(id) => write!(f, "link not found: {id}"),
            JournalError::DuplicateLink { existing, .. } => write!(
                f,
                "a link of type {existing} already exists between these elements"
            ),
            JournalError::Validation(msg) => write!(f, "validation error: {msg}"),
        }
    }
}

impl std::error::Error for JournalError {}
