pub mod types;
pub mod error;
pub mod links;
pub mod suggest;
pub mod workshop;
pub mod store;
pub mod service;

pub use error::{JournalError, Result};
pub use types::*;
pub use links::{
    are_linked, count_links_touching, kind_between, links_touching, resolve_other_endpoint,
    LinkIndex,
};
pub use suggest::{Candidate, Strength, SuggestConfig, SuggestionEngine, SuggestionRule};
pub use workshop::{WorkshopEffect, WorkshopEvent, WorkshopState};
pub use store::{JournalStore, MemoryStore};
pub use service::{Journal, Snapshot};
