//! Store boundary: the five entry collections plus the link collection
//! live in a remote data store; this module defines the seam and an
//! in-memory backend for tests and demos. Owner scoping is ultimately
//! enforced by row-level security at the data layer, not here.

mod memory;
mod traits;

pub use memory::MemoryStore;
pub use traits::JournalStore;
