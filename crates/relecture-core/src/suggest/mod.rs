//! Suggestion engine: heuristic discovery of candidate links.
//!
//! Given one focal entry and the owner's full entry set, the engine
//! walks the cross-product and applies a small set of type-pair rules
//! (temporal windows plus keyword overlap) to propose links that do
//! not exist yet. Candidates are ranked strong-first; within a
//! strength class discovery order is preserved. Pure and infallible:
//! a malformed record costs one comparison, never the scan.

mod config;
mod engine;
mod rules;


pub use config::SuggestConfig;
pub use engine::SuggestionEngine;
pub use rules::{Candidate, Strength, SuggestionRule};
