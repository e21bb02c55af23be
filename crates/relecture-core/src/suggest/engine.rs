use crate::links::are_linked;
use crate::suggest::{Candidate, Strength, SuggestConfig, SuggestionRule};
use crate::types::{Entry, Link};
use log::debug;

/// Walks the cross-product of one focal entry against the owner's
/// entry set and collects rule matches. No I/O, cannot fail.
pub struct SuggestionEngine {
    config: SuggestConfig,
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionEngine {
    pub fn new() -> Self {
        Self {
            config: SuggestConfig::default(),
        }
    }

    pub fn with_config(config: SuggestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SuggestConfig {
        &self.config
    }

    /// Candidate links for `focal`, strong candidates first, discovery
    /// order preserved within a strength class (no secondary sort).
    ///
    /// Pairs that already have a link are filtered out here, for every
    /// caller. Entries without a date cost one skipped comparison; a
    /// dateless focal entry yields no candidates at all.
    pub fn suggest(&self, focal: &Entry, entries: &[Entry], links: &[Link]) -> Vec<Candidate> {
        let Some(focal_date) = focal.date else {
            debug!("focal entry {} has no date, skipping suggestion scan", focal.id);
            return Vec::new();
        };
        let focal_ref = focal.entry_ref();

        let mut candidates = Vec::new();
        for other in entries {
            if other.id == focal.id {
                continue;
            }
            let Some(other_date) = other.date else {
                debug!("entry {} has no date, skipping comparison", other.id);
                continue;
            };
            if are_linked(focal_ref, other.entry_ref(), links) {
                continue;
            }

            let signed_days = (other_date - focal_date).num_days();
            for rule in SuggestionRule::all() {
                if let Some(candidate) = rule.evaluate(focal, other, signed_days, &self.config) {
                    candidates.push(candidate);
                }
            }
        }

        // Vec::sort_by_key is stable: strong first, discovery order kept
        // within each class.
        candidates.sort_by_key(|c| match c.strength {
            Strength::Strong => 0u8,
            Strength::Possible => 1u8,
        });

        debug!(
            "suggestion scan for {}: {} candidates over {} entries",
            focal.id,
            candidates.len(),
            entries.len()
        );
        candidates
    }
}
