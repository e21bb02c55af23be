use crate::suggest::SuggestConfig;
use crate::types::{Entry, EntryBody, EntryRef, LinkKind};
use chrono::NaiveDate;

/// Heuristic confidence of a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strength {
    Strong,
    Possible,
}

/// A suggested, not-yet-created link from the focal entry to `target`
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub target: EntryRef,
    pub kind: LinkKind,
    pub strength: Strength,
    /// User-facing explanation, in the product's language.
    pub rationale: String,
}

/// The type-pair rules. Each is evaluated independently against every
/// (focal, other) pair; a pair may match zero or several rules, and
/// each match yields its own candidate row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionRule {
    /// Prayer → later grace within the answer window.
    PrayerAnswered,

    /// Unfulfilled word → any later entry within the fulfilment window.
    WordFulfilled,

    /// Scripture → any entry within a few days, either direction.
    ScriptureIlluminates,

    /// Grace → earlier prayer it may flow from.
    GraceFlowsFrom,
}

impl SuggestionRule {
    pub fn all() -> [SuggestionRule; 4] {
        [
            SuggestionRule::PrayerAnswered,
            SuggestionRule::WordFulfilled,
            SuggestionRule::ScriptureIlluminates,
            SuggestionRule::GraceFlowsFrom,
        ]
    }

    /// Evaluate this rule for the pair. `signed_days` is
    /// `other.date - focal.date` in days; positive means the other
    /// entry comes after the focal one.
    pub fn evaluate(
        &self,
        focal: &Entry,
        other: &Entry,
        signed_days: i64,
        config: &SuggestConfig,
    ) -> Option<Candidate> {
        let days = signed_days.abs();

        match self {
            SuggestionRule::PrayerAnswered => {
                let EntryBody::Prayer { subject, .. } = &focal.body else {
                    return None;
                };
                let EntryBody::Grace { .. } = &other.body else {
                    return None;
                };
                if signed_days <= 0 || days >= config.answer_window_days {
                    return None;
                }

                let keyword_hit =
                    subject_matches(subject, other.display_text(), config.min_keyword_len);
                let strength = if keyword_hit || days < config.answer_strong_days {
                    Strength::Strong
                } else {
                    Strength::Possible
                };

                Some(Candidate {
                    target: other.entry_ref(),
                    kind: LinkKind::Answers,
                    strength,
                    rationale: format!(
                        "Prière du {}, grâce du {} ({} jours après)",
                        fmt_date(focal.date),
                        fmt_date(other.date),
                        days
                    ),
                })
            }

            SuggestionRule::WordFulfilled => {
                let EntryBody::Word { fulfilled, .. } = &focal.body else {
                    return None;
                };
                if *fulfilled || signed_days <= 0 || days >= config.fulfill_window_days {
                    return None;
                }

                Some(Candidate {
                    target: other.entry_ref(),
                    kind: LinkKind::Fulfills,
                    strength: Strength::Possible,
                    rationale: format!("Parole reçue il y a {days} jours"),
                })
            }

            SuggestionRule::ScriptureIlluminates => {
                let EntryBody::Scripture { reference, .. } = &focal.body else {
                    return None;
                };
                if days >= config.scripture_window_days {
                    return None;
                }

                Some(Candidate {
                    target: other.entry_ref(),
                    kind: LinkKind::Illuminates,
                    strength: Strength::Possible,
                    rationale: format!("{reference} reçu à {days} jours d'écart"),
                })
            }

            SuggestionRule::GraceFlowsFrom => {
                let EntryBody::Grace { .. } = &focal.body else {
                    return None;
                };
                let EntryBody::Prayer { .. } = &other.body else {
                    return None;
                };
                if signed_days >= 0 || days >= config.flows_window_days {
                    return None;
                }

                let strength = if days < config.flows_strong_days {
                    Strength::Strong
                } else {
                    Strength::Possible
                };

                Some(Candidate {
                    target: other.entry_ref(),
                    kind: LinkKind::FlowsFrom,
                    strength,
                    rationale: format!(
                        "Prière du {}, {} jours avant la grâce",
                        fmt_date(other.date),
                        days
                    ),
                })
            }
        }
    }
}

/// True if any whitespace token of the prayer subject strictly longer
/// than `min_len` characters appears, case-insensitively, as a
/// substring of the grace text.
fn subject_matches(subject: &str, text: &str, min_len: usize) -> bool {
    let haystack = text.to_lowercase();
    subject
        .split_whitespace()
        .filter(|w| w.chars().count() > min_len)
        .any(|w| haystack.contains(&w.to_lowercase()))
}

fn fmt_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%d/%m/%Y").to_string(),
        None => "?".to_string(),
    }
}
