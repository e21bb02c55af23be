use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Type alias for entry identifiers
pub type EntryId = Uuid;

/// Type alias for link identifiers
pub type LinkId = Uuid;

/// Type alias for owner (user) identifiers
pub type OwnerId = Uuid;

/// The five journal entry categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A received grace. "Marie est guérie."
    Grace,

    /// A prayer intention, possibly for a named person.
    Prayer,

    /// A scripture passage received on a given date.
    Scripture,

    /// A prophetic / knowledge word, awaiting fulfilment.
    Word,

    /// A missionary encounter.
    Encounter,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Grace => "grace",
            EntryKind::Prayer => "prayer",
            EntryKind::Scripture => "scripture",
            EntryKind::Word => "word",
            EntryKind::Encounter => "encounter",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "grace" => Some(EntryKind::Grace),
            "prayer" => Some(EntryKind::Prayer),
            "scripture" => Some(EntryKind::Scripture),
            "word" => Some(EntryKind::Word),
            "encounter" => Some(EntryKind::Encounter),
            _ => None,
        }
    }

    pub fn all() -> [EntryKind; 5] {
        [
            EntryKind::Grace,
            EntryKind::Prayer,
            EntryKind::Scripture,
            EntryKind::Word,
            EntryKind::Encounter,
        ]
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant-specific content of an entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryBody {
    Grace {
        title: String,
        text: String,
    },
    Prayer {
        subject: String,
        person_first_name: Option<String>,
        answered: bool,
    },
    Scripture {
        /// Bible reference, e.g. "Jn 11, 1-45".
        reference: String,
        full_text: String,
    },
    Word {
        text: String,
        fulfilled: bool,
    },
    Encounter {
        person: String,
        notes: String,
    },
}

/// One user-recorded spiritual event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    /// Unique identifier. UUIDv7 for time-sortability.
    /// Not guaranteed unique across the five collections in the
    /// surrounding schema, hence endpoints carry the kind too.
    pub id: EntryId,

    /// Owning user. Row-level security at the data layer is the real
    /// enforcement; this field is informational here.
    pub owner: OwnerId,

    /// Calendar date the spiritual event is anchored to. For scripture
    /// entries this is the date the passage was received.
    /// None means a malformed record; the suggestion engine skips it.
    pub date: Option<NaiveDate>,

    /// Variant-specific content.
    pub body: EntryBody,

    /// When this record was created.
    pub created_at: DateTime<Utc>,
}

impl Entry {
    pub fn new(owner: OwnerId, date: NaiveDate, body: EntryBody) -> Self {
        Entry {
            id: Uuid::now_v7(),
            owner,
            date: Some(date),
            body,
            created_at: Utc::now(),
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self.body {
            EntryBody::Grace { .. } => EntryKind::Grace,
            EntryBody::Prayer { .. } => EntryKind::Prayer,
            EntryBody::Scripture { .. } => EntryKind::Scripture,
            EntryBody::Word { .. } => EntryKind::Word,
            EntryBody::Encounter { .. } => EntryKind::Encounter,
        }
    }

    /// Endpoint reference for this entry.
    pub fn entry_ref(&self) -> EntryRef {
        EntryRef {
            id: self.id,
            kind: self.kind(),
        }
    }

    /// Main display text, with the per-variant fallback order used for
    /// keyword matching: graces fall back from text to title, prayers
    /// from subject to the person's first name, scripture from the full
    /// text to the reference, encounters from notes to the person.
    pub fn display_text(&self) -> &str {
        match &self.body {
            EntryBody::Grace { title, text } => {
                if text.is_empty() { title } else { text }
            }
            EntryBody::Prayer {
                subject,
                person_first_name,
                ..
            } => {
                if subject.is_empty() {
                    person_first_name.as_deref().unwrap_or("")
                } else {
                    subject.as_str()
                }
            }
            EntryBody::Scripture {
                reference,
                full_text,
            } => {
                if full_text.is_empty() { reference } else { full_text }
            }
            EntryBody::Word { text, .. } => text,
            EntryBody::Encounter { person, notes } => {
                if notes.is_empty() { person } else { notes }
            }
        }
    }

    /// Anchor date, if the record carries one.
    pub fn display_date(&self) -> Option<NaiveDate> {
        self.date
    }
}

/// Link endpoint: id plus kind. Both are compared when matching
/// endpoints because ids are only unique within a collection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct EntryRef {
    pub id: EntryId,
    pub kind: EntryKind,
}

impl EntryRef {
    pub fn new(id: EntryId, kind: EntryKind) -> Self {
        EntryRef { id, kind }
    }
}

/// The closed set of relationship semantics between two entries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// Prayer → grace. The grace answers the prayer.
    Answers,

    /// Word → any. The later event fulfils the word.
    Fulfills,

    /// Grace → prayer. The grace flows from the prayer.
    FlowsFrom,

    /// Scripture → any. The passage sheds light on a nearby event.
    Illuminates,

    /// Manual pairing with no stronger claim than resonance.
    Echoes,
}

impl LinkKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LinkKind::Answers => "answers",
            LinkKind::Fulfills => "fulfills",
            LinkKind::FlowsFrom => "flows_from",
            LinkKind::Illuminates => "illuminates",
            LinkKind::Echoes => "echoes",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "answers" => Some(LinkKind::Answers),
            "fulfills" => Some(LinkKind::Fulfills),
            "flows_from" => Some(LinkKind::FlowsFrom),
            "illuminates" => Some(LinkKind::Illuminates),
            "echoes" => Some(LinkKind::Echoes),
            _ => None,
        }
    }
}

impl std::fmt::Display for LinkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed, typed relationship between two entries.
///
/// Stored directed — the direction carries the semantic ("which entry
/// answers the other") — but adjacency queries ignore it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    /// Unique identifier. UUIDv7.
    pub id: LinkId,

    /// Owning user.
    pub owner: OwnerId,

    /// Source endpoint.
    pub source: EntryRef,

    /// Target endpoint.
    pub target: EntryRef,

    /// What this relationship means.
    pub kind: LinkKind,

    /// Human-readable summary, free text.
    pub description: String,

    /// When this link was created.
    pub created_at: DateTime<Utc>,
}

impl Link {
    pub fn new(
        owner: OwnerId,
        source: EntryRef,
        target: EntryRef,
        kind: LinkKind,
        description: String,
    ) -> Self {
        Link {
            id: Uuid::now_v7(),
            owner,
            source,
            target,
            kind,
            description,
            created_at: Utc::now(),
        }
    }

    /// Validate the link before insertion.
    pub fn validate(&self) -> Result<(), String> {
        if self.source == self.target {
            return Err("Self-links are not allowed".to_string());
        }
        Ok(())
    }

    /// True if either endpoint carries this entry id.
    pub fn touches(&self, entry_id: EntryId) -> bool {
        self.source.id == entry_id || self.target.id == entry_id
    }
}

/// A not-yet-created link, as produced by the workshop or by accepting
/// a suggestion. Turned into a [`Link`] once the owner is known.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkDraft {
    pub source: EntryRef,
    pub target: EntryRef,
    pub kind: LinkKind,
    pub description: String,
}

impl LinkDraft {
    pub fn into_link(self, owner: OwnerId) -> Link {
        Link::new(owner, self.source, self.target, self.kind, self.description)
    }
}
