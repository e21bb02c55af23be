//! Two-click pairing flow of the linking workshop, as an explicit
//! state machine instead of a bag of independent flags.
//!
//! Link mode on: the first selected entry is stored, the second one
//! produces a pending `echoes` draft awaiting confirmation. Selecting
//! the stored entry again is a silent no-op — self-links are never
//! produced. All transitions are pure; the only side effect is the
//! returned [`WorkshopEffect`].

use crate::types::{EntryRef, LinkDraft, LinkKind};

/// Current state of the workshop surface
#[derive(Debug, Clone, PartialEq)]
pub enum WorkshopState {
    /// Link mode off, or on with nothing selected yet.
    Idle { link_mode: bool },

    /// First entry stored, waiting for the second click.
    AwaitingSecond { first: EntryRef },

    /// Both entries chosen; the draft awaits user confirmation.
    Confirming { draft: LinkDraft },
}

impl Default for WorkshopState {
    fn default() -> Self {
        WorkshopState::Idle { link_mode: false }
    }
}

/// User interactions driving the workshop
#[derive(Debug, Clone, PartialEq)]
pub enum WorkshopEvent {
    /// The link-mode toggle. Turning it off resets any partial pairing.
    ToggleLinkMode,

    /// A click on an entry card.
    Select(EntryRef),

    /// Confirm the pending draft.
    Confirm,

    /// Dismiss the pending draft.
    Cancel,
}

/// Side effect requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum WorkshopEffect {
    /// Hand the confirmed draft to the journal service for creation.
    CreateLink(LinkDraft),
}

impl WorkshopState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event, returning the next state and the effect to run,
    /// if any.
    pub fn apply(self, event: WorkshopEvent) -> (WorkshopState, Option<WorkshopEffect>) {
        match (self, event) {
            (WorkshopState::Idle { link_mode }, WorkshopEvent::ToggleLinkMode) => {
                (WorkshopState::Idle { link_mode: !link_mode }, None)
            }

            // Toggling off mid-pairing clears the stored selection.
            (_, WorkshopEvent::ToggleLinkMode) => (WorkshopState::Idle { link_mode: false }, None),

            (WorkshopState::Idle { link_mode: true }, WorkshopEvent::Select(first)) => {
                (WorkshopState::AwaitingSecond { first }, None)
            }

            (WorkshopState::AwaitingSecond { first }, WorkshopEvent::Select(second)) => {
                if second == first {
                    // Self-link: silent no-op, keep waiting.
                    (WorkshopState::AwaitingSecond { first }, None)
                } else {
                    let draft = LinkDraft {
                        source: first,
                        target: second,
                        kind: LinkKind::Echoes,
                        description: String::new(),
                    };
                    (WorkshopState::Confirming { draft }, None)
                }
            }

            (WorkshopState::Confirming { draft }, WorkshopEvent::Confirm) => (
                WorkshopState::Idle { link_mode: true },
                Some(WorkshopEffect::CreateLink(draft)),
            ),

            (WorkshopState::Confirming { .. }, WorkshopEvent::Cancel) => {
                (WorkshopState::Idle { link_mode: true }, None)
            }

            // Clicks with link mode off, stray confirms: ignored.
            (state, _) => (state, None),
        }
    }

    /// True when the surface is in pairing mode.
    pub fn link_mode(&self) -> bool {
        !matches!(self, WorkshopState::Idle { link_mode: false })
    }
}
