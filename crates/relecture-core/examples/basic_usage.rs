//! Example: journal snapshot, manual link, bidirectional queries
//!
//! Run with: cargo run --example basic_usage

use chrono::NaiveDate;
use relecture_core::*;
use std::sync::Arc;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let owner = Uuid::now_v7();
    let store = Arc::new(MemoryStore::new());

    println!("📖 Relecture basic usage\n");

    let prayer = Entry::new(
        owner,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        EntryBody::Prayer {
            subject: "guérison de Marie".into(),
            person_first_name: Some("Marie".into()),
            answered: false,
        },
    );
    let grace = Entry::new(
        owner,
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        EntryBody::Grace {
            title: "Guérison".into(),
            text: "Marie est guérie".into(),
        },
    );
    store.put_entry(prayer.clone())?;
    store.put_entry(grace.clone())?;

    let journal = Journal::new(store, owner);
    journal.refresh().await?;

    let link = journal
        .create_link(LinkDraft {
            source: prayer.entry_ref(),
            target: grace.entry_ref(),
            kind: LinkKind::Answers,
            description: "Prière exaucée en dix jours".into(),
        })
        .await?;
    println!("Created link {} ({})", link.id, link.kind);

    // The relation is queried in either direction.
    let links = journal.links();
    println!(
        "are_linked(prayer, grace) = {}",
        are_linked(prayer.entry_ref(), grace.entry_ref(), &links)
    );
    println!(
        "are_linked(grace, prayer) = {}",
        are_linked(grace.entry_ref(), prayer.entry_ref(), &links)
    );
    println!(
        "kind_between = {:?}",
        kind_between(grace.id, prayer.id, &links)
    );
    println!("badge count = {}", journal.link_count_for(prayer.id));

    for (link, other) in journal.linked_entries(prayer.id) {
        println!("  {} → « {} »", link.kind, other.display_text());
    }

    // Attempting the same pair again is refused, naming the kind.
    let refused = journal
        .create_link(LinkDraft {
            source: grace.entry_ref(),
            target: prayer.entry_ref(),
            kind: LinkKind::Echoes,
            description: String::new(),
        })
        .await;
    println!("duplicate attempt: {}", refused.unwrap_err());

    Ok(())
}
