//! Example: heuristic link suggestions over a month of entries
//!
//! Run with: cargo run --example suggestions

use chrono::NaiveDate;
use relecture_core::*;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn main() {
    env_logger::init();

    let owner = Uuid::now_v7();

    println!("🌿 Relecture suggestion engine\n");

    let prayer = Entry::new(
        owner,
        date(2024, 3, 1),
        EntryBody::Prayer {
            subject: "guérison de Marie".into(),
            person_first_name: Some("Marie".into()),
            answered: false,
        },
    );
    let entries = vec![
        prayer.clone(),
        Entry::new(
            owner,
            date(2024, 3, 9),
            EntryBody::Grace {
                title: String::new(),
                text: "Marie est guérie".into(),
            },
        ),
        Entry::new(
            owner,
            date(2024, 3, 25),
            EntryBody::Grace {
                title: String::new(),
                text: "Une paix inattendue".into(),
            },
        ),
        Entry::new(
            owner,
            date(2024, 3, 5),
            EntryBody::Scripture {
                reference: "Jn 11, 1-45".into(),
                full_text: "La résurrection de Lazare".into(),
            },
        ),
    ];

    let engine = SuggestionEngine::new();
    let candidates = engine.suggest(&prayer, &entries, &[]);

    println!("{} candidate(s) for the prayer:\n", candidates.len());
    for candidate in &candidates {
        let strength = match candidate.strength {
            Strength::Strong => "forte",
            Strength::Possible => "possible",
        };
        println!(
            "  [{}] {} → {}",
            strength, candidate.kind, candidate.rationale
        );
    }
}
