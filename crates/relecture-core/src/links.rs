//! Pure queries over an already-fetched link set.
//!
//! Links are stored directed but the relation is queried
//! bidirectionally: "is A linked to B" holds whichever side each entry
//! is on. No function here performs I/O.

use crate::types::{Entry, EntryId, EntryRef, Link, LinkKind};
use std::collections::HashMap;

/// True if any link joins the two endpoints, in either direction.
/// Both id and kind are compared on each side: ids are only unique
/// within a collection, so a bare id match could cross types.
pub fn are_linked(a: EntryRef, b: EntryRef, links: &[Link]) -> bool {
    links
        .iter()
        .any(|l| (l.source == a && l.target == b) || (l.source == b && l.target == a))
}

/// Kind of the first link joining the two ids, in either direction.
/// If duplicate links exist between the pair (dedup-before-insert is
/// advisory, not structural) this returns an arbitrary one; callers
/// must not rely on which.
pub fn kind_between(a: EntryId, b: EntryId, links: &[Link]) -> Option<LinkKind> {
    links
        .iter()
        .find(|l| {
            (l.source.id == a && l.target.id == b) || (l.source.id == b && l.target.id == a)
        })
        .map(|l| l.kind)
}

/// Every link with the entry on either side. Direction is preserved in
/// the returned records so the caller can tell which side the queried
/// entry was on.
pub fn links_touching(entry_id: EntryId, links: &[Link]) -> Vec<&Link> {
    links.iter().filter(|l| l.touches(entry_id)).collect()
}

/// Number of links touching the entry. Badge surfaces need only the
/// count and should not pay for resolving the other endpoints.
pub fn count_links_touching(entry_id: EntryId, links: &[Link]) -> usize {
    links.iter().filter(|l| l.touches(entry_id)).count()
}

/// Entry on the other side of a link known to touch `entry_id`.
/// None means a dangling reference; the caller skips the link rather
/// than failing the whole list.
pub fn resolve_other_endpoint<'a>(
    entry_id: EntryId,
    link: &Link,
    entries: &'a [Entry],
) -> Option<&'a Entry> {
    let other = if link.source.id == entry_id {
        link.target
    } else {
        link.source
    };
    entries
        .iter()
        .find(|e| e.id == other.id && e.kind() == other.kind)
}

/// Adjacency helper over one loaded link set, keyed by unordered id
/// pair. The free functions above scan linearly, which is fine for the
/// documented scale; build this once when issuing many queries against
/// the same set.
pub struct LinkIndex<'a> {
    by_pair: HashMap<(EntryId, EntryId), Vec<&'a Link>>,
    by_entry: HashMap<EntryId, Vec<&'a Link>>,
}

fn pair_key(a: EntryId, b: EntryId) -> (EntryId, EntryId) {
    if a <= b { (a, b) } else { (b, a) }
}

impl<'a> LinkIndex<'a> {
    pub fn build(links: &'a [Link]) -> Self {
        let mut by_pair: HashMap<(EntryId, EntryId), Vec<&'a Link>> = HashMap::new();
        let mut by_entry: HashMap<EntryId, Vec<&'a Link>> = HashMap::new();

        for link in links {
            by_pair
                .entry(pair_key(link.source.id, link.target.id))
                .or_default()
                .push(link);
            by_entry.entry(link.source.id).or_default().push(link);
            if link.target.id != link.source.id {
                by_entry.entry(link.target.id).or_default().push(link);
            }
        }

        Self { by_pair, by_entry }
    }

    pub fn are_linked(&self, a: EntryRef, b: EntryRef) -> bool {
        self.by_pair
            .get(&pair_key(a.id, b.id))
            .map(|ls| {
                ls.iter()
                    .any(|l| (l.source == a && l.target == b) || (l.source == b && l.target == a))
            })
            .unwrap_or(false)
    }

    pub fn kind_between(&self, a: EntryId, b: EntryId) -> Option<LinkKind> {
        self.by_pair
            .get(&pair_key(a, b))
            .and_then(|ls| ls.first())
            .map(|l| l.kind)
    }

    pub fn links_touching(&self, entry_id: EntryId) -> &[&'a Link] {
        self.by_entry
            .get(&entry_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn count_links_touching(&self, entry_id: EntryId) -> usize {
        self.links_touching(entry_id).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntryBody, EntryKind, OwnerId};
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use uuid::Uuid;

    fn owner() -> OwnerId {
        Uuid::now_v7()
    }

    fn grace_ref() -> EntryRef {
        EntryRef::new(Uuid::now_v7(), EntryKind::Grace)
    }

    fn prayer_ref() -> EntryRef {
        EntryRef::new(Uuid::now_v7(), EntryKind::Prayer)
    }

    fn link(source: EntryRef, target: EntryRef, kind: LinkKind) -> Link {
        Link::new(owner(), source, target, kind, String::new())
    }

    #[test]
    fn are_linked_ignores_direction() {
        let a = prayer_ref();
        let b = grace_ref();
        let links = vec![link(a, b, LinkKind::Answers)];

        assert!(are_linked(a, b, &links));
        assert!(are_linked(b, a, &links));
    }

    #[test]
    fn are_linked_compares_kind_not_just_id() {
        let a = prayer_ref();
        let b = grace_ref();
        let links = vec![link(a, b, LinkKind::Answers)];

        // Same id as b, different collection: must not match.
        let impostor = EntryRef::new(b.id, EntryKind::Word);
        assert!(!are_linked(a, impostor, &links));
    }

    #[test]
    fn kind_between_finds_either_direction() {
        let a = prayer_ref();
        let b = grace_ref();
        let c = grace_ref();
        let links = vec![link(a, b, LinkKind::Answers)];

        assert_eq!(kind_between(b.id, a.id, &links), Some(LinkKind::Answers));
        assert_eq!(kind_between(a.id, c.id, &links), None);
    }

    #[test]
    fn links_touching_preserves_direction() {
        let a = prayer_ref();
        let b = grace_ref();
        let c = grace_ref();
        let links = vec![link(a, b, LinkKind::Answers), link(c, a, LinkKind::Echoes)];

        let touching = links_touching(a.id, &links);
        assert_eq!(touching.len(), 2);
        assert_eq!(touching[0].source, a);
        assert_eq!(touching[1].target, a);
        assert_eq!(count_links_touching(a.id, &links), touching.len());
    }

    #[test]
    fn resolve_other_endpoint_skips_dangling() {
        let owner = owner();
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let prayer = Entry::new(
            owner,
            date,
            EntryBody::Prayer {
                subject: "guérison".into(),
                person_first_name: None,
                answered: false,
            },
        );
        let grace = Entry::new(
            owner,
            date,
            EntryBody::Grace {
                title: "Grâce".into(),
                text: "reçue".into(),
            },
        );
        let l = link(prayer.entry_ref(), grace.entry_ref(), LinkKind::Answers);

        let both = vec![prayer.clone(), grace.clone()];
        let resolved = resolve_other_endpoint(prayer.id, &l, &both).unwrap();
        assert_eq!(resolved.id, grace.id);

        // Other endpoint absent from the loaded set: the link is still
        // returned by links_touching, resolution yields None.
        let only_prayer = vec![prayer.clone()];
        let links = vec![l.clone()];
        assert_eq!(links_touching(prayer.id, &links).len(), 1);
        assert!(resolve_other_endpoint(prayer.id, &l, &only_prayer).is_none());
    }

    #[test]
    fn index_agrees_with_linear_scan() {
        let a = prayer_ref();
        let b = grace_ref();
        let c = grace_ref();
        let links = vec![link(a, b, LinkKind::Answers), link(c, a, LinkKind::Echoes)];
        let index = LinkIndex::build(&links);

        assert!(index.are_linked(a, b));
        assert!(index.are_linked(b, a));
        assert!(!index.are_linked(b, c));
        assert_eq!(index.kind_between(b.id, a.id), Some(LinkKind::Answers));
        assert_eq!(
            index.count_links_touching(a.id),
            count_links_touching(a.id, &links)
        );
    }

    fn id_pool() -> Vec<EntryRef> {
        (0..8)
            .map(|i| {
                let kind = EntryKind::all()[i % 5];
                EntryRef::new(Uuid::from_u128(0x1000 + i as u128), kind)
            })
            .collect()
    }

    proptest! {
        #[test]
        fn are_linked_is_symmetric(pairs in proptest::collection::vec((0usize..8, 0usize..8), 0..12)) {
            let pool = id_pool();
            let links: Vec<Link> = pairs
                .iter()
                .filter(|(i, j)| i != j)
                .map(|&(i, j)| link(pool[i], pool[j], LinkKind::Echoes))
                .collect();

            for &a in &pool {
                for &b in &pool {
                    prop_assert_eq!(are_linked(a, b, &links), are_linked(b, a, &links));
                }
            }
        }

        #[test]
        fn count_matches_list_length(pairs in proptest::collection::vec((0usize..8, 0usize..8), 0..12)) {
            let pool = id_pool();
            let links: Vec<Link> = pairs
                .iter()
                .filter(|(i, j)| i != j)
                .map(|&(i, j)| link(pool[i], pool[j], LinkKind::Echoes))
                .collect();

            for &e in &pool {
                prop_assert_eq!(
                    count_links_touching(e.id, &links),
                    links_touching(e.id, &links).len()
                );
            }
        }
    }
}
