use entity_collections::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Person {
    id: u32,
    name: String,
}

impl Entity for Person {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

fn person(id: u32, name: &str) -> Person {
    Person {
        id,
        name: name.to_string(),
    }
}

fn roster() -> EntityVec<Person> {
    EntityVec::from(vec![
        person(1, "ada"),
        person(2, "grace"),
        person(3, "edsger"),
    ])
}

#[test]
fn set_then_get_returns_the_new_entity() {
    let mut v = roster();
    v.set(1, person(9, "alan")).unwrap();
    assert_eq!(v.get(1), Some(&person(9, "alan")));
}

#[test]
fn push_and_remove_at_change_len_by_one() {
    let mut v = roster();
    let before = v.len();
    v.push(person(4, "barbara"));
    assert_eq!(v.len(), before + 1);
    v.remove_at(0).unwrap();
    assert_eq!(v.len(), before);
}

#[test]
fn find_by_id_prefers_lowest_index_among_duplicates() {
    let mut v = roster();
    v.push(person(2, "imposter"));
    assert_eq!(v.find_by_id(&2), Some(&person(2, "grace")));
    assert_eq!(v.find_by_id(&42), None);
}

#[test]
fn removing_a_missing_entity_errors_and_leaves_the_roster_intact() {
    let mut v = roster();
    let result = v.remove(&person(42, "nobody"));
    assert!(matches!(result, Err(EntityError::NotFound(_))));
    assert_eq!(v.ids(), vec![1, 2, 3]);
}

#[test]
fn slice_scenario() {
    let v = roster();
    assert_eq!(
        v.slice(1, 3).unwrap(),
        &[person(2, "grace"), person(3, "edsger")]
    );
    assert!(matches!(
        v.slice(0, 5),
        Err(EntityError::RangeOutOfBounds { .. })
    ));
}

#[test]
fn filter_then_map_commutes_with_map_then_filter() {
    // The predicate and transform commute: both look only at the id, which
    // the transform preserves. Equal results mean no incidental reordering.
    let v = roster();
    let filtered_then_mapped: Vec<u32> = v.filtered(|p| p.id % 2 == 1).mapped(|p| p.id * 10);
    let mapped_then_filtered: Vec<u32> = v
        .mapped(|p| p.id * 10)
        .into_iter()
        .filter(|id| (id / 10) % 2 == 1)
        .collect();
    assert_eq!(filtered_then_mapped, mapped_then_filtered);
}

#[test]
fn cursor_removal_mid_traversal() {
    let mut v = roster();
    let mut cursor = v.cursor();
    while let Some(p) = cursor.next() {
        if p.id == 2 {
            cursor.remove();
        }
    }
    assert_eq!(v.ids(), vec![1, 3]);
}

#[test]
fn keyed_put_then_get_round_trips() {
    let mut m: EntityMap<String, Person> = EntityMap::new();
    m.insert("ada".to_string(), person(1, "ada"));
    assert_eq!(m.get(&"ada".to_string()), Some(&person(1, "ada")));
}

#[test]
fn keyed_remove_absent_key_errors() {
    let mut m: EntityMap<String, Person> = EntityMap::new();
    assert!(matches!(
        m.remove(&"ghost".to_string()),
        Err(EntityError::NotFound(_))
    ));
}

#[test]
fn keyed_remove_if_equal_mismatch_leaves_mapping() {
    let mut m: EntityMap<String, Person> = EntityMap::new();
    m.insert("ada".to_string(), person(1, "ada"));
    assert!(!m.remove_if_equal(&"ada".to_string(), &person(1, "not ada")));
    assert_eq!(m.get(&"ada".to_string()), Some(&person(1, "ada")));
}

#[test]
fn keyed_compute_if_absent_invokes_producer_once() {
    let mut m: EntityMap<String, Person> = EntityMap::new();
    let mut calls = 0;
    for _ in 0..2 {
        m.compute_if_absent("ada".to_string(), |_| {
            calls += 1;
            Some(person(1, "ada"))
        });
    }
    assert_eq!(calls, 1);
}

#[test]
fn keyed_merge_on_absent_key_stores_directly() {
    let mut m: EntityMap<String, Person> = EntityMap::new();
    let merged = m.merge("ada".to_string(), person(1, "ada"), |_, _| {
        panic!("remapper must not run for an absent key")
    });
    assert_eq!(merged, Some(&person(1, "ada")));
}

#[test]
fn keyed_compute_if_present_none_removes_the_key() {
    let mut m: EntityMap<String, Person> = EntityMap::new();
    m.insert("a".to_string(), person(1, "ada"));
    assert_eq!(m.compute_if_present("a".to_string(), |_, _| None), None);
    assert!(!m.contains_key(&"a".to_string()));
}

#[test]
fn ordered_container_serde_round_trip() {
    let v = roster();
    let json = serde_json::to_string(&v).unwrap();
    let back: EntityVec<Person> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, v);
    // Transparent representation: serializes as a bare array.
    assert!(json.starts_with('['));
}

#[test]
fn keyed_container_serde_round_trip() {
    let mut m: EntityMap<String, Person> = EntityMap::new();
    m.insert("ada".to_string(), person(1, "ada"));
    m.insert("grace".to_string(), person(2, "grace"));
    let json = serde_json::to_string(&m).unwrap();
    let back: EntityMap<String, Person> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, m);
}

#[test]
fn deterministic_hashing_helpers() {
    let mut seen: HashSet<u64> = HashSet::new();
    seen.insert(hash_str_of("ada"));
    assert!(seen.contains(&hash_str_of("ada")));
    assert!(!seen.contains(&hash_str_of("grace")));

    let mut by_name: HashMap<u64, Person> = HashMap::new();
    by_name.insert(hash_str_of("ada"), person(1, "ada"));
    assert_eq!(by_name.get(&hash_str_of("ada")), Some(&person(1, "ada")));
}

fn hash_str_of(name: &str) -> u64 {
    entity_collections::hashing::hash_str(name)
}
