//! Filter properties over hand-built collections

use dexfinder::filter::{FilterCriteria, category_options, filter, matches};
use dexfinder::state::{Book, Pokemon, TypeTag};
use pretty_assertions::assert_eq;

fn pokemon(id: u32, name: &str, types: &[&str]) -> Pokemon {
    Pokemon {
        id,
        name: name.into(),
        weight: 1,
        sprite: None,
        types: types
            .iter()
            .enumerate()
            .map(|(idx, name)| TypeTag {
                slot: idx as u8 + 1,
                name: name.to_string(),
            })
            .collect(),
    }
}

fn book(title: &str, categories: Option<&[&str]>) -> Book {
    Book {
        id: title.into(),
        title: title.into(),
        authors: None,
        description: None,
        categories: categories.map(|tags| tags.iter().map(|tag| tag.to_string()).collect()),
        thumbnail: None,
    }
}

fn dex() -> Vec<Pokemon> {
    vec![
        pokemon(1, "bulbasaur", &["grass", "poison"]),
        pokemon(4, "charmander", &["fire"]),
        pokemon(6, "charizard", &["fire", "flying"]),
        pokemon(7, "squirtle", &["water"]),
        pokemon(16, "pidgey", &["normal", "flying"]),
    ]
}

fn shelf() -> Vec<Book> {
    vec![
        book("Alpha", Some(&["free-ebooks", "Fiction"])),
        book("Beta", None),
        book("Gamma", Some(&["Paid ebooks"])),
        book("Delta", Some(&[])),
        book("Epsilon", Some(&["Fiction"])),
    ]
}

fn criteria_samples() -> Vec<FilterCriteria> {
    vec![
        FilterCriteria::None,
        FilterCriteria::NamePrefix(String::new()),
        FilterCriteria::NamePrefix("ch".into()),
        FilterCriteria::NamePrefix("P".into()),
        FilterCriteria::NamePrefix("zzz".into()),
        FilterCriteria::Category(String::new()),
        FilterCriteria::Category("fire".into()),
        FilterCriteria::Category("flying".into()),
        FilterCriteria::Category("Fiction".into()),
        FilterCriteria::Category("free-ebooks".into()),
    ]
}

#[test]
fn test_filter_is_idempotent() {
    for criteria in criteria_samples() {
        let once = filter(&dex(), &criteria);
        assert_eq!(filter(&once, &criteria), once, "{criteria:?}");

        let once = filter(&shelf(), &criteria);
        assert_eq!(filter(&once, &criteria), once, "{criteria:?}");
    }
}

#[test]
fn test_empty_criteria_is_identity() {
    for criteria in [
        FilterCriteria::None,
        FilterCriteria::NamePrefix(String::new()),
        FilterCriteria::Category(String::new()),
    ] {
        assert_eq!(filter(&dex(), &criteria), dex());
        assert_eq!(filter(&shelf(), &criteria), shelf());
    }
}

#[test]
fn test_result_is_ordered_subsequence() {
    let items = dex();
    for criteria in criteria_samples() {
        let result = filter(&items, &criteria);
        let mut remaining = items.iter();
        for kept in &result {
            assert!(
                remaining.any(|item| item == kept),
                "{criteria:?} reordered or invented {kept:?}"
            );
        }
    }
}

#[test]
fn test_prefix_soundness() {
    let items = dex();
    let criteria = FilterCriteria::NamePrefix("Ch".into());
    let result = filter(&items, &criteria);

    for item in &items {
        let expected = item.name.to_lowercase().starts_with("ch");
        assert_eq!(result.contains(item), expected, "{}", item.name);
    }
}

#[test]
fn test_category_soundness() {
    let books = shelf();
    let result = filter(&books, &FilterCriteria::Category("Fiction".into()));
    let titles: Vec<&str> = result.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Alpha", "Epsilon"]);

    let flying = filter(&dex(), &FilterCriteria::Category("flying".into()));
    let names: Vec<&str> = flying.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["charizard", "pidgey"]);
}

#[test]
fn test_missing_categories_never_match() {
    let beta = book("Beta", None);
    let delta = book("Delta", Some(&[]));
    for tag in ["free-ebooks", "Paid ebooks", "Fiction"] {
        let criteria = FilterCriteria::Category(tag.into());
        assert!(!matches(&beta, &criteria));
        assert!(!matches(&delta, &criteria));
    }
}

#[test]
fn test_filter_does_not_mutate_input() {
    let items = shelf();
    let before = items.clone();
    let _ = filter(&items, &FilterCriteria::Category("Fiction".into()));
    assert_eq!(items, before);
}

#[test]
fn test_category_options_dedup() {
    assert_eq!(
        category_options(&shelf()),
        vec!["Paid ebooks", "free-ebooks", "Fiction"]
    );
    assert_eq!(category_options(&[]), vec!["Paid ebooks", "free-ebooks"]);
}
