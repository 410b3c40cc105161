use crate::model::Item;

/// Case-insensitive substring filter over item names, preserving the input
/// order. Purely local — never touches the store. An empty term matches
/// everything.
pub fn filter(items: &[Item], term: &str) -> Vec<Item> {
    if term.is_empty() {
        return items.to_vec();
    }

    let term_lower = term.to_lowercase();
    items
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&term_lower))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pantry() -> Vec<Item> {
        vec![
            Item::new("apple", 3),
            Item::new("banana", 2),
            Item::new("grape", 1),
        ]
    }

    #[test]
    fn matches_substring_anywhere_in_the_name() {
        let names: Vec<_> = filter(&pantry(), "ap")
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["apple", "grape"]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let matched = filter(&pantry(), "APPLE");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "apple");
    }

    #[test]
    fn empty_term_returns_everything_in_order() {
        let names: Vec<_> = filter(&pantry(), "").into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["apple", "banana", "grape"]);
    }

    #[test]
    fn no_match_yields_empty_view() {
        assert!(filter(&pantry(), "kiwi").is_empty());
    }
}
