#[cfg(test)]
mod tests {
    use order_interpreter::matching::{levenshtein_distance, similarity};
    use order_interpreter::{find_matching_menu_items, MenuItem, OrderedItem};

    fn item(name: &str) -> OrderedItem {
        OrderedItem {
            name: name.to_string(),
            quantity: 1,
            price: None,
        }
    }

    fn menu(entries: &[(&str, &str)]) -> Vec<MenuItem> {
        entries
            .iter()
            .map(|(id, name)| MenuItem {
                id: id.to_string(),
                name: name.to_string(),
                price: 9.99,
            })
            .collect()
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let catalog = menu(&[("1", "Cheeseburger")]);
        let result = find_matching_menu_items(&[item("cheeseburger")], &catalog);

        assert_eq!(result.matched.len(), 1);
        assert_eq!(result.matched[0].id, "1");
        assert!(result.unmatched.is_empty());
    }

    #[test]
    fn test_exact_beats_substring() {
        // The substring entry comes first in catalog order, but the exact
        // tier is exhausted over the whole catalog before substring runs
        let catalog = menu(&[("1", "Burger Deluxe"), ("2", "Burger")]);
        let result = find_matching_menu_items(&[item("Burger")], &catalog);

        assert_eq!(result.matched.len(), 1);
        assert_eq!(result.matched[0].id, "2");
    }

    #[test]
    fn test_substring_beats_fuzzy() {
        // "Cheesy" is a close fuzzy neighbor and first in catalog order,
        // but the substring tier resolves to "Cheeseburger" before the
        // fuzzy tier is consulted
        let catalog = menu(&[("1", "Cheesy"), ("2", "Cheeseburger")]);
        let result = find_matching_menu_items(&[item("Cheese")], &catalog);

        assert_eq!(result.matched.len(), 1);
        assert_eq!(result.matched[0].id, "2");
    }

    #[test]
    fn test_substring_match_works_in_both_directions() {
        let catalog = menu(&[("1", "Caesar Salad")]);

        // Candidate contains entry name
        let result = find_matching_menu_items(&[item("Large Caesar Salad")], &catalog);
        assert_eq!(result.matched.len(), 1);

        // Entry name contains candidate
        let result = find_matching_menu_items(&[item("Caesar")], &catalog);
        assert_eq!(result.matched.len(), 1);
    }

    #[test]
    fn test_fuzzy_match_resolves_typo() {
        let catalog = menu(&[("1", "Cheeseburger")]);
        let result = find_matching_menu_items(&[item("Cheesburger")], &catalog);

        // distance 1 over length 12: similarity ~ 0.92
        assert_eq!(result.matched.len(), 1);
        assert_eq!(result.matched[0].id, "1");
    }

    #[test]
    fn test_fuzzy_threshold_is_strict() {
        // 3 substitutions over length 10: similarity exactly 0.7, which
        // must not clear the strict > 0.7 threshold
        assert_eq!(similarity("abcdefghij", "abcdefgxyz"), 0.7);
        let catalog = menu(&[("1", "abcdefghij")]);
        let result = find_matching_menu_items(&[item("abcdefgxyz")], &catalog);
        assert!(result.matched.is_empty());
        assert_eq!(result.unmatched, vec!["abcdefgxyz".to_string()]);

        // 2 substitutions over length 10: similarity 0.8, which passes
        assert_eq!(similarity("abcdefghij", "abcdefghyz"), 0.8);
        let result = find_matching_menu_items(&[item("abcdefghyz")], &catalog);
        assert_eq!(result.matched.len(), 1);
    }

    #[test]
    fn test_fuzzy_takes_first_entry_clearing_threshold() {
        // Both entries clear the threshold; the second scores higher but
        // the first in catalog order wins (no best-of-N ranking)
        let catalog = menu(&[("1", "Cheeseburgers"), ("2", "Cheeseburger")]);
        let result = find_matching_menu_items(&[item("Cheesburgr")], &catalog);

        assert_eq!(result.matched.len(), 1);
        assert_eq!(result.matched[0].id, "1");
    }

    #[test]
    fn test_unmatched_name_reported_verbatim() {
        let catalog = menu(&[("1", "Pad Thai")]);
        let result = find_matching_menu_items(&[item("Dragon Roll")], &catalog);

        assert!(result.matched.is_empty());
        assert_eq!(result.unmatched, vec!["Dragon Roll".to_string()]);
    }

    #[test]
    fn test_empty_catalog_leaves_everything_unmatched() {
        let result = find_matching_menu_items(&[item("Burger"), item("Fries")], &[]);

        assert!(result.matched.is_empty());
        assert_eq!(
            result.unmatched,
            vec!["Burger".to_string(), "Fries".to_string()]
        );
    }

    #[test]
    fn test_matching_is_total() {
        let catalog = menu(&[("1", "Cheeseburger"), ("2", "Caesar Salad"), ("3", "Fries")]);
        let candidates = vec![
            item("Cheeseburger"),
            item("Ceasar Salad"),
            item("Dragon Roll"),
            item("fries"),
            item("Onion Rings"),
        ];
        let result = find_matching_menu_items(&candidates, &catalog);

        assert_eq!(
            result.matched.len() + result.unmatched.len(),
            candidates.len()
        );
    }

    #[test]
    fn test_empty_candidate_list() {
        let catalog = menu(&[("1", "Cheeseburger")]);
        let result = find_matching_menu_items(&[], &catalog);

        assert!(result.matched.is_empty());
        assert!(result.unmatched.is_empty());
    }

    #[test]
    fn test_levenshtein_symmetry() {
        for (a, b) in [
            ("kitten", "sitting"),
            ("Cheesburger", "Cheeseburger"),
            ("", "abc"),
            ("flaw", "lawn"),
        ] {
            assert_eq!(levenshtein_distance(a, b), levenshtein_distance(b, a));
        }
    }

    #[test]
    fn test_typo_similarity_near_091() {
        // A one-character typo on a 12-character name
        let s = similarity("cheesburger", "cheeseburger");
        assert!((s - 11.0 / 12.0).abs() < 1e-9);
        assert!(s > 0.7);
    }

    #[test]
    fn test_duplicate_candidates_each_get_an_outcome() {
        let catalog = menu(&[("1", "Fries")]);
        let result = find_matching_menu_items(&[item("Fries"), item("Fries")], &catalog);

        assert_eq!(result.matched.len(), 2);
        assert!(result.unmatched.is_empty());
    }
}
