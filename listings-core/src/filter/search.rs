//! Search-as-a-filter: relevance ranking over the structural survivors.

use crate::record::Record;

/// Keep only records matching `query` and order them by relevance:
///
/// 1. name starts with the query
/// 2. name contains the query elsewhere
/// 3. secondary text (venue, restaurant) contains the query
///
/// Matching is case-insensitive. Within the second tier, matches at the
/// start of a word come before matches inside a word; otherwise the input
/// order is kept. A blank query leaves `records` untouched.
pub fn rank_by_relevance<R: Record>(records: Vec<R>, query: &str) -> Vec<R> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return records;
    }

    let mut prefix = Vec::new();
    let mut word_start = Vec::new();
    let mut infix = Vec::new();
    let mut secondary = Vec::new();

    for record in records {
        let name = record.name().to_lowercase();

        if name.starts_with(&query) {
            prefix.push(record);
        } else if name.contains(&query) {
            if matches_at_word_start(&name, &query) {
                word_start.push(record);
            } else {
                infix.push(record);
            }
        } else if record
            .secondary_text()
            .is_some_and(|text| text.to_lowercase().contains(&query))
        {
            secondary.push(record);
        }
    }

    prefix
        .into_iter()
        .chain(word_start)
        .chain(infix)
        .chain(secondary)
        .collect()
}

fn matches_at_word_start(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(i, _)| {
        haystack[..i]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Item;

    fn names(records: &[Item]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn three_tier_ordering() {
        let records = vec![
            Item::named("1", "Apple Show"),
            Item::named("2", "Pineapple Fest"),
            Item::named("3", "Grape and Apple"),
        ];

        let ranked = rank_by_relevance(records, "apple");

        assert_eq!(
            names(&ranked),
            vec!["Apple Show", "Grape and Apple", "Pineapple Fest"]
        );
    }

    #[test]
    fn secondary_matches_come_last() {
        let records = vec![
            Item::named("1", "Open Mic").with_secondary("The Apple Lounge"),
            Item::named("2", "Applesauce Social"),
            Item::named("3", "Jazz Night").with_secondary("Shed"),
        ];

        let ranked = rank_by_relevance(records, "APPLE");

        assert_eq!(names(&ranked), vec!["Applesauce Social", "Open Mic"]);
    }

    #[test]
    fn name_match_wins_over_secondary_match() {
        let records = vec![
            Item::named("1", "Big Apple").with_secondary("Apple Hall"),
        ];

        let ranked = rank_by_relevance(records, "apple");
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn non_matching_records_are_discarded() {
        let records = vec![Item::named("1", "Rodeo"), Item::named("2", "Opera")];
        assert!(rank_by_relevance(records, "jazz").is_empty());
    }

    #[test]
    fn blank_query_is_identity() {
        let records = vec![Item::named("1", "Rodeo"), Item::named("2", "Opera")];
        let ranked = rank_by_relevance(records.clone(), "   ");
        assert_eq!(ranked, records);
    }

    #[test]
    fn word_start_detection() {
        assert!(matches_at_word_start("grape and apple", "apple"));
        assert!(matches_at_word_start("grape-apple", "apple"));
        assert!(!matches_at_word_start("pineapple", "apple"));
    }
}
