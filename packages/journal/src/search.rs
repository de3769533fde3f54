use store::Entry;

/// Whether `entry` matches a free-text search.
///
/// Title and content match case-insensitively; the display date matches as a plain
/// substring, so `2024-06` finds everything from June 2024. An empty query matches
/// every entry.
pub fn matches(entry: &Entry, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    entry.title.to_lowercase().contains(&needle)
        || entry.content.to_lowercase().contains(&needle)
        || entry.display_date.contains(query)
}

/// Entries matching `query`, keeping their order.
pub fn filter<'a>(entries: &'a [Entry], query: &str) -> Vec<&'a Entry> {
    entries.iter().filter(|e| matches(e, query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::EntryFields;

    fn entry(title: &str, content: &str, date: &str) -> Entry {
        Entry::from_fields(
            title.to_lowercase(),
            EntryFields {
                title: title.to_string(),
                content: content.to_string(),
                image_url: None,
                display_date: date.to_string(),
            },
            None,
        )
    }

    #[test]
    fn test_matches_title_content_and_date() {
        let e = entry("Silêncio", "Onde as palavras\nnão chegam", "2024-06-01");
        assert!(matches(&e, "SILÊNCIO"));
        assert!(matches(&e, "palavras"));
        assert!(matches(&e, "2024-06"));
        assert!(matches(&e, "   "));
        assert!(!matches(&e, "mar"));
    }

    #[test]
    fn test_filter_keeps_order() {
        let entries = vec![
            entry("Second", "World", "2024-06-02"),
            entry("First", "Hello world", "2024-06-01"),
            entry("Other", "Nothing", "2023-01-01"),
        ];
        let found: Vec<_> = filter(&entries, "world").iter().map(|e| e.title.as_str()).collect();
        assert_eq!(found, vec!["Second", "First"]);
    }
}
