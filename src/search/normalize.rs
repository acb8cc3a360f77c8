//! Query normalization

/// Punctuation stripped from token boundaries
const PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '"', '\'', '(', ')', '[', ']', '{', '}', '<', '>', '«', '»',
    '-', '–', '—',
];

/// Lowercase, strip boundary punctuation, split on whitespace.
///
/// Returns tokens in first-seen order with duplicates removed. Empty input
/// yields an empty list; there are no failure modes.
pub fn normalize(text: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut tokens = Vec::new();

    for word in text.to_lowercase().split_whitespace() {
        let token = word.trim_matches(|c| PUNCTUATION.contains(&c));
        if token.is_empty() {
            continue;
        }
        if seen.insert(token.to_string()) {
            tokens.push(token.to_string());
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_splits() {
        assert_eq!(normalize("Как Оформить Отпуск"), vec!["как", "оформить", "отпуск"]);
    }

    #[test]
    fn test_strips_boundary_punctuation() {
        assert_eq!(
            normalize("«Отпуск», (оформление)! — как?"),
            vec!["отпуск", "оформление", "как"]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize("").is_empty());
        assert!(normalize("  ,,, !!! ").is_empty());
    }

    #[test]
    fn test_deduplicates_preserving_order() {
        assert_eq!(normalize("отпуск отпуск зарплата"), vec!["отпуск", "зарплата"]);
    }

    #[test]
    fn test_idempotent() {
        let queries = ["Как оформить ОТПУСК?!", "зарплата,премия", "  "];
        for query in queries {
            let once = normalize(query);
            let twice = normalize(&once.join(" "));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_inner_punctuation_preserved() {
        // Only token boundaries are stripped
        assert_eq!(normalize("covid-19"), vec!["covid-19"]);
    }
}
