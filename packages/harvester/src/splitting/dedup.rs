//! Merging of provisions that share an article number.

use std::collections::HashMap;

use crate::types::Provision;

/// Merge provisions with the same article number.
///
/// Later occurrences are appended to the first one, separated by a blank
/// line; the first occurrence keeps its title and position. Order indices
/// are reassigned densely from zero.
#[must_use]
pub fn deduplicate(provisions: Vec<Provision>) -> Vec<Provision> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<Provision> = Vec::with_capacity(provisions.len());

    for provision in provisions {
        if let Some(&idx) = seen.get(&provision.article) {
            let target = &mut merged[idx];
            target.content.push_str("\n\n");
            target.content.push_str(&provision.content);
        } else {
            seen.insert(provision.article.clone(), merged.len());
            merged.push(provision);
        }
    }

    for (idx, provision) in merged.iter_mut().enumerate() {
        provision.order_index = idx;
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deduplicate_merges_in_first_seen_order() {
        let provisions = vec![
            Provision::new("1", "Первая", "А", 0),
            Provision::new("2", "Вторая", "Б", 1),
            Provision::new("1", "Дубль", "В", 2),
            Provision::new("3", "", "Г", 3),
        ];

        assert_eq!(
            deduplicate(provisions),
            vec![
                Provision::new("1", "Первая", "А\n\nВ", 0),
                Provision::new("2", "Вторая", "Б", 1),
                Provision::new("3", "", "Г", 2),
            ]
        );
    }

    #[test]
    fn test_deduplicate_without_duplicates_reindexes() {
        let provisions = vec![
            Provision::new("5", "", "А", 3),
            Provision::new("6", "", "Б", 7),
        ];
        let result = deduplicate(provisions);
        let indices: Vec<usize> = result.iter().map(|p| p.order_index).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_deduplicate_empty() {
        assert!(deduplicate(Vec::new()).is_empty());
    }
}
