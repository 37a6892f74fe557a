use serde::{Deserialize, Serialize};

use super::dimension::{Combination, Dimension, compute_combinations};
use super::metadata::{Metadata, build_metadata};
use super::table::{Leaf, Table, insert};
use crate::error::Result;

/// A phrase table with its level metadata, serialized as `{"t": ..., "m": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PhraseTable {
    #[serde(rename = "t")]
    pub table: Table,
    #[serde(rename = "m")]
    pub metadata: Metadata,
}

/// Render every combination of `dimensions` and file the leaves by path.
///
/// Without dimensions the single rendered leaf becomes the table root.
pub fn build_table(
    dimensions: &[Dimension],
    mut render: impl FnMut(&Combination<'_>) -> Leaf,
) -> Result<PhraseTable> {
    let combinations = compute_combinations(dimensions)?;
    let metadata = combinations
        .first()
        .map(build_metadata)
        .unwrap_or_default();

    let mut table = Table::default();
    for combination in &combinations {
        let leaf = render(combination);
        insert(&mut table, &combination.path(), leaf)?;
    }
    Ok(PhraseTable { table, metadata })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dimension::DimensionKind;
    use crate::core::metadata::MetaEntry;
    use crate::error::FbtError;
    use pretty_assertions::assert_eq;

    fn join(combination: &Combination<'_>) -> String {
        combination
            .choices()
            .iter()
            .map(|choice| choice.key)
            .collect::<Vec<_>>()
            .join(",")
    }

    #[test]
    fn no_dimensions_makes_a_bare_leaf() {
        let phrase = build_table(&[], |_| Leaf::new("Hello", "greeting")).unwrap();
        assert!(phrase.table.is_leaf());
        assert!(phrase.metadata.is_empty());
        assert_eq!(
            serde_json::to_string(&phrase).unwrap(),
            r#"{"t":{"desc":"greeting","text":"Hello"},"m":[]}"#
        );
    }

    #[test]
    fn one_leaf_per_combination() {
        let dimensions = vec![
            Dimension::plural("count", "n"),
            Dimension::enumeration("kind", ["photos", "posts"]),
        ];
        let phrase =
            build_table(&dimensions, |c| Leaf::new(join(c), "d")).unwrap();
        assert_eq!(phrase.table.leaves().len(), 4);
        assert_eq!(phrase.metadata.len(), 2);
        assert_eq!(
            phrase
                .table
                .get("_1")
                .and_then(|t| t.get("posts"))
                .and_then(|t| t.as_leaf())
                .map(|leaf| leaf.text.as_str()),
            Some("_1,posts")
        );
    }

    #[test]
    fn collapsed_values_are_still_rendered() {
        let dimensions = vec![
            Dimension::subject(["1", "2"]).always_collapsible(),
            Dimension::new(DimensionKind::Gender, ["*"]).with_token("name"),
        ];
        let mut rendered = Vec::new();
        let result = build_table(&dimensions, |c| {
            rendered.push(join(c));
            Leaf::new(join(c), "d")
        });
        assert_eq!(rendered, vec!["1,*", "2,*"]);
        assert_eq!(
            result.unwrap_err(),
            FbtError::DuplicateLeafPath {
                path: vec!["*".to_string()]
            }
        );
    }

    #[test]
    fn metadata_follows_the_first_combination() {
        let dimensions = vec![
            Dimension::enumeration("kind", ["a", "b"]),
            Dimension::pronoun("who", ["0", "1"]),
        ];
        let phrase = build_table(&dimensions, |c| Leaf::new(join(c), "d")).unwrap();
        assert_eq!(
            phrase.metadata,
            vec![
                Some(MetaEntry::Enum {
                    range: vec!["a".to_string(), "b".to_string()]
                }),
                Some(MetaEntry::Pronoun),
            ]
        );
    }
}
