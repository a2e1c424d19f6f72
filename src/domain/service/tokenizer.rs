use crate::domain::interface::ITokenizer;
use crate::domain::model::FieldAlias;
use indexmap::IndexMap;
use std::borrow::Cow;

/// Splits on whitespace and drops tokens shorter than `min_len` characters.
#[derive(Clone, Debug)]
pub struct WhitespaceTokenizer {
    min_len: usize,
}

impl WhitespaceTokenizer {
    pub fn new(min_len: usize) -> Self {
        Self { min_len }
    }
}

impl Default for WhitespaceTokenizer {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ITokenizer for WhitespaceTokenizer {
    fn tokenize_all(
        &self,
        sources: &IndexMap<FieldAlias, Cow<'_, str>>,
    ) -> Vec<(FieldAlias, String)> {
        sources
            .iter()
            .flat_map(|(alias, text)| {
                text.split_whitespace()
                    .filter(|token| token.chars().count() >= self.min_len)
                    .map(move |token| (*alias, token.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_should_split_each_field() {
        let mut sources = IndexMap::new();
        sources.insert(FieldAlias::Tx, Cow::Borrowed("hello  big world"));
        sources.insert(FieldAlias::Lo, Cow::Borrowed("Vienna"));
        let tokens = WhitespaceTokenizer::new(1).tokenize_all(&sources);
        assert_eq!(
            tokens,
            vec![
                (FieldAlias::Tx, "hello".to_string()),
                (FieldAlias::Tx, "big".to_string()),
                (FieldAlias::Tx, "world".to_string()),
                (FieldAlias::Lo, "Vienna".to_string()),
            ]
        );
    }

    #[test]
    fn it_should_drop_short_tokens() {
        let mut sources = IndexMap::new();
        sources.insert(FieldAlias::Tx, Cow::Borrowed("a bb ccc ñé"));
        let tokens = WhitespaceTokenizer::new(2).tokenize_all(&sources);
        let words: Vec<_> = tokens.into_iter().map(|(_, t)| t).collect();
        assert_eq!(words, vec!["bb", "ccc", "ñé"]);
    }
}
