use std::collections::HashMap;

use displaydoc::Display;
use itertools::Itertools;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The reserved tokens of the default [`IndexScheme`].
pub const RESERVED_TOKENS: [&str; 3] = ["<UNK>", "<EOS>", "<PAD>"];

/// The unknown token of the default [`IndexScheme`].
pub const UNKNOWN_TOKEN: &str = "<UNK>";

/// The count of tokens which are not derived from the corpus.
pub const RESERVED_COUNT: i64 = -1;

/// The number of top ranked tokens which are logged.
const LOGGED_TOKENS: usize = 5;

/// How a [`Vocabulary`] assigns indices to its tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexScheme {
    /// The top tokens occupy the indices `0..top_size`, followed by the reserved tokens.
    ///
    /// Tokens outside of the vocabulary map to the index of the `unknown` token, which must be
    /// one of the reserved tokens.
    ReservedAtEnd {
        reserved: Vec<String>,
        unknown: String,
    },
    /// The index `0` belongs to the `unknown` token, the top tokens occupy `1..=top_size`.
    UnknownFirst { unknown: String },
}

impl IndexScheme {
    /// Creates the reserved-at-end scheme with the [`RESERVED_TOKENS`].
    pub fn reserved_at_end() -> Self {
        Self::ReservedAtEnd {
            reserved: RESERVED_TOKENS.iter().map(ToString::to_string).collect(),
            unknown: UNKNOWN_TOKEN.into(),
        }
    }

    /// Creates the unknown-first scheme with the [`UNKNOWN_TOKEN`].
    pub fn unknown_first() -> Self {
        Self::UnknownFirst {
            unknown: UNKNOWN_TOKEN.into(),
        }
    }

    /// Gets the tokens which are not ranked from the corpus.
    fn reserved(&self) -> &[String] {
        match self {
            Self::ReservedAtEnd { reserved, .. } => reserved,
            Self::UnknownFirst { unknown } => std::slice::from_ref(unknown),
        }
    }

    /// Validates the reserved tokens.
    fn validate(&self) -> Result<(), VocabularyError> {
        if let Self::ReservedAtEnd { reserved, unknown } = self {
            if !reserved.contains(unknown) {
                return Err(VocabularyError::MissingUnknown(unknown.clone()));
            }
            if let Some(duplicate) = reserved.iter().duplicates().next() {
                return Err(VocabularyError::DuplicateReserved(duplicate.clone()));
            }
        }

        Ok(())
    }
}

impl Default for IndexScheme {
    fn default() -> Self {
        Self::reserved_at_end()
    }
}

/// The potential errors of the [`Vocabulary`].
#[derive(Debug, Display, Error, PartialEq)]
pub enum VocabularyError {
    /// Failed to rank the tokens of an empty corpus
    EmptyCorpus,
    /// The unknown token {0} is not one of the reserved tokens
    MissingUnknown(String),
    /// The reserved token {0} occurs more than once
    DuplicateReserved(String),
}

/// A frequency ranked and size capped vocabulary.
///
/// The vocabulary is built once from the training corpus and only read afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    /// The occurrences of every corpus token, reserved tokens count [`RESERVED_COUNT`].
    counts: HashMap<String, i64>,
    /// All distinct corpus tokens except the reserved ones by descending count, ties by ascending
    /// token.
    ranked: Vec<String>,
    /// The tokens by index.
    tokens: Vec<String>,
    /// The indices by token.
    indices: HashMap<String, usize>,
    top_size: usize,
    unknown_id: usize,
    scheme: IndexScheme,
}

impl Vocabulary {
    /// Builds the vocabulary from the tokens of a corpus.
    ///
    /// Keeps the `top_size` most frequent tokens, which is capped at the number of distinct
    /// tokens. Ties in frequency are ranked by the natural order of the tokens, so the result is
    /// deterministic. Corpus tokens which equal a reserved token of the scheme are neither ranked
    /// nor top tokens and count [`RESERVED_COUNT`].
    ///
    /// # Errors
    /// Fails if there are no tokens but a non-zero `top_size` is requested or if the reserved
    /// tokens of the scheme are invalid.
    pub fn build<S>(
        tokens: impl IntoIterator<Item = S>,
        top_size: usize,
        scheme: IndexScheme,
    ) -> Result<Self, VocabularyError>
    where
        S: AsRef<str>,
    {
        scheme.validate()?;

        let mut counts = HashMap::<String, i64>::new();
        for token in tokens {
            let token = token.as_ref();
            if let Some(count) = counts.get_mut(token) {
                *count += 1;
            } else {
                counts.insert(token.to_string(), 1);
            }
        }
        if counts.is_empty() && top_size > 0 {
            return Err(VocabularyError::EmptyCorpus);
        }

        let reserved = scheme.reserved();
        let ranked = counts
            .iter()
            .filter(|(token, _)| !reserved.contains(token))
            .sorted_by(|(token_a, count_a), (token_b, count_b)| {
                count_b.cmp(count_a).then_with(|| token_a.cmp(token_b))
            })
            .map(|(token, _)| token.clone())
            .collect::<Vec<_>>();
        info!("Size of vocabulary: {}", ranked.len());

        let top = ranked
            .iter()
            .take(top_size)
            .cloned()
            .collect::<Vec<_>>();
        let top_size = top.len();
        info!("Size of top vocabulary: {}", top_size);

        for token in reserved {
            counts.insert(token.clone(), RESERVED_COUNT);
        }
        let (tokens, unknown_id): (Vec<String>, usize) = match scheme {
            IndexScheme::ReservedAtEnd {
                ref reserved,
                ref unknown,
            } => {
                let unknown_id = top_size
                    + reserved
                        .iter()
                        .position(|token| token == unknown)
                        .unwrap_or_default();
                let tokens = top.into_iter().chain(reserved.iter().cloned()).collect();
                (tokens, unknown_id)
            }
            IndexScheme::UnknownFirst { ref unknown } => {
                let tokens = Some(unknown.clone()).into_iter().chain(top).collect();
                (tokens, 0)
            }
        };
        let indices = tokens
            .iter()
            .enumerate()
            .map(|(index, token)| (token.clone(), index))
            .collect();

        let vocabulary = Self {
            counts,
            ranked,
            tokens,
            indices,
            top_size,
            unknown_id,
            scheme,
        };
        vocabulary.log_top();

        Ok(vocabulary)
    }

    fn log_top(&self) {
        info!("Top {} tokens (count)", LOGGED_TOKENS);
        for token in self.ranked.iter().take(LOGGED_TOKENS) {
            info!("{:>10} ({})", token, self.counts[token]);
        }
    }

    /// Gets the number of indices, i.e. the top tokens plus the reserved tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Checks whether the vocabulary has no indices.
    ///
    /// This is never the case, because the unknown token always has an index.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Gets the number of top tokens.
    pub fn top_size(&self) -> usize {
        self.top_size
    }

    /// Gets the number of reserved tokens which have an index.
    pub fn reserved_size(&self) -> usize {
        self.tokens.len() - self.top_size
    }

    /// Gets the index scheme.
    pub fn scheme(&self) -> &IndexScheme {
        &self.scheme
    }

    /// Gets the index which unknown tokens map to.
    pub fn unknown_id(&self) -> usize {
        self.unknown_id
    }

    /// Gets all distinct corpus tokens in ranked order.
    ///
    /// Reserved tokens are not ranked, even if they occur in the corpus.
    pub fn ranked(&self) -> &[String] {
        &self.ranked
    }

    /// Gets the tokens in index order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Gets the count of the token.
    ///
    /// Reserved tokens count [`RESERVED_COUNT`].
    pub fn count(&self, token: &str) -> Option<i64> {
        self.counts.get(token).copied()
    }

    /// Gets the index of the token if it is part of the vocabulary.
    pub fn index(&self, token: &str) -> Option<usize> {
        self.indices.get(token).copied()
    }

    /// Gets the index of the token or the index of the unknown token.
    pub fn index_or_unknown(&self, token: &str) -> usize {
        self.index(token).unwrap_or(self.unknown_id)
    }

    /// Gets the token at the index.
    pub fn token(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// Maps the tokens to their indices.
    pub fn encode<S>(&self, tokens: impl IntoIterator<Item = S>) -> Vec<usize>
    where
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .map(|token| self.index_or_unknown(token.as_ref()))
            .collect()
    }

    /// Maps the indices back to their tokens, skipping invalid indices.
    pub fn decode(&self, indices: &[usize]) -> Vec<&str> {
        indices
            .iter()
            .filter_map(|&index| self.token(index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKENS: [&str; 10] = ["b", "a", "c", "a", "d", "b", "a", "e", "c", "d"];

    fn reserved(tokens: &[&str], unknown: &str) -> IndexScheme {
        IndexScheme::ReservedAtEnd {
            reserved: tokens.iter().map(ToString::to_string).collect(),
            unknown: unknown.into(),
        }
    }

    #[test]
    fn test_ranking() {
        let vocabulary = Vocabulary::build(TOKENS, 10, IndexScheme::default()).unwrap();
        assert_eq!(vocabulary.ranked(), ["a", "b", "c", "d", "e"]);
        assert_eq!(vocabulary.count("a"), Some(3));
        assert_eq!(vocabulary.count("e"), Some(1));
        assert_eq!(vocabulary.count("z"), None);
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let reversed = TOKENS.iter().rev();
        let first = Vocabulary::build(TOKENS, 3, IndexScheme::default()).unwrap();
        let second = Vocabulary::build(reversed, 3, IndexScheme::default()).unwrap();
        assert_eq!(first.ranked(), second.ranked());
        assert_eq!(first.tokens(), second.tokens());
    }

    #[test]
    fn test_reserved_at_end() {
        let vocabulary = Vocabulary::build(TOKENS, 3, IndexScheme::reserved_at_end()).unwrap();
        assert_eq!(vocabulary.top_size(), 3);
        assert_eq!(vocabulary.reserved_size(), 3);
        assert_eq!(vocabulary.len(), 6);
        assert_eq!(
            vocabulary.tokens(),
            ["a", "b", "c", "<UNK>", "<EOS>", "<PAD>"],
        );
        assert_eq!(vocabulary.index("a"), Some(0));
        assert_eq!(vocabulary.index("<PAD>"), Some(5));
        assert_eq!(vocabulary.unknown_id(), 3);
        assert_eq!(vocabulary.index_or_unknown("d"), 3);
        assert_eq!(vocabulary.count("<EOS>"), Some(RESERVED_COUNT));
        assert_eq!(vocabulary.count("a"), Some(3));
    }

    #[test]
    fn test_unknown_first() {
        let vocabulary = Vocabulary::build(TOKENS, 3, IndexScheme::unknown_first()).unwrap();
        assert_eq!(vocabulary.top_size(), 3);
        assert_eq!(vocabulary.reserved_size(), 1);
        assert_eq!(vocabulary.tokens(), ["<UNK>", "a", "b", "c"]);
        assert_eq!(vocabulary.unknown_id(), 0);
        assert_eq!(vocabulary.index("a"), Some(1));
        assert_eq!(vocabulary.index("<EOS>"), None);
        assert_eq!(vocabulary.encode(&["c", "z", "a"]), [3, 0, 1]);
    }

    #[test]
    fn test_top_size_is_capped() {
        let vocabulary = Vocabulary::build(TOKENS, 100, IndexScheme::unknown_first()).unwrap();
        assert_eq!(vocabulary.top_size(), 5);
        assert_eq!(vocabulary.len(), 6);
    }

    #[test]
    fn test_reserved_tokens_are_not_ranked() {
        let tokens = ["<PAD>", "<PAD>", "<PAD>", "a", "<UNK>"];
        let vocabulary = Vocabulary::build(tokens, 2, IndexScheme::reserved_at_end()).unwrap();
        assert_eq!(vocabulary.ranked(), ["a"]);
        assert_eq!(vocabulary.tokens(), ["a", "<UNK>", "<EOS>", "<PAD>"]);
        assert_eq!(vocabulary.count("<PAD>"), Some(RESERVED_COUNT));
        for token in vocabulary.ranked() {
            assert!(vocabulary.count(token).unwrap() > 0);
        }

        let vocabulary = Vocabulary::build(tokens, 2, IndexScheme::unknown_first()).unwrap();
        assert_eq!(vocabulary.ranked(), ["<PAD>", "a"]);
        assert_eq!(vocabulary.tokens(), ["<UNK>", "<PAD>", "a"]);
        assert_eq!(vocabulary.count("<PAD>"), Some(3));
        assert_eq!(vocabulary.count("<UNK>"), Some(RESERVED_COUNT));
    }

    #[test]
    fn test_custom_unknown() {
        let scheme = reserved(&["<PAD>", "<OOV>"], "<OOV>");
        let vocabulary = Vocabulary::build(TOKENS, 2, scheme).unwrap();
        assert_eq!(vocabulary.tokens(), ["a", "b", "<PAD>", "<OOV>"]);
        assert_eq!(vocabulary.unknown_id(), 3);
    }

    #[test]
    fn test_empty_corpus() {
        let tokens = Vec::<String>::new();
        assert_eq!(
            Vocabulary::build(&tokens, 1, IndexScheme::default()).unwrap_err(),
            VocabularyError::EmptyCorpus,
        );
        let vocabulary = Vocabulary::build(&tokens, 0, IndexScheme::default()).unwrap();
        assert_eq!(vocabulary.top_size(), 0);
        assert_eq!(vocabulary.unknown_id(), 0);
        assert_eq!(vocabulary.tokens(), RESERVED_TOKENS);
    }

    #[test]
    fn test_invalid_scheme() {
        assert_eq!(
            Vocabulary::build(TOKENS, 1, reserved(&["<PAD>"], "<UNK>")).unwrap_err(),
            VocabularyError::MissingUnknown("<UNK>".into()),
        );
        assert_eq!(
            Vocabulary::build(TOKENS, 1, reserved(&["<UNK>", "<PAD>", "<UNK>"], "<UNK>"))
                .unwrap_err(),
            VocabularyError::DuplicateReserved("<UNK>".into()),
        );
    }

    #[test]
    fn test_decode() {
        let vocabulary = Vocabulary::build(TOKENS, 2, IndexScheme::default()).unwrap();
        assert_eq!(vocabulary.decode(&[1, 0, 2, 99]), ["b", "a", "<UNK>"]);
        assert_eq!(vocabulary.token(4), Some("<PAD>"));
        assert_eq!(vocabulary.token(5), None);
    }

    #[test]
    fn test_serde() {
        let vocabulary = Vocabulary::build(TOKENS, 2, IndexScheme::unknown_first()).unwrap();
        let json = serde_json::to_string(&vocabulary).unwrap();
        let restored = serde_json::from_str::<Vocabulary>(&json).unwrap();
        assert_eq!(restored, vocabulary);
        assert_eq!(restored.encode(&["b", "e"]), [2, 0]);
    }
}
