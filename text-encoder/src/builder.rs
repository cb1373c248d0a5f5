use displaydoc::Display;
use log::info;
use thiserror::Error;
use word_tokenizer::Tokenizer;

use crate::{
    label::LabelIndex,
    pipeline::Pipeline,
    vocab::{IndexScheme, Vocabulary, VocabularyError},
};

/// A builder to fit a [`Pipeline`] on a training split.
pub struct Builder {
    tokenizer: Tokenizer,
    vocabulary_size: usize,
    scheme: IndexScheme,
}

/// The potential errors of the builder.
#[derive(Debug, Display, Error, PartialEq)]
pub enum BuilderError {
    /// Got {documents} training documents but {labels} training labels
    Length { documents: usize, labels: usize },
    /// Failed to build the vocabulary: {0}
    Vocabulary(#[from] VocabularyError),
}

impl Builder {
    /// Creates a [`Pipeline`] builder from a tokenizer.
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self {
            tokenizer,
            vocabulary_size: 10_000,
            scheme: IndexScheme::default(),
        }
    }

    /// Sets the number of most frequent corpus tokens in the vocabulary.
    ///
    /// Defaults to `10_000`.
    pub fn with_vocabulary_size(mut self, size: usize) -> Self {
        self.vocabulary_size = size;
        self
    }

    /// Sets the index layout of the vocabulary.
    ///
    /// Defaults to the reserved tokens `["<UNK>", "<EOS>", "<PAD>"]` after the top tokens.
    pub fn with_scheme(mut self, scheme: IndexScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Fits the vocabulary and the label index on the training split.
    ///
    /// # Errors
    /// Fails if the number of documents and labels differ or if the vocabulary can't be built.
    pub fn build<D, L>(self, documents: &[D], labels: &[L]) -> Result<Pipeline, BuilderError>
    where
        D: AsRef<str>,
        L: AsRef<str>,
    {
        if documents.len() != labels.len() {
            return Err(BuilderError::Length {
                documents: documents.len(),
                labels: labels.len(),
            });
        }
        info!("Fitting the pipeline on {} documents", documents.len());

        let vocabulary = Vocabulary::build(
            self.tokenizer.tokenize_many(documents),
            self.vocabulary_size,
            self.scheme,
        )?;
        let labels = LabelIndex::new(labels);
        info!("Number of distinct labels: {}", labels.len());

        Ok(Pipeline {
            tokenizer: self.tokenizer,
            vocabulary,
            labels,
        })
    }
}

#[cfg(test)]
mod tests {
    use word_tokenizer::Builder as TokenizerBuilder;

    use super::*;

    fn tokenizer() -> Tokenizer {
        TokenizerBuilder::new().build().unwrap()
    }

    #[test]
    fn test_build() {
        let pipeline = Builder::new(tokenizer())
            .with_vocabulary_size(2)
            .with_scheme(IndexScheme::unknown_first())
            .build(&["b a a", "c b a"], &["y", "x"])
            .unwrap();
        assert_eq!(pipeline.vocabulary().tokens(), ["<UNK>", "a", "b"]);
        assert_eq!(pipeline.labels().labels(), ["x", "y"]);
    }

    #[test]
    fn test_defaults() {
        let pipeline = Builder::new(tokenizer()).build(&["a b"], &["x"]).unwrap();
        assert_eq!(pipeline.vocabulary().top_size(), 2);
        assert_eq!(pipeline.vocabulary().scheme(), &IndexScheme::reserved_at_end());
        assert_eq!(
            pipeline.vocabulary().tokens(),
            ["a", "b", "<UNK>", "<EOS>", "<PAD>"],
        );
    }

    #[test]
    fn test_invalid_training_split() {
        assert_eq!(
            Builder::new(tokenizer())
                .build(&["a"], &Vec::<String>::new())
                .err(),
            Some(BuilderError::Length {
                documents: 1,
                labels: 0
            }),
        );
        assert_eq!(
            Builder::new(tokenizer())
                .build(&Vec::<String>::new(), &Vec::<String>::new())
                .err(),
            Some(BuilderError::Vocabulary(VocabularyError::EmptyCorpus)),
        );
    }
}
