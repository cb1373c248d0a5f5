use std::collections::{BTreeSet, HashMap};

use derive_more::{Deref, From, Into};
use displaydoc::Display;
use log::{debug, info};
use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use word_tokenizer::Tokenizer;

use crate::{
    dataset::Dataset,
    encoder::{check_lengths, EncoderError},
    label::LabelIndex,
};

/// A 1-dimensional word or document embedding.
#[derive(Clone, Debug, Deref, From, Into, PartialEq, Serialize, Deserialize)]
pub struct Embedding(pub Array1<f32>);

/// Embedding encoded documents.
///
/// The features are of shape `(kept documents, embedding dimension)`.
pub type Embeddings = Dataset<Array2<f32>>;

/// A word without a pretrained embedding.
#[derive(Debug, Display, Error, PartialEq)]
/// Missing the embedding of the word {0}
pub struct LookupMiss(pub String);

/// A provider of pretrained word embeddings (word2vec-style).
pub trait WordVectors {
    /// Gets the dimension of the embeddings.
    fn dim(&self) -> usize;

    /// Looks up the embedding of the word.
    fn lookup(&self, word: &str) -> Result<ArrayView1<'_, f32>, LookupMiss>;
}

/// A provider of inferred document embeddings (doc2vec-style).
pub trait DocumentVectors {
    /// Gets the dimension of the embeddings.
    fn dim(&self) -> usize;

    /// Infers the embedding of a whole document from its words.
    fn infer(&self, words: &[&str]) -> Embedding;
}

/// An in-memory table of word embeddings of the same dimension.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WordVectorTable {
    dim: usize,
    vectors: HashMap<String, Embedding>,
}

impl WordVectorTable {
    /// Creates an empty table for embeddings of the dimension.
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            vectors: HashMap::new(),
        }
    }

    /// Inserts the embedding of the word, replacing any previous embedding.
    ///
    /// # Errors
    /// Fails if the dimension of the embedding differs from the table.
    pub fn insert(
        &mut self,
        word: impl Into<String>,
        embedding: impl Into<Embedding>,
    ) -> Result<(), EncoderError> {
        let embedding = embedding.into();
        if embedding.len() != self.dim {
            return Err(EncoderError::Dimension {
                expected: self.dim,
                actual: embedding.len(),
            });
        }
        self.vectors.insert(word.into(), embedding);

        Ok(())
    }

    /// Gets the number of words.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Checks whether there are no words.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

impl WordVectors for WordVectorTable {
    fn dim(&self) -> usize {
        self.dim
    }

    fn lookup(&self, word: &str) -> Result<ArrayView1<'_, f32>, LookupMiss> {
        self.vectors
            .get(word)
            .map(|embedding| embedding.view())
            .ok_or_else(|| LookupMiss(word.to_string()))
    }
}

/// Word embedding encoded documents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WordEmbeddings {
    /// The documents with at least one embedded word.
    pub dataset: Embeddings,
    /// The distinct words without an embedding across all documents.
    pub missing_words: BTreeSet<String>,
}

/// Encodes each document as the mean of the pretrained embeddings of its words.
///
/// Words without an embedding are collected in the missing words and don't contribute to the
/// mean. Documents without any embedded word are dropped from the encoding together with their
/// labels.
///
/// # Errors
/// Fails if the number of documents and labels differ, if a label is not indexed or if an
/// embedding doesn't match the dimension of the word vectors.
pub fn encode_words<D, L>(
    tokenizer: &Tokenizer,
    word_vectors: &impl WordVectors,
    label_index: &LabelIndex,
    documents: &[D],
    labels: &[L],
) -> Result<WordEmbeddings, EncoderError>
where
    D: AsRef<str>,
    L: AsRef<str>,
{
    check_lengths(documents, labels)?;
    let label_ids = label_index.ids(labels)?;

    let dim = word_vectors.dim();
    let mut x = Vec::with_capacity(documents.len() * dim);
    let mut kept_ids = Vec::with_capacity(documents.len());
    let mut missing_words = BTreeSet::new();
    let mut total_found = 0;
    let mut total_missing = 0;
    for (idx, (document, &label_id)) in documents.iter().zip(&label_ids).enumerate() {
        debug!("Processing document: [{}]", idx + 1);
        let mut sum = Array1::<f32>::zeros(dim);
        let mut found = 0;
        for word in tokenizer.tokenize(document) {
            match word_vectors.lookup(&word) {
                Ok(embedding) => {
                    if embedding.len() != dim {
                        return Err(EncoderError::Dimension {
                            expected: dim,
                            actual: embedding.len(),
                        });
                    }
                    sum += &embedding;
                    found += 1;
                }
                Err(LookupMiss(word)) => {
                    missing_words.insert(word);
                    total_missing += 1;
                }
            }
        }
        total_found += found;

        if found == 0 {
            debug!("No word of document [{}] is embedded, skipping it", idx + 1);
            continue;
        }
        sum /= found as f32;
        x.extend(sum.iter());
        kept_ids.push(label_id);
    }
    info!("Number of words found in the word vectors: {}", total_found);
    info!("Number of words missing in the word vectors: {}", total_missing);

    let x = Array2::from_shape_vec((kept_ids.len(), dim), x).map_err(|_| {
        EncoderError::Dimension {
            expected: dim,
            actual: 0,
        }
    })?;
    let y = label_index.one_hot_ids(&kept_ids);

    Ok(WordEmbeddings {
        dataset: Dataset { x, y },
        missing_words,
    })
}

/// Encodes each document as its inferred document embedding.
///
/// The documents are split on whitespace only and passed as a whole to the document vectors.
/// No document is ever dropped.
///
/// # Errors
/// Fails if the number of documents and labels differ, if a label is not indexed or if an
/// embedding doesn't match the dimension of the document vectors.
pub fn encode_documents<D, L>(
    document_vectors: &impl DocumentVectors,
    label_index: &LabelIndex,
    documents: &[D],
    labels: &[L],
) -> Result<Embeddings, EncoderError>
where
    D: AsRef<str>,
    L: AsRef<str>,
{
    check_lengths(documents, labels)?;
    let y = label_index.one_hot(labels)?;

    let dim = document_vectors.dim();
    let mut x = Array2::zeros((documents.len(), dim));
    for (idx, (mut row, document)) in x.rows_mut().into_iter().zip(documents).enumerate() {
        debug!("Processing document: [{}]", idx + 1);
        let words = document.as_ref().split_whitespace().collect::<Vec<_>>();
        let embedding = document_vectors.infer(&words);
        if embedding.len() != dim {
            return Err(EncoderError::Dimension {
                expected: dim,
                actual: embedding.len(),
            });
        }
        row.assign(&embedding.0);
    }

    Ok(Dataset { x, y })
}

#[cfg(test)]
mod tests {
    use ndarray::{arr1, arr2};
    use test_utils::assert_approx_eq;
    use word_tokenizer::Builder;

    use super::*;

    fn word_vectors() -> WordVectorTable {
        let mut table = WordVectorTable::new(2);
        table.insert("apple", arr1(&[1., 0.])).unwrap();
        table.insert("red", arr1(&[0., 1.])).unwrap();
        table.insert("green", arr1(&[0., -1.])).unwrap();
        table
    }

    /// Embeds a document as its number of words and characters.
    struct Counter;

    impl DocumentVectors for Counter {
        fn dim(&self) -> usize {
            2
        }

        fn infer(&self, words: &[&str]) -> Embedding {
            let chars = words.iter().map(|word| word.chars().count()).sum::<usize>();
            arr1(&[words.len() as f32, chars as f32]).into()
        }
    }

    #[test]
    fn test_table() {
        let mut table = word_vectors();
        assert_eq!(table.len(), 3);
        assert_eq!(table.lookup("red").unwrap(), arr1(&[0., 1.]));
        assert_eq!(
            table.lookup("plum").unwrap_err(),
            LookupMiss("plum".into()),
        );
        assert_eq!(
            table.insert("plum", arr1(&[1., 2., 3.])).unwrap_err(),
            EncoderError::Dimension {
                expected: 2,
                actual: 3
            },
        );
    }

    #[test]
    fn test_encode_words() {
        let tokenizer = Builder::new().build().unwrap();
        let documents = ["red apple, red plum", "plum pie", "green apple", ""];
        let labels = ["b", "a", "b", "a"];
        let label_index = LabelIndex::new(&labels);

        let encoded =
            encode_words(&tokenizer, &word_vectors(), &label_index, &documents, &labels).unwrap();
        assert_eq!(encoded.dataset.len(), 2);
        assert_approx_eq!(
            f32,
            encoded.dataset.x,
            arr2(&[[1. / 3., 2. / 3.], [0.5, -0.5]]),
        );
        assert_eq!(encoded.dataset.label_ids(), [1, 1]);
        assert_eq!(
            encoded.missing_words.into_iter().collect::<Vec<_>>(),
            ["pie", "plum"],
        );
    }

    #[test]
    fn test_encode_words_drops_everything() {
        let tokenizer = Builder::new().build().unwrap();
        let label_index = LabelIndex::new(&["a"]);

        let encoded =
            encode_words(&tokenizer, &word_vectors(), &label_index, &["pie"], &["a"]).unwrap();
        assert!(encoded.dataset.is_empty());
        assert_eq!(encoded.dataset.x.shape(), [0, 2]);
        assert_eq!(encoded.dataset.y.shape(), [0, 1]);
    }

    #[test]
    fn test_encode_documents() {
        let label_index = LabelIndex::new(&["a", "b"]);
        let documents = ["Fuji apples are red.", ""];

        let encoded = encode_documents(&Counter, &label_index, &documents, &["b", "a"]).unwrap();
        assert_eq!(encoded.x, arr2(&[[4., 17.], [0., 0.]]));
        assert_eq!(encoded.label_ids(), [1, 0]);
    }

    #[test]
    fn test_encode_documents_length() {
        let label_index = LabelIndex::new(&["a"]);
        assert_eq!(
            encode_documents(&Counter, &label_index, &["x"], &Vec::<String>::new()).unwrap_err(),
            EncoderError::Length {
                documents: 1,
                labels: 0
            },
        );
    }
}
