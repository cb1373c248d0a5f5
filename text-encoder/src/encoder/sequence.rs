use displaydoc::Display;
use log::debug;
use ndarray::Array2;
use thiserror::Error;
use word_tokenizer::Tokenizer;

use crate::{
    dataset::Dataset,
    encoder::{check_lengths, EncoderError},
    label::LabelIndex,
    vocab::Vocabulary,
};

/// Index sequence encoded documents.
///
/// Each document is a sequence of vocabulary indices of variable length.
pub type Sequences = Dataset<Vec<Vec<usize>>>;

/// Encodes each document as the sequence of the vocabulary indices of its words.
///
/// Words outside of the vocabulary map to the unknown index. The sequences are neither padded nor
/// truncated, so each sequence has exactly as many indices as its document has words. No document
/// is ever dropped.
///
/// # Errors
/// Fails if the number of documents and labels differ or if a label is not indexed.
pub fn encode<D, L>(
    tokenizer: &Tokenizer,
    vocabulary: &Vocabulary,
    label_index: &LabelIndex,
    documents: &[D],
    labels: &[L],
) -> Result<Sequences, EncoderError>
where
    D: AsRef<str>,
    L: AsRef<str>,
{
    check_lengths(documents, labels)?;
    let y = label_index.one_hot(labels)?;

    let x = documents
        .iter()
        .enumerate()
        .map(|(idx, document)| {
            debug!("Processing document: [{}]", idx + 1);
            vocabulary.encode(tokenizer.tokenize(document))
        })
        .collect();

    Ok(Dataset { x, y })
}

/// A padding strategy for index sequences.
///
/// The strategy is resolved against a vocabulary on creation, so it always pads with the index of
/// its padding token.
#[derive(Clone, Debug, PartialEq)]
pub struct Padding(Paddings);

/// The potential errors of the padding strategy.
#[derive(Debug, Display, Error, PartialEq)]
pub enum PaddingError {
    /// The padding token {0} is not part of the vocabulary
    PadToken(String),
}

/// The available padding strategies.
#[derive(Clone, Debug, PartialEq)]
enum Paddings {
    /// Padding to the length of the longest sequence.
    Longest { pad_id: usize, pad_token: String },
    /// Padding or truncation to a fixed length.
    Fixed {
        len: usize,
        pad_id: usize,
        pad_token: String,
    },
}

/// Resolves the index of the padding token.
fn resolve_pad_id(vocabulary: &Vocabulary, pad_token: &str) -> Result<usize, PaddingError> {
    vocabulary
        .index(pad_token)
        .ok_or_else(|| PaddingError::PadToken(pad_token.to_string()))
}

impl Padding {
    /// Creates a padding strategy to the longest sequence.
    ///
    /// # Errors
    /// Fails if the padding token is not part of the vocabulary.
    pub fn longest(
        vocabulary: &Vocabulary,
        pad: impl Into<String>,
    ) -> Result<Self, PaddingError> {
        let pad_token = pad.into();
        let pad_id = resolve_pad_id(vocabulary, &pad_token)?;

        Ok(Self(Paddings::Longest { pad_id, pad_token }))
    }

    /// Creates a fixed-length padding strategy.
    ///
    /// Longer sequences are truncated at the end.
    ///
    /// # Errors
    /// Fails if the padding token is not part of the vocabulary.
    pub fn fixed(
        vocabulary: &Vocabulary,
        len: usize,
        pad: impl Into<String>,
    ) -> Result<Self, PaddingError> {
        let pad_token = pad.into();
        let pad_id = resolve_pad_id(vocabulary, &pad_token)?;

        Ok(Self(Paddings::Fixed {
            len,
            pad_id,
            pad_token,
        }))
    }

    /// Gets the index of the padding token.
    pub fn pad_id(&self) -> usize {
        match self.0 {
            Paddings::Longest { pad_id, .. } | Paddings::Fixed { pad_id, .. } => pad_id,
        }
    }

    /// Gets the padding token.
    pub fn pad_token(&self) -> &str {
        match self.0 {
            Paddings::Longest { ref pad_token, .. } | Paddings::Fixed { ref pad_token, .. } => {
                pad_token.as_str()
            }
        }
    }

    /// Pads the sequences at the end.
    ///
    /// The padded sequences are of shape `(sequences, len)`.
    pub fn pad(&self, sequences: &[Vec<usize>]) -> Array2<usize> {
        let (len, pad_id) = match self.0 {
            Paddings::Longest { pad_id, .. } => (
                sequences.iter().map(Vec::len).max().unwrap_or_default(),
                pad_id,
            ),
            Paddings::Fixed { len, pad_id, .. } => (len, pad_id),
        };

        let mut padded = Array2::from_elem((sequences.len(), len), pad_id);
        for (mut row, sequence) in padded.rows_mut().into_iter().zip(sequences) {
            for (padded, &id) in row.iter_mut().zip(sequence) {
                *padded = id;
            }
        }

        padded
    }
}

#[cfg(test)]
mod tests {
    use ndarray::arr2;
    use word_tokenizer::Builder;

    use super::*;
    use crate::vocab::IndexScheme;

    fn vocabulary() -> Vocabulary {
        Vocabulary::build(&["a", "a", "b", "c"], 2, IndexScheme::reserved_at_end()).unwrap()
    }

    #[test]
    fn test_encode() {
        let tokenizer = Builder::new().build().unwrap();
        let documents = ["a b c d", "", "b, a."];
        let labels = ["x", "y", "x"];
        let vocabulary = vocabulary();
        let label_index = LabelIndex::new(&labels);

        let encoded = encode(&tokenizer, &vocabulary, &label_index, &documents, &labels).unwrap();
        assert_eq!(encoded.x, [vec![0, 1, 2, 2], vec![], vec![1, 0]]);
        for (sequence, document) in encoded.x.iter().zip(&documents) {
            assert_eq!(sequence.len(), tokenizer.tokenize(document).len());
        }
        assert_eq!(encoded.label_ids(), [0, 1, 0]);
    }

    #[test]
    fn test_encode_unknown_first() {
        let tokenizer = Builder::new().build().unwrap();
        let vocabulary =
            Vocabulary::build(&["a", "a", "b", "c"], 2, IndexScheme::unknown_first()).unwrap();
        let label_index = LabelIndex::new(&["x"]);

        let encoded = encode(&tokenizer, &vocabulary, &label_index, &["c b a"], &["x"]).unwrap();
        assert_eq!(encoded.x, [vec![0, 2, 1]]);
    }

    #[test]
    fn test_pad_fixed() {
        let padding = Padding::fixed(&vocabulary(), 3, "<PAD>").unwrap();
        assert_eq!(padding.pad_token(), "<PAD>");
        assert_eq!(padding.pad_id(), 4);
        let padded = padding.pad(&[vec![0, 1, 2, 2], vec![], vec![1]]);
        assert_eq!(padded, arr2(&[[0, 1, 2], [4, 4, 4], [1, 4, 4]]));
    }

    #[test]
    fn test_pad_longest() {
        let padding = Padding::longest(&vocabulary(), "<UNK>").unwrap();
        let padded = padding.pad(&[vec![1], vec![0, 1, 0]]);
        assert_eq!(padded, arr2(&[[1, 2, 2], [0, 1, 0]]));
        assert_eq!(padding.pad(&[]).shape(), [0, 0]);
    }

    #[test]
    fn test_pad_token_missing() {
        let vocabulary = Vocabulary::build(&["a"], 1, IndexScheme::unknown_first()).unwrap();
        assert_eq!(
            Padding::fixed(&vocabulary, 2, "<PAD>").err(),
            Some(PaddingError::PadToken("<PAD>".into())),
        );
        assert_eq!(
            Padding::longest(&vocabulary, "<PAD>").err(),
            Some(PaddingError::PadToken("<PAD>".into())),
        );
    }

    #[test]
    fn test_pad_never_uses_top_token() {
        let vocabulary = vocabulary();
        assert_eq!(vocabulary.token(0), Some("a"));
        let padding = Padding::fixed(&vocabulary, 3, "<PAD>").unwrap();
        assert_eq!(padding.pad(&[vec![1]]), arr2(&[[1, 4, 4]]));
        assert_eq!(vocabulary.decode(&[padding.pad_id()]), ["<PAD>"]);
    }
}
