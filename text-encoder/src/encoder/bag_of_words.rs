use log::debug;
use ndarray::Array2;
use word_tokenizer::Tokenizer;

use crate::{
    dataset::Dataset,
    encoder::{check_lengths, EncoderError},
    label::LabelIndex,
    vocab::Vocabulary,
};

/// Bag of words encoded documents.
///
/// The features are of shape `(documents, vocabulary.len())`.
pub type BagOfWords = Dataset<Array2<f32>>;

/// Encodes each document as the sum of the one-hot encoded indices of its words.
///
/// Each feature row counts how often each vocabulary index occurs in the document, words outside
/// of the vocabulary count towards the unknown index. No document is ever dropped, a document
/// without words is encoded as a zero row.
///
/// # Errors
/// Fails if the number of documents and labels differ or if a label is not indexed.
pub fn encode<D, L>(
    tokenizer: &Tokenizer,
    vocabulary: &Vocabulary,
    label_index: &LabelIndex,
    documents: &[D],
    labels: &[L],
) -> Result<BagOfWords, EncoderError>
where
    D: AsRef<str>,
    L: AsRef<str>,
{
    check_lengths(documents, labels)?;
    let y = label_index.one_hot(labels)?;

    let mut x = Array2::zeros((documents.len(), vocabulary.len()));
    for (idx, (mut row, document)) in x.rows_mut().into_iter().zip(documents).enumerate() {
        debug!("Processing document: [{}]", idx + 1);
        for word in tokenizer.tokenize(document) {
            row[vocabulary.index_or_unknown(&word)] += 1.;
        }
    }

    Ok(Dataset { x, y })
}
