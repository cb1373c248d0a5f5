pub mod bag_of_words;
pub mod embedding;
pub mod sequence;

use displaydoc::Display;
use thiserror::Error;

use crate::label::LabelError;

/// The potential errors of the encoders.
#[derive(Debug, Display, Error, PartialEq)]
pub enum EncoderError {
    /// Got {documents} documents but {labels} labels
    Length { documents: usize, labels: usize },
    /// Failed to encode the labels: {0}
    Label(#[from] LabelError),
    /// Expected embeddings of dimension {expected} but got {actual}
    Dimension { expected: usize, actual: usize },
}

/// Checks that every document has exactly one label.
pub(crate) fn check_lengths<D, L>(documents: &[D], labels: &[L]) -> Result<(), EncoderError> {
    if documents.len() == labels.len() {
        Ok(())
    } else {
        Err(EncoderError::Length {
            documents: documents.len(),
            labels: labels.len(),
        })
    }
}
