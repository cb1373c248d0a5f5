use std::collections::{BTreeSet, HashMap};

use displaydoc::Display;
use ndarray::{Array2, ArrayBase, Data, Ix1};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dataset::argmax;

/// The potential errors of the [`LabelIndex`].
#[derive(Debug, Display, Error, PartialEq)]
pub enum LabelError {
    /// The label {0} is not part of the label index
    Unknown(String),
}

/// A bijection between the distinct labels of a corpus and the ids `0..len`.
///
/// The labels are sorted lexicographically before the ids are assigned. The index must be built
/// once from the training split and then reused for any other split to keep the ids comparable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelIndex {
    labels: Vec<String>,
    ids: HashMap<String, usize>,
}

impl LabelIndex {
    /// Creates the label index from the (possibly repeated) labels of a corpus.
    pub fn new<S>(labels: impl IntoIterator<Item = S>) -> Self
    where
        S: AsRef<str>,
    {
        let labels = labels
            .into_iter()
            .map(|label| label.as_ref().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();
        let ids = labels
            .iter()
            .enumerate()
            .map(|(id, label)| (label.clone(), id))
            .collect();

        Self { labels, ids }
    }

    /// Gets the number of distinct labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Checks whether there are no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Gets the id of the label.
    pub fn id(&self, label: &str) -> Option<usize> {
        self.ids.get(label).copied()
    }

    /// Gets the label of the id.
    pub fn label(&self, id: usize) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }

    /// Gets the labels in id order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Gets the mapping from labels to ids.
    pub fn label_to_id(&self) -> &HashMap<String, usize> {
        &self.ids
    }

    /// Maps the labels to their ids.
    ///
    /// # Errors
    /// Fails if any label is not part of the index.
    pub fn ids<S>(&self, labels: impl IntoIterator<Item = S>) -> Result<Vec<usize>, LabelError>
    where
        S: AsRef<str>,
    {
        labels
            .into_iter()
            .map(|label| {
                let label = label.as_ref();
                self.id(label)
                    .ok_or_else(|| LabelError::Unknown(label.to_string()))
            })
            .collect()
    }

    /// One-hot encodes the ids.
    ///
    /// The encoding is of shape `(ids, labels)`.
    ///
    /// # Panics
    /// Panics if an id is out of bounds.
    pub(crate) fn one_hot_ids(&self, ids: &[usize]) -> Array2<f32> {
        let mut encoding = Array2::zeros((ids.len(), self.len()));
        for (mut row, &id) in encoding.rows_mut().into_iter().zip(ids) {
            row[id] = 1.;
        }

        encoding
    }

    /// One-hot encodes the labels.
    ///
    /// The encoding is of shape `(labels, self.len())`.
    ///
    /// # Errors
    /// Fails if any label is not part of the index.
    pub fn one_hot<S>(
        &self,
        labels: impl IntoIterator<Item = S>,
    ) -> Result<Array2<f32>, LabelError>
    where
        S: AsRef<str>,
    {
        self.ids(labels).map(|ids| self.one_hot_ids(&ids))
    }

    /// Decodes a one-hot encoded label.
    pub fn decode<S>(&self, one_hot: &ArrayBase<S, Ix1>) -> Option<&str>
    where
        S: Data<Elem = f32>,
    {
        argmax(one_hot).and_then(|id| self.label(id))
    }
}
