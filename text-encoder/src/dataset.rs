use ndarray::{Array2, ArrayBase, Data, Ix1};
use serde::{Deserialize, Serialize};

/// An encoded corpus split.
///
/// The features `x` are aligned with the one-hot encoded labels `y`, which are of shape
/// `(documents, labels)`. Depending on the encoder, documents might have been dropped, so the
/// number of rows can be less than the number of input documents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dataset<X> {
    pub x: X,
    pub y: Array2<f32>,
}

impl<X> Dataset<X> {
    /// Gets the number of encoded documents.
    pub fn len(&self) -> usize {
        self.y.nrows()
    }

    /// Checks whether there are no encoded documents.
    pub fn is_empty(&self) -> bool {
        self.y.nrows() == 0
    }

    /// Decodes the one-hot encoded labels into label ids.
    pub fn label_ids(&self) -> Vec<usize> {
        self.y
            .rows()
            .into_iter()
            .filter_map(|row| argmax(&row))
            .collect()
    }
}

/// Gets the index of the first maximum value, ignoring NaNs.
pub fn argmax<S>(values: &ArrayBase<S, Ix1>) -> Option<usize>
where
    S: Data<Elem = f32>,
{
    values
        .iter()
        .enumerate()
        .fold(None, |max: Option<(usize, f32)>, (index, &value)| match max {
            Some((_, max_value)) if max_value >= value => max,
            _ if value.is_nan() => max,
            _ => Some((index, value)),
        })
        .map(|(index, _)| index)
}
