use ndarray::{ArrayBase, Data, Dimension, IntoDimension};

/// Asserts that two float containers are approximately equal element by element.
///
/// Floats, (nested) slices, arrays, vectors and ndarray arrays can be compared with each other as
/// long as their logical shapes agree:
///
/// ```
/// use ndarray::arr2;
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(f32, 0.15039155, 0.1503916, ulps = 3);
/// assert_approx_eq!(f32, [[1., 2.], [3., 4.]], arr2(&[[1., 2.], [3., 4.]]));
/// assert_approx_eq!(f32, vec![0.1 + 0.2], [0.3], epsilon = 1e-6);
/// ```
///
/// The `ulps` default to `2` and the `epsilon` defaults to `0`. Two NaN values are considered
/// equal, since the assertion checks for an expected outcome.
#[macro_export]
macro_rules! assert_approx_eq {
    ($t:ty, $left:expr, $right:expr $(,)?) => {
        $crate::assert_approx_eq!($t, $left, $right, epsilon = 0., ulps = 2)
    };
    ($t:ty, $left:expr, $right:expr, ulps = $ulps:expr $(,)?) => {
        $crate::assert_approx_eq!($t, $left, $right, epsilon = 0., ulps = $ulps)
    };
    ($t:ty, $left:expr, $right:expr, epsilon = $epsilon:expr $(,)?) => {
        $crate::assert_approx_eq!($t, $left, $right, epsilon = $epsilon, ulps = 2)
    };
    ($t:ty, $left:expr, $right:expr, epsilon = $epsilon:expr, ulps = $ulps:expr $(,)?) => {{
        let epsilon = $epsilon;
        let ulps = $ulps;
        let left = $crate::ApproxElements::elements(&$left);
        let right = $crate::ApproxElements::elements(&$right);
        for (index, pair) in left.iter().zip(right.iter()).enumerate() {
            let ((left_idx, left_value), (right_idx, right_value)) = pair;
            std::assert_eq!(
                left_idx, right_idx,
                "shape mismatch at element {}: {:?} != {:?}",
                index, left_idx, right_idx,
            );
            if !(left_value.is_nan() && right_value.is_nan()) {
                std::assert!(
                    $crate::approx_eq!($t, *left_value, *right_value, ulps = ulps, epsilon = epsilon),
                    "approximate equality failed (ulps={:?}, epsilon={:?}) at index {:?}: {:?} != {:?}",
                    ulps,
                    epsilon,
                    left_idx,
                    left_value,
                    right_value,
                );
            }
        }
        std::assert_eq!(
            left.len(),
            right.len(),
            "length mismatch, the shorter input ends before index {:?}",
            left.get(right.len()).or_else(|| right.get(left.len())).map(|(idx, _)| idx),
        );
    }};
}

/// Flattens a float container for the [`assert_approx_eq!`] macro.
///
/// Each element is paired with its logical multi-dimensional index.
pub trait ApproxElements {
    fn elements(&self) -> Vec<(Vec<usize>, f32)>;
}

impl ApproxElements for f32 {
    fn elements(&self) -> Vec<(Vec<usize>, f32)> {
        vec![(Vec::new(), *self)]
    }
}

impl<T> ApproxElements for &T
where
    T: ApproxElements + ?Sized,
{
    fn elements(&self) -> Vec<(Vec<usize>, f32)> {
        (**self).elements()
    }
}

impl<T> ApproxElements for [T]
where
    T: ApproxElements,
{
    fn elements(&self) -> Vec<(Vec<usize>, f32)> {
        self.iter()
            .enumerate()
            .flat_map(|(idx, element)| {
                element.elements().into_iter().map(move |(mut index, value)| {
                    index.insert(0, idx);
                    (index, value)
                })
            })
            .collect()
    }
}

impl<T, const N: usize> ApproxElements for [T; N]
where
    T: ApproxElements,
{
    fn elements(&self) -> Vec<(Vec<usize>, f32)> {
        self[..].elements()
    }
}

impl<T> ApproxElements for Vec<T>
where
    T: ApproxElements,
{
    fn elements(&self) -> Vec<(Vec<usize>, f32)> {
        self.as_slice().elements()
    }
}

impl<S, D> ApproxElements for ArrayBase<S, D>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    fn elements(&self) -> Vec<(Vec<usize>, f32)> {
        self.indexed_iter()
            .map(|(idx, &value)| (idx.into_dimension().as_array_view().to_vec(), value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::panic::catch_unwind;

    use ndarray::{arr1, arr2, arr3, Array2};

    #[test]
    fn test_floats() {
        assert_approx_eq!(f32, 0.15039155, 0.1503916, ulps = 3);
        catch_unwind(|| assert_approx_eq!(f32, 0.15039155, 0.1503916, ulps = 2)).unwrap_err();
        assert_approx_eq!(f32, 0.125, 0.625, epsilon = 0.5);
    }

    #[test]
    fn test_mixed_containers() {
        assert_approx_eq!(f32, [0.25, 1.25], arr1(&[0.25, 1.25]));
        assert_approx_eq!(f32, vec![[0.25], [1.25]], arr2(&[[0.25], [1.25]]));
        assert_approx_eq!(
            f32,
            &[[[0.25, 1.25], [0., 0.125]]],
            arr3(&[[[0.25, 1.25], [0., 0.125]]]),
        );
    }

    #[test]
    fn test_empty_arrays() {
        assert_approx_eq!(f32, Array2::<f32>::zeros((0, 3)), Vec::<f32>::new());
    }

    #[test]
    #[should_panic(expected = "at index [1]")]
    fn test_value_mismatch() {
        assert_approx_eq!(f32, [0.35, 4.35], arr1(&[0.35, 4.45]));
    }

    #[test]
    #[should_panic(expected = "shape mismatch")]
    fn test_shape_mismatch() {
        assert_approx_eq!(f32, [[1., 2.], [3., 4.]], [1., 2., 3., 4.]);
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn test_length_mismatch() {
        assert_approx_eq!(f32, [[1., 2., 3.]], [[1., 2.]]);
    }

    #[test]
    fn test_nan_values() {
        assert_approx_eq!(f32, [3.1, f32::NAN, 1.], [3.1, f32::NAN, 1.]);
        catch_unwind(|| assert_approx_eq!(f32, [f32::NAN], [3.])).unwrap_err();
    }
}
