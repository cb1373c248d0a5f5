//! Shared fixtures and assertions for the tests of the workspace.

mod approx_eq;
pub mod corpus;

pub use crate::approx_eq::ApproxElements;
#[doc(hidden)]
pub use float_cmp::approx_eq;
