#![cfg_attr(doc, forbid(broken_intra_doc_links, private_intra_doc_links))]
//! A word tokenizer which splits free text into lists of words.
//!
//! The tokenizer is delimiter and character filter based, it doesn't try to be linguistically
//! correct. A text is processed in the following steps:
//! - Optionally lowercases the text.
//! - Replaces every separator by the first (canonical) separator and collapses runs of the
//! canonical separator into a single one.
//! - Removes every character of the filter set wherever it occurs.
//! - Splits the text on the canonical separator and drops empty words.
//! - Optionally drops stop words.
//!
//! ```
//! use word_tokenizer::{Builder, StopWords};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tokenizer = Builder::new()
//!         .with_lowercase(true)
//!         .with_stop_words(Some(StopWords::english()))
//!         .build()?;
//!
//!     let words = tokenizer.tokenize("The apples are red.\nThe cherries are not.");
//!     assert_eq!(words, ["apples", "red", "cherries"]);
//!
//!     Ok(())
//! }
//! ```

mod builder;
mod filter;
mod separator;
mod stop_words;
mod tokenizer;

pub use crate::{
    builder::{Builder, BuilderError},
    filter::{CharFilter, DEFAULT_FILTERS},
    separator::{Separators, DEFAULT_SEPARATORS},
    stop_words::StopWords,
    tokenizer::Tokenizer,
};
