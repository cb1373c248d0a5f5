use displaydoc::Display;
use log::debug;
use thiserror::Error;

use crate::{
    filter::{CharFilter, DEFAULT_FILTERS},
    separator::{Separators, DEFAULT_SEPARATORS},
    stop_words::StopWords,
    tokenizer::Tokenizer,
};

/// A builder to create a [`Tokenizer`].
#[derive(Clone, Debug)]
pub struct Builder {
    filters: String,
    separators: Vec<String>,
    lowercase: bool,
    stop_words: Option<StopWords>,
}

/// The potential errors of the [`Builder`].
#[derive(Debug, Display, Error)]
pub enum BuilderError {
    /// The separators must not contain an empty string
    EmptySeparator,
    /// Failed to compile a pattern: {0}
    Pattern(#[from] regex::Error),
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// Creates a [`Tokenizer`] builder.
    ///
    /// The default settings are:
    /// - The [`DEFAULT_FILTERS`] punctuation.
    /// - The [`DEFAULT_SEPARATORS`] with the newline as canonical separator.
    /// - No lowercasing.
    /// - No stop words.
    pub fn new() -> Self {
        Self {
            filters: DEFAULT_FILTERS.into(),
            separators: DEFAULT_SEPARATORS.iter().map(ToString::to_string).collect(),
            lowercase: false,
            stop_words: None,
        }
    }

    /// Sets the characters which are removed from the texts.
    ///
    /// Defaults to [`DEFAULT_FILTERS`].
    pub fn with_filters(mut self, filters: impl Into<String>) -> Self {
        self.filters = filters.into();
        self
    }

    /// Sets the word separators, the first one being canonical.
    ///
    /// Defaults to [`DEFAULT_SEPARATORS`], which are also used if the separators are empty.
    pub fn with_separators(
        mut self,
        separators: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.separators = separators.into_iter().map(Into::into).collect();
        self
    }

    /// Toggles lower casing of the texts.
    ///
    /// Defaults to `false`.
    pub fn with_lowercase(mut self, toggle: bool) -> Self {
        self.lowercase = toggle;
        self
    }

    /// Sets the stop words which are dropped from the words.
    ///
    /// Defaults to `None`.
    pub fn with_stop_words(mut self, stop_words: Option<StopWords>) -> Self {
        self.stop_words = stop_words;
        self
    }

    /// Builds the tokenizer.
    ///
    /// # Errors
    /// Fails if any separator is empty.
    pub fn build(self) -> Result<Tokenizer, BuilderError> {
        let mut separators = if self.separators.is_empty() {
            DEFAULT_SEPARATORS.iter().map(ToString::to_string).collect()
        } else {
            self.separators
        };
        if separators.iter().any(String::is_empty) {
            return Err(BuilderError::EmptySeparator);
        }
        let canonical = separators.remove(0);
        debug!(
            "Building tokenizer with canonical separator {:?}, other separators {:?} and filters {:?}",
            canonical, separators, self.filters,
        );

        Ok(Tokenizer {
            filter: CharFilter::new(&self.filters)?,
            separators: Separators::new(canonical, separators)?,
            lowercase: self.lowercase,
            stop_words: self.stop_words,
        })
    }
}
