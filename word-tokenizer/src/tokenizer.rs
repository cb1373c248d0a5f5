use crate::{filter::CharFilter, separator::Separators, stop_words::StopWords};

/// A word tokenizer.
///
/// Can be created via the [`Builder`] and consists of a character filter, word separators and
/// optional lowercasing and stop words.
///
/// [`Builder`]: crate::Builder
#[derive(Clone, Debug)]
pub struct Tokenizer {
    pub(crate) filter: CharFilter,
    pub(crate) separators: Separators,
    pub(crate) lowercase: bool,
    pub(crate) stop_words: Option<StopWords>,
}

impl Tokenizer {
    /// Splits the text into words.
    ///
    /// The words contain no filtered characters and are never empty. A text without any words
    /// results in an empty list.
    pub fn tokenize(&self, text: impl AsRef<str>) -> Vec<String> {
        let text = text.as_ref();
        let text = if self.lowercase {
            self.separators.normalize(&text.to_lowercase())
        } else {
            self.separators.normalize(text)
        };
        let text = self.filter.remove(&text);

        self.separators
            .split(&text)
            .filter(|word| !word.is_empty())
            .filter(|word| {
                self.stop_words
                    .as_ref()
                    .map_or(true, |stop_words| !stop_words.contains(word))
            })
            .map(ToString::to_string)
            .collect()
    }

    /// Splits all texts into words and concatenates them in order.
    ///
    /// The document boundaries are lost, which is fine for counting word frequencies.
    pub fn tokenize_many<S>(&self, texts: impl IntoIterator<Item = S>) -> Vec<String>
    where
        S: AsRef<str>,
    {
        texts
            .into_iter()
            .flat_map(|text| self.tokenize(text))
            .collect()
    }

    /// Gets the character filter.
    pub fn filter(&self) -> &CharFilter {
        &self.filter
    }

    /// Gets the word separators.
    pub fn separators(&self) -> &Separators {
        &self.separators
    }

    /// Checks whether the texts are lowercased.
    pub fn lowercase(&self) -> bool {
        self.lowercase
    }

    /// Gets the stop words.
    pub fn stop_words(&self) -> Option<&StopWords> {
        self.stop_words.as_ref()
    }
}
