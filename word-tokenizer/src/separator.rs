use regex::{NoExpand, Regex};

/// The separators used by default, the newline is the canonical separator.
pub const DEFAULT_SEPARATORS: [&str; 2] = ["\n", " "];

/// An ordered list of word separators.
///
/// The first separator is the canonical one, all others are rewritten to it before splitting.
#[derive(Clone, Debug)]
pub struct Separators {
    canonical: String,
    others: Vec<String>,
    /// Matches one or more consecutive canonical separators.
    runs: Regex,
}

impl Separators {
    /// Creates the separators, the first one being canonical.
    ///
    /// The separators must be non-empty, which is checked by the [`Builder`].
    ///
    /// [`Builder`]: crate::Builder
    pub(crate) fn new(canonical: String, others: Vec<String>) -> Result<Self, regex::Error> {
        let runs = Regex::new(&format!("(?:{})+", regex::escape(&canonical)))?;

        Ok(Self {
            canonical,
            others,
            runs,
        })
    }

    /// Gets the canonical separator.
    pub fn canonical(&self) -> &str {
        self.canonical.as_str()
    }

    /// Gets the non-canonical separators in their replacement order.
    pub fn others(&self) -> &[String] {
        &self.others
    }

    /// Rewrites all separators to the canonical one and collapses runs of it.
    pub(crate) fn normalize(&self, text: &str) -> String {
        let text = self
            .others
            .iter()
            .fold(text.to_string(), |text, separator| {
                if text.contains(separator.as_str()) {
                    text.replace(separator.as_str(), &self.canonical)
                } else {
                    text
                }
            });

        self.runs
            .replace_all(&text, NoExpand(&self.canonical))
            .into_owned()
    }

    /// Splits the normalized text on the canonical separator.
    pub(crate) fn split<'t>(&'t self, text: &'t str) -> impl Iterator<Item = &'t str> + 't {
        text.split(self.canonical.as_str())
    }
}
