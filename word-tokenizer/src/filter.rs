use std::borrow::Cow;

use regex::Regex;

/// The characters which are removed from a text by default.
pub const DEFAULT_FILTERS: &str = "!\"#$%&()*+,-./:;<=>?@[]^_`{|}~'";

/// A set of characters which are deleted wherever they occur in a text.
///
/// The filtered characters don't separate words, `"a.b"` becomes `"ab"`.
#[derive(Clone, Debug)]
pub struct CharFilter {
    /// The sorted and deduplicated filter set.
    chars: Vec<char>,
    /// A character class matching any char of the set, `None` for an empty set.
    pattern: Option<Regex>,
}

impl CharFilter {
    /// Creates a filter for the set of characters.
    ///
    /// The order and multiplicity of the characters doesn't matter.
    pub(crate) fn new(chars: &str) -> Result<Self, regex::Error> {
        let mut chars = chars.chars().collect::<Vec<_>>();
        chars.sort_unstable();
        chars.dedup();

        let pattern = if chars.is_empty() {
            None
        } else {
            // every char is escaped, hence metacharacters and class operators like `-`, `&&` or
            // `~~` are matched literally inside the class
            let class = chars
                .iter()
                .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
                .collect::<String>();
            Some(Regex::new(&format!("[{}]", class))?)
        };

        Ok(Self { chars, pattern })
    }

    /// Checks whether the character is filtered.
    pub fn contains(&self, c: char) -> bool {
        self.chars.binary_search(&c).is_ok()
    }

    /// Gets the filtered characters in ascending order.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Removes all filtered characters from the text.
    pub(crate) fn remove<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match self.pattern {
            Some(ref pattern) => pattern.replace_all(text, ""),
            None => Cow::Borrowed(text),
        }
    }
}
