//! Small labeled corpora in the layout of one directory per label.

use std::{
    fs::{create_dir_all, write},
    io::Result,
    path::Path,
};

/// A labeled document as `(label, file name, text)`.
pub type Document = (&'static str, &'static str, &'static str);

/// The documents and labels of a corpus split.
#[derive(Clone, Debug, PartialEq)]
pub struct Split {
    pub documents: Vec<&'static str>,
    pub labels: Vec<&'static str>,
}

impl Split {
    fn new(documents: &[Document]) -> Self {
        Self {
            documents: documents.iter().map(|(_, _, text)| *text).collect(),
            labels: documents.iter().map(|(label, _, _)| *label).collect(),
        }
    }

    /// Gets the number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Checks whether there are no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Writes the documents below the root, creating the label directories as needed.
pub fn write_documents(root: impl AsRef<Path>, documents: &[Document]) -> Result<()> {
    let root = root.as_ref();
    for (label, file, text) in documents {
        let dir = root.join(label);
        create_dir_all(&dir)?;
        write(dir.join(file), text)?;
    }

    Ok(())
}

/// The fruit corpus with five apples, a single banana and two cherries.
pub mod fruit {
    use super::*;

    /// The documents in the order of their label directories and sorted file names.
    pub const DOCUMENTS: [Document; 8] = [
        ("apple", "fuji_apple.txt", "Fuji apples are red."),
        ("apple", "gala.txt", "Gala apples are my favorite."),
        ("apple", "golden_delicious.txt", "I love Golden Delicious apples."),
        ("apple", "granny_smith_apple.txt", "Granny Smith apples are green."),
        (
            "apple",
            "honeycrisp.txt",
            "I want to try an apple pie made out of Honeycrisp apples",
        ),
        ("banana", "banana.txt", "Bananas are good for breakfast."),
        ("cherry", "bing_cherry.txt", "Bing cherries are popular."),
        (
            "cherry",
            "rainier_cherry.txt",
            "Rainer cherries are in season right now.",
        ),
    ];

    /// The documents of a separate test directory for the [`DOCUMENTS`].
    pub const TEST_DOCUMENTS: [Document; 3] = [
        (
            "apple",
            "granny_smith_apple.txt",
            "Granny Smith apples good for apple pie.  They are a little sour though.",
        ),
        ("banana", "banana.txt", "Bananas are very nutricious."),
        (
            "cherry",
            "rainier_cherry.txt",
            "Rainer cherries are also good if you dry them.",
        ),
    ];

    /// Writes the [`DOCUMENTS`] below the root.
    pub fn write(root: impl AsRef<Path>) -> Result<()> {
        write_documents(root, &DOCUMENTS)
    }

    /// Writes the [`DOCUMENTS`] below the training root and the [`TEST_DOCUMENTS`] below the
    /// test root.
    pub fn write_separate(train: impl AsRef<Path>, test: impl AsRef<Path>) -> Result<()> {
        write_documents(train, &DOCUMENTS)?;
        write_documents(test, &TEST_DOCUMENTS)
    }

    /// Gets the expected training and test splits for a test ratio of `0.2`.
    ///
    /// The single banana is skipped, the last apple and the last cherry are held out.
    pub fn split() -> (Split, Split) {
        let train = [
            DOCUMENTS[0],
            DOCUMENTS[1],
            DOCUMENTS[2],
            DOCUMENTS[3],
            DOCUMENTS[6],
        ];
        let test = [DOCUMENTS[4], DOCUMENTS[7]];

        (Split::new(&train), Split::new(&test))
    }

    /// Gets the whole corpus as a training split.
    pub fn all() -> Split {
        Split::new(&DOCUMENTS)
    }
}
