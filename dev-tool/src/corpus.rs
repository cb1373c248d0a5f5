use std::{
    fs::{read, read_dir, read_to_string},
    io::Error as IoError,
    path::{Path, PathBuf},
};

use displaydoc::Display;
use itertools::Itertools;
use log::info;
use thiserror::Error;

/// The potential errors of the corpus loaders.
#[derive(Debug, Display, Error)]
pub enum CorpusError {
    /// The corpus directory {0} doesn't exist
    SourceNotFound(PathBuf),
    /// The test ratio {0} is not within [0, 1]
    Ratio(f32),
    /// Failed to read {path}: {source}
    Read { path: PathBuf, source: IoError },
    /// The corpus directory {0} contains no labeled documents
    Empty(PathBuf),
}

/// The documents and their labels of a corpus split.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Split {
    pub documents: Vec<String>,
    pub labels: Vec<String>,
}

impl Split {
    fn extend(&mut self, label: &str, documents: impl IntoIterator<Item = String>) {
        for document in documents {
            self.documents.push(document);
            self.labels.push(label.to_string());
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

/// Loads a corpus with one sub-directory per label and splits each label into training and test
/// documents.
///
/// Of the `n` documents of a label the last `max(floor(n * test_ratio), 1)` go to the test split
/// if the ratio is positive, otherwise there are no test documents. Labels with a single document
/// are skipped for a positive ratio, since they can't be split.
///
/// # Errors
/// Fails if the root doesn't exist, the ratio is not within `[0, 1]`, a document can't be read or
/// there are no documents at all.
pub fn load_split(
    root: impl AsRef<Path>,
    test_ratio: f32,
    lossy: bool,
) -> Result<(Split, Split), CorpusError> {
    if !(0. ..=1.).contains(&test_ratio) {
        return Err(CorpusError::Ratio(test_ratio));
    }
    let root = root.as_ref();

    let mut train = Split::default();
    let mut test = Split::default();
    for (label, mut documents) in read_labels(root, lossy)? {
        if test_ratio > 0. && documents.len() == 1 {
            info!("Skipping label {} with a single document", label);
            continue;
        }

        let num_test = if test_ratio > 0. {
            ((documents.len() as f32 * test_ratio) as usize).max(1)
        } else {
            0
        };
        let test_documents = documents.split_off(documents.len() - num_test);
        info!(
            "Label {}: {} training and {} test documents",
            label,
            documents.len(),
            test_documents.len(),
        );
        train.extend(&label, documents);
        test.extend(&label, test_documents);
    }

    if train.is_empty() && test.is_empty() {
        Err(CorpusError::Empty(root.to_path_buf()))
    } else {
        Ok((train, test))
    }
}

/// Loads a corpus from separate training and test roots with one sub-directory per label each.
///
/// # Errors
/// Fails if a root doesn't exist, a document can't be read or there are no training documents.
pub fn load_separate(
    train_root: impl AsRef<Path>,
    test_root: impl AsRef<Path>,
    lossy: bool,
) -> Result<(Split, Split), CorpusError> {
    let load = |root: &Path| {
        read_labels(root, lossy).map(|labels| {
            labels
                .into_iter()
                .fold(Split::default(), |mut split, (label, documents)| {
                    split.extend(&label, documents);
                    split
                })
        })
    };
    let train_root = train_root.as_ref();
    let train = load(train_root)?;
    let test = load(test_root.as_ref())?;

    if train.is_empty() {
        Err(CorpusError::Empty(train_root.to_path_buf()))
    } else {
        Ok((train, test))
    }
}

/// Reads the sorted sub-directories as labels and their sorted regular files as documents.
///
/// Labels without documents are skipped.
fn read_labels(root: &Path, lossy: bool) -> Result<Vec<(String, Vec<String>)>, CorpusError> {
    if !root.is_dir() {
        return Err(CorpusError::SourceNotFound(root.to_path_buf()));
    }

    let mut labels = Vec::new();
    for dir in read_paths(root)?.filter(|path| path.is_dir()) {
        let label = match dir.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => continue,
        };
        let documents = read_paths(&dir)?
            .filter(|path| path.is_file())
            .map(|file| read_document(&file, lossy))
            .collect::<Result<Vec<_>, _>>()?;
        if documents.is_empty() {
            info!("Skipping label {} without documents", label);
        } else {
            labels.push((label, documents));
        }
    }

    Ok(labels)
}

/// Reads the entries of the directory in sorted order.
fn read_paths(dir: &Path) -> Result<impl Iterator<Item = PathBuf>, CorpusError> {
    let read_error = |source| CorpusError::Read {
        path: dir.to_path_buf(),
        source,
    };
    let paths = read_dir(dir)
        .map_err(read_error)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_error)?;

    Ok(paths.into_iter().sorted())
}

/// Reads the document, replacing invalid UTF-8 if lossy.
fn read_document(file: &Path, lossy: bool) -> Result<String, CorpusError> {
    let document = if lossy {
        read(file).map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    } else {
        read_to_string(file)
    };

    document.map_err(|source| CorpusError::Read {
        path: file.to_path_buf(),
        source,
    })
}
