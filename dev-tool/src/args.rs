use std::{path::PathBuf, str::FromStr};

use anyhow::{bail, Context, Error};
use log::info;
use structopt::StructOpt;
use text_encoder::{Builder, IndexScheme, Pipeline};
use word_tokenizer::{Builder as TokenizerBuilder, StopWords};

use crate::{
    corpus::{load_separate, load_split, Split},
    utils::progress_spin_until_done,
};

/// Where to load the labeled documents from.
#[derive(StructOpt, Debug)]
pub struct CorpusArgs {
    /// The directory with one sub-directory of documents per label.
    #[structopt(long)]
    data_dir: PathBuf,

    /// A separate directory of test documents, the data directory is used for training only.
    #[structopt(long)]
    test_dir: Option<PathBuf>,

    /// The ratio of each label's documents to hold out for testing.
    ///
    /// Ignored if a separate test directory is given.
    #[structopt(long, default_value = "0.2")]
    test_ratio: f32,

    /// Replaces invalid UTF-8 in the documents instead of failing.
    #[structopt(long)]
    lossy: bool,
}

impl CorpusArgs {
    /// Loads the training and test splits.
    pub fn load(&self) -> Result<(Split, Split), Error> {
        let (train, test) = progress_spin_until_done("Loading corpus", || match &self.test_dir {
            Some(test_dir) => load_separate(&self.data_dir, test_dir, self.lossy),
            None => load_split(&self.data_dir, self.test_ratio, self.lossy),
        })
        .context("Loading the corpus failed.")?;
        info!(
            "Loaded {} training and {} test documents",
            train.len(),
            test.len(),
        );

        Ok((train, test))
    }
}

/// How to tokenize the documents and index the tokens.
#[derive(StructOpt, Debug)]
pub struct PipelineArgs {
    /// Lowercases the documents before tokenizing them.
    #[structopt(long)]
    lowercase: bool,

    /// Drops English stop words from the tokens.
    #[structopt(long)]
    stop_words: bool,

    /// The number of most frequent training tokens to index.
    #[structopt(long, default_value = "10000")]
    vocabulary_size: usize,

    /// The index layout of the vocabulary [reserved-at-end, unknown-first].
    #[structopt(long, default_value = "reserved-at-end")]
    scheme: SchemeArg,
}

impl PipelineArgs {
    /// Fits a pipeline on the training split.
    pub fn fit(&self, train: &Split) -> Result<Pipeline, Error> {
        let tokenizer = TokenizerBuilder::new()
            .with_lowercase(self.lowercase)
            .with_stop_words(self.stop_words.then(StopWords::english))
            .build()
            .context("Building the tokenizer failed.")?;

        progress_spin_until_done("Fitting vocabulary", || {
            Builder::new(tokenizer)
                .with_vocabulary_size(self.vocabulary_size)
                .with_scheme(self.scheme.into())
                .build(&train.documents, &train.labels)
        })
        .context("Fitting the pipeline failed.")
    }
}

/// The index layout of the vocabulary.
#[derive(Clone, Copy, Debug)]
pub enum SchemeArg {
    ReservedAtEnd,
    UnknownFirst,
}

impl FromStr for SchemeArg {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reserved-at-end" => Ok(Self::ReservedAtEnd),
            "unknown-first" => Ok(Self::UnknownFirst),
            _ => bail!("unknown index scheme: {}", s),
        }
    }
}

impl From<SchemeArg> for IndexScheme {
    fn from(scheme: SchemeArg) -> Self {
        match scheme {
            SchemeArg::ReservedAtEnd => IndexScheme::reserved_at_end(),
            SchemeArg::UnknownFirst => IndexScheme::unknown_first(),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;
    use test_utils::corpus::fruit;

    use super::*;

    #[test]
    fn test_scheme_arg() {
        assert_eq!(
            IndexScheme::from("unknown-first".parse::<SchemeArg>().unwrap()),
            IndexScheme::unknown_first(),
        );
        assert!("unknown-last".parse::<SchemeArg>().is_err());
    }

    #[test]
    fn test_fit_separate() {
        let train_dir = tempdir().unwrap();
        let test_dir = tempdir().unwrap();
        fruit::write_separate(train_dir.path(), test_dir.path()).unwrap();
        let corpus = CorpusArgs::from_iter(&[
            "corpus",
            "--data-dir",
            train_dir.path().to_str().unwrap(),
            "--test-dir",
            test_dir.path().to_str().unwrap(),
        ]);
        let pipeline = PipelineArgs::from_iter(&[
            "pipeline",
            "--lowercase",
            "--stop-words",
            "--vocabulary-size",
            "1",
        ]);

        let (train, test) = corpus.load().unwrap();
        assert_eq!((train.len(), test.len()), (8, 3));
        let pipeline = pipeline.fit(&train).unwrap();
        assert_eq!(pipeline.vocabulary().ranked()[0], "apples");
        assert_eq!(
            pipeline.vocabulary().tokens(),
            ["apples", "<UNK>", "<EOS>", "<PAD>"],
        );
        assert_eq!(pipeline.labels().len(), 3);
    }
}
