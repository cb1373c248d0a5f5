use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{bail, Context, Error};
use log::info;
use serde::Serialize;
use structopt::StructOpt;
use text_encoder::{Dataset, EncoderError, LabelIndex, Padding, Pipeline, Sequences, Vocabulary};

use crate::{
    args::{CorpusArgs, PipelineArgs},
    corpus::Split,
    exit_code::NO_ERROR,
    utils::{progress_spin_until_done, write_json},
    word_vectors::load_word_vectors,
};

/// Encodes the training and test splits with mappings fitted on the training split.
#[derive(StructOpt, Debug)]
pub struct EncodeCmd {
    #[structopt(flatten)]
    corpus: CorpusArgs,

    #[structopt(flatten)]
    pipeline: PipelineArgs,

    /// The encoding of the documents [bag-of-words, sequence, word-vectors].
    #[structopt(long, default_value = "bag-of-words")]
    strategy: Strategy,

    /// The word2vec text file with pretrained word vectors for the word-vectors strategy.
    #[structopt(long)]
    word_vectors: Option<PathBuf>,

    /// Pads the index sequences of the sequence strategy [longest, or a fixed length].
    ///
    /// A fixed length truncates longer sequences.
    #[structopt(long)]
    padding: Option<PaddingArg>,

    /// The vocabulary token to pad index sequences with.
    #[structopt(long, default_value = "<PAD>")]
    pad_token: String,

    /// The JSON output file, defaults to stdout.
    #[structopt(short, long)]
    output: Option<PathBuf>,

    #[structopt(long)]
    pretty: bool,
}

/// The encoding of the documents.
#[derive(Clone, Copy, Debug)]
pub enum Strategy {
    BagOfWords,
    Sequence,
    WordVectors,
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bag-of-words" => Ok(Self::BagOfWords),
            "sequence" => Ok(Self::Sequence),
            "word-vectors" => Ok(Self::WordVectors),
            _ => bail!("unknown encoding strategy: {}", s),
        }
    }
}

/// The length the index sequences are padded to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PaddingArg {
    Longest,
    Fixed(usize),
}

impl FromStr for PaddingArg {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "longest" => Ok(Self::Longest),
            _ => s
                .parse()
                .map(Self::Fixed)
                .with_context(|| format!("invalid padding: {}", s)),
        }
    }
}

impl PaddingArg {
    fn padding(self, vocabulary: &Vocabulary, pad_token: String) -> Result<Padding, Error> {
        let padding = match self {
            Self::Longest => Padding::longest(vocabulary, pad_token),
            Self::Fixed(len) => Padding::fixed(vocabulary, len, pad_token),
        };
        padding.context("Invalid padding.")
    }
}

#[derive(Serialize)]
struct Encoded<'a, X> {
    vocabulary: &'a Vocabulary,
    labels: &'a LabelIndex,
    train: Dataset<X>,
    test: Dataset<X>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    missing_words: BTreeSet<String>,
}

impl EncodeCmd {
    pub fn run(self) -> Result<i32, Error> {
        let EncodeCmd {
            corpus,
            pipeline,
            strategy,
            word_vectors,
            padding,
            pad_token,
            output,
            pretty,
        } = self;

        let (train, test) = corpus.load()?;
        let pipeline = pipeline.fit(&train)?;
        let output = output.as_deref();

        match strategy {
            Strategy::BagOfWords => {
                let (train, test) = encode_splits(&train, &test, |documents, labels| {
                    pipeline.bag_of_words(documents, labels)
                })?;
                write_encoded(&pipeline, train, test, BTreeSet::new(), output, pretty)?;
            }
            Strategy::Sequence => {
                let (train, test) = encode_splits(&train, &test, |documents, labels| {
                    pipeline.sequences(documents, labels)
                })?;
                if let Some(padding) = padding {
                    let padding = padding.padding(pipeline.vocabulary(), pad_token)?;
                    let pad = |sequences: Sequences| Dataset {
                        x: padding.pad(&sequences.x),
                        y: sequences.y,
                    };
                    let (train, test) = (pad(train), pad(test));
                    write_encoded(&pipeline, train, test, BTreeSet::new(), output, pretty)?;
                } else {
                    write_encoded(&pipeline, train, test, BTreeSet::new(), output, pretty)?;
                }
            }
            Strategy::WordVectors => {
                let path = word_vectors
                    .context("The word-vectors strategy requires a --word-vectors file.")?;
                let word_vectors =
                    progress_spin_until_done("Loading word vectors", || load_word_vectors(&path))
                        .with_context(|| format!("Loading {} failed.", path.display()))?;
                let (train, test) = encode_splits(&train, &test, |documents, labels| {
                    pipeline.word_embeddings(&word_vectors, documents, labels)
                })?;
                let missing_words = train
                    .missing_words
                    .union(&test.missing_words)
                    .cloned()
                    .collect::<BTreeSet<_>>();
                info!("Number of distinct missing words: {}", missing_words.len());
                write_encoded(
                    &pipeline,
                    train.dataset,
                    test.dataset,
                    missing_words,
                    output,
                    pretty,
                )?;
            }
        }

        Ok(NO_ERROR)
    }
}

/// Encodes both splits with the same encoder.
fn encode_splits<E>(
    train: &Split,
    test: &Split,
    encode: impl Fn(&[String], &[String]) -> Result<E, EncoderError>,
) -> Result<(E, E), Error> {
    let train = progress_spin_until_done("Encoding training split", || {
        encode(&train.documents, &train.labels)
    })
    .context("Encoding the training split failed.")?;
    let test = progress_spin_until_done("Encoding test split", || {
        encode(&test.documents, &test.labels)
    })
    .context("Encoding the test split failed.")?;

    Ok((train, test))
}

/// Writes the encoded splits together with the fitted mappings.
fn write_encoded<X: Serialize>(
    pipeline: &Pipeline,
    train: Dataset<X>,
    test: Dataset<X>,
    missing_words: BTreeSet<String>,
    output: Option<&Path>,
    pretty: bool,
) -> Result<(), Error> {
    let encoded = Encoded {
        vocabulary: pipeline.vocabulary(),
        labels: pipeline.labels(),
        train,
        test,
        missing_words,
    };
    write_json(&encoded, output, pretty)
}

#[cfg(test)]
mod tests {
    use text_encoder::IndexScheme;

    use super::*;

    #[test]
    fn test_padding_arg() {
        assert_eq!("longest".parse::<PaddingArg>().unwrap(), PaddingArg::Longest);
        assert_eq!("7".parse::<PaddingArg>().unwrap(), PaddingArg::Fixed(7));
        assert!("shortest".parse::<PaddingArg>().is_err());
        assert!("-1".parse::<PaddingArg>().is_err());
    }

    #[test]
    fn test_padding() {
        let vocabulary =
            Vocabulary::build(&["a", "a", "b"], 2, IndexScheme::reserved_at_end()).unwrap();
        let sequences = [vec![0], vec![1, 0, 2]];

        let longest = PaddingArg::Longest
            .padding(&vocabulary, "<PAD>".into())
            .unwrap();
        assert_eq!(longest.pad(&sequences).shape(), [2, 3]);
        let fixed = PaddingArg::Fixed(2)
            .padding(&vocabulary, "<PAD>".into())
            .unwrap();
        assert_eq!(fixed.pad(&sequences).row(0).to_vec(), [0, 4]);
        assert!(PaddingArg::Fixed(2)
            .padding(&vocabulary, "<NONE>".into())
            .is_err());
    }
}
