use std::path::PathBuf;

use anyhow::Error;
use serde::Serialize;
use structopt::StructOpt;
use text_encoder::{LabelIndex, Vocabulary};

use crate::{
    args::{CorpusArgs, PipelineArgs},
    exit_code::NO_ERROR,
    utils::write_json,
};

/// Fits the vocabulary and the label index on the training split.
#[derive(StructOpt, Debug)]
pub struct VocabCmd {
    #[structopt(flatten)]
    corpus: CorpusArgs,

    #[structopt(flatten)]
    pipeline: PipelineArgs,

    /// The JSON output file, defaults to stdout.
    #[structopt(short, long)]
    output: Option<PathBuf>,

    #[structopt(long)]
    pretty: bool,
}

#[derive(Serialize)]
struct Mappings<'a> {
    vocabulary: &'a Vocabulary,
    labels: &'a LabelIndex,
}

impl VocabCmd {
    pub fn run(self) -> Result<i32, Error> {
        let VocabCmd {
            corpus,
            pipeline,
            output,
            pretty,
        } = self;

        let (train, _) = corpus.load()?;
        let pipeline = pipeline.fit(&train)?;

        let mappings = Mappings {
            vocabulary: pipeline.vocabulary(),
            labels: pipeline.labels(),
        };
        write_json(&mappings, output.as_deref(), pretty)?;

        Ok(NO_ERROR)
    }
}
