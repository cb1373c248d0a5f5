use std::process::exit;

use anyhow::Error;
use structopt::StructOpt;

use crate::exit_code::FATAL_ERROR;

mod args;
mod corpus;
mod encode;
mod exit_code;
mod utils;
mod vocab;
mod word_vectors;

/// Tooling to encode labeled text corpora into numeric datasets.
#[derive(StructOpt, Debug)]
enum CommandArgs {
    Vocab(vocab::VocabCmd),
    Encode(encode::EncodeCmd),
}

impl CommandArgs {
    fn run(self) -> Result<i32, Error> {
        match self {
            CommandArgs::Vocab(cmd) => cmd.run(),
            CommandArgs::Encode(cmd) => cmd.run(),
        }
    }
}

fn main() {
    env_logger::init();

    let exit_code = match CommandArgs::from_args().run() {
        Ok(exit_code) => exit_code,
        Err(error) => {
            eprintln!("{:?}", error);
            FATAL_ERROR
        }
    };

    exit(exit_code);
}
