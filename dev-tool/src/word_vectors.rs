use std::{
    fs::File,
    io::{BufRead, BufReader, Error as IoError},
    num::ParseFloatError,
    path::Path,
};

use displaydoc::Display;
use log::info;
use ndarray::Array1;
use text_encoder::{EncoderError, WordVectorTable, WordVectors};
use thiserror::Error;

/// The potential errors of the word vector reader.
#[derive(Debug, Display, Error)]
pub enum WordVectorsError {
    /// Failed to read the word vectors: {0}
    Io(#[from] IoError),
    /// Invalid value in line {line}: {source}
    Value { line: usize, source: ParseFloatError },
    /// Line {line} has a vector of dimension {actual}, expected {expected}
    Dimension {
        line: usize,
        expected: usize,
        actual: usize,
    },
    /// Failed to insert the word vector: {0}
    Table(#[from] EncoderError),
    /// No word vectors found
    Empty,
}

/// Loads word vectors in the word2vec text format from a file.
pub fn load_word_vectors(path: impl AsRef<Path>) -> Result<WordVectorTable, WordVectorsError> {
    read_word_vectors(BufReader::new(File::open(path)?))
}

/// Reads word vectors in the word2vec text format.
///
/// The optional header line holds the number of words and the dimension, every other line holds a
/// word followed by its whitespace separated vector. Empty lines are ignored.
pub fn read_word_vectors(reader: impl BufRead) -> Result<WordVectorTable, WordVectorsError> {
    let mut table = None;
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let mut values = line.split_whitespace();
        let word = match values.next() {
            Some(word) => word,
            None => continue,
        };
        if idx == 0 {
            if let Some(dim) = parse_header(&line) {
                table = Some(WordVectorTable::new(dim));
                continue;
            }
        }

        let vector = values
            .map(str::parse::<f32>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| WordVectorsError::Value {
                line: idx + 1,
                source,
            })?;
        let table = table.get_or_insert_with(|| WordVectorTable::new(vector.len()));
        if vector.len() != table.dim() {
            return Err(WordVectorsError::Dimension {
                line: idx + 1,
                expected: table.dim(),
                actual: vector.len(),
            });
        }
        table.insert(word, Array1::from(vector))?;
    }

    match table {
        Some(table) if !table.is_empty() => {
            info!(
                "Loaded {} word vectors of dimension {}",
                table.len(),
                table.dim(),
            );
            Ok(table)
        }
        _ => Err(WordVectorsError::Empty),
    }
}

/// Parses a `count dim` header line.
fn parse_header(line: &str) -> Option<usize> {
    let mut values = line.split_whitespace().map(str::parse::<usize>);
    match (values.next(), values.next(), values.next()) {
        (Some(Ok(_)), Some(Ok(dim)), None) => Some(dim),
        _ => None,
    }
}
