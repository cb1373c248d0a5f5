#![cfg_attr(doc, forbid(broken_intra_doc_links, private_intra_doc_links))]
//! Encodes labeled text documents into numeric datasets.
//!
//! A [`Pipeline`] is fitted once on the training split: it ranks the tokens of the training
//! documents into a size capped [`Vocabulary`] and assigns ids to the distinct training labels.
//! Afterwards every split is encoded with these fixed mappings either as bags of words, as index
//! sequences or as averaged embeddings.
//!
//! ```
//! use text_encoder::{Builder, IndexScheme};
//! use word_tokenizer::Builder as TokenizerBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tokenizer = TokenizerBuilder::new().with_lowercase(true).build()?;
//!     let pipeline = Builder::new(tokenizer)
//!         .with_vocabulary_size(3)
//!         .with_scheme(IndexScheme::unknown_first())
//!         .build(&["Red apples.", "Red cherries."], &["apple", "cherry"])?;
//!
//!     let encoded = pipeline.sequences(&["Green apples"], &["apple"])?;
//!     assert_eq!(encoded.x, [vec![0, 2]]);
//!     assert_eq!(pipeline.labels().decode(&encoded.y.row(0)), Some("apple"));
//!
//!     Ok(())
//! }
//! ```

mod builder;
mod dataset;
mod encoder;
mod label;
mod pipeline;
mod vocab;

pub use crate::{
    builder::{Builder, BuilderError},
    dataset::{argmax, Dataset},
    encoder::{
        bag_of_words::{self, BagOfWords},
        embedding::{
            self, DocumentVectors, Embedding, Embeddings, LookupMiss, WordEmbeddings,
            WordVectorTable, WordVectors,
        },
        sequence::{self, Padding, PaddingError, Sequences},
        EncoderError,
    },
    label::{LabelError, LabelIndex},
    pipeline::Pipeline,
    vocab::{
        IndexScheme, Vocabulary, VocabularyError, RESERVED_COUNT, RESERVED_TOKENS, UNKNOWN_TOKEN,
    },
};
