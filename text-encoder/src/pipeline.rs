use word_tokenizer::Tokenizer;

use crate::{
    encoder::{
        bag_of_words::{self, BagOfWords},
        embedding::{self, DocumentVectors, Embeddings, WordEmbeddings, WordVectors},
        sequence::{self, Sequences},
        EncoderError,
    },
    label::LabelIndex,
    vocab::Vocabulary,
};

/// A pipeline to encode corpus splits with mappings fitted on the training split.
///
/// Can be created via the [`Builder`]. The tokenizer, the vocabulary and the label index are
/// immutable afterwards, so every split is encoded consistently.
///
/// [`Builder`]: crate::builder::Builder
#[derive(Clone, Debug)]
pub struct Pipeline {
    pub(crate) tokenizer: Tokenizer,
    pub(crate) vocabulary: Vocabulary,
    pub(crate) labels: LabelIndex,
}

impl Pipeline {
    /// Gets the tokenizer.
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Gets the vocabulary fitted on the training split.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Gets the label index fitted on the training split.
    pub fn labels(&self) -> &LabelIndex {
        &self.labels
    }

    /// Encodes the split as bags of words.
    ///
    /// See [`bag_of_words::encode()`] for details.
    pub fn bag_of_words<D, L>(
        &self,
        documents: &[D],
        labels: &[L],
    ) -> Result<BagOfWords, EncoderError>
    where
        D: AsRef<str>,
        L: AsRef<str>,
    {
        bag_of_words::encode(
            &self.tokenizer,
            &self.vocabulary,
            &self.labels,
            documents,
            labels,
        )
    }

    /// Encodes the split as index sequences.
    ///
    /// See [`sequence::encode()`] for details.
    pub fn sequences<D, L>(&self, documents: &[D], labels: &[L]) -> Result<Sequences, EncoderError>
    where
        D: AsRef<str>,
        L: AsRef<str>,
    {
        sequence::encode(
            &self.tokenizer,
            &self.vocabulary,
            &self.labels,
            documents,
            labels,
        )
    }

    /// Encodes the split as mean pretrained word embeddings.
    ///
    /// See [`embedding::encode_words()`] for details.
    pub fn word_embeddings<D, L>(
        &self,
        word_vectors: &impl WordVectors,
        documents: &[D],
        labels: &[L],
    ) -> Result<WordEmbeddings, EncoderError>
    where
        D: AsRef<str>,
        L: AsRef<str>,
    {
        embedding::encode_words(
            &self.tokenizer,
            word_vectors,
            &self.labels,
            documents,
            labels,
        )
    }

    /// Encodes the split as inferred document embeddings.
    ///
    /// See [`embedding::encode_documents()`] for details.
    pub fn document_embeddings<D, L>(
        &self,
        document_vectors: &impl DocumentVectors,
        documents: &[D],
        labels: &[L],
    ) -> Result<Embeddings, EncoderError>
    where
        D: AsRef<str>,
        L: AsRef<str>,
    {
        embedding::encode_documents(document_vectors, &self.labels, documents, labels)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{arr1, arr2};
    use test_utils::{assert_approx_eq, corpus::fruit};
    use word_tokenizer::Builder as TokenizerBuilder;

    use super::*;
    use crate::{
        builder::Builder,
        encoder::embedding::{Embedding, WordVectorTable},
        label::LabelError,
    };

    fn pipeline(documents: &[&str], labels: &[&str]) -> Pipeline {
        let tokenizer = TokenizerBuilder::new().build().unwrap();
        Builder::new(tokenizer)
            .with_vocabulary_size(4)
            .build(documents, labels)
            .unwrap()
    }

    #[test]
    fn test_fruit_split() {
        let (train, test) = fruit::split();
        let pipeline = pipeline(&train.documents, &train.labels);
        assert_eq!(pipeline.labels().labels(), ["apple", "cherry"]);
        assert_eq!(pipeline.vocabulary().ranked()[..2], ["apples", "are"]);

        let encoded = pipeline.bag_of_words(&test.documents, &test.labels).unwrap();
        assert_eq!(encoded.x.shape(), [test.len(), pipeline.vocabulary().len()]);
        assert_eq!(encoded.y.shape(), [test.len(), 2]);
        for (row, label) in encoded.y.rows().into_iter().zip(&test.labels) {
            assert_eq!(pipeline.labels().decode(&row), Some(*label));
        }
    }

    #[test]
    fn test_unseen_test_label() {
        let pipeline = pipeline(&["red apple"], &["apple"]);
        assert_eq!(
            pipeline.sequences(&["yellow banana"], &["banana"]).unwrap_err(),
            EncoderError::Label(LabelError::Unknown("banana".into())),
        );
    }

    #[test]
    fn test_shared_mappings() {
        let pipeline = pipeline(&["red apple", "red cherry"], &["apple", "cherry"]);
        let train = pipeline
            .sequences(&["red apple", "red cherry"], &["apple", "cherry"])
            .unwrap();
        let test = pipeline.sequences(&["apple plum"], &["apple"]).unwrap();
        assert_eq!(train.x, [vec![0, 1], vec![0, 2]]);
        assert_eq!(test.x, [vec![1, pipeline.vocabulary().unknown_id()]]);
    }

    #[test]
    fn test_embeddings() {
        struct Constant;

        impl DocumentVectors for Constant {
            fn dim(&self) -> usize {
                1
            }

            fn infer(&self, _words: &[&str]) -> Embedding {
                arr1(&[0.5]).into()
            }
        }

        let pipeline = pipeline(&["red apple", "red cherry"], &["apple", "cherry"]);
        let mut word_vectors = WordVectorTable::new(2);
        word_vectors.insert("red", arr1(&[1., 1.])).unwrap();
        word_vectors.insert("cherry", arr1(&[0., 2.])).unwrap();

        let words = pipeline
            .word_embeddings(&word_vectors, &["Red cherry", "red cherry"], &["cherry"; 2])
            .unwrap();
        assert_approx_eq!(f32, words.dataset.x, arr2(&[[0., 2.], [0.5, 1.5]]));
        assert_eq!(words.missing_words.len(), 1);

        let documents = pipeline
            .document_embeddings(&Constant, &["red apple"], &["apple"])
            .unwrap();
        assert_eq!(documents.x, arr2(&[[0.5]]));
        assert_eq!(documents.y, arr2(&[[1., 0.]]));
    }
}
