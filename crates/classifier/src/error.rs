//! Error types for the classifier crate.
//!
//! Every failure a classifier can report while fitting or predicting is a
//! variant here, so callers can tell bad training data apart from misuse
//! (predicting before fitting, wrong sample width).

use thiserror::Error;

/// Errors that can occur while fitting or querying a classifier
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifierError {
    /// No samples were supplied to `fit`
    #[error("Training set is empty")]
    EmptyTrainingSet,

    /// Number of samples and number of labels differ
    #[error("Expected one label per sample but got {samples} samples and {labels} labels")]
    LabelCountMismatch { samples: usize, labels: usize },

    /// A sample has a different width than the first one (or no features at all)
    #[error("Sample {index} has {found} features, expected {expected}")]
    RaggedSample {
        index: usize,
        expected: usize,
        found: usize,
    },

    /// A training value is NaN or infinite
    #[error("Sample {index} contains a non-finite value")]
    NonFiniteValue { index: usize },

    /// Multi-class classification needs at least two distinct labels
    #[error("Need at least 2 distinct classes, found {0}")]
    TooFewClasses(usize),

    /// A hyper-parameter is outside its valid domain
    #[error("Invalid value for {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// The SVM solver rejected a pairwise problem
    #[error("SVM training failed: {0}")]
    Training(String),

    /// `predict` was called before `fit`
    #[error("Classifier has not been fitted")]
    NotFitted,

    /// The query sample width doesn't match the training width
    #[error("Expected {expected} features but found {found}")]
    DimensionMismatch { expected: usize, found: usize },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ClassifierError>;
