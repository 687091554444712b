//! Error types for the genre-model crate.

use classifier::ClassifierError;
use thiserror::Error;

use crate::types::GenreId;

/// Errors raised while training or querying the recommender
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// The built-in training set is malformed (a broken build, never user input)
    #[error("Invalid training data: {0}")]
    InvalidTrainingData(String),

    /// The classifier produced a label that isn't in the genre catalog
    #[error("Classifier returned unknown genre id {0}")]
    UnknownGenre(GenreId),

    /// A mood or setting name/code didn't match any option
    #[error("Unknown {attribute} option: {value}")]
    UnknownOption {
        attribute: &'static str,
        value: String,
    },

    /// Failure inside the classifier
    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ModelError>;
