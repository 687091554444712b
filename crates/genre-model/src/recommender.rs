//! The trained recommendation model.
//!
//! A `Recommender` is built once at startup and is read-only afterwards, so
//! it can be shared behind an `Arc` by every request handler.

use classifier::{Classifier, SupportVectorClassifier};
use tracing::{debug, info};

use crate::catalog::{training_examples, validate_examples};
use crate::error::{ModelError, Result};
use crate::schema::{AttributeSchema, describe_options};
use crate::types::{AttributeVector, Genre, GenreId, ListeningContext, Recommendation};

/// Genre recommender backed by a fitted classifier
pub struct Recommender {
    classifier: Box<dyn Classifier>,
}

impl Recommender {
    /// Train the default classifier (RBF support-vector machine) on the
    /// built-in examples.
    pub fn train() -> Result<Self> {
        Self::train_with(SupportVectorClassifier::new())
    }

    /// Train any classifier on the built-in examples.
    ///
    /// Fails only if the built-in data is malformed or the classifier
    /// rejects it, both of which indicate a broken build.
    pub fn train_with(mut classifier: impl Classifier + 'static) -> Result<Self> {
        let examples = training_examples();
        validate_examples(examples)?;

        let samples: Vec<Vec<f64>> = examples.iter().map(|e| e.context.to_features()).collect();
        let labels: Vec<GenreId> = examples.iter().map(|e| e.genre.id()).collect();

        classifier.fit(&samples, &labels)?;
        info!(
            "Trained {} on {} examples",
            classifier.name(),
            examples.len()
        );

        Ok(Self {
            classifier: Box::new(classifier),
        })
    }

    /// Name of the underlying classifier
    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    /// Predict a genre for a listening context.
    ///
    /// No range validation: any integer values are classified.
    pub fn predict(&self, context: &ListeningContext) -> Result<Recommendation> {
        let label = self.classifier.predict(&context.to_features())?;
        let genre = Genre::from_id(label).ok_or(ModelError::UnknownGenre(label))?;
        debug!("Predicted {} (id {}) for {:?}", genre, label, context);

        Ok(Recommendation {
            genre,
            inputs: *context,
        })
    }

    /// Predict from the ordered vector form
    pub fn predict_vector(&self, vector: AttributeVector) -> Result<Recommendation> {
        self.predict(&ListeningContext::from_vector(vector))
    }

    /// Static attribute schema
    pub fn describe_options(&self) -> AttributeSchema {
        describe_options()
    }
}

impl std::fmt::Debug for Recommender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recommender")
            .field("classifier", &self.classifier.name())
            .finish()
    }
}
