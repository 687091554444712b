//! Core trait for pluggable classifiers.
//!
//! The recommendation model only depends on this narrow interface, so any
//! supervised multi-class algorithm can stand behind it.

use crate::error::Result;

/// Class label produced by a classifier.
pub type Label = u32;

/// A supervised multi-class classifier.
///
/// ## Design Note
/// - `Send + Sync` lets a fitted classifier be shared across request handlers
/// - `fit` takes `&mut self`; once fitted the classifier is only read
pub trait Classifier: Send + Sync {
    /// Returns the name of this classifier (for logging/debugging)
    fn name(&self) -> &str;

    /// Fit the classifier to labeled samples.
    ///
    /// # Arguments
    /// * `samples` - One feature row per example, all of the same width
    /// * `labels` - One label per sample
    fn fit(&mut self, samples: &[Vec<f64>], labels: &[Label]) -> Result<()>;

    /// Predict the label of a single sample.
    ///
    /// # Returns
    /// * `Ok(label)` - Always one of the labels seen during `fit`
    /// * `Err` - If the classifier is not fitted or the width is wrong
    fn predict(&self, sample: &[f64]) -> Result<Label>;
}
