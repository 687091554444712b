//! # Classifier Crate
//!
//! Pluggable multi-class classification for the genre recommender.
//!
//! ## Main Components
//!
//! - **traits**: The `Classifier` trait (`fit` / `predict`)
//! - **svm**: One-vs-one support-vector classifier
//! - **kernel**: Linear and RBF kernels, gamma scaling
//! - **error**: Error types for fitting and prediction
//!
//! ## Example Usage
//!
//! ```ignore
//! use classifier::{Classifier, SupportVectorClassifier};
//!
//! let samples = vec![vec![0.0, 0.0], vec![5.0, 5.0]];
//! let labels = vec![1, 2];
//!
//! let mut svc = SupportVectorClassifier::new();
//! svc.fit(&samples, &labels)?;
//! assert_eq!(svc.predict(&[0.5, 0.5])?, 1);
//! ```

pub mod error;
pub mod kernel;
pub mod svm;
pub mod traits;

// Re-export commonly used types for convenience
pub use error::{ClassifierError, Result};
pub use kernel::{Gamma, Kernel, KernelSpec};
pub use svm::SupportVectorClassifier;
pub use traits::{Classifier, Label};
