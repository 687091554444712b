//! # Genre Model Crate
//!
//! The recommendation model: a fixed set of seven labelled listening
//! contexts, the genre catalog, the attribute schema, and a classifier
//! trained once on that data.
//!
//! ## Main Components
//!
//! - **types**: Domain types (Genre, Mood, Setting, Attribute, ListeningContext)
//! - **catalog**: The built-in training examples
//! - **schema**: Attribute ranges and options exposed to clients
//! - **recommender**: `Recommender::train()` / `predict()` / `describe_options()`
//! - **error**: Error types for the model
//!
//! ## Example Usage
//!
//! ```ignore
//! use genre_model::{ListeningContext, Recommender};
//! use std::sync::Arc;
//!
//! // Train once, share everywhere
//! let recommender = Arc::new(Recommender::train()?);
//!
//! let context = ListeningContext::from_vector([8, 3, 4, 1, 2000, 1]);
//! let rec = recommender.predict(&context)?;
//! println!("{} ({})", rec.genre_name(), rec.genre_id());
//! ```

pub mod catalog;
pub mod error;
pub mod recommender;
pub mod schema;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{ModelError, Result};
pub use recommender::Recommender;
pub use schema::{AttributeSchema, ChoiceSpec, RangeSpec, describe_options};
pub use types::{
    // Type aliases
    AttributeVector,
    GenreId,
    // Core types
    Attribute,
    ListeningContext,
    Recommendation,
    TrainingExample,
    // Enums
    Genre,
    Mood,
    Setting,
    ATTRIBUTE_COUNT,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommender_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Recommender>();
    }

    #[test]
    fn test_catalog_names() {
        let names: Vec<_> = Genre::ALL.iter().map(|g| g.name()).collect();
        assert_eq!(
            names,
            vec!["Rap", "Trap", "Jazz", "Pop", "EDM", "Classical", "Rock"]
        );
    }
}
