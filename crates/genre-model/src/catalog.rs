//! The fixed training set.
//!
//! Seven hand-labelled listening contexts, one per genre. These are the only
//! data the classifier ever sees.

use crate::error::{ModelError, Result};
use crate::types::{Genre, ListeningContext, TrainingExample};

const fn example(vector: [i64; 6], genre: Genre) -> TrainingExample {
    TrainingExample {
        context: ListeningContext::from_vector(vector),
        genre,
    }
}

/// (tempo, mood, length, explicit, age, setting) -> genre
pub const TRAINING_EXAMPLES: [TrainingExample; 7] = [
    example([8, 3, 4, 1, 2000, 1], Genre::Rap),
    example([8, 2, 2, 1, 2010, 6], Genre::Trap),
    example([7, 0, 5, 0, 1930, 0], Genre::Jazz),
    example([6, 0, 3, 0, 2015, 2], Genre::Pop),
    example([5, 0, 1, 0, 2018, 2], Genre::Edm),
    example([2, 1, 10, 0, 1800, 0], Genre::Classical),
    example([9, 3, 4, 1, 1990, 1], Genre::Rock),
];

pub fn training_examples() -> &'static [TrainingExample] {
    &TRAINING_EXAMPLES
}

/// Checks that a training set covers every genre exactly once.
pub fn validate_examples(examples: &[TrainingExample]) -> Result<()> {
    if examples.len() != Genre::ALL.len() {
        return Err(ModelError::InvalidTrainingData(format!(
            "expected {} examples, found {}",
            Genre::ALL.len(),
            examples.len()
        )));
    }

    for genre in Genre::ALL {
        let count = examples.iter().filter(|e| e.genre == genre).count();
        if count != 1 {
            return Err(ModelError::InvalidTrainingData(format!(
                "genre {} has {} examples",
                genre, count
            )));
        }
    }
    Ok(())
}
