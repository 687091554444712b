//! Core domain types for the genre recommender.
//!
//! Genres, moods and settings are closed sets, so they are enums with
//! explicit numeric codes. The six listening attributes travel through the
//! system as a `ListeningContext` (or its ordered `AttributeVector` form).

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

// =============================================================================
// Type Aliases
// =============================================================================

/// Genre label as used by the classifier (1-7)
pub type GenreId = u32;

/// Number of attributes describing a listening context
pub const ATTRIBUTE_COUNT: usize = 6;

/// Ordered encoding: (tempo, mood, length, explicit, age, setting)
pub type AttributeVector = [i64; ATTRIBUTE_COUNT];

// =============================================================================
// Genre Catalog
// =============================================================================

/// The seven genres the recommender can predict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    Rap,
    Trap,
    Jazz,
    Pop,
    Edm,
    Classical,
    Rock,
}

impl Genre {
    /// Every genre, ordered by id
    pub const ALL: [Genre; 7] = [
        Genre::Rap,
        Genre::Trap,
        Genre::Jazz,
        Genre::Pop,
        Genre::Edm,
        Genre::Classical,
        Genre::Rock,
    ];

    pub fn id(self) -> GenreId {
        match self {
            Genre::Rap => 1,
            Genre::Trap => 2,
            Genre::Jazz => 3,
            Genre::Pop => 4,
            Genre::Edm => 5,
            Genre::Classical => 6,
            Genre::Rock => 7,
        }
    }

    /// Human-readable name, as returned to clients
    pub fn name(self) -> &'static str {
        match self {
            Genre::Rap => "Rap",
            Genre::Trap => "Trap",
            Genre::Jazz => "Jazz",
            Genre::Pop => "Pop",
            Genre::Edm => "EDM",
            Genre::Classical => "Classical",
            Genre::Rock => "Rock",
        }
    }

    /// Look up a genre by label; `None` for ids outside 1-7
    pub fn from_id(id: GenreId) -> Option<Genre> {
        Genre::ALL.into_iter().find(|genre| genre.id() == id)
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Enumerated attribute options
// =============================================================================

/// Listener mood; the numeric code is the position in `Mood::ALL`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Excited,
    Scary,
    Violent,
    Silly,
}

impl Mood {
    pub const ALL: [Mood; 7] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Angry,
        Mood::Excited,
        Mood::Scary,
        Mood::Violent,
        Mood::Silly,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Angry => "Angry",
            Mood::Excited => "Excited",
            Mood::Scary => "Scary",
            Mood::Violent => "Violent",
            Mood::Silly => "Silly",
        }
    }

    pub fn code(self) -> i64 {
        self as i64
    }

    pub fn names() -> Vec<&'static str> {
        Mood::ALL.iter().map(|m| m.name()).collect()
    }
}

impl FromStr for Mood {
    type Err = ModelError;

    /// Accepts the numeric code or the (case-insensitive) name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option(s, &Mood::ALL, |m| m.name()).ok_or_else(|| ModelError::UnknownOption {
            attribute: "mood",
            value: s.to_string(),
        })
    }
}

/// Where the listener is; the numeric code is the position in `Setting::ALL`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    Car,
    Home,
    Party,
    Vacation,
    Walk,
    Run,
    Workout,
}

impl Setting {
    pub const ALL: [Setting; 7] = [
        Setting::Car,
        Setting::Home,
        Setting::Party,
        Setting::Vacation,
        Setting::Walk,
        Setting::Run,
        Setting::Workout,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Setting::Car => "Car",
            Setting::Home => "Home",
            Setting::Party => "Party",
            Setting::Vacation => "Vacation",
            Setting::Walk => "Walk",
            Setting::Run => "Run",
            Setting::Workout => "Workout",
        }
    }

    pub fn code(self) -> i64 {
        self as i64
    }

    pub fn names() -> Vec<&'static str> {
        Setting::ALL.iter().map(|s| s.name()).collect()
    }
}

impl FromStr for Setting {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option(s, &Setting::ALL, |v| v.name()).ok_or_else(|| ModelError::UnknownOption {
            attribute: "setting",
            value: s.to_string(),
        })
    }
}

fn parse_option<T: Copy>(s: &str, all: &[T], name: impl Fn(T) -> &'static str) -> Option<T> {
    let s = s.trim();
    if let Ok(code) = s.parse::<usize>() {
        return all.get(code).copied();
    }
    all.iter().copied().find(|v| name(*v).eq_ignore_ascii_case(s))
}

// =============================================================================
// Attributes
// =============================================================================

/// The six attributes, in canonical vector order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Tempo,
    Mood,
    Length,
    Explicit,
    Age,
    Setting,
}

impl Attribute {
    /// Canonical order; also the order request fields are validated in
    pub const ALL: [Attribute; ATTRIBUTE_COUNT] = [
        Attribute::Tempo,
        Attribute::Mood,
        Attribute::Length,
        Attribute::Explicit,
        Attribute::Age,
        Attribute::Setting,
    ];

    /// JSON field name
    pub fn field_name(self) -> &'static str {
        match self {
            Attribute::Tempo => "tempo",
            Attribute::Mood => "mood",
            Attribute::Length => "length",
            Attribute::Explicit => "explicit",
            Attribute::Age => "age",
            Attribute::Setting => "setting",
        }
    }

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            Attribute::Tempo => "Tempo",
            Attribute::Mood => "Mood",
            Attribute::Length => "Length",
            Attribute::Explicit => "Explicit",
            Attribute::Age => "Age",
            Attribute::Setting => "Setting",
        }
    }

    /// Position in an `AttributeVector`
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Listening context
// =============================================================================

/// A listening context: the classifier input in named form.
///
/// No range checks happen here; out-of-range values are still valid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ListeningContext {
    pub tempo: i64,
    pub mood: i64,
    pub length: i64,
    pub explicit: i64,
    pub age: i64,
    pub setting: i64,
}

impl ListeningContext {
    pub const fn from_vector(v: AttributeVector) -> Self {
        Self {
            tempo: v[0],
            mood: v[1],
            length: v[2],
            explicit: v[3],
            age: v[4],
            setting: v[5],
        }
    }

    pub fn to_vector(&self) -> AttributeVector {
        [
            self.tempo,
            self.mood,
            self.length,
            self.explicit,
            self.age,
            self.setting,
        ]
    }

    /// Classifier features
    pub fn to_features(&self) -> Vec<f64> {
        self.to_vector().iter().map(|&v| v as f64).collect()
    }

    pub fn get(&self, attribute: Attribute) -> i64 {
        self.to_vector()[attribute.index()]
    }
}

impl From<AttributeVector> for ListeningContext {
    fn from(v: AttributeVector) -> Self {
        Self::from_vector(v)
    }
}

// =============================================================================
// Training data and results
// =============================================================================

/// One fixed (context, genre) pair the classifier is fitted on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingExample {
    pub context: ListeningContext,
    pub genre: Genre,
}

/// Result of a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommendation {
    pub genre: Genre,
    /// The context the prediction was made for
    pub inputs: ListeningContext,
}

impl Recommendation {
    pub fn genre_name(&self) -> &'static str {
        self.genre.name()
    }

    pub fn genre_id(&self) -> GenreId {
        self.genre.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_ids_round_trip() {
        for genre in Genre::ALL {
            assert_eq!(Genre::from_id(genre.id()), Some(genre));
        }
        assert_eq!(Genre::from_id(0), None);
        assert_eq!(Genre::from_id(8), None);
        assert_eq!(Genre::Edm.to_string(), "EDM");
    }

    #[test]
    fn test_mood_from_code_or_name() {
        assert_eq!("3".parse::<Mood>().unwrap(), Mood::Excited);
        assert_eq!("violent".parse::<Mood>().unwrap(), Mood::Violent);
        assert_eq!(" Silly ".parse::<Mood>().unwrap(), Mood::Silly);
        assert!("7".parse::<Mood>().is_err());
        assert!("Violant".parse::<Mood>().is_err());
    }

    #[test]
    fn test_setting_from_code_or_name() {
        assert_eq!("0".parse::<Setting>().unwrap(), Setting::Car);
        assert_eq!("WORKOUT".parse::<Setting>().unwrap(), Setting::Workout);
        assert_eq!(Setting::Run.code(), 5);
        assert!("Beach".parse::<Setting>().is_err());
    }

    #[test]
    fn test_context_vector_order() {
        let context = ListeningContext::from_vector([8, 3, 4, 1, 2000, 1]);
        assert_eq!(context.tempo, 8);
        assert_eq!(context.age, 2000);
        assert_eq!(context.get(Attribute::Setting), 1);
        assert_eq!(context.to_vector(), [8, 3, 4, 1, 2000, 1]);
        assert_eq!(context.to_features(), vec![8.0, 3.0, 4.0, 1.0, 2000.0, 1.0]);
    }

    #[test]
    fn test_context_serializes_with_field_names() {
        let value = serde_json::to_value(ListeningContext::from_vector([2, 1, 10, 0, 1800, 0])).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "tempo": 2, "mood": 1, "length": 10, "explicit": 0, "age": 1800, "setting": 0
            })
        );
    }

    #[test]
    fn test_attribute_field_names() {
        let names: Vec<_> = Attribute::ALL.iter().map(|a| a.field_name()).collect();
        assert_eq!(names, ["tempo", "mood", "length", "explicit", "age", "setting"]);
        assert_eq!(Attribute::Explicit.to_string(), "Explicit");
    }
}
