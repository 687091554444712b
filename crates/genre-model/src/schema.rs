//! Static description of the six attributes.
//!
//! This is what clients use to build their input forms; it serialises
//! directly into the options response body.

use serde::Serialize;

use crate::types::{Mood, Setting};

/// Inclusive numeric range with a prompt text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeSpec {
    pub min: i64,
    pub max: i64,
    pub description: &'static str,
}

impl RangeSpec {
    /// Documented range only; the model itself accepts any value
    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Enumerated options with a prompt text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceSpec<T> {
    pub options: Vec<T>,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeSpecs {
    pub tempo: RangeSpec,
    pub mood: ChoiceSpec<&'static str>,
    pub length: RangeSpec,
    pub explicit: ChoiceSpec<u8>,
    pub age: RangeSpec,
    pub setting: ChoiceSpec<&'static str>,
}

/// Full option schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeSchema {
    pub moods: Vec<&'static str>,
    pub settings: Vec<&'static str>,
    pub attributes: AttributeSpecs,
}

pub const TEMPO_RANGE: RangeSpec = RangeSpec {
    min: 1,
    max: 10,
    description: "Rate the tempo from 1 (very slow) to 10 (very fast)",
};

pub const LENGTH_RANGE: RangeSpec = RangeSpec {
    min: 1,
    max: 10,
    description: "Preferred song length from 1 (short) to 10 (long)",
};

pub const AGE_RANGE: RangeSpec = RangeSpec {
    min: 1800,
    max: 2024,
    description: "Preferred music era (year)",
};

pub const MOOD_DESCRIPTION: &str = "Select your current mood";
pub const EXPLICIT_DESCRIPTION: &str = "Allow explicit content (0 for no, 1 for yes)";
pub const SETTING_DESCRIPTION: &str = "Where will you be listening?";

/// Build the attribute schema. Pure; every call returns the same value.
pub fn describe_options() -> AttributeSchema {
    AttributeSchema {
        moods: Mood::names(),
        settings: Setting::names(),
        attributes: AttributeSpecs {
            tempo: TEMPO_RANGE,
            mood: ChoiceSpec {
                options: Mood::names(),
                description: MOOD_DESCRIPTION,
            },
            length: LENGTH_RANGE,
            explicit: ChoiceSpec {
                options: vec![0, 1],
                description: EXPLICIT_DESCRIPTION,
            },
            age: AGE_RANGE,
            setting: ChoiceSpec {
                options: Setting::names(),
                description: SETTING_DESCRIPTION,
            },
        },
    }
}
