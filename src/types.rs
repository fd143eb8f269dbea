use serde::{Deserialize, Serialize};

/// The five allowed answers to "How safe do you feel in your area?".
/// Anything else on the wire is a deserialisation rejection, not a state
/// this program represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyRating {
    VerySafe,
    Safe,
    Neutral,
    Unsafe,
    VeryUnsafe,
}

impl SafetyRating {
    pub const ALL: [SafetyRating; 5] = [
        SafetyRating::VerySafe,
        SafetyRating::Safe,
        SafetyRating::Neutral,
        SafetyRating::Unsafe,
        SafetyRating::VeryUnsafe,
    ];

    pub fn value(&self) -> &'static str {
        match self {
            SafetyRating::VerySafe => "very_safe",
            SafetyRating::Safe => "safe",
            SafetyRating::Neutral => "neutral",
            SafetyRating::Unsafe => "unsafe",
            SafetyRating::VeryUnsafe => "very_unsafe",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SafetyRating::VerySafe => "Very safe",
            SafetyRating::Safe => "Safe",
            SafetyRating::Neutral => "Neutral",
            SafetyRating::Unsafe => "Unsafe",
            SafetyRating::VeryUnsafe => "Very unsafe",
        }
    }
}

/// One completed survey. Built whole from a single form POST and handed to
/// the submission handler, which is its only consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub safety: SafetyRating,
    pub concerns: String,
}

/// Initial map view. The rendered page must use these values exactly; the
/// map only diverges from them once the user pans or zooms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapViewState {
    pub center: (f64, f64), // (lat, lng)
    pub zoom: u8,
}
