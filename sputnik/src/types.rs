//! Inbound types handed over by the host framework each turn.

use serde::{Deserialize, Serialize};

/// Intent label the host's recognizer assigned to the user's utterance.
///
/// The set of intents is fixed, so unrecognized names collapse into
/// [`Intent::Other`] rather than being carried around as strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greet,
    IntroduceYourself,
    AskAboutIdentity,
    AskAboutBooks,
    AskAboutEmotions,
    AskPhilosophicalQuestion,
    /// The recognizer could not classify the utterance.
    Fallback,
    Other,
}

impl Intent {
    /// Map a recognizer intent name onto the closed set.
    pub fn from_name(name: &str) -> Self {
        match name {
            "greet" => Self::Greet,
            "introduce_yourself" => Self::IntroduceYourself,
            "ask_about_identity" => Self::AskAboutIdentity,
            "ask_about_books" => Self::AskAboutBooks,
            "ask_about_emotions" => Self::AskAboutEmotions,
            "ask_philosophical_question" => Self::AskPhilosophicalQuestion,
            "nlu_fallback" => Self::Fallback,
            _ => Self::Other,
        }
    }
}

/// Type of a span the recognizer extracted from the user's message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    EmotionType,
    HumanConcept,
    BookInformation,
    PersonalInformation,
    /// Recognizer types without dedicated prompt instructions.
    Other(String),
}

impl EntityKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "emotion_type" => Self::EmotionType,
            "human_concept" => Self::HumanConcept,
            "book_information" => Self::BookInformation,
            "personal_information" => Self::PersonalInformation,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub value: String,
}

impl Entity {
    pub fn new(kind: EntityKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// One entry of the host's conversation event log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryEvent {
    /// Message sent by the human visitor.
    Human(String),
    /// Message spoken by Sputnik.
    Agent(String),
    /// Any other tracker event; skipped when building context.
    Other,
}
