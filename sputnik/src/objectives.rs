//! Narrative objectives the visitor is meant to uncover while talking to
//! Sputnik, and the completion arithmetic over discovered information.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Label marking that one narrative fact has been disclosed.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum InfoTag {
    IdentityRevealed,
    CreationPurpose,
    AiAwareness,
    EmotionUnderstanding,
    EmotionExperience,
    EmotionCuriosity,
    DeathConcept,
    ConsciousnessView,
    ExistenceMeaning,
    FavoriteBooks,
    LearningMethod,
    HumanUnderstanding,
}

impl InfoTag {
    pub const ALL: [InfoTag; 12] = [
        InfoTag::IdentityRevealed,
        InfoTag::CreationPurpose,
        InfoTag::AiAwareness,
        InfoTag::EmotionUnderstanding,
        InfoTag::EmotionExperience,
        InfoTag::EmotionCuriosity,
        InfoTag::DeathConcept,
        InfoTag::ConsciousnessView,
        InfoTag::ExistenceMeaning,
        InfoTag::FavoriteBooks,
        InfoTag::LearningMethod,
        InfoTag::HumanUnderstanding,
    ];

    /// Stable snake_case form used for persistence and the end summary.
    pub fn as_str(self) -> &'static str {
        match self {
            InfoTag::IdentityRevealed => "identity_revealed",
            InfoTag::CreationPurpose => "creation_purpose",
            InfoTag::AiAwareness => "ai_awareness",
            InfoTag::EmotionUnderstanding => "emotion_understanding",
            InfoTag::EmotionExperience => "emotion_experience",
            InfoTag::EmotionCuriosity => "emotion_curiosity",
            InfoTag::DeathConcept => "death_concept",
            InfoTag::ConsciousnessView => "consciousness_view",
            InfoTag::ExistenceMeaning => "existence_meaning",
            InfoTag::FavoriteBooks => "favorite_books",
            InfoTag::LearningMethod => "learning_method",
            InfoTag::HumanUnderstanding => "human_understanding",
        }
    }
}

impl fmt::Display for InfoTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Facts disclosed so far in one session. Grows monotonically; owned by
/// the host's state store and passed in per turn.
pub type DiscoveredInfo = BTreeSet<InfoTag>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveId {
    DiscoverIdentity,
    UnderstandEmotions,
    ExplorePhilosophy,
    DiscoverKnowledge,
}

/// A named bundle of information tags whose joint disclosure counts as a
/// completed narrative goal.
#[derive(Clone, Debug)]
pub struct Objective {
    pub id: ObjectiveId,
    pub name: &'static str,
    pub description: &'static str,
    pub required_info: &'static [InfoTag],
    pub weight: u32,
}

/// Progress snapshot, derived on demand and never cached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectiveStatus {
    pub completed_objectives: Vec<ObjectiveId>,
    /// Sum of the weights of fully satisfied objectives.
    pub completion_percentage: u32,
    /// Required tags (across all objectives) not yet discovered.
    pub missing_info: Vec<InfoTag>,
}

/// Fixed catalog of objectives, defined once at startup.
pub struct ObjectiveCatalog {
    objectives: Vec<Objective>,
}

impl Default for ObjectiveCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectiveCatalog {
    pub fn new() -> Self {
        use InfoTag::*;
        Self {
            objectives: vec![
                Objective {
                    id: ObjectiveId::DiscoverIdentity,
                    name: "Descubrir la capacidad identitaria de Sputnik",
                    description: "Conocer si sabe quién es, qué es y por qué fue creado",
                    required_info: &[IdentityRevealed, CreationPurpose, AiAwareness],
                    weight: 25,
                },
                Objective {
                    id: ObjectiveId::UnderstandEmotions,
                    name: "Comprender su relación con las emociones",
                    description: "Entender cómo percibe y experimenta las emociones",
                    required_info: &[EmotionUnderstanding, EmotionExperience, EmotionCuriosity],
                    weight: 30,
                },
                Objective {
                    id: ObjectiveId::ExplorePhilosophy,
                    name: "Explorar cuál es su perspectiva filosófica",
                    description: "Conocer sus reflexiones sobre existencia, muerte, consciencia",
                    required_info: &[DeathConcept, ConsciousnessView, ExistenceMeaning],
                    weight: 25,
                },
                Objective {
                    id: ObjectiveId::DiscoverKnowledge,
                    name: "Conocer sus fuentes de conocimiento",
                    description: "Entender cómo aprende y qué libros han influido en él",
                    required_info: &[FavoriteBooks, LearningMethod, HumanUnderstanding],
                    weight: 20,
                },
            ],
        }
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    pub fn get(&self, id: ObjectiveId) -> Option<&Objective> {
        self.objectives.iter().find(|o| o.id == id)
    }

    /// An objective is completed iff all its required tags were discovered.
    pub fn check_completion(&self, discovered: &DiscoveredInfo) -> ObjectiveStatus {
        let mut completed = Vec::new();
        let mut weight = 0;
        for objective in &self.objectives {
            if objective
                .required_info
                .iter()
                .all(|tag| discovered.contains(tag))
            {
                completed.push(objective.id);
                weight += objective.weight;
            }
        }
        let missing: Vec<InfoTag> = self
            .objectives
            .iter()
            .flat_map(|o| o.required_info.iter().copied())
            .filter(|tag| !discovered.contains(tag))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        ObjectiveStatus {
            completed_objectives: completed,
            completion_percentage: weight,
            missing_info: missing,
        }
    }
}
