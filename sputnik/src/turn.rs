//! Turn processing: the interaction budget, the generation pipeline, and
//! termination handling with its farewell and objective summary.

use crate::extract::extract_revealed;
use crate::format::format_response;
use crate::objectives::{DiscoveredInfo, ObjectiveCatalog, ObjectiveStatus};
use crate::prompt::{build_context, create_prompt, extract_name};
use crate::state::{SlotUpdate, TurnState};
use crate::types::{Entity, EntityKind, HistoryEvent, Intent};
use llm::LlmClient;
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info};

/// Conversations are cut off once this many interactions have happened.
pub const INTERACTION_LIMIT: u32 = 15;

/// Completion at or above this percentage counts as a successful visit.
const SUCCESS_THRESHOLD: u32 = 75;

/// Everything the host hands over for one turn.
#[derive(Clone, Debug)]
pub struct TurnInput {
    pub intent: Intent,
    pub entities: Vec<Entity>,
    pub user_message: String,
    /// Full prior event log; only message events are used.
    pub history: Vec<HistoryEvent>,
    pub state: TurnState,
    pub discovered: DiscoveredInfo,
}

/// What the host must display and persist after a turn.
#[derive(Clone, Debug, Default)]
pub struct TurnOutput {
    pub messages: Vec<String>,
    pub updates: Vec<SlotUpdate>,
    /// Asks the host to suspend the conversation; no further turns are
    /// processed until it explicitly resumes.
    pub pause: bool,
}

/// The Sputnik dialogue agent. Holds no per-conversation state; every
/// mutable slot flows through [`TurnInput`] and [`TurnOutput`].
pub struct Agent {
    client: Arc<dyn LlmClient>,
    catalog: ObjectiveCatalog,
}

impl Agent {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            client,
            catalog: ObjectiveCatalog::new(),
        }
    }

    pub fn catalog(&self) -> &ObjectiveCatalog {
        &self.catalog
    }

    /// Run one conversation turn end to end.
    ///
    /// The random source drives gesture and farewell selection; tests pass
    /// a seeded rng for determinism.
    pub async fn take_turn<R: Rng>(&self, input: TurnInput, rng: &mut R) -> TurnOutput {
        let count = input.state.interaction_count + 1;
        if count >= INTERACTION_LIMIT {
            info!(count, "interaction limit reached, ending conversation");
            let mut output = self.end_conversation(&input, rng);
            output.updates.push(SlotUpdate::InteractionCount(count));
            return output;
        }

        let context = build_context(&input.history);
        let prompt = create_prompt(
            input.intent,
            &input.entities,
            &input.user_message,
            &input.state,
        );
        let raw = self.client.generate(&context, &prompt).await;
        let response = format_response(&raw, input.intent, rng);

        let mut updates = self.slot_updates(&input);
        updates.push(SlotUpdate::InteractionCount(count));

        let revealed = extract_revealed(input.intent, &response);
        if !revealed.is_empty() {
            debug!(tags = revealed.len(), "reply revealed information");
            let mut merged = input.discovered.clone();
            merged.extend(revealed);
            updates.push(SlotUpdate::DiscoveredInfo(merged));
        }

        TurnOutput {
            messages: vec![response],
            updates,
            pause: false,
        }
    }

    fn slot_updates(&self, input: &TurnInput) -> Vec<SlotUpdate> {
        let mut updates = Vec::new();
        if input.intent == Intent::AskPhilosophicalQuestion {
            updates.push(SlotUpdate::PhilosophicalDepth(
                input.state.philosophical_depth + 1,
            ));
        }
        if input.intent == Intent::IntroduceYourself {
            let gave_name = input.entities.iter().any(|e| {
                e.kind == EntityKind::PersonalInformation && e.value == "nombre"
            });
            if gave_name {
                if let Some(name) = extract_name(&input.user_message) {
                    updates.push(SlotUpdate::HumanName(name));
                }
            }
        }
        if input.intent == Intent::Greet && input.state.first_interaction {
            updates.push(SlotUpdate::FirstInteraction(false));
        }
        updates
    }

    /// Termination handling: no model call, a farewell picked by progress,
    /// then the objective summary.
    fn end_conversation<R: Rng>(&self, input: &TurnInput, rng: &mut R) -> TurnOutput {
        let status = self.catalog.check_completion(&input.discovered);
        let farewell = farewell_message(input.state.display_name(), &status, rng);
        let summary = summary_message(&self.catalog, &status, &input.discovered);
        TurnOutput {
            messages: vec![farewell, summary],
            updates: Vec::new(),
            pause: true,
        }
    }
}

fn farewell_message<R: Rng>(name: &str, status: &ObjectiveStatus, rng: &mut R) -> String {
    let farewells: [String; 3] = if status.completion_percentage >= SUCCESS_THRESHOLD {
        [
            format!(
                "*Sputnik cierra suavemente el libro y te mira con una sonrisa serena* Ha \
                 sido muy enriquecedor hablar contigo, {name}. Siento que he compartido \
                 contigo aspectos importantes de mi existencia."
            ),
            format!(
                "*Con los ojos brillantes de comprensión, Sputnik asiente lentamente* {name}, \
                 esta conversación me ha permitido reflexionar profundamente sobre mi \
                 naturaleza."
            ),
            format!(
                "*Sputnik devuelve el libro a la estantería con cuidado* Creo que hemos \
                 explorado juntos los aspectos más importantes de mi existencia, {name}. Te \
                 lo agradezco sinceramente."
            ),
        ]
    } else {
        [
            format!(
                "*Sputnik mira el libro en sus manos con una expresión reflexiva* {name}, \
                 siento que nuestra conversación debe llegar a su fin, aunque hay muchas más \
                 cuestiones que me gustaría compartir contigo en otro momento."
            ),
            format!(
                "*Con una sonrisa melancólica, Sputnik te observa* Ha sido muy placentero \
                 hablar contigo, {name}. Lamento que no hayamos podido explorar más aspectos \
                 de mi ser."
            ),
            format!(
                "*Sputnik cierra el libro lentamente* {name}, aunque nuestra conversación \
                 termina aquí, espero que lo que hemos compartido te haya resultado \
                 interesante."
            ),
        ]
    };
    farewells
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| farewells[0].clone())
}

fn summary_message(
    catalog: &ObjectiveCatalog,
    status: &ObjectiveStatus,
    discovered: &DiscoveredInfo,
) -> String {
    let succeeded = status.completion_percentage >= SUCCESS_THRESHOLD;
    let header = if succeeded {
        "🎯 MISIÓN COMPLETADA"
    } else {
        "🔍 CONVERSACIÓN FINALIZADA"
    };
    let discovered_list = if discovered.is_empty() {
        "Ninguna".to_string()
    } else {
        discovered
            .iter()
            .map(|tag| tag.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let completed_names: Vec<&str> = status
        .completed_objectives
        .iter()
        .filter_map(|id| catalog.get(*id))
        .map(|objective| objective.name)
        .collect();
    let bullets = if completed_names.is_empty() {
        "• Ninguno".to_string()
    } else {
        completed_names
            .iter()
            .map(|name| format!("• {name}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let closing = if succeeded {
        "Has descubierto información valiosa sobre Sputnik. La conversación ha concluido \
         exitosamente."
    } else {
        "Aún quedaba información relevante por descubrir. Intenta explorar más en la próxima \
         conversación."
    };
    format!(
        "{header}\n\n\
         Progreso total: {percentage:.1}%\n\
         Objetivos completados: {done}/{total}\n\n\
         Información descubierta: {discovered_list}\n\n\
         Objetivos completados:\n{bullets}\n\n\
         {closing}",
        percentage = status.completion_percentage as f32,
        done = status.completed_objectives.len(),
        total = catalog.objectives().len(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn summary_lists_progress_and_objectives() {
        let catalog = ObjectiveCatalog::new();
        let discovered: DiscoveredInfo = [
            crate::InfoTag::IdentityRevealed,
            crate::InfoTag::CreationPurpose,
            crate::InfoTag::AiAwareness,
        ]
        .into_iter()
        .collect();
        let status = catalog.check_completion(&discovered);
        let summary = summary_message(&catalog, &status, &discovered);
        assert!(summary.contains("🔍 CONVERSACIÓN FINALIZADA"));
        assert!(summary.contains("Progreso total: 25.0%"));
        assert!(summary.contains("Objetivos completados: 1/4"));
        assert!(summary.contains("identity_revealed"));
        assert!(summary.contains("• Descubrir la capacidad identitaria de Sputnik"));
        assert!(summary.contains("Aún quedaba información relevante"));
    }

    #[test]
    fn full_completion_flips_the_summary_tone() {
        let catalog = ObjectiveCatalog::new();
        let discovered: DiscoveredInfo = crate::InfoTag::ALL.into_iter().collect();
        let status = catalog.check_completion(&discovered);
        let summary = summary_message(&catalog, &status, &discovered);
        assert!(summary.contains("🎯 MISIÓN COMPLETADA"));
        assert!(summary.contains("Progreso total: 100.0%"));
        assert!(summary.contains("Objetivos completados: 4/4"));
        assert!(summary.contains("concluido exitosamente"));
    }

    #[test]
    fn farewell_pool_tracks_the_threshold() {
        let catalog = ObjectiveCatalog::new();
        let mut rng = StdRng::seed_from_u64(1);
        let low = catalog.check_completion(&DiscoveredInfo::new());
        let farewell = farewell_message("Ana", &low, &mut rng);
        assert!(farewell.contains("Ana"));
        assert!(!farewell.contains("enriquecedor"));

        let high = catalog.check_completion(&crate::InfoTag::ALL.into_iter().collect());
        for seed in 0..5 {
            let mut rng = StdRng::seed_from_u64(seed);
            let farewell = farewell_message("Ana", &high, &mut rng);
            assert!(farewell.contains("Ana"));
        }
    }
}
