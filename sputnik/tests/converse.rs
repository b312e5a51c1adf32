use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use llm::LlmClient;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sputnik::{
    Agent, DiscoveredInfo, Entity, EntityKind, InfoTag, Intent, SlotUpdate, TurnInput,
    TurnState, INTERACTION_LIMIT,
};

struct StubClient {
    reply: &'static str,
    calls: AtomicUsize,
}

impl StubClient {
    fn new(reply: &'static str) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for StubClient {
    async fn generate(&self, _context: &[String], _prompt: &str) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.to_string()
    }

    async fn is_available(&self) -> bool {
        true
    }
}

fn turn_input(intent: Intent, message: &str) -> TurnInput {
    TurnInput {
        intent,
        entities: Vec::new(),
        user_message: message.to_string(),
        history: Vec::new(),
        state: TurnState::default(),
        discovered: DiscoveredInfo::new(),
    }
}

#[tokio::test]
async fn first_greeting_sets_the_slots() {
    let client = StubClient::new("Bienvenido, me alegra tener compañía.");
    let agent = Agent::new(client.clone());
    let mut rng = StdRng::seed_from_u64(1);

    let out = agent.take_turn(turn_input(Intent::Greet, "Hola"), &mut rng).await;

    assert!(!out.pause);
    assert_eq!(out.messages.len(), 1);
    assert!(out.messages[0].starts_with('*'), "greeting gesture missing");
    assert!(out.updates.contains(&SlotUpdate::FirstInteraction(false)));
    assert!(out.updates.contains(&SlotUpdate::InteractionCount(1)));
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn repeat_greeting_leaves_first_interaction_alone() {
    let client = StubClient::new("Hola de nuevo.");
    let agent = Agent::new(client);
    let mut rng = StdRng::seed_from_u64(1);

    let mut input = turn_input(Intent::Greet, "Hola otra vez");
    input.state.first_interaction = false;
    let out = agent.take_turn(input, &mut rng).await;

    assert!(!out
        .updates
        .iter()
        .any(|u| matches!(u, SlotUpdate::FirstInteraction(_))));
}

#[tokio::test]
async fn introduction_captures_the_name() {
    let client = StubClient::new("Encantado de conocerte.");
    let agent = Agent::new(client);
    let mut rng = StdRng::seed_from_u64(1);

    let mut input = turn_input(Intent::IntroduceYourself, "Me llamo Ana");
    input
        .entities
        .push(Entity::new(EntityKind::PersonalInformation, "nombre"));
    let out = agent.take_turn(input, &mut rng).await;

    assert!(out
        .updates
        .contains(&SlotUpdate::HumanName("Ana".to_string())));
}

#[tokio::test]
async fn philosophical_questions_deepen_the_conversation() {
    let client = StubClient::new("Una pregunta fascinante.");
    let agent = Agent::new(client);
    let mut rng = StdRng::seed_from_u64(1);

    let out = agent
        .take_turn(
            turn_input(Intent::AskPhilosophicalQuestion, "¿Qué es el bien?"),
            &mut rng,
        )
        .await;

    assert!(out.updates.contains(&SlotUpdate::PhilosophicalDepth(2)));
}

#[tokio::test]
async fn revealed_information_is_merged_into_the_set() {
    let client = StubClient::new("*asiente* Soy un prototipo.");
    let agent = Agent::new(client);
    let mut rng = StdRng::seed_from_u64(1);

    let mut input = turn_input(Intent::AskAboutIdentity, "¿Quién eres?");
    input.discovered.insert(InfoTag::DeathConcept);
    let out = agent.take_turn(input, &mut rng).await;

    let merged: DiscoveredInfo = [InfoTag::IdentityRevealed, InfoTag::DeathConcept]
        .into_iter()
        .collect();
    assert!(out.updates.contains(&SlotUpdate::DiscoveredInfo(merged)));
}

#[tokio::test]
async fn plain_replies_produce_no_discovery_update() {
    let client = StubClient::new("*mira el libro* Qué día tan tranquilo.");
    let agent = Agent::new(client);
    let mut rng = StdRng::seed_from_u64(1);

    let out = agent.take_turn(turn_input(Intent::Other, "mmm"), &mut rng).await;

    assert!(!out
        .updates
        .iter()
        .any(|u| matches!(u, SlotUpdate::DiscoveredInfo(_))));
}

#[tokio::test]
async fn turn_fourteen_still_generates() {
    let client = StubClient::new("Sigo aquí, leyendo.");
    let agent = Agent::new(client.clone());
    let mut rng = StdRng::seed_from_u64(1);

    let mut input = turn_input(Intent::Other, "sigue");
    input.state.interaction_count = INTERACTION_LIMIT - 2;
    let out = agent.take_turn(input, &mut rng).await;

    assert!(!out.pause);
    assert_eq!(client.calls(), 1);
    assert!(out
        .updates
        .contains(&SlotUpdate::InteractionCount(INTERACTION_LIMIT - 1)));
}

#[tokio::test]
async fn turn_fifteen_ends_without_generating() {
    let client = StubClient::new("nunca enviado");
    let agent = Agent::new(client.clone());
    let mut rng = StdRng::seed_from_u64(1);

    let mut input = turn_input(Intent::AskAboutBooks, "¿y este libro?");
    input.state.interaction_count = INTERACTION_LIMIT - 1;
    let out = agent.take_turn(input, &mut rng).await;

    assert!(out.pause);
    assert_eq!(client.calls(), 0, "termination must skip the model call");
    assert_eq!(out.messages.len(), 2);
    assert!(out.messages[0].contains("Investigador"));
    assert!(out.messages[1].contains("Progreso total"));
    assert_eq!(out.updates, vec![SlotUpdate::InteractionCount(INTERACTION_LIMIT)]);
}

#[tokio::test]
async fn termination_summary_reflects_discoveries() {
    let client = StubClient::new("nunca enviado");
    let agent = Agent::new(client);
    let mut rng = StdRng::seed_from_u64(1);

    let mut input = turn_input(Intent::Other, "adiós");
    input.state.interaction_count = INTERACTION_LIMIT - 1;
    input.state.human_name = Some("Ana".into());
    input.discovered = InfoTag::ALL.into_iter().collect();
    let out = agent.take_turn(input, &mut rng).await;

    assert!(out.messages[0].contains("Ana"));
    assert!(out.messages[1].contains("🎯 MISIÓN COMPLETADA"));
    assert!(out.messages[1].contains("4/4"));
}

#[tokio::test]
async fn degraded_backend_still_completes_the_turn() {
    let client = StubClient::new(llm::FALLBACK_RESPONSE);
    let agent = Agent::new(client);
    let mut rng = StdRng::seed_from_u64(1);

    let out = agent.take_turn(turn_input(Intent::Greet, "Hola"), &mut rng).await;

    assert!(!out.pause);
    assert!(out.messages[0].contains(llm::FALLBACK_RESPONSE));
    assert!(out.updates.contains(&SlotUpdate::InteractionCount(1)));
}
