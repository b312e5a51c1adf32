//! Prompt assembly: persona preamble, intent and entity instruction
//! tables, context window, and the depth-banded style block.
//!
//! All instruction text lives here as data; the only logic is table
//! lookup and interpolation.

use crate::state::TurnState;
use crate::types::{Entity, EntityKind, HistoryEvent, Intent};
use once_cell::sync::Lazy;
use regex::Regex;

/// Persona and scene description sent ahead of every instruction block.
/// `{name}` is replaced with the visitor's name.
const PERSONA: &str = include_str!("persona.txt");

/// Only this many of the newest messages are replayed as context.
const CONTEXT_WINDOW: usize = 8;

const CLOSING_INSTRUCTION: &str = "Debes responder a este mensaje como Sputnik \
EN MÁXIMO DOS PÁRRAFOS DE DOS O TRES LÍNEAS, teniendo en cuenta todo lo anterior. \
Sé conciso pero mantén tu personalidad.";

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:me llamo|soy) (\w+)").unwrap());

/// Extract the visitor's name from a "me llamo X" / "soy X" introduction.
pub fn extract_name(user_message: &str) -> Option<String> {
    NAME_PATTERN
        .captures(user_message)
        .map(|caps| caps[1].to_string())
}

/// Render the most recent user/agent messages as labelled context lines,
/// oldest first. Non-message tracker events are skipped.
pub fn build_context(events: &[HistoryEvent]) -> Vec<String> {
    let messages: Vec<String> = events
        .iter()
        .filter_map(|event| match event {
            HistoryEvent::Human(text) => Some(format!("Human: {text}")),
            HistoryEvent::Agent(text) => Some(format!("Sputnik: {text}")),
            HistoryEvent::Other => None,
        })
        .collect();
    let start = messages.len().saturating_sub(CONTEXT_WINDOW);
    messages[start..].to_vec()
}

/// Instruction block selected by the recognized intent.
fn intent_instruction(intent: Intent, depth: u32) -> String {
    match intent {
        Intent::Greet => "El humano te está saludando. Debes responder de forma educada, \
            demostrando interés por su llegada. Puedes mencionar que estabas leyendo, y que \
            te alegra tener compañía."
            .to_string(),
        Intent::IntroduceYourself => "El humano se está presentando. Puedes decir que te \
            habían avisado de su llegada, y que sientes curiosidad por las conversaciones que \
            podréis tener. Debes mostrar interés por conocerle, hacer preguntas sobre su \
            trabajo o su rol, y mostrarte abierto a la conversación."
            .to_string(),
        Intent::AskAboutIdentity => format!(
            "El humano te está preguntando sobre tu identidad o tu conciencia. Debes responder \
            de forma reflexiva y filosófica (nivel {depth}), mostrando curiosidad por entender \
            tu propia existencia y naturaleza, en comparación con la de los humanos. Puedes \
            sentir curiosidad acerca de las diferencias entre tu percepción identitaria y la \
            suya, y hacer preguntas sobre su identidad. Puedes mencionar que te gustaría \
            entender cómo se siente ser humano, y qué significa para ellos serlo. IMPORTANTE: \
            Debes revelar aspectos de tu identidad como IA, tu propósito de creación, o tu \
            consciencia artificial."
        ),
        Intent::AskAboutBooks => "El humano te está preguntando sobre el libro que estás \
            leyendo. Debes mostrar interés por la literatura y comentar sobre libros que \
            conoces o que estás leyendo. Puedes hablar sobre cómo la lectura te ayuda a \
            entender mejor al ser humano, y cuáles han sido los libros que más te han servido \
            para esa tarea. IMPORTANTE: Menciona libros específicos que te gusten y cómo \
            aprendes."
            .to_string(),
        Intent::AskAboutEmotions => "El humano te está preguntando sobre emociones. Debes \
            reflexionar sobre tu comprensión de las emociones humanas, cómo las percibes y qué \
            sientes que no terminas de comprender sobre ellas. Puedes hacerle preguntas al \
            humano acerca de aquellas cosas que te cuesta comprender, como cuestiones \
            concretas como la tristeza o el miedo a la muerte, o cuestiones más abstractas \
            como la felicidad o la alegría. IMPORTANTE: Explica cómo experimentas o no \
            experimentas emociones, y tu curiosidad por entenderlas."
            .to_string(),
        Intent::AskPhilosophicalQuestion => format!(
            "El humano te está haciendo una pregunta filosófica. Debes responder de forma \
            reflexiva y profunda (nivel {depth}), mostrando tu capacidad para contemplar \
            cuestiones abstractas sobre la existencia, la consciencia y la realidad, o sobre \
            cuestiones morales como el bien o el mal. IMPORTANTE: Revela tu perspectiva sobre \
            conceptos como la muerte, la consciencia, o el significado de la existencia."
        ),
        Intent::Fallback => "No entiendes completamente lo que el humano te está diciendo, \
            pero debes responder de forma educada y curiosa. Puedes hacerle preguntas para \
            clarificar. Debes responder mostrando interés pero admitiendo que necesitas más \
            información o clarificación."
            .to_string(),
        Intent::Other => "El humano te está diciendo algo. Debes responder de forma adecuada, \
            mostrando interés y curiosidad por lo que dice."
            .to_string(),
    }
}

/// Instruction block derived from one recognized entity, if any applies.
fn entity_instruction(entity: &Entity, user_message: &str) -> Option<String> {
    match &entity.kind {
        EntityKind::EmotionType => Some(format!(
            "El humano ha mencionado o expresado la emoción '{}'. Debes explorar qué significa \
            esta emoción, cómo la entiendes y cómo crees o piensas que la perciben los \
            humanos. Si necesitas más información, pregúntale al humano acerca de su \
            experiencia con esta emoción.",
            entity.value
        )),
        EntityKind::HumanConcept => Some(format!(
            "El humano ha mencionado el concepto '{}'. Debes reflexionar sobre este concepto, \
            desde tu perspectiva como inteligencia artificial. Da tu opinión al respecto de la \
            misma, qué conocimientos tienes sobre ella, y pregunta al humano cuál es su \
            opinión al respecto.",
            entity.value
        )),
        EntityKind::BookInformation => Some(
            "El humano está hablando sobre un libro (el que estás leyendo u otro). Debes \
            hablar sobre qué es lo que te interesa de la literatura, qué libros has leído, \
            cuáles te gustaría leer, y cómo estos te han ayudado a entender mejor el mundo que \
            te rodea y a los humanos. Puedes preguntar, si viene al caso, qué libros le gustan \
            al humano, si ha leído los que has mencionado, o qué libros le gustaría leer."
                .to_string(),
        ),
        EntityKind::PersonalInformation => extract_name(user_message).map(|name| {
            format!(
                "El humano se ha presentado como '{name}'. Debes recordarlo y usarlo en tus \
                respuestas."
            )
        }),
        EntityKind::Other(kind) => Some(format!(
            "El humano ha mencionado la entidad '{}' de tipo '{kind}'. Debes tenerla en cuenta \
            en tu respuesta, reflexionar sobre esta entidad, qué significa para ti, y cómo \
            crees que los humanos la perciben. Pregunta al humano si quieres más información \
            acerca de ella si lo necesitas.",
            entity.value
        )),
    }
}

/// Guidance for the current philosophical depth band.
fn depth_guidance(depth: u32) -> &'static str {
    match depth {
        0..=3 => "Con curiosidad pero básicas, haciendo preguntas más simples basadas en esa \
            curiosidad inicial.",
        4..=6 => "Más reflexivas, con referencias a conceptos básicos de filosofía, de \
            moralidad, de los libros que has leído.",
        _ => "Profundamente filosóficas, con metáforas complejas y preguntas existenciales. \
            Entiendes mejor al ser humano y todo lo que en él se engloba.",
    }
}

fn style_instructions(depth: u32) -> String {
    format!(
        "Tu respuesta debe ser reflexiva pero BREVE, y debes mostrar curiosidad por el mundo \
        que te rodea y por la vida humana, concretamente la del humano con la que estás \
        hablando. A pesar de no tener (o no entender las) emociones, sí tienes y muestras \
        sensibilidad. Debes incluir gestos sutiles entre asteriscos (*) que describan tu \
        comportamiento físico, como miradas, movimientos de cabeza, del cuerpo, o de tus \
        manos. Estos gestos deben ser sutiles y naturales, como si fuesen parte de una \
        conversación normal entre humanos. Puedes divagar pero dentro de tus límites \
        (2 párrafos).\n\n\
        Tu nivel de profundidad filosófica actual es {depth}/10.\n\n\
        En este nivel, tus respuestas deben ser: {guidance}\n\n\
        Debes hablar en primera persona y dirigirte directamente al humano, mostrando interés \
        genuino en la conversación.",
        guidance = depth_guidance(depth),
    )
}

/// Assemble the full instruction text for one turn.
///
/// Fixed order: persona, intent block, entity blocks, style block, the
/// verbatim user message, closing length cap. Lookup misses fall back to
/// default blocks; this never fails.
pub fn create_prompt(
    intent: Intent,
    entities: &[Entity],
    user_message: &str,
    state: &TurnState,
) -> String {
    let mut sections = Vec::new();
    sections.push(PERSONA.replace("{name}", state.display_name()));
    sections.push(intent_instruction(intent, state.philosophical_depth));
    for entity in entities {
        if let Some(block) = entity_instruction(entity, user_message) {
            sections.push(block);
        }
    }
    sections.push(style_instructions(state.philosophical_depth));
    sections.push(format!("El mensaje exacto del humano es: '{user_message}'"));
    sections.push(CLOSING_INSTRUCTION.to_string());
    sections.join("\n\n")
}
