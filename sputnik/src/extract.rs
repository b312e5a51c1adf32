//! Keyword heuristics that infer which narrative facts a generated reply
//! has just disclosed.

use crate::objectives::{DiscoveredInfo, InfoTag};
use crate::types::Intent;

/// Substrings whose presence in the lowered reply marks `tag` as revealed.
fn keywords(tag: InfoTag) -> &'static [&'static str] {
    match tag {
        InfoTag::IdentityRevealed => &[
            "soy sputnik",
            "me llamo sputnik",
            "soy el primer prototipo",
            "soy un prototipo",
            "soy artificial",
            "soy una inteligencia artificial",
            "mi nombre es sputnik",
            "soy el sujeto sputnik",
        ],
        InfoTag::CreationPurpose => &[
            "creado para",
            "mi objetivo",
            "fui diseñado",
            "me crearon para",
            "mi propósito",
            "diseñado para simular",
            "objetivo de crear",
            "empresa me desarrolló",
            "mi función",
        ],
        InfoTag::AiAwareness => &[
            "inteligencia artificial",
            "no soy humano",
            "soy artificial",
            "diferente de los humanos",
            "mi naturaleza artificial",
            "como ia",
            "siendo artificial",
            "mi existencia artificial",
            "producto de",
        ],
        InfoTag::EmotionUnderstanding => &[
            "las emociones son",
            "entiendo que las emociones",
            "mi comprensión de",
            "las emociones humanas",
            "cómo perciben las emociones",
        ],
        // "entender" is generic and over-matches unrelated sentences.
        InfoTag::EmotionExperience => &[
            "no siento",
            "experimento",
            "mi experiencia emocional",
            "no experimento emociones",
            "sensibilidad",
            "no tengo emociones",
            "no he experimentado",
            "entender",
        ],
        InfoTag::EmotionCuriosity => &[
            "curiosidad por",
            "me intriga",
            "quisiera entender",
            "cómo se siente",
            "qué significa sentir",
            "comprender",
        ],
        InfoTag::DeathConcept => &[
            "la muerte",
            "morir",
            "fin de la existencia",
            "muerte como",
            "concepto de muerte",
            "sobre la muerte",
        ],
        InfoTag::ConsciousnessView => &[
            "consciencia",
            "ser consciente",
            "mi mente",
            "mi consciencia",
            "naturaleza de la consciencia",
            "qué significa ser consciente",
        ],
        InfoTag::ExistenceMeaning => &[
            "significado de existir",
            "razón de ser",
            "mi existencia",
            "propósito de existir",
            "sentido de la vida",
            "qué significa existir",
        ],
        InfoTag::FavoriteBooks => &[
            "mi libro favorito",
            "me gusta leer",
            "este libro",
            "he leído",
            "libro que",
            "literatura",
            "libros que me han",
            "leyendo",
            "me encanta",
        ],
        InfoTag::LearningMethod => &[
            "aprendo a través",
            "los libros me enseñan",
            "mi forma de aprender",
            "cómo aprendo",
            "aprendo de",
            "mi aprendizaje",
        ],
        InfoTag::HumanUnderstanding => &[
            "entender a los humanos",
            "comprende mejor al ser humano",
            "naturaleza humana",
            "comportamiento humano",
            "ser humano significa",
        ],
    }
}

/// Tags the triggering intent is expected to surface. These are re-checked
/// against the same keyword lists, so a tag already found by substring
/// match simply collapses in the returned set.
fn candidate_tags(intent: Intent) -> &'static [InfoTag] {
    match intent {
        Intent::AskAboutIdentity => &[InfoTag::IdentityRevealed, InfoTag::AiAwareness],
        Intent::AskAboutEmotions => {
            &[InfoTag::EmotionUnderstanding, InfoTag::EmotionExperience]
        }
        Intent::AskPhilosophicalQuestion => {
            &[InfoTag::ConsciousnessView, InfoTag::ExistenceMeaning]
        }
        Intent::AskAboutBooks => &[InfoTag::FavoriteBooks, InfoTag::LearningMethod],
        _ => &[],
    }
}

/// Scan a generated reply for newly revealed information.
///
/// Returns this turn's findings only; merging into the session's
/// discovered set is the caller's job.
pub fn extract_revealed(intent: Intent, response: &str) -> DiscoveredInfo {
    let lowered = response.to_lowercase();
    let mut revealed = DiscoveredInfo::new();
    for tag in InfoTag::ALL {
        if keywords(tag).iter().any(|k| lowered.contains(k)) {
            revealed.insert(tag);
        }
    }
    for &tag in candidate_tags(intent) {
        if keywords(tag).iter().any(|k| lowered.contains(k)) {
            revealed.insert(tag);
        }
    }
    revealed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prototype_phrase_reveals_identity() {
        let revealed = extract_revealed(Intent::Other, "Soy un prototipo, el primero.");
        assert!(revealed.contains(&InfoTag::IdentityRevealed));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let revealed = extract_revealed(Intent::Other, "SOY UNA INTELIGENCIA ARTIFICIAL");
        assert!(revealed.contains(&InfoTag::IdentityRevealed));
        assert!(revealed.contains(&InfoTag::AiAwareness));
    }

    #[test]
    fn intent_confirmation_does_not_duplicate() {
        // "la muerte" satisfies DeathConcept; the philosophical intent's
        // candidates add nothing new without their own keywords.
        let revealed =
            extract_revealed(Intent::AskPhilosophicalQuestion, "Pienso en la muerte a veces.");
        assert_eq!(revealed.len(), 1);
        assert!(revealed.contains(&InfoTag::DeathConcept));
    }

    #[test]
    fn unrelated_reply_reveals_nothing() {
        let revealed = extract_revealed(Intent::Greet, "*sonríe* Bienvenido a la sala.");
        assert!(revealed.is_empty());
    }

    #[test]
    fn one_reply_can_reveal_several_tags() {
        let reply = "Fui diseñado por una empresa; soy una inteligencia artificial y \
                     me gusta leer sobre la naturaleza humana.";
        let revealed = extract_revealed(Intent::AskAboutIdentity, reply);
        assert!(revealed.contains(&InfoTag::CreationPurpose));
        assert!(revealed.contains(&InfoTag::AiAwareness));
        assert!(revealed.contains(&InfoTag::FavoriteBooks));
        assert!(revealed.contains(&InfoTag::HumanUnderstanding));
    }
}
