//! Post-processing of generated replies: stray speaker labels are
//! stripped and a gesture stage-direction is injected when missing.

use crate::types::Intent;
use rand::seq::SliceRandom;
use rand::Rng;

const AGENT_LABEL: &str = "Sputnik:";
const HUMAN_LABEL: &str = "Human:";

const DEFAULT_GESTURES: &[&str] = &[
    "*Sputnik te observa fijamente con sus claros ojos brillantes*",
    "*Sputnik gira levemente la cabeza con una sonrisa en los labios, pensativo*",
    "*Sus dedos acarician el libro que tiene entre las manos mientras lo mira, pensativo*",
    "*Sputnik asiente levemente con la cabeza, como dándote la razón*",
];

/// Gesture pool for one intent; unmapped intents share the default pool.
fn gestures(intent: Intent) -> &'static [&'static str] {
    match intent {
        Intent::Greet => &[
            "*Sputnik levanta la vista de su libro y sonríe levemente al verte, con interés*",
            "*Sputnik, que hasta entonces había estado manteniendo la vista en su libro, la \
             levanta de las hojas y te observa*",
        ],
        Intent::IntroduceYourself => &[
            "*Sputnik te sonríe y, girando su cuerpo hacia ti, se inclina levemente hacia \
             delante, como saludándote con el cuerpo*",
            "*Sputnik cierra lentamente el libro y te mira con una sonrisa amable, \
             saludándote con los ojos*",
            "*Sputnik te observa con una ligera sonrisa, como si estuviese analizándote, \
             antes de hablar*",
        ],
        Intent::AskAboutIdentity => &[
            "*Sputnik baja un poco la mirada y se lleva la mano al mentón. La pregunta le \
             hace necesitar un momento para pensar antes de poder decir algo*",
            "*Con la mirada puesta en el libro que tiene entre las manos, como si este \
             pudiese darle una respuesta, Sputnik piensa en lo que le acabas de preguntar*",
        ],
        Intent::AskAboutBooks => &[
            "*Sputnik asiente lentamente con la cabeza y mira la tapa del libro que tiene \
             entre las manos*",
            "*Con delicadeza, te extiende el libro que tiene entre las manos, como si te lo \
             ofreciese para que lo veas*",
            "*Sputnik sonríe levemente y mira hacia la estantería, como si estuviese \
             buscando un libro en concreto*",
            "*Sputnik te mira con curiosidad, como si estuviese esperando que le digas algo \
             más sobre el libro*",
        ],
        Intent::AskAboutEmotions => &[
            "*Sputnik inclina la cabeza ligeramente, con una expresión de curiosidad genuina*",
            "*Sus ojos claros se iluminan con interés mientras considera la pregunta*",
        ],
        Intent::AskPhilosophicalQuestion => &[
            "*Sputnik se queda inmóvil por un momento, con la mirada perdida en la distancia \
             mientras reflexiona*",
            "*Con una expresión profundamente pensativa, Sputnik cierra el libro lentamente*",
        ],
        Intent::Fallback | Intent::Other => DEFAULT_GESTURES,
    }
}

/// Strip stray speaker labels and make sure the reply opens with a gesture.
///
/// Replies that already carry a `*gesture*` marker pass through with only
/// the label stripping, so injection is idempotent.
pub fn format_response<R: Rng>(raw: &str, intent: Intent, rng: &mut R) -> String {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix(AGENT_LABEL) {
        text = rest.trim();
    }
    if let Some(rest) = text.strip_suffix(HUMAN_LABEL) {
        text = rest.trim();
    }
    if text.contains('*') {
        return text.to_string();
    }
    let pool = gestures(intent);
    let gesture = pool.choose(rng).copied().unwrap_or(DEFAULT_GESTURES[0]);
    format!("{gesture}\n\n{text}")
}
