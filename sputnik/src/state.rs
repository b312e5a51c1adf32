//! Per-conversation slots and the update directives handed back to the
//! host's state store.

use crate::objectives::InfoTag;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Per-conversation state owned and persisted by the host.
///
/// Missing slots default to a fresh conversation: zero interactions,
/// depth 1, no name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    pub interaction_count: u32,
    pub philosophical_depth: u32,
    pub human_name: Option<String>,
    pub first_interaction: bool,
}

impl Default for TurnState {
    fn default() -> Self {
        Self {
            interaction_count: 0,
            philosophical_depth: 1,
            human_name: None,
            first_interaction: true,
        }
    }
}

impl TurnState {
    /// Name used to address the visitor until they introduce themselves.
    pub fn display_name(&self) -> &str {
        self.human_name.as_deref().unwrap_or("Investigador")
    }
}

/// Slot-persistence directive returned to the host after a turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotUpdate {
    InteractionCount(u32),
    PhilosophicalDepth(u32),
    HumanName(String),
    FirstInteraction(bool),
    DiscoveredInfo(BTreeSet<InfoTag>),
}
