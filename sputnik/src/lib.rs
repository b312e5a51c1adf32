//! Dialogue core for the role-played agent Sputnik.
//!
//! The host framework recognizes an intent, loads the session's slots and
//! calls [`Agent::take_turn`]. The agent assembles a persona prompt, asks
//! the language model backend for a reply, formats it, scores which
//! narrative facts the reply disclosed, and hands back the outbound
//! messages plus slot-update directives. Once the interaction budget is
//! spent, the turn skips generation and closes the conversation with a
//! farewell and an objective summary.
//!
//! The crate holds no process-wide mutable state; everything per-session
//! travels through [`TurnInput`] and [`TurnOutput`].

pub mod extract;
pub mod format;
pub mod objectives;
pub mod prompt;
pub mod state;
pub mod turn;
pub mod types;

pub use objectives::{
    DiscoveredInfo, InfoTag, Objective, ObjectiveCatalog, ObjectiveId, ObjectiveStatus,
};
pub use state::{SlotUpdate, TurnState};
pub use turn::{Agent, TurnInput, TurnOutput, INTERACTION_LIMIT};
pub use types::{Entity, EntityKind, HistoryEvent, Intent};
