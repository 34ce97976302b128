//! Narrative-presentation runtime for a point-and-click adventure sequence.
//!
//! The engine is single-threaded and cooperative: all work happens on one
//! logical thread, driven by pointer dispatch and a virtual-clock scheduler.
//! Rendering is an external collaborator; every observable mutation is
//! recorded in an ordered event log that the presentation layer (or a test)
//! can replay.

pub mod dialogue;
pub mod flags;
pub mod game;
pub mod overlay;
pub mod scene;
pub mod scheduler;

pub use dialogue::{DialogueLine, DialogueSequencer};
pub use flags::{FlagStore, FlagValue};
pub use game::{Game, GameSnapshot};
pub use overlay::{AllyOverlay, OverlayPhase, RosterEntry};
pub use scene::{Cursor, Enablement, Hotspot, Region, SceneDef};
pub use scheduler::{ContextId, EventScheduler};
