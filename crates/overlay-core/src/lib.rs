//! Core overlay logic for overlay-live.
//!
//! Everything in this crate is independent of the browser: caption
//! parsing and selection, the ad-detection heuristic, the fullscreen
//! presentation state machine, reaction registries and counter
//! transforms, barrage send gating and fan-in planning, and the
//! floating-element pool bookkeeping. The `overlay-client` crate wires
//! these into the DOM, the embedded player and the realtime store.

pub mod barrage;
pub mod captions;
pub mod playback;
pub mod pool;
pub mod presentation;
pub mod reactions;
pub mod settings;

pub use barrage::{BarrageSignal, Emission, SecondTracker, SendGate, plan_emissions};
pub use captions::{Caption, active_captions, joined_text, parse_srt};
pub use playback::{PlaybackSnapshot, PlayerState, is_primary_content};
pub use pool::{FloatingPool, vertical_offset};
pub use presentation::{
    EnterOutcome, PlatformReconciliation, PresentationMachine, PresentationState, ToggleAction,
};
pub use reactions::{BARRAGE_REACTIONS, ReactionKind, WALL_REACTIONS, glyph_for};
pub use settings::{BarragePrefs, clamp_subtitle_scale};
