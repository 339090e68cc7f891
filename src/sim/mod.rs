//! Deterministic simulation module
//!
//! All scene logic lives here. This module must stay pure and deterministic:
//! - One step per display frame, driven by `tick`
//! - Seeded RNG only
//! - Time comes from the simulation clock, never read from the platform
//! - Geometry comes in through `SceneProbe`; no DOM access

pub mod cast;
pub mod clock;
pub mod fish;
pub mod hook;
pub mod input;
pub mod state;
pub mod tick;
pub mod viewport;

pub use cast::{CastOutput, CastPhase, CastState, cast_target_x};
pub use clock::Clock;
pub use fish::{Facing, FishState, Pose};
pub use hook::{HookEvent, HookPhase, HookState, RodAnchor};
pub use input::{InputBuffer, InputEvent, Key};
pub use state::SimState;
pub use tick::{FishView, Frame, HookView, tick};
pub use viewport::{Rect, SceneProbe, StaticProbe, ViewportMetrics};
