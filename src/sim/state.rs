//! Simulation state
//!
//! Everything that changes from frame to frame lives in one struct owned by
//! the driver; components get the pieces they need by reference.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::cast::CastState;
use super::clock::Clock;
use super::fish::FishState;
use super::hook::HookState;
use super::viewport::ViewportMetrics;
use crate::settings::Features;
use crate::tuning::Tuning;

/// Complete simulation state (deterministic for a given seed and input log)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    /// Seed the current session was started with
    pub seed: u64,
    /// Jig randomness
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Casting feature flag
    pub casting: bool,
    pub paused: bool,
    pub clock: Clock,
    pub fish: FishState,
    pub hook: HookState,
    pub cast: CastState,
    /// Unpaused frames simulated this session
    pub frame_count: u64,
}

impl SimState {
    pub fn new(seed: u64, features: Features, tuning: Tuning, metrics: &ViewportMetrics) -> Self {
        let fish = FishState::new(metrics, &tuning);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            casting: features.casting,
            paused: false,
            clock: Clock::new(),
            fish,
            hook: HookState::new(),
            cast: CastState::new(),
            frame_count: 0,
        }
    }

    /// Start a fresh session with the current flags and tuning
    ///
    /// The cast becomes available again, which is the only way to see it twice.
    pub fn reset(&mut self, metrics: &ViewportMetrics) {
        let seed = self.rng.random::<u64>();
        let features = Features {
            casting: self.casting,
        };
        *self = Self::new(seed, features, self.tuning.clone(), metrics);
        log::info!("Simulation reset (casting: {}, seed: {})", self.casting, seed);
    }

    pub fn features(&self) -> Features {
        Features {
            casting: self.casting,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::cast::CastPhase;
    use crate::sim::hook::HookPhase;

    #[test]
    fn test_reset_restores_initial_state() {
        let metrics = ViewportMetrics::new(1200.0, 800.0, None);
        let mut state = SimState::new(42, Features { casting: true }, Tuning::default(), &metrics);

        state.fish.pos.x = 900.0;
        state.fish.speed_index = 2;
        state.paused = true;
        state.hook.phase = HookPhase::Jig;
        state.cast.fired = true;
        state.cast.phase = CastPhase::Settle;
        state.frame_count = 99;

        state.reset(&metrics);
        assert_eq!(state.fish.pos.x, 24.0);
        assert_eq!(state.fish.speed_index, 0);
        assert!(!state.paused);
        assert_eq!(state.hook.phase, HookPhase::Drop);
        assert!(!state.cast.fired);
        assert_eq!(state.cast.phase, CastPhase::Idle);
        assert_eq!(state.frame_count, 0);
        assert!(state.casting);
        assert_ne!(state.seed, 42);
    }

    #[test]
    fn test_state_serializes() {
        let metrics = ViewportMetrics::new(1200.0, 800.0, None);
        let state = SimState::new(7, Features::default(), Tuning::default(), &metrics);
        let json = serde_json::to_string(&state).unwrap();
        let back: SimState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, 7);
        assert_eq!(back.fish.pos, state.fish.pos);
    }
}
