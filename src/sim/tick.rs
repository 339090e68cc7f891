//! Per-frame simulation step
//!
//! One call per display frame: buffered input first, then fish kinematics,
//! then hook and cast animation reading the freshly moved scene.

use glam::Vec2;

use super::cast::cast_target_x;
use super::fish::{Facing, Pose};
use super::hook::{HookEvent, RodAnchor};
use super::input::{InputBuffer, InputEvent, Key};
use super::state::SimState;
use super::viewport::{Rect, SceneProbe, ViewportMetrics};

/// Fish as it should be drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FishView {
    pub pos: Vec2,
    pub facing: Facing,
    pub pose: Pose,
}

/// Hook and line as they should be drawn (viewport coordinates)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HookView {
    /// X of the hook eye (rod tip, or wherever the cast put it)
    pub eye_x: f32,
    /// Vertical center of the hook sprite
    pub center_y: f32,
    /// Rod tip to hook eye
    pub line_length: f32,
    pub rod_tip: Vec2,
    /// Boat box the hook and line are positioned inside
    pub boat: Rect,
}

/// Everything the renderer needs after a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub fish: FishView,
    /// None when the hook was not updated (paused, or boat not measurable)
    pub hook: Option<HookView>,
    /// Rod rotation in degrees while a cast is running
    pub rod_rotation: Option<f32>,
    /// The viewport was resized; scenery should be laid out again
    pub relayout: bool,
    /// The casting flag was toggled to this value (persist it)
    pub casting_toggled: Option<bool>,
    pub paused: bool,
    /// Simulation time of this frame (ms)
    pub sim_ms: f64,
}

/// Advance the simulation by one display frame
pub fn tick<P: SceneProbe + ?Sized>(
    state: &mut SimState,
    input: &mut InputBuffer,
    probe: &P,
    frame_ms: f64,
) -> Frame {
    let metrics = ViewportMetrics::from_probe(probe);
    let mut relayout = false;
    let mut casting_toggled = None;

    // Apply input edges atomically before anything moves
    for event in input.drain() {
        match event {
            InputEvent::KeyDown(Key::Pause) => {
                state.paused = !state.paused;
                log::info!("{}", if state.paused { "Paused" } else { "Resumed" });
            }
            InputEvent::KeyDown(Key::ToggleCast) => {
                state.casting = !state.casting;
                casting_toggled = Some(state.casting);
                log::info!("Casting toggled {}", if state.casting { "on" } else { "off" });
                state.reset(&metrics);
            }
            InputEvent::KeyDown(key) => {
                state.fish.apply_key_down(key, &metrics, &state.tuning);
            }
            InputEvent::KeyUp(key) => state.fish.apply_key_up(key),
            InputEvent::Resized => {
                state.fish.refit(&metrics, &state.tuning);
                relayout = true;
            }
        }
    }

    let sim_ms = state.clock.advance(frame_ms, state.paused);

    let mut frame = Frame {
        fish: fish_view(state),
        hook: None,
        rod_rotation: None,
        relayout,
        casting_toggled,
        paused: state.paused,
        sim_ms,
    };

    if state.paused {
        return frame;
    }

    state.fish.step(&metrics, &state.tuning);
    state.frame_count += 1;
    frame.fish = fish_view(state);

    let Some(boat) = probe.boat_rect().filter(|b| !b.is_empty()) else {
        log::trace!("Boat not laid out yet, hook frame skipped");
        return frame;
    };
    let anchor = RodAnchor::from_boat(boat);

    let event = state
        .hook
        .step(sim_ms, &anchor, &metrics, &state.tuning, &mut state.rng);

    let mut hook_x = None;
    match event {
        HookEvent::Dropped => {
            let section = metrics.section_of(boat.center_x());
            if state.cast.try_start(state.casting, section, sim_ms) {
                log::info!("Casting from boat section {}", section);
            }
        }
        HookEvent::Jigged => {
            if state.casting {
                let section = metrics.section_of(boat.center_x());
                let target_x = cast_target_x(section, metrics.width);
                let out = state
                    .cast
                    .step(sim_ms, anchor.tip.x, target_x, &state.tuning);
                frame.rod_rotation = out.rod_rotation;
                hook_x = out.hook_x;
            }
        }
    }

    // Hook machine owns y and line length; the cast may own x
    frame.hook = Some(HookView {
        eye_x: hook_x.unwrap_or(anchor.tip.x),
        center_y: state.hook.y,
        line_length: state.hook.line_length,
        rod_tip: anchor.tip,
        boat,
    });

    frame
}

fn fish_view(state: &SimState) -> FishView {
    FishView {
        pos: state.fish.pos,
        facing: state.fish.facing,
        pose: state.fish.pose,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Features;
    use crate::sim::cast::CastPhase;
    use crate::sim::hook::HookPhase;
    use crate::sim::viewport::StaticProbe;
    use crate::tuning::Tuning;

    const FRAME_MS: f64 = 16.0;

    fn new_state(probe: &StaticProbe, casting: bool) -> SimState {
        let metrics = ViewportMetrics::from_probe(probe);
        SimState::new(12345, Features { casting }, Tuning::default(), &metrics)
    }

    #[test]
    fn test_right_step_scenario() {
        let probe = StaticProbe::new(1200.0, 800.0);
        let mut state = new_state(&probe, false);
        let mut input = InputBuffer::new();
        assert_eq!(state.fish.pos, Vec2::new(24.0, 400.0));

        input.key_down("ArrowRight");
        let frame = tick(&mut state, &mut input, &probe, 0.0);
        assert_eq!(state.fish.speed, 3.0);
        assert_eq!(frame.fish.pos.x, 27.0);
        assert_eq!(frame.fish.facing, Facing::Right);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let probe = StaticProbe::new(1200.0, 800.0);
        let mut state = new_state(&probe, false);
        let mut input = InputBuffer::new();

        for i in 0..10 {
            tick(&mut state, &mut input, &probe, i as f64 * FRAME_MS);
        }
        input.key_down("p");
        let frame = tick(&mut state, &mut input, &probe, 160.0);
        assert!(frame.paused);
        assert!(frame.hook.is_none());

        let pos = state.fish.pos;
        let hook_y = state.hook.y;
        let sim_ms = state.clock.now();
        for i in 11..200 {
            tick(&mut state, &mut input, &probe, i as f64 * FRAME_MS);
        }
        assert_eq!(state.fish.pos, pos);
        assert_eq!(state.hook.y, hook_y);
        assert_eq!(state.clock.now(), sim_ms);
        assert_eq!(state.frame_count, 10);

        input.key_down("p");
        let frame = tick(&mut state, &mut input, &probe, 200.0 * FRAME_MS);
        assert!(!frame.paused);
        assert_eq!(state.frame_count, 11);
    }

    #[test]
    fn test_hook_drops_on_first_frame() {
        let probe = StaticProbe::new(1200.0, 800.0);
        let mut state = new_state(&probe, false);
        let mut input = InputBuffer::new();

        assert_eq!(state.hook.phase, HookPhase::Drop);
        let frame = tick(&mut state, &mut input, &probe, 0.0);
        assert_eq!(state.hook.phase, HookPhase::Jig);
        let hook = frame.hook.unwrap();
        assert_eq!(hook.center_y, 796.0);
        assert_eq!(hook.eye_x, hook.rod_tip.x);
        assert_eq!(hook.line_length, 796.0 - hook.rod_tip.y);
    }

    #[test]
    fn test_unmeasured_boat_skips_hook() {
        let mut probe = StaticProbe::new(1200.0, 800.0);
        probe.boat = None;
        let mut state = new_state(&probe, true);
        let mut input = InputBuffer::new();

        for i in 0..5 {
            let frame = tick(&mut state, &mut input, &probe, i as f64 * FRAME_MS);
            assert!(frame.hook.is_none());
        }
        // Fish keeps moving, hook waits for layout
        assert_eq!(state.fish.pos.x, 29.0);
        assert_eq!(state.hook.phase, HookPhase::Drop);

        probe.boat = Some(Rect::new(0.0, 0.0, 0.0, 0.0));
        tick(&mut state, &mut input, &probe, 100.0);
        assert_eq!(state.hook.phase, HookPhase::Drop);

        // Laid out vertically but not yet horizontally
        probe.boat = Some(Rect::new(240.0, 85.0, 0.0, 64.0));
        let frame = tick(&mut state, &mut input, &probe, 108.0);
        assert!(frame.hook.is_none());
        assert_eq!(state.hook.phase, HookPhase::Drop);

        probe = StaticProbe::new(1200.0, 800.0);
        let frame = tick(&mut state, &mut input, &probe, 116.0);
        assert!(frame.hook.is_some());
        assert_eq!(state.hook.phase, HookPhase::Jig);
    }

    #[test]
    fn test_cast_runs_once_and_overrides_x() {
        let probe = StaticProbe::new(1200.0, 800.0).with_boat_center(300.0);
        let mut state = new_state(&probe, true);
        let mut input = InputBuffer::new();

        tick(&mut state, &mut input, &probe, 0.0);
        assert_eq!(state.cast.phase, CastPhase::Windup);
        assert!(state.cast.fired);

        let mut saw_override = false;
        let mut saw_rotation = false;
        let mut settle_frames = 0;
        for i in 1..200 {
            let settling = state.cast.phase == CastPhase::Settle;
            let frame = tick(&mut state, &mut input, &probe, i as f64 * FRAME_MS);
            let hook = frame.hook.unwrap();
            if settling {
                // The rod swings back upright with the hook hanging under its tip
                settle_frames += 1;
                assert_eq!(hook.eye_x, hook.rod_tip.x);
                assert!(frame.rod_rotation.is_some());
            }
            if hook.eye_x != hook.rod_tip.x {
                saw_override = true;
                // Section 2 lands in the middle of section 4
                assert!(hook.eye_x > hook.rod_tip.x && hook.eye_x <= 540.0);
            }
            if frame.rod_rotation.is_some() {
                saw_rotation = true;
            }
        }
        assert!(saw_override && saw_rotation);
        assert!(settle_frames > 0);
        assert_eq!(state.cast.phase, CastPhase::Idle);
        assert_eq!(state.cast.to_x, 540.0);

        // Back under the rod once the cast is over
        let frame = tick(&mut state, &mut input, &probe, 200.0 * FRAME_MS);
        let hook = frame.hook.unwrap();
        assert_eq!(hook.eye_x, hook.rod_tip.x);
        assert!(frame.rod_rotation.is_none());
    }

    #[test]
    fn test_no_cast_from_right_sections() {
        let probe = StaticProbe::new(1000.0, 800.0).with_boat_center(850.0);
        let mut state = new_state(&probe, true);
        let mut input = InputBuffer::new();
        for i in 0..200 {
            let frame = tick(&mut state, &mut input, &probe, i as f64 * FRAME_MS);
            assert!(frame.rod_rotation.is_none());
        }
        assert!(!state.cast.fired);
        assert_eq!(state.cast.phase, CastPhase::Idle);
    }

    #[test]
    fn test_cast_disabled_stays_idle() {
        let probe = StaticProbe::new(1200.0, 800.0);
        let mut state = new_state(&probe, false);
        let mut input = InputBuffer::new();
        for i in 0..2000 {
            let frame = tick(&mut state, &mut input, &probe, i as f64 * FRAME_MS);
            assert!(frame.rod_rotation.is_none());
            assert_eq!(state.cast.phase, CastPhase::Idle);
        }
        assert!(!state.cast.fired);
    }

    #[test]
    fn test_toggle_cast_resets_session() {
        let probe = StaticProbe::new(1200.0, 800.0);
        let mut state = new_state(&probe, false);
        let mut input = InputBuffer::new();
        for i in 0..50 {
            tick(&mut state, &mut input, &probe, i as f64 * FRAME_MS);
        }
        assert!(state.fish.pos.x > 24.0);

        input.key_down("C");
        let frame = tick(&mut state, &mut input, &probe, 50.0 * FRAME_MS);
        assert_eq!(frame.casting_toggled, Some(true));
        assert!(state.casting);
        // Fresh session: the drop (and the cast) happened on this very frame
        assert_eq!(state.frame_count, 1);
        assert_eq!(state.cast.phase, CastPhase::Windup);

        // Lower-case c does nothing
        input.key_down("c");
        let frame = tick(&mut state, &mut input, &probe, 51.0 * FRAME_MS);
        assert_eq!(frame.casting_toggled, None);
    }

    #[test]
    fn test_resize_refits_and_requests_relayout() {
        let mut probe = StaticProbe::new(1200.0, 800.0);
        let mut state = new_state(&probe, false);
        let mut input = InputBuffer::new();
        state.fish.pos = Vec2::new(1150.0, 700.0);

        probe = StaticProbe::new(800.0, 600.0);
        input.resized();
        let frame = tick(&mut state, &mut input, &probe, 0.0);
        assert!(frame.relayout);
        // Refit to 760, then one frame of travel at 0.8 px
        assert!((frame.fish.pos.x - 760.8).abs() < 1e-3);
        assert!(frame.fish.pos.y <= 560.0);

        let frame = tick(&mut state, &mut input, &probe, FRAME_MS);
        assert!(!frame.relayout);
    }

    #[test]
    fn test_surge_held_applies_impulse_once() {
        let probe = StaticProbe::new(1200.0, 800.0);
        let mut state = new_state(&probe, false);
        let mut input = InputBuffer::new();

        input.key_down(" ");
        tick(&mut state, &mut input, &probe, 0.0);
        let vy_after_first = state.fish.vy;
        assert!((vy_after_first - (-2.2 - 0.45)).abs() < 1e-5);

        // Auto-repeat keydowns on the following frames
        input.key_down(" ");
        tick(&mut state, &mut input, &probe, FRAME_MS);
        assert!((state.fish.vy - (vy_after_first - 0.45)).abs() < 1e-5);
        assert_eq!(state.fish.pose, Pose::Surge);

        input.key_up(" ");
        let frame = tick(&mut state, &mut input, &probe, 2.0 * FRAME_MS);
        assert_eq!(frame.fish.pose, Pose::Cruise);
    }

    #[test]
    fn test_same_seed_same_frames() {
        let probe = StaticProbe::new(1200.0, 800.0);
        let mut a = new_state(&probe, true);
        let mut b = new_state(&probe, true);
        let mut ia = InputBuffer::new();
        let mut ib = InputBuffer::new();

        for i in 0..500 {
            if i % 37 == 0 {
                ia.key_down("ArrowLeft");
                ib.key_down("ArrowLeft");
            }
            let fa = tick(&mut a, &mut ia, &probe, i as f64 * FRAME_MS);
            let fb = tick(&mut b, &mut ib, &probe, i as f64 * FRAME_MS);
            assert_eq!(fa, fb);
        }
    }
}
