//! Keyboard and resize events, buffered between frames
//!
//! Browser events arrive whenever they like; the simulation only sees them
//! as an ordered batch drained at the start of the next tick.

use serde::{Deserialize, Serialize};

/// Recognized keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Swim up (momentary)
    Surge,
    /// Step speed toward the left
    StepLeft,
    /// Step speed toward the right
    StepRight,
    /// Freeze/unfreeze the simulation
    Pause,
    /// Flip the casting feature flag
    ToggleCast,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value (case-sensitive)
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            " " => Some(Key::Surge),
            "ArrowLeft" => Some(Key::StepLeft),
            "ArrowRight" => Some(Key::StepRight),
            "p" => Some(Key::Pause),
            "C" => Some(Key::ToggleCast),
            _ => None,
        }
    }
}

/// A single edge transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Viewport size changed
    Resized,
}

/// Events collected since the last tick
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    events: Vec<InputEvent>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Queue a DOM keydown; returns false for keys the game ignores
    pub fn key_down(&mut self, dom_key: &str) -> bool {
        match Key::from_dom_key(dom_key) {
            Some(key) => {
                self.push(InputEvent::KeyDown(key));
                true
            }
            None => false,
        }
    }

    /// Queue a DOM keyup; returns false for keys the game ignores
    pub fn key_up(&mut self, dom_key: &str) -> bool {
        match Key::from_dom_key(dom_key) {
            Some(key) => {
                self.push(InputEvent::KeyUp(key));
                true
            }
            None => false,
        }
    }

    pub fn resized(&mut self) {
        // Several resize events in one frame collapse into one
        if self.events.last() != Some(&InputEvent::Resized) {
            self.push(InputEvent::Resized);
        }
    }

    /// Take every pending event in arrival order
    pub fn drain(&mut self) -> std::vec::Drain<'_, InputEvent> {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
