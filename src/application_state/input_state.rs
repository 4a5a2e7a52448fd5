//! # Input State
//!
//! This module defines the input types exchanged between the host and the
//! engine. The host captures raw device events however it likes; the engine
//! only ever sees an [`InputIntent`] per tick plus a queue of one-shot
//! [`InputCommand`]s.

use crate::engine_state::entities::inventory::SlotSelection;

/// Represents the state of a key or button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawInputState {
    /// Key/button is not pressed
    #[default]
    NotPressed,
    /// Key/button was just pressed this frame
    Pressed,
    /// Key/button has been held down for multiple frames
    Held,
    /// Key/button was just released this frame
    Released,
}

impl RawInputState {
    /// Determines if the input is actively down (either pressed or held)
    pub fn is_active(&self) -> bool {
        matches!(self, RawInputState::Pressed | RawInputState::Held)
    }

    /// Determines if the input was just pressed this frame
    pub fn is_just_pressed(&self) -> bool {
        matches!(self, RawInputState::Pressed)
    }

    /// Determines if the input was just released this frame
    pub fn is_just_released(&self) -> bool {
        matches!(self, RawInputState::Released)
    }

    /// Derives the transition from the previous and current held states
    pub fn from_raw_states(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, true) => RawInputState::Pressed,
            (true, true) => RawInputState::Held,
            (true, false) => RawInputState::Released,
            (false, false) => RawInputState::NotPressed,
        }
    }
}

/// The logical controls the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Control {
    Left,
    Right,
    Jump,
    Sprint,
}

impl Control {
    /// Every control, in a fixed order
    pub const ALL: [Control; 4] = [Control::Left, Control::Right, Control::Jump, Control::Sprint];
}

/// Movement requested for one tick.
///
/// `jump` is a one-tick pulse: it is set only on the tick the jump control
/// goes down, so holding it does not jump again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputIntent {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub sprint: bool,
}

/// One-shot actions, queued by the host and applied at the start of a tick.
///
/// Coordinates are viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputCommand {
    /// Place the selected inventory block at the grid cell under the point
    PlaceBlockAt { x: f32, y: f32 },
    /// Break the block under the point and take it into the inventory
    BreakBlockAt { x: f32, y: f32 },
    /// Hit the creature under the point
    DamageCreatureAt { x: f32, y: f32 },
    /// Change the selected inventory slot
    SelectInventorySlot(SlotSelection),
    /// Throw away the saved world and generate a new one
    ResetWorld,
}

/// A snapshot of the processed control states with state transitions.
#[derive(Debug, Clone, Default)]
pub struct ProcessedInputState {
    /// Transition of each control this tick
    pub control_states: [RawInputState; Control::ALL.len()],
    /// One-shot commands received since the previous tick
    pub commands: Vec<InputCommand>,
}

impl ProcessedInputState {
    /// Gets the state of a control
    pub fn get_control_state(&self, control: Control) -> RawInputState {
        self.control_states[control as usize]
    }

    /// Collapses the control states into this tick's movement intent.
    pub fn intent(&self) -> InputIntent {
        InputIntent {
            move_left: self.get_control_state(Control::Left).is_active(),
            move_right: self.get_control_state(Control::Right).is_active(),
            jump: self.get_control_state(Control::Jump).is_just_pressed(),
            sprint: self.get_control_state(Control::Sprint).is_active(),
        }
    }
}
