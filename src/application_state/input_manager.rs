//! # Input Manager
//!
//! This module turns whatever the host captured between two ticks into the
//! per-tick input the engine consumes:
//! - held state of each control, old and new, for edge detection
//! - one-shot commands, in arrival order

use super::input_state::{Control, InputCommand, ProcessedInputState, RawInputState};

/// Tracks control state across ticks and collects queued commands.
#[derive(Debug, Default)]
pub struct InputManager {
    /// Held state of each control at the previous tick
    pub control_inputs_old: [bool; Control::ALL.len()],
    /// Held state of each control now
    pub control_inputs_new: [bool; Control::ALL.len()],
    /// Commands received since the previous tick
    pub pending_commands: Vec<InputCommand>,
}

impl InputManager {
    /// Creates a new InputManager with every control released and no
    /// pending commands.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `control` went down or up.
    ///
    /// # Arguments
    /// * `control` - The logical control
    /// * `pressed` - Whether it is now held
    pub fn intake_control(&mut self, control: Control, pressed: bool) {
        self.control_inputs_new[control as usize] = pressed;
    }

    /// Queues a one-shot command for the next tick.
    pub fn intake_command(&mut self, command: InputCommand) {
        self.pending_commands.push(command);
    }

    /// Copies the current held states over the previous ones.
    pub fn move_old_states(&mut self) {
        self.control_inputs_old = self.control_inputs_new;
    }

    /// Translates held states into transitions and takes the pending commands.
    pub fn create_processed_input_state(&mut self) -> ProcessedInputState {
        let mut control_states = [RawInputState::NotPressed; Control::ALL.len()];
        for control in Control::ALL {
            let index = control as usize;
            control_states[index] = RawInputState::from_raw_states(
                self.control_inputs_old[index],
                self.control_inputs_new[index],
            );
        }

        ProcessedInputState {
            control_states,
            commands: std::mem::take(&mut self.pending_commands),
        }
    }

    /// Returns the processed input for this tick and prepares for the next.
    pub fn get_and_reset_processed_input(&mut self) -> ProcessedInputState {
        let processed_input = self.create_processed_input_state();
        self.move_old_states();
        processed_input
    }

    /// Releases every control, as when the host loses focus.
    pub fn reset_inputs(&mut self) {
        self.control_inputs_new = [false; Control::ALL.len()];
    }
}
