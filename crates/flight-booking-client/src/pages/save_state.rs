//! Shared plumbing for mutations started from a resource panel
//!
//! Every create/update/delete in the app runs through the same state machine
//! so progress and failures render consistently and each panel refetches its
//! list after a completed mutation instead of patching it locally.

use std::ops::ControlFlow;

use super::data_state::DataState;

#[must_use]
pub enum SaveState {
    Completed,
    Ongoing,
    Failed(String),
}

#[must_use]
#[derive(Debug, PartialEq, Eq)]
pub enum OpResult {
    NoAction,
    /// The mutation completed (or its error was dismissed), reload the list
    ResetPage,
}

/// Returns None if no save is ongoing
pub fn get_save_outcome(save_status: &mut DataState<()>) -> Option<SaveState> {
    match save_status {
        DataState::None => {
            // No action no save ongoing
            None
        }
        DataState::AwaitingResponse(rx) => {
            if let Some(new_state) = DataState::await_data(None, rx) {
                *save_status = new_state;
            }
            Some(SaveState::Ongoing)
        }
        DataState::Present(_data) => Some(SaveState::Completed),
        DataState::Failed(e) => Some(SaveState::Failed(format!("Save failed. {e}"))),
    }
}

pub fn poll_save_outcome(outcome: Option<SaveState>, ui: &mut egui::Ui) -> ControlFlow<OpResult> {
    if let Some(save_status) = outcome {
        // Save in progress
        match save_status {
            SaveState::Completed => return ControlFlow::Break(OpResult::ResetPage),
            SaveState::Ongoing => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.spacing();
                    ui.label("Saving...");
                });
            }
            SaveState::Failed(e) => {
                ui.colored_label(ui.visuals().error_fg_color, e);
                if ui.button("Clear Error").clicked() {
                    return ControlFlow::Break(OpResult::ResetPage);
                }
            }
        }
        ControlFlow::Break(OpResult::NoAction)
    } else {
        ControlFlow::Continue(())
    }
}
