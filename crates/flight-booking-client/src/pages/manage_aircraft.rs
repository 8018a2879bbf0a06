use std::ops::ControlFlow;

use egui_extras::{Column, TableBuilder};
use flight_client_core::Client;
use flight_shared::{
    aircraft::{Aircraft, AircraftDraft},
    airline::Airline,
    id::DbId,
};

use crate::{
    app::wake_fn,
    displayable_page_common,
    ui_helpers::{get_text_height, ui_escape_button},
};

use super::{
    data_state::{AwaitingType, DataState},
    save_state::{get_save_outcome, poll_save_outcome, OpResult},
    DisplayablePage,
};

#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiManageAircraft {
    is_open: bool,
    page_unique_number: usize,
    #[serde(skip)]
    should_refresh: bool,
    #[serde(skip)]
    data_state: DataState<Vec<Aircraft>>,
    /// Needed for the owning airline dropdown in the form
    #[serde(skip)]
    airlines: DataState<Vec<Airline>>,
    #[serde(skip)]
    aircraft_op: AircraftOp,
}

#[derive(Debug, Default)]
enum AircraftOp {
    #[default]
    None,
    Selected(Aircraft),
    New(AircraftFormState),
    Edit(DbId, AircraftFormState),
    Delete(DataState<()>),
}

impl AircraftOp {
    // Serves as a way to check if there are changes to be lost
    fn has_changes(&self) -> bool {
        matches!(self, AircraftOp::New(_) | AircraftOp::Edit(..))
    }

    fn selected_aircraft(&self) -> Option<&Aircraft> {
        match self {
            AircraftOp::Selected(aircraft) => Some(aircraft),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct AircraftFormState {
    registration_number: String,
    model: String,
    capacity: u32,
    airline_id: Option<DbId>,
    validation_error: Option<String>,
    save_status: DataState<()>,
}

impl Default for AircraftFormState {
    fn default() -> Self {
        Self {
            registration_number: Default::default(),
            model: Default::default(),
            capacity: 150,
            airline_id: None,
            validation_error: None,
            save_status: Default::default(),
        }
    }
}

impl AircraftFormState {
    fn from_aircraft(aircraft: &Aircraft) -> Self {
        Self {
            registration_number: aircraft.registration_number.clone(),
            model: aircraft.model.clone(),
            capacity: aircraft.capacity,
            airline_id: Some(aircraft.airline.id),
            validation_error: None,
            save_status: Default::default(),
        }
    }

    fn try_into_draft(&self) -> anyhow::Result<AircraftDraft> {
        use anyhow::Context as _;
        let airline_id = self.airline_id.context("an airline must be selected")?;
        let draft = AircraftDraft {
            registration_number: self.registration_number.clone(),
            model: self.model.clone(),
            capacity: self.capacity,
            airline_id,
        };
        draft.validate()?;
        Ok(draft)
    }
}

impl DisplayablePage for UiManageAircraft {
    displayable_page_common!("Manage Aircraft", super::ROLES_ADMIN);

    fn reset_to_default(&mut self, _: super::private::Token) {
        self.should_refresh = Default::default();
        self.data_state = Default::default();
        self.airlines = Default::default();
        self.aircraft_op = Default::default();
    }

    fn show(&mut self, ui: &mut eframe::egui::Ui, data_shared: &mut crate::DataShared) {
        if self.should_refresh {
            self.reset_to_default(super::private::Token {});
        }
        // Both the list and the airline dropdown data have to be in
        if !self.airlines.is_present() {
            let ctx = ui.ctx().clone();
            self.airlines.get(Some(ui), None, || {
                AwaitingType(data_shared.client.list_airlines(wake_fn(ctx)))
            });
            return;
        }
        if let DataState::Present(aircrafts) = &mut self.data_state {
            let DataState::Present(airlines) = &self.airlines else {
                unreachable!("checked above");
            };
            egui::TopBottomPanel::bottom(format!("aircraft edit panel{}", self.page_unique_number))
                .show_inside(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        if ui_show_aircraft_op(
                            ui,
                            &data_shared.client,
                            airlines,
                            &mut self.aircraft_op,
                        ) == OpResult::ResetPage
                        {
                            self.should_refresh = true;
                        };
                    });
                });

            egui::CentralPanel::default().show_inside(ui, |ui| {
                if self.aircraft_op.has_changes() {
                    // Reduce risk of accidental data loss by changing selection
                    ui.disable();
                }
                ui.horizontal_wrapped(|ui| {
                    if ui.button("Refresh Page").clicked() {
                        self.should_refresh = true;
                        return;
                    }
                    ui.spacing();
                    if ui.button("Add New Aircraft").clicked() {
                        self.aircraft_op = AircraftOp::New(AircraftFormState::default());
                    }
                });
                ui.separator();
                egui::ScrollArea::horizontal()
                    .show(ui, |ui| ui_show_aircraft_list(ui, aircrafts, &mut self.aircraft_op));
            });
        } else {
            let ctx = ui.ctx().clone();
            self.data_state.get(Some(ui), None, || {
                AwaitingType(data_shared.client.list_aircrafts(wake_fn(ctx)))
            });
        }
    }
}

fn ui_show_aircraft_op(
    ui: &mut egui::Ui,
    client_core: &Client,
    airlines: &[Airline],
    aircraft_op: &mut AircraftOp,
) -> OpResult {
    match aircraft_op {
        AircraftOp::None => {
            ui.label("[NO AIRCRAFT SELECTED]");
            OpResult::NoAction
        }
        AircraftOp::Selected(aircraft) => {
            let mut next_op = None;
            if ui.button("Edit Aircraft").clicked() {
                next_op = Some(AircraftOp::Edit(
                    aircraft.id,
                    AircraftFormState::from_aircraft(aircraft),
                ));
            }
            if ui.button("Delete Aircraft").clicked() {
                next_op = Some(AircraftOp::Delete(DataState::AwaitingResponse(
                    AwaitingType(
                        client_core.delete_aircraft(aircraft.id, wake_fn(ui.ctx().clone())),
                    ),
                )));
            }
            if let Some(op) = next_op {
                *aircraft_op = op;
            }
            OpResult::NoAction
        }
        AircraftOp::New(form) => ui_show_aircraft_form(ui, client_core, airlines, None, form),
        AircraftOp::Edit(id, form) => {
            let id = *id;
            ui_show_aircraft_form(ui, client_core, airlines, Some(id), form)
        }
        AircraftOp::Delete(save_status) => {
            match poll_save_outcome(get_save_outcome(save_status), ui) {
                ControlFlow::Continue(()) => OpResult::NoAction,
                ControlFlow::Break(action) => action,
            }
        }
    }
}

fn ui_show_aircraft_form(
    ui: &mut egui::Ui,
    client_core: &Client,
    airlines: &[Airline],
    edit_id: Option<DbId>,
    form: &mut AircraftFormState,
) -> OpResult {
    match poll_save_outcome(get_save_outcome(&mut form.save_status), ui) {
        ControlFlow::Continue(()) => {} // Do nothing just continue
        ControlFlow::Break(action) => return action,
    }

    egui::Grid::new("Aircraft Grid").num_columns(2).show(ui, |ui| {
        ui.label("Registration Number");
        ui.text_edit_singleline(&mut form.registration_number);
        ui.end_row();

        ui.label("Model");
        ui.text_edit_singleline(&mut form.model);
        ui.end_row();

        ui.label("Capacity");
        ui.add(egui::DragValue::new(&mut form.capacity).range(1..=900));
        ui.end_row();

        ui.label("Airline");
        ui_airline_select(ui, &mut form.airline_id, airlines);
        ui.end_row();
    });

    if let Some(e) = &form.validation_error {
        ui.colored_label(ui.visuals().error_fg_color, e);
    }

    let save_caption = if edit_id.is_some() {
        "Save Changes"
    } else {
        "Save New Aircraft"
    };
    if ui.button(save_caption).clicked() {
        // The draft never reaches the network unless it passes validation
        match form.try_into_draft() {
            Ok(draft) => {
                form.validation_error = None;
                let rx = match edit_id {
                    Some(id) => client_core.update_aircraft(id, &draft, wake_fn(ui.ctx().clone())),
                    None => client_core.create_aircraft(&draft, wake_fn(ui.ctx().clone())),
                };
                form.save_status = DataState::AwaitingResponse(AwaitingType(rx));
            }
            Err(e) => form.validation_error = Some(e.to_string()),
        }
    }

    if ui_escape_button(ui, "Cancel") {
        return OpResult::ResetPage;
    }

    OpResult::NoAction
}

fn ui_airline_select(ui: &mut egui::Ui, selection: &mut Option<DbId>, airlines: &[Airline]) {
    let selected_text = selection
        .and_then(|id| airlines.iter().find(|a| a.id == id))
        .map(|a| a.name.to_string())
        .unwrap_or_else(|| "[NOT SET]".to_string());
    egui::ComboBox::from_id_salt("aircraft airline combo")
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            for airline in airlines {
                ui.selectable_value(selection, Some(airline.id), &airline.name);
            }
        });
}

fn ui_show_aircraft_list(ui: &mut egui::Ui, aircrafts: &[Aircraft], aircraft_op: &mut AircraftOp) {
    let text_height = get_text_height(ui);
    let mut table_builder = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::LEFT))
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .min_scrolled_height(0.0);

    table_builder = table_builder.sense(egui::Sense::click());

    let table = table_builder.header(text_height, |mut header| {
        header.col(|ui| {
            ui.strong("Selected");
        });
        header.col(|ui| {
            ui.strong("Registration");
        });
        header.col(|ui| {
            ui.strong("Model");
        });
        header.col(|ui| {
            ui.strong("Airline");
        });
        header.col(|ui| {
            ui.strong("Capacity");
        });
    });

    table.body(|body| {
        body.rows(text_height, aircrafts.len(), |mut row| {
            let row_index = row.index();
            let aircraft = &aircrafts[row_index];
            let is_selected_at_start = if let Some(selected) = aircraft_op.selected_aircraft() {
                let is_selected = selected.id == aircraft.id;
                row.set_selected(is_selected);
                is_selected
            } else {
                false
            };
            let mut is_selected_at_end = is_selected_at_start;
            row.col(|ui| {
                ui.vertical_centered(|ui| {
                    ui.checkbox(&mut is_selected_at_end, "");
                });
            });
            row.col(|ui| {
                ui.label(&aircraft.registration_number);
            });
            row.col(|ui| {
                ui.label(&aircraft.model);
            });
            row.col(|ui| {
                ui.label(&aircraft.airline.name);
            });
            row.col(|ui| {
                ui.label(aircraft.capacity.to_string());
            });

            // Check for click of a row
            if row.response().clicked() {
                is_selected_at_end = !is_selected_at_end;
            }
            match (is_selected_at_start, is_selected_at_end) {
                (true, true) | (false, false) => {} // No change
                (true, false) => *aircraft_op = AircraftOp::None,
                (false, true) => *aircraft_op = AircraftOp::Selected(aircraft.clone()),
            }
        });
    });
}
