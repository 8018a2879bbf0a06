use std::ops::ControlFlow;

use egui::Button;
use egui_extras::{Column, TableBuilder};
use flight_client_core::Client;
use flight_shared::{
    airline::{Airline, AirlineDraft, AirlineName},
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
pub struct UiManageAirlines {
    is_open: bool,
    page_unique_number: usize,
    #[serde(skip)]
    should_refresh: bool,
    #[serde(skip)]
    data_state: DataState<Vec<Airline>>,
    #[serde(skip)]
    airline_op: AirlineOp,
}

#[derive(Debug, Default)]
enum AirlineOp {
    #[default]
    None,
    Selected(Airline),
    New(AirlineFormState),
    Edit(DbId, AirlineFormState),
    Delete(DataState<()>),
}

impl AirlineOp {
    // Serves as a way to check if there are changes to be lost
    fn has_changes(&self) -> bool {
        matches!(self, AirlineOp::New(_) | AirlineOp::Edit(..))
    }

    fn selected_airline(&self) -> Option<&Airline> {
        match self {
            AirlineOp::Selected(airline) => Some(airline),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct AirlineFormState {
    name: String,
    save_status: DataState<()>,
}

impl AirlineFormState {
    fn try_into_draft(&self) -> anyhow::Result<AirlineDraft> {
        use anyhow::Context as _;
        let name = self.name.clone().try_into().context("invalid name")?;
        Ok(AirlineDraft { name })
    }
}

impl DisplayablePage for UiManageAirlines {
    displayable_page_common!("Manage Airlines", super::ROLES_ADMIN);

    fn reset_to_default(&mut self, _: super::private::Token) {
        self.should_refresh = Default::default();
        self.data_state = Default::default();
        self.airline_op = Default::default();
    }

    fn show(&mut self, ui: &mut eframe::egui::Ui, data_shared: &mut crate::DataShared) {
        if self.should_refresh {
            self.reset_to_default(super::private::Token {});
        }
        if let DataState::Present(airlines) = &mut self.data_state {
            egui::TopBottomPanel::bottom(format!("airline edit panel{}", self.page_unique_number))
                .show_inside(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        if ui_show_airline_op(ui, &data_shared.client, &mut self.airline_op)
                            == OpResult::ResetPage
                        {
                            self.should_refresh = true;
                        };
                    });
                });

            egui::CentralPanel::default().show_inside(ui, |ui| {
                if self.airline_op.has_changes() {
                    // Reduce risk of accidental data loss by changing selection
                    ui.disable();
                }
                ui.horizontal_wrapped(|ui| {
                    if ui.button("Refresh Page").clicked() {
                        self.should_refresh = true;
                        return;
                    }
                    ui.spacing();
                    if ui.button("Add New Airline").clicked() {
                        self.airline_op = AirlineOp::New(AirlineFormState::default());
                    }
                });
                ui.separator();
                egui::ScrollArea::horizontal()
                    .show(ui, |ui| ui_show_airline_list(ui, airlines, &mut self.airline_op));
            });
        } else {
            let ctx = ui.ctx().clone();
            self.data_state.get(Some(ui), None, || {
                AwaitingType(data_shared.client.list_airlines(wake_fn(ctx)))
            });
        }
    }
}

fn ui_show_airline_op(
    ui: &mut egui::Ui,
    client_core: &Client,
    airline_op: &mut AirlineOp,
) -> OpResult {
    match airline_op {
        AirlineOp::None => {
            ui.label("[NO AIRLINE SELECTED]");
            OpResult::NoAction
        }
        AirlineOp::Selected(airline) => {
            let mut next_op = None;
            if ui.button("Edit Airline").clicked() {
                next_op = Some(AirlineOp::Edit(
                    airline.id,
                    AirlineFormState {
                        name: airline.name.clone().into(),
                        save_status: Default::default(),
                    },
                ));
            }
            if ui.button("Delete Airline").clicked() {
                next_op = Some(AirlineOp::Delete(DataState::AwaitingResponse(AwaitingType(
                    client_core.delete_airline(airline.id, wake_fn(ui.ctx().clone())),
                ))));
            }
            if let Some(op) = next_op {
                *airline_op = op;
            }
            OpResult::NoAction
        }
        AirlineOp::New(form) => ui_show_airline_form(ui, client_core, None, form),
        AirlineOp::Edit(id, form) => {
            let id = *id;
            ui_show_airline_form(ui, client_core, Some(id), form)
        }
        AirlineOp::Delete(save_status) => {
            match poll_save_outcome(get_save_outcome(save_status), ui) {
                ControlFlow::Continue(()) => OpResult::NoAction,
                ControlFlow::Break(action) => action,
            }
        }
    }
}

fn ui_show_airline_form(
    ui: &mut egui::Ui,
    client_core: &Client,
    edit_id: Option<DbId>,
    form: &mut AirlineFormState,
) -> OpResult {
    match poll_save_outcome(get_save_outcome(&mut form.save_status), ui) {
        ControlFlow::Continue(()) => {} // Do nothing just continue
        ControlFlow::Break(action) => return action,
    }

    let mut has_errors = false;
    egui::Grid::new("Airline Grid").num_columns(2).show(ui, |ui| {
        ui.label("Name");
        ui.text_edit_singleline(&mut form.name);
        if let Err(e) = AirlineName::try_from(form.name.clone()) {
            has_errors = true;
            ui.colored_label(ui.visuals().error_fg_color, e.to_string());
        }
        ui.end_row();
    });

    let save_caption = if edit_id.is_some() {
        "Save Changes"
    } else {
        "Save New Airline"
    };
    if ui.add_enabled(!has_errors, Button::new(save_caption)).clicked() {
        match form.try_into_draft() {
            Ok(draft) => {
                let rx = match edit_id {
                    Some(id) => client_core.update_airline(id, &draft, wake_fn(ui.ctx().clone())),
                    None => client_core.create_airline(&draft, wake_fn(ui.ctx().clone())),
                };
                form.save_status = DataState::AwaitingResponse(AwaitingType(rx));
            }
            Err(e) => form.save_status = DataState::Failed(e.to_string()),
        }
    }

    if ui_escape_button(ui, "Cancel") {
        return OpResult::ResetPage;
    }

    OpResult::NoAction
}

fn ui_show_airline_list(ui: &mut egui::Ui, airlines: &[Airline], airline_op: &mut AirlineOp) {
    let text_height = get_text_height(ui);
    let mut table_builder = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::LEFT))
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
            ui.strong("ID");
        });
        header.col(|ui| {
            ui.strong("Name");
        });
    });

    table.body(|body| {
        body.rows(text_height, airlines.len(), |mut row| {
            let row_index = row.index();
            let airline = &airlines[row_index];
            let is_selected_at_start = if let Some(selected) = airline_op.selected_airline() {
                let is_selected = selected.id == airline.id;
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
                ui.label(airline.id.to_string());
            });
            row.col(|ui| {
                ui.label(&airline.name);
            });

            // Check for click of a row
            if row.response().clicked() {
                is_selected_at_end = !is_selected_at_end;
            }
            match (is_selected_at_start, is_selected_at_end) {
                (true, true) | (false, false) => {} // No change
                (true, false) => *airline_op = AirlineOp::None,
                (false, true) => *airline_op = AirlineOp::Selected(airline.clone()),
            }
        });
    });
}
