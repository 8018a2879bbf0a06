use std::ops::ControlFlow;

use egui::Button;
use egui_extras::{Column, TableBuilder};
use flight_client_core::Client;
use flight_shared::{
    airport::{Airport, AirportCode, AirportDraft},
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
pub struct UiManageAirports {
    is_open: bool,
    page_unique_number: usize,
    #[serde(skip)]
    should_refresh: bool,
    #[serde(skip)]
    data_state: DataState<Vec<Airport>>,
    #[serde(skip)]
    airport_op: AirportOp,
}

#[derive(Debug, Default)]
enum AirportOp {
    #[default]
    None,
    Selected(Airport),
    New(AirportFormState),
    Edit(DbId, AirportFormState),
    Delete(DataState<()>),
}

impl AirportOp {
    // Serves as a way to check if there are changes to be lost
    fn has_changes(&self) -> bool {
        matches!(self, AirportOp::New(_) | AirportOp::Edit(..))
    }

    fn selected_airport(&self) -> Option<&Airport> {
        match self {
            AirportOp::Selected(airport) => Some(airport),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct AirportFormState {
    code: String,
    name: String,
    city: String,
    country: String,
    save_status: DataState<()>,
}

impl AirportFormState {
    fn from_airport(airport: &Airport) -> Self {
        Self {
            code: airport.code.clone().into(),
            name: airport.name.clone(),
            city: airport.city.clone(),
            country: airport.country.clone(),
            save_status: Default::default(),
        }
    }

    fn try_into_draft(&self) -> anyhow::Result<AirportDraft> {
        use anyhow::Context as _;
        let code = self.code.clone().try_into().context("invalid code")?;
        Ok(AirportDraft {
            code,
            name: self.name.clone(),
            city: self.city.clone(),
            country: self.country.clone(),
        })
    }
}

impl DisplayablePage for UiManageAirports {
    displayable_page_common!("Manage Airports", super::ROLES_ADMIN);

    fn reset_to_default(&mut self, _: super::private::Token) {
        self.should_refresh = Default::default();
        self.data_state = Default::default();
        self.airport_op = Default::default();
    }

    fn show(&mut self, ui: &mut eframe::egui::Ui, data_shared: &mut crate::DataShared) {
        if self.should_refresh {
            self.reset_to_default(super::private::Token {});
        }
        if let DataState::Present(airports) = &mut self.data_state {
            egui::TopBottomPanel::bottom(format!("airport edit panel{}", self.page_unique_number))
                .show_inside(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        if ui_show_airport_op(ui, &data_shared.client, &mut self.airport_op)
                            == OpResult::ResetPage
                        {
                            self.should_refresh = true;
                        };
                    });
                });

            egui::CentralPanel::default().show_inside(ui, |ui| {
                if self.airport_op.has_changes() {
                    // Reduce risk of accidental data loss by changing selection
                    ui.disable();
                }
                ui.horizontal_wrapped(|ui| {
                    if ui.button("Refresh Page").clicked() {
                        self.should_refresh = true;
                        return;
                    }
                    ui.spacing();
                    if ui.button("Add New Airport").clicked() {
                        self.airport_op = AirportOp::New(AirportFormState::default());
                    }
                });
                ui.separator();
                egui::ScrollArea::horizontal()
                    .show(ui, |ui| ui_show_airport_list(ui, airports, &mut self.airport_op));
            });
        } else {
            let ctx = ui.ctx().clone();
            self.data_state.get(Some(ui), None, || {
                AwaitingType(data_shared.client.list_airports(wake_fn(ctx)))
            });
        }
    }
}

fn ui_show_airport_op(
    ui: &mut egui::Ui,
    client_core: &Client,
    airport_op: &mut AirportOp,
) -> OpResult {
    match airport_op {
        AirportOp::None => {
            ui.label("[NO AIRPORT SELECTED]");
            OpResult::NoAction
        }
        AirportOp::Selected(airport) => {
            let mut next_op = None;
            if ui.button("Edit Airport").clicked() {
                next_op = Some(AirportOp::Edit(
                    airport.id,
                    AirportFormState::from_airport(airport),
                ));
            }
            if ui.button("Delete Airport").clicked() {
                next_op = Some(AirportOp::Delete(DataState::AwaitingResponse(AwaitingType(
                    client_core.delete_airport(airport.id, wake_fn(ui.ctx().clone())),
                ))));
            }
            if let Some(op) = next_op {
                *airport_op = op;
            }
            OpResult::NoAction
        }
        AirportOp::New(form) => ui_show_airport_form(ui, client_core, None, form),
        AirportOp::Edit(id, form) => {
            let id = *id;
            ui_show_airport_form(ui, client_core, Some(id), form)
        }
        AirportOp::Delete(save_status) => {
            match poll_save_outcome(get_save_outcome(save_status), ui) {
                ControlFlow::Continue(()) => OpResult::NoAction,
                ControlFlow::Break(action) => action,
            }
        }
    }
}

fn ui_show_airport_form(
    ui: &mut egui::Ui,
    client_core: &Client,
    edit_id: Option<DbId>,
    form: &mut AirportFormState,
) -> OpResult {
    match poll_save_outcome(get_save_outcome(&mut form.save_status), ui) {
        ControlFlow::Continue(()) => {} // Do nothing just continue
        ControlFlow::Break(action) => return action,
    }

    let mut has_errors = false;
    egui::Grid::new("Airport Grid").num_columns(2).show(ui, |ui| {
        ui.label("Code");
        ui.text_edit_singleline(&mut form.code);
        if let Err(e) = AirportCode::try_from(form.code.clone()) {
            has_errors = true;
            ui.colored_label(ui.visuals().error_fg_color, e.to_string());
        }
        ui.end_row();

        //----------------------------------------------------------------------
        ui.label("Name");
        ui.text_edit_singleline(&mut form.name);
        if form.name.trim().is_empty() {
            has_errors = true;
            ui.colored_label(ui.visuals().error_fg_color, "Required");
        }
        ui.end_row();

        //----------------------------------------------------------------------
        ui.label("City");
        ui.text_edit_singleline(&mut form.city);
        if form.city.trim().is_empty() {
            has_errors = true;
            ui.colored_label(ui.visuals().error_fg_color, "Required");
        }
        ui.end_row();

        //----------------------------------------------------------------------
        ui.label("Country");
        ui.text_edit_singleline(&mut form.country);
        if form.country.trim().is_empty() {
            has_errors = true;
            ui.colored_label(ui.visuals().error_fg_color, "Required");
        }
        ui.end_row();
    });

    let save_caption = if edit_id.is_some() {
        "Save Changes"
    } else {
        "Save New Airport"
    };
    if ui.add_enabled(!has_errors, Button::new(save_caption)).clicked() {
        match form.try_into_draft() {
            Ok(draft) => {
                let rx = match edit_id {
                    Some(id) => client_core.update_airport(id, &draft, wake_fn(ui.ctx().clone())),
                    None => client_core.create_airport(&draft, wake_fn(ui.ctx().clone())),
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

fn ui_show_airport_list(ui: &mut egui::Ui, airports: &[Airport], airport_op: &mut AirportOp) {
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
            ui.strong("Code");
        });
        header.col(|ui| {
            ui.strong("Name");
        });
        header.col(|ui| {
            ui.strong("City");
        });
        header.col(|ui| {
            ui.strong("Country");
        });
    });

    table.body(|body| {
        body.rows(text_height, airports.len(), |mut row| {
            let row_index = row.index();
            let airport = &airports[row_index];
            let is_selected_at_start = if let Some(selected) = airport_op.selected_airport() {
                let is_selected = selected.id == airport.id;
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
                ui.label(&airport.code);
            });
            row.col(|ui| {
                ui.label(&airport.name);
            });
            row.col(|ui| {
                ui.label(&airport.city);
            });
            row.col(|ui| {
                ui.label(&airport.country);
            });

            // Check for click of a row
            if row.response().clicked() {
                is_selected_at_end = !is_selected_at_end;
            }
            match (is_selected_at_start, is_selected_at_end) {
                (true, true) | (false, false) => {} // No change
                (true, false) => *airport_op = AirportOp::None,
                (false, true) => *airport_op = AirportOp::Selected(airport.clone()),
            }
        });
    });
}
