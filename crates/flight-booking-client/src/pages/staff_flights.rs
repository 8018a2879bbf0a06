use std::ops::ControlFlow;

use egui_extras::{Column, TableBuilder};
use flight_client_core::Client;
use flight_shared::flight::{Flight, FlightStatus};
use strum::IntoEnumIterator as _;

use crate::{
    app::wake_fn,
    displayable_page_common,
    ui_helpers::{fmt_datetime, get_text_height, ui_escape_button},
};

use super::{
    data_state::{AwaitingType, DataState},
    save_state::{get_save_outcome, poll_save_outcome, OpResult},
    DisplayablePage,
};

/// Staff view of the flight list with status control
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiStaffFlights {
    is_open: bool,
    page_unique_number: usize,
    #[serde(skip)]
    should_refresh: bool,
    #[serde(skip)]
    data_state: DataState<Vec<Flight>>,
    #[serde(skip)]
    flight_op: FlightOp,
}

#[derive(Debug, Default)]
enum FlightOp {
    #[default]
    None,
    Selected {
        flight: Flight,
        new_status: FlightStatus,
    },
    Saving(DataState<()>),
}

impl FlightOp {
    fn selected_flight_id(&self) -> Option<flight_shared::id::DbId> {
        match self {
            FlightOp::Selected { flight, .. } => Some(flight.id),
            _ => None,
        }
    }
}

impl DisplayablePage for UiStaffFlights {
    displayable_page_common!("Flight Status", super::ROLES_STAFF);

    fn reset_to_default(&mut self, _: super::private::Token) {
        self.should_refresh = Default::default();
        self.data_state = Default::default();
        self.flight_op = Default::default();
    }

    fn show(&mut self, ui: &mut eframe::egui::Ui, data_shared: &mut crate::DataShared) {
        if self.should_refresh {
            self.reset_to_default(super::private::Token {});
        }
        if let DataState::Present(flights) = &mut self.data_state {
            egui::TopBottomPanel::bottom(format!("flight status panel{}", self.page_unique_number))
                .show_inside(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        if ui_show_flight_op(ui, &data_shared.client, &mut self.flight_op)
                            == OpResult::ResetPage
                        {
                            self.should_refresh = true;
                        };
                    });
                });

            egui::CentralPanel::default().show_inside(ui, |ui| {
                if ui.button("Refresh Page").clicked() {
                    self.should_refresh = true;
                    return;
                }
                ui.separator();
                egui::ScrollArea::horizontal()
                    .show(ui, |ui| ui_show_flight_list(ui, flights, &mut self.flight_op));
            });
        } else {
            let ctx = ui.ctx().clone();
            self.data_state.get(Some(ui), None, || {
                AwaitingType(data_shared.client.staff_flights(wake_fn(ctx)))
            });
        }
    }
}

fn ui_show_flight_op(ui: &mut egui::Ui, client_core: &Client, flight_op: &mut FlightOp) -> OpResult {
    match flight_op {
        FlightOp::None => {
            ui.label("[NO FLIGHT SELECTED]");
            OpResult::NoAction
        }
        FlightOp::Selected { flight, new_status } => {
            ui.label(format!(
                "{} {} | currently {}",
                flight.flight_number,
                flight.route(),
                flight.status
            ));
            egui::ComboBox::from_id_salt("staff status combo")
                .selected_text(new_status.to_string())
                .show_ui(ui, |ui| {
                    for status in FlightStatus::iter() {
                        ui.selectable_value(new_status, status, status.to_string());
                    }
                });
            let mut next_op = None;
            if *new_status != flight.status && ui.button("Update Status").clicked() {
                next_op = Some(FlightOp::Saving(DataState::AwaitingResponse(AwaitingType(
                    client_core.update_flight_status(
                        flight.id,
                        *new_status,
                        wake_fn(ui.ctx().clone()),
                    ),
                ))));
            }
            if ui_escape_button(ui, "Cancel") {
                next_op = Some(FlightOp::None);
            }
            if let Some(op) = next_op {
                *flight_op = op;
            }
            OpResult::NoAction
        }
        FlightOp::Saving(save_status) => match poll_save_outcome(get_save_outcome(save_status), ui)
        {
            ControlFlow::Continue(()) => OpResult::NoAction,
            ControlFlow::Break(action) => action,
        },
    }
}

fn ui_show_flight_list(ui: &mut egui::Ui, flights: &[Flight], flight_op: &mut FlightOp) {
    let text_height = get_text_height(ui);
    let mut table_builder = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::LEFT))
        .column(Column::auto())
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
            ui.strong("Flight No.");
        });
        header.col(|ui| {
            ui.strong("Route");
        });
        header.col(|ui| {
            ui.strong("Departure");
        });
        header.col(|ui| {
            ui.strong("Arrival");
        });
        header.col(|ui| {
            ui.strong("Status");
        });
    });

    table.body(|body| {
        body.rows(text_height, flights.len(), |mut row| {
            let row_index = row.index();
            let flight = &flights[row_index];
            let is_selected_at_start = if let Some(selected) = flight_op.selected_flight_id() {
                let is_selected = selected == flight.id;
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
                ui.label(&flight.flight_number);
            });
            row.col(|ui| {
                ui.label(flight.route());
            });
            row.col(|ui| {
                ui.label(fmt_datetime(flight.departure_time));
            });
            row.col(|ui| {
                ui.label(fmt_datetime(flight.arrival_time));
            });
            row.col(|ui| {
                ui.label(flight.status.to_string());
            });

            // Check for click of a row
            if row.response().clicked() {
                is_selected_at_end = !is_selected_at_end;
            }
            match (is_selected_at_start, is_selected_at_end) {
                (true, true) | (false, false) => {} // No change
                (true, false) => *flight_op = FlightOp::None,
                (false, true) => {
                    *flight_op = FlightOp::Selected {
                        flight: flight.clone(),
                        new_status: flight.status,
                    }
                }
            }
        });
    });
}
