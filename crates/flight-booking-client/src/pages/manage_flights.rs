use std::ops::ControlFlow;

use chrono::{NaiveDateTime, TimeZone as _, Utc};
use egui_extras::{Column, TableBuilder};
use flight_client_core::Client;
use flight_shared::{
    aircraft::Aircraft,
    airline::Airline,
    airport::Airport,
    flight::{FareClass, Flight, FlightDraft},
    id::DbId,
};
use strum::IntoEnumIterator as _;

use crate::{
    app::wake_fn,
    displayable_page_common,
    ui_helpers::{fmt_datetime, fmt_money, get_text_height, ui_datetime_edit, ui_escape_button},
};

use super::{
    data_state::{AwaitingType, DataState},
    save_state::{get_save_outcome, poll_save_outcome, OpResult},
    DisplayablePage,
};

/// Admin CRUD over the flight collection
///
/// The form needs the airport, airline and aircraft collections for its
/// dropdowns so those load alongside the flight list
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiManageFlights {
    is_open: bool,
    page_unique_number: usize,
    #[serde(skip)]
    should_refresh: bool,
    #[serde(skip)]
    data_state: DataState<Vec<Flight>>,
    #[serde(skip)]
    airports: DataState<Vec<Airport>>,
    #[serde(skip)]
    airlines: DataState<Vec<Airline>>,
    #[serde(skip)]
    aircrafts: DataState<Vec<Aircraft>>,
    #[serde(skip)]
    flight_op: FlightOp,
}

#[derive(Debug, Default)]
enum FlightOp {
    #[default]
    None,
    Selected(Flight),
    New(FlightFormState),
    Edit(DbId, FlightFormState),
    Delete(DataState<()>),
}

impl FlightOp {
    // Serves as a way to check if there are changes to be lost
    fn has_changes(&self) -> bool {
        matches!(self, FlightOp::New(_) | FlightOp::Edit(..))
    }

    fn selected_flight(&self) -> Option<&Flight> {
        match self {
            FlightOp::Selected(flight) => Some(flight),
            _ => None,
        }
    }
}

/// Times are entered and displayed in UTC, the wire format of the backend
#[derive(Debug)]
struct FlightFormState {
    flight_number: String,
    airline_id: Option<DbId>,
    departure_airport_id: Option<DbId>,
    arrival_airport_id: Option<DbId>,
    departure_time: NaiveDateTime,
    arrival_time: NaiveDateTime,
    base_price: f64,
    available_seats: u32,
    flight_type: FareClass,
    aircraft_id: Option<DbId>,
    validation_error: Option<String>,
    save_status: DataState<()>,
}

impl Default for FlightFormState {
    fn default() -> Self {
        let departure = Utc::now().naive_utc();
        Self {
            flight_number: Default::default(),
            airline_id: None,
            departure_airport_id: None,
            arrival_airport_id: None,
            departure_time: departure,
            arrival_time: departure + chrono::Duration::hours(2),
            base_price: 100.0,
            available_seats: 150,
            flight_type: FareClass::default(),
            aircraft_id: None,
            validation_error: None,
            save_status: Default::default(),
        }
    }
}

impl FlightFormState {
    fn from_flight(flight: &Flight) -> Self {
        Self {
            flight_number: flight.flight_number.clone().into(),
            airline_id: Some(flight.airline.id),
            departure_airport_id: Some(flight.departure_airport.id),
            arrival_airport_id: Some(flight.arrival_airport.id),
            departure_time: flight.departure_time.naive_utc(),
            arrival_time: flight.arrival_time.naive_utc(),
            base_price: flight.base_price,
            available_seats: flight.available_seats,
            flight_type: flight.flight_type,
            aircraft_id: flight.aircraft.as_ref().map(|a| a.id),
            validation_error: None,
            save_status: Default::default(),
        }
    }

    fn try_into_draft(&self) -> anyhow::Result<FlightDraft> {
        use anyhow::Context as _;
        let flight_number = self
            .flight_number
            .clone()
            .try_into()
            .context("invalid flight number")?;
        let airline_id = self.airline_id.context("an airline must be selected")?;
        let departure_airport_id = self
            .departure_airport_id
            .context("a departure airport must be selected")?;
        let arrival_airport_id = self
            .arrival_airport_id
            .context("an arrival airport must be selected")?;
        let draft = FlightDraft {
            flight_number,
            airline_id,
            departure_airport_id,
            arrival_airport_id,
            departure_time: Utc.from_utc_datetime(&self.departure_time),
            arrival_time: Utc.from_utc_datetime(&self.arrival_time),
            base_price: self.base_price,
            available_seats: self.available_seats,
            flight_type: self.flight_type,
            aircraft_id: self.aircraft_id,
        };
        draft.validate()?;
        Ok(draft)
    }
}

/// Reference collections the form dropdowns draw from
struct ReferenceData<'a> {
    airports: &'a [Airport],
    airlines: &'a [Airline],
    aircrafts: &'a [Aircraft],
}

impl DisplayablePage for UiManageFlights {
    displayable_page_common!("Manage Flights", super::ROLES_ADMIN);

    fn reset_to_default(&mut self, _: super::private::Token) {
        self.should_refresh = Default::default();
        self.data_state = Default::default();
        self.airports = Default::default();
        self.airlines = Default::default();
        self.aircrafts = Default::default();
        self.flight_op = Default::default();
    }

    fn show(&mut self, ui: &mut eframe::egui::Ui, data_shared: &mut crate::DataShared) {
        if self.should_refresh {
            self.reset_to_default(super::private::Token {});
        }
        if !self.ui_reference_data(ui, data_shared) {
            return;
        }
        if let DataState::Present(flights) = &mut self.data_state {
            let reference_data = ReferenceData {
                airports: match &self.airports {
                    DataState::Present(x) => x,
                    _ => unreachable!("checked by ui_reference_data"),
                },
                airlines: match &self.airlines {
                    DataState::Present(x) => x,
                    _ => unreachable!("checked by ui_reference_data"),
                },
                aircrafts: match &self.aircrafts {
                    DataState::Present(x) => x,
                    _ => unreachable!("checked by ui_reference_data"),
                },
            };
            egui::TopBottomPanel::bottom(format!("flight edit panel{}", self.page_unique_number))
                .show_inside(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        if ui_show_flight_op(
                            ui,
                            &data_shared.client,
                            &reference_data,
                            &mut self.flight_op,
                        ) == OpResult::ResetPage
                        {
                            self.should_refresh = true;
                        };
                    });
                });

            egui::CentralPanel::default().show_inside(ui, |ui| {
                if self.flight_op.has_changes() {
                    // Reduce risk of accidental data loss by changing selection
                    ui.disable();
                }
                ui.horizontal_wrapped(|ui| {
                    if ui.button("Refresh Page").clicked() {
                        self.should_refresh = true;
                        return;
                    }
                    ui.spacing();
                    if ui.button("Add New Flight").clicked() {
                        self.flight_op = FlightOp::New(FlightFormState::default());
                    }
                });
                ui.separator();
                egui::ScrollArea::horizontal()
                    .show(ui, |ui| ui_show_flight_list(ui, flights, &mut self.flight_op));
            });
        } else {
            let ctx = ui.ctx().clone();
            self.data_state.get(Some(ui), None, || {
                AwaitingType(
                    data_shared
                        .client
                        .search_flights(&Default::default(), wake_fn(ctx)),
                )
            });
        }
    }
}

impl UiManageFlights {
    /// Drives the three reference fetches, returns true once all are in
    fn ui_reference_data(&mut self, ui: &mut egui::Ui, data_shared: &mut crate::DataShared) -> bool {
        if !self.airports.is_present() {
            let ctx = ui.ctx().clone();
            self.airports.get(Some(ui), None, || {
                AwaitingType(data_shared.client.list_airports(wake_fn(ctx)))
            });
            return false;
        }
        if !self.airlines.is_present() {
            let ctx = ui.ctx().clone();
            self.airlines.get(Some(ui), None, || {
                AwaitingType(data_shared.client.list_airlines(wake_fn(ctx)))
            });
            return false;
        }
        if !self.aircrafts.is_present() {
            let ctx = ui.ctx().clone();
            self.aircrafts.get(Some(ui), None, || {
                AwaitingType(data_shared.client.list_aircrafts(wake_fn(ctx)))
            });
            return false;
        }
        true
    }
}

fn ui_show_flight_op(
    ui: &mut egui::Ui,
    client_core: &Client,
    reference_data: &ReferenceData<'_>,
    flight_op: &mut FlightOp,
) -> OpResult {
    match flight_op {
        FlightOp::None => {
            ui.label("[NO FLIGHT SELECTED]");
            OpResult::NoAction
        }
        FlightOp::Selected(flight) => {
            let mut next_op = None;
            if ui.button("Edit Flight").clicked() {
                next_op = Some(FlightOp::Edit(
                    flight.id,
                    FlightFormState::from_flight(flight),
                ));
            }
            if ui.button("Delete Flight").clicked() {
                next_op = Some(FlightOp::Delete(DataState::AwaitingResponse(AwaitingType(
                    client_core.delete_flight(flight.id, wake_fn(ui.ctx().clone())),
                ))));
            }
            if let Some(op) = next_op {
                *flight_op = op;
            }
            OpResult::NoAction
        }
        FlightOp::New(form) => ui_show_flight_form(ui, client_core, reference_data, None, form),
        FlightOp::Edit(id, form) => {
            let id = *id;
            ui_show_flight_form(ui, client_core, reference_data, Some(id), form)
        }
        FlightOp::Delete(save_status) => {
            match poll_save_outcome(get_save_outcome(save_status), ui) {
                ControlFlow::Continue(()) => OpResult::NoAction,
                ControlFlow::Break(action) => action,
            }
        }
    }
}

fn ui_show_flight_form(
    ui: &mut egui::Ui,
    client_core: &Client,
    reference_data: &ReferenceData<'_>,
    edit_id: Option<DbId>,
    form: &mut FlightFormState,
) -> OpResult {
    match poll_save_outcome(get_save_outcome(&mut form.save_status), ui) {
        ControlFlow::Continue(()) => {} // Do nothing just continue
        ControlFlow::Break(action) => return action,
    }

    egui::Grid::new("Flight Grid").num_columns(2).show(ui, |ui| {
        ui.label("Flight Number");
        ui.text_edit_singleline(&mut form.flight_number);
        ui.end_row();

        ui.label("Airline");
        ui_id_select(
            ui,
            "flight airline combo",
            &mut form.airline_id,
            reference_data.airlines.iter().map(|a| (a.id, a.name.to_string())),
            false,
        );
        ui.end_row();

        ui.label("Departure Airport");
        ui_id_select(
            ui,
            "departure airport combo",
            &mut form.departure_airport_id,
            reference_data
                .airports
                .iter()
                .map(|a| (a.id, format!("{} - {}", a.code, a.city))),
            false,
        );
        ui.end_row();

        ui.label("Arrival Airport");
        ui_id_select(
            ui,
            "arrival airport combo",
            &mut form.arrival_airport_id,
            reference_data
                .airports
                .iter()
                .map(|a| (a.id, format!("{} - {}", a.code, a.city))),
            false,
        );
        ui.end_row();

        ui.label("Departure Time (UTC)");
        ui_datetime_edit(ui, "departure time", &mut form.departure_time);
        ui.end_row();

        ui.label("Arrival Time (UTC)");
        ui_datetime_edit(ui, "arrival time", &mut form.arrival_time);
        ui.end_row();

        ui.label("Base Price");
        ui.add(
            egui::DragValue::new(&mut form.base_price)
                .range(0.0..=100_000.0)
                .speed(1.0)
                .prefix("$"),
        );
        ui.end_row();

        ui.label("Available Seats");
        ui.add(egui::DragValue::new(&mut form.available_seats).range(0..=900));
        ui.end_row();

        ui.label("Flight Type");
        egui::ComboBox::from_id_salt("flight type combo")
            .selected_text(form.flight_type.to_string())
            .show_ui(ui, |ui| {
                for class in FareClass::iter() {
                    ui.selectable_value(&mut form.flight_type, class, class.to_string());
                }
            });
        ui.end_row();

        ui.label("Aircraft");
        ui_id_select(
            ui,
            "flight aircraft combo",
            &mut form.aircraft_id,
            reference_data
                .aircrafts
                .iter()
                .map(|a| (a.id, format!("{} ({})", a.model, a.registration_number))),
            true,
        );
        ui.end_row();
    });

    if let Some(e) = &form.validation_error {
        ui.colored_label(ui.visuals().error_fg_color, e);
    }

    let save_caption = if edit_id.is_some() {
        "Save Changes"
    } else {
        "Save New Flight"
    };
    if ui.button(save_caption).clicked() {
        // The draft never reaches the network unless it passes validation
        match form.try_into_draft() {
            Ok(draft) => {
                form.validation_error = None;
                let rx = match edit_id {
                    Some(id) => client_core.update_flight(id, &draft, wake_fn(ui.ctx().clone())),
                    None => client_core.create_flight(&draft, wake_fn(ui.ctx().clone())),
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

/// Dropdown over (id, label) pairs, optionally offering a "[NOT SET]" entry
fn ui_id_select(
    ui: &mut egui::Ui,
    id_salt: &str,
    selection: &mut Option<DbId>,
    options: impl Iterator<Item = (DbId, String)>,
    allow_none: bool,
) {
    let options: Vec<(DbId, String)> = options.collect();
    let selected_text = selection
        .and_then(|id| options.iter().find(|(option_id, _)| *option_id == id))
        .map(|(_, label)| label.clone())
        .unwrap_or_else(|| "[NOT SET]".to_string());
    egui::ComboBox::from_id_salt(id_salt)
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            if allow_none {
                ui.selectable_value(selection, None, "[NOT SET]");
            }
            for (id, label) in options {
                ui.selectable_value(selection, Some(id), label);
            }
        });
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
            ui.strong("Base Price");
        });
        header.col(|ui| {
            ui.strong("Seats");
        });
        header.col(|ui| {
            ui.strong("Status");
        });
    });

    table.body(|body| {
        body.rows(text_height, flights.len(), |mut row| {
            let row_index = row.index();
            let flight = &flights[row_index];
            let is_selected_at_start = if let Some(selected) = flight_op.selected_flight() {
                let is_selected = selected.id == flight.id;
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
                ui.label(fmt_money(flight.base_price));
            });
            row.col(|ui| {
                ui.label(flight.available_seats.to_string());
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
                (false, true) => *flight_op = FlightOp::Selected(flight.clone()),
            }
        });
    });
}
