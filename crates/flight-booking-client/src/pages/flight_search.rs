use chrono::NaiveDate;
use egui::Button;
use egui_extras::{Column, TableBuilder};
use flight_client_core::Client;
use flight_shared::{
    airport::{Airport, AirportCode},
    booking::{Booking, BookingDraft, Passenger},
    const_config::client::CLIENT_MAX_SEATS_PER_BOOKING,
    flight::{quote_price, FareClass, Flight},
    id::DbId,
    req_args::api::flight::SearchReqArgs,
    uac::Role,
};
use strum::IntoEnumIterator as _;

use crate::{
    app::wake_fn,
    displayable_page_common,
    ui_helpers::{fmt_datetime, fmt_money, get_text_height},
};

use super::{
    data_state::{AwaitingType, DataState},
    save_state::OpResult,
    DisplayablePage,
};

#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiFlightSearch {
    is_open: bool,
    page_unique_number: usize,
    #[serde(skip)]
    should_refresh: bool,
    #[serde(skip)]
    filters: SearchFilters,
    #[serde(skip)]
    airports: DataState<Vec<Airport>>,
    #[serde(skip)]
    data_state: DataState<Vec<Flight>>,
    #[serde(skip)]
    booking_op: BookingOp,
}

#[derive(Debug)]
struct SearchFilters {
    departure: Option<AirportCode>,
    arrival: Option<AirportCode>,
    filter_by_date: bool,
    date: NaiveDate,
    /// Cabin class used for the quoted prices in the result list
    fare_class: FareClass,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            departure: None,
            arrival: None,
            filter_by_date: false,
            date: chrono::Local::now().date_naive(),
            fare_class: FareClass::default(),
        }
    }
}

impl SearchFilters {
    fn to_req_args(&self) -> SearchReqArgs {
        SearchReqArgs {
            departure: self.departure.clone(),
            arrival: self.arrival.clone(),
            date: self.filter_by_date.then_some(self.date),
        }
    }
}

#[derive(Debug, Default)]
enum BookingOp {
    #[default]
    None,
    Selected(Flight),
    Book(BookingFormState),
}

impl BookingOp {
    fn selected_flight_id(&self) -> Option<DbId> {
        match self {
            BookingOp::None => None,
            BookingOp::Selected(flight) => Some(flight.id),
            BookingOp::Book(form) => Some(form.flight.id),
        }
    }

    fn set_selected(&mut self, flight: Option<Flight>) {
        *self = match flight {
            Some(flight) => Self::Selected(flight),
            None => Self::None,
        };
    }

    // Serves as a way to check if there are changes to be lost
    fn has_changes(&self) -> bool {
        matches!(self, BookingOp::Book(_))
    }
}

#[derive(Debug)]
struct BookingFormState {
    flight: Flight,
    seats: u32,
    fare_class: FareClass,
    passengers: Vec<PassengerForm>,
    validation_error: Option<String>,
    save_status: DataState<Booking>,
}

#[derive(Debug)]
struct PassengerForm {
    first_name: String,
    last_name: String,
    passport_number: String,
    date_of_birth: NaiveDate,
}

impl Default for PassengerForm {
    fn default() -> Self {
        Self {
            first_name: Default::default(),
            last_name: Default::default(),
            passport_number: Default::default(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1)
                .expect("hard coded date should be valid"),
        }
    }
}

impl PassengerForm {
    fn to_passenger(&self) -> Passenger {
        Passenger {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            passport_number: self.passport_number.clone(),
            date_of_birth: Some(self.date_of_birth),
        }
    }
}

impl BookingFormState {
    fn new(flight: Flight, fare_class: FareClass) -> Self {
        Self {
            flight,
            seats: 1,
            fare_class,
            passengers: vec![PassengerForm::default()],
            validation_error: None,
            save_status: Default::default(),
        }
    }

    fn to_draft(&self) -> BookingDraft {
        BookingDraft {
            flight_id: self.flight.id,
            seats_booked: self.seats,
            passengers: self.passengers.iter().map(|p| p.to_passenger()).collect(),
        }
    }
}

impl DisplayablePage for UiFlightSearch {
    displayable_page_common!("Search Flights", super::ROLES_ALL);

    fn reset_to_default(&mut self, _: super::private::Token) {
        self.should_refresh = Default::default();
        self.airports = Default::default();
        self.data_state = Default::default();
        self.booking_op = Default::default();
    }

    fn show(&mut self, ui: &mut eframe::egui::Ui, data_shared: &mut crate::DataShared) {
        if self.should_refresh {
            self.reset_to_default(super::private::Token {});
        }
        let role = data_shared.client.user_info().map(|user| user.role);

        if self.data_state.is_present() {
            egui::TopBottomPanel::bottom(format!("booking panel{}", self.page_unique_number))
                .show_inside(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        if ui_show_booking_op(ui, &data_shared.client, role, &mut self.booking_op)
                            == OpResult::ResetPage
                        {
                            self.should_refresh = true;
                        };
                    });
                });
        }

        egui::CentralPanel::default().show_inside(ui, |ui| {
            if self.booking_op.has_changes() {
                // Reduce risk of losing a half filled booking form
                ui.disable();
            }
            if ui.button("Refresh Page").clicked() {
                self.should_refresh = true;
                return;
            }
            ui.separator();

            if let DataState::Present(airports) = &self.airports {
                ui_search_filters(ui, &mut self.filters, airports);
                if ui.button("Search").clicked() {
                    self.data_state = DataState::None;
                    self.booking_op = BookingOp::None;
                }
            } else {
                let ctx = ui.ctx().clone();
                self.airports.get(Some(ui), None, || {
                    AwaitingType(data_shared.client.list_airports(wake_fn(ctx)))
                });
            }
            ui.separator();

            if let DataState::Present(flights) = &mut self.data_state {
                if flights.is_empty() {
                    ui.label("No flights matched the search");
                } else {
                    let filters = &self.filters;
                    egui::ScrollArea::horizontal().show(ui, |ui| {
                        ui_show_flight_list(ui, flights, filters, &mut self.booking_op)
                    });
                }
            } else {
                let ctx = ui.ctx().clone();
                let args = self.filters.to_req_args();
                self.data_state.get(Some(ui), None, || {
                    AwaitingType(data_shared.client.search_flights(&args, wake_fn(ctx)))
                });
            }
        });
    }
}

fn ui_search_filters(ui: &mut egui::Ui, filters: &mut SearchFilters, airports: &[Airport]) {
    ui.horizontal_wrapped(|ui| {
        ui_airport_filter(ui, "From", "search from", &mut filters.departure, airports);
        ui_airport_filter(ui, "To", "search to", &mut filters.arrival, airports);
        ui.checkbox(&mut filters.filter_by_date, "On date");
        if filters.filter_by_date {
            ui.add(egui_extras::DatePickerButton::new(&mut filters.date).id_salt("search date"));
        }
        ui.label("Class");
        egui::ComboBox::from_id_salt("search fare class")
            .selected_text(filters.fare_class.to_string())
            .show_ui(ui, |ui| {
                for class in FareClass::iter() {
                    ui.selectable_value(&mut filters.fare_class, class, class.to_string());
                }
            });
    });
}

fn ui_airport_filter(
    ui: &mut egui::Ui,
    label: &str,
    id_salt: &str,
    selection: &mut Option<AirportCode>,
    airports: &[Airport],
) {
    ui.label(label);
    egui::ComboBox::from_id_salt(id_salt)
        .selected_text(
            selection
                .as_ref()
                .map(|code| code.to_string())
                .unwrap_or_else(|| "Any".to_string()),
        )
        .show_ui(ui, |ui| {
            ui.selectable_value(selection, None, "Any");
            for airport in airports {
                ui.selectable_value(
                    selection,
                    Some(airport.code.clone()),
                    format!("{} - {}", airport.code, airport.city),
                );
            }
        });
}

fn ui_show_booking_op(
    ui: &mut egui::Ui,
    client_core: &Client,
    role: Option<Role>,
    booking_op: &mut BookingOp,
) -> OpResult {
    match booking_op {
        BookingOp::None => {
            ui.label("[NO FLIGHT SELECTED]");
            OpResult::NoAction
        }
        BookingOp::Selected(flight) => {
            ui.label(format!(
                "{} {} | {} | departs {}",
                flight.airline.name,
                flight.flight_number,
                flight.route(),
                fmt_datetime(flight.departure_time)
            ));
            // Only customers book, staff and admin use this page as a listing
            if role == Some(Role::Customer) && ui.button("Book This Flight").clicked() {
                *booking_op = BookingOp::Book(BookingFormState::new(
                    flight.clone(),
                    FareClass::default(),
                ));
            }
            OpResult::NoAction
        }
        BookingOp::Book(form) => ui_show_booking_form(ui, client_core, form),
    }
}

fn ui_show_booking_form(
    ui: &mut egui::Ui,
    client_core: &Client,
    form: &mut BookingFormState,
) -> OpResult {
    match &mut form.save_status {
        DataState::None => {} // Fall through to the form below
        DataState::AwaitingResponse(rx) => {
            if let Some(new_state) = DataState::await_data(Some(ui), rx) {
                form.save_status = new_state;
            }
            return OpResult::NoAction;
        }
        DataState::Present(booking) => {
            ui.label(format!(
                "Booking confirmed. Reference: {} Total: {}",
                booking.booking_reference,
                fmt_money(booking.total_price)
            ));
            if ui.button("Done").clicked() {
                return OpResult::ResetPage;
            }
            return OpResult::NoAction;
        }
        DataState::Failed(e) => {
            ui.colored_label(ui.visuals().error_fg_color, format!("Booking failed: {e}"));
            if ui.button("Try Again").clicked() {
                form.save_status = DataState::None;
            }
            return OpResult::NoAction;
        }
    }

    ui.label(format!(
        "Booking {} {}",
        form.flight.flight_number,
        form.flight.route()
    ));

    ui.horizontal(|ui| {
        ui.label("Seats");
        let max_seats = form
            .flight
            .available_seats
            .min(CLIENT_MAX_SEATS_PER_BOOKING)
            .max(1);
        ui.add(egui::DragValue::new(&mut form.seats).range(1..=max_seats));

        ui.label("Class");
        egui::ComboBox::from_id_salt("booking fare class")
            .selected_text(form.fare_class.to_string())
            .show_ui(ui, |ui| {
                for class in FareClass::iter() {
                    ui.selectable_value(&mut form.fare_class, class, class.to_string());
                }
            });

        ui.label(format!(
            "Price: {}",
            fmt_money(quote_price(
                form.flight.base_price,
                form.seats,
                form.fare_class
            ))
        ));
    });

    // One passenger record per seat
    let seats = form.seats as usize;
    while form.passengers.len() < seats {
        form.passengers.push(PassengerForm::default());
    }
    form.passengers.truncate(seats);

    let mut has_errors = false;
    egui::Grid::new("Passengers Grid")
        .num_columns(5)
        .show(ui, |ui| {
            ui.label("#");
            ui.label("First Name");
            ui.label("Last Name");
            ui.label("Passport");
            ui.label("Date of Birth");
            ui.end_row();
            for (i, passenger) in form.passengers.iter_mut().enumerate() {
                ui.label((i + 1).to_string());
                ui.text_edit_singleline(&mut passenger.first_name);
                ui.text_edit_singleline(&mut passenger.last_name);
                ui.text_edit_singleline(&mut passenger.passport_number);
                ui.add(
                    egui_extras::DatePickerButton::new(&mut passenger.date_of_birth)
                        .id_salt(&format!("dob{i}")),
                );
                if !passenger.to_passenger().is_complete() {
                    has_errors = true;
                    ui.colored_label(ui.visuals().error_fg_color, "Required fields missing");
                }
                ui.end_row();
            }
        });

    if let Some(e) = &form.validation_error {
        ui.colored_label(ui.visuals().error_fg_color, e);
    }

    if ui
        .add_enabled(!has_errors, Button::new("Confirm Booking"))
        .clicked()
    {
        let draft = form.to_draft();
        // The draft never reaches the network unless it passes validation
        match draft.validate(form.flight.available_seats) {
            Ok(()) => {
                form.validation_error = None;
                form.save_status = DataState::AwaitingResponse(AwaitingType(
                    client_core.create_booking(&draft, || {}),
                ));
            }
            Err(e) => form.validation_error = Some(e.to_string()),
        }
    }

    if crate::ui_helpers::ui_escape_button(ui, "Cancel") {
        return OpResult::ResetPage;
    }

    OpResult::NoAction
}

fn ui_show_flight_list(
    ui: &mut egui::Ui,
    flights: &[Flight],
    filters: &SearchFilters,
    booking_op: &mut BookingOp,
) {
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
            ui.strong("Airline");
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
        header.col(|ui| {
            ui.strong("Seats Left");
        });
        header.col(|ui| {
            ui.strong(format!("Price ({})", filters.fare_class));
        });
    });

    table.body(|body| {
        body.rows(text_height, flights.len(), |mut row| {
            let row_index = row.index();
            let flight = &flights[row_index];
            let is_selected_at_start = if let Some(selected) = booking_op.selected_flight_id() {
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
                ui.label(&flight.airline.name);
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
            row.col(|ui| {
                ui.label(flight.available_seats.to_string());
            });
            row.col(|ui| {
                ui.label(fmt_money(quote_price(
                    flight.base_price,
                    1,
                    filters.fare_class,
                )));
            });

            // Check for click of a row
            if row.response().clicked() {
                is_selected_at_end = !is_selected_at_end;
            }
            match (is_selected_at_start, is_selected_at_end) {
                (true, true) | (false, false) => {} // No change
                (true, false) => booking_op.set_selected(None),
                (false, true) => booking_op.set_selected(Some(flight.clone())),
            }
        });
    });
}
