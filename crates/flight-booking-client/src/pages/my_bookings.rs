use egui::Button;
use egui_extras::{Column, TableBuilder};
use flight_client_core::Client;
use flight_shared::{
    booking::{Booking, BookingStatus},
    payment::{PaymentDraft, PaymentMethod, PaymentStatus},
    random_string_def_len,
};

use crate::{
    app::wake_fn,
    displayable_page_common,
    ui_helpers::{fmt_datetime, fmt_money, get_text_height, ui_escape_button},
};

use super::{
    data_state::{AwaitingType, DataState},
    save_state::{get_save_outcome, poll_save_outcome, OpResult},
    DisplayablePage,
};

/// The customer's own bookings with detail, cancellation and payment
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiMyBookings {
    is_open: bool,
    page_unique_number: usize,
    #[serde(skip)]
    should_refresh: bool,
    #[serde(skip)]
    data_state: DataState<Vec<Booking>>,
    #[serde(skip)]
    booking_op: BookingOp,
}

#[derive(Debug, Default)]
enum BookingOp {
    #[default]
    None,
    Selected(Booking),
    Pay(PayFormState),
    /// Cancellation in flight
    Mutate(DataState<()>),
}

impl BookingOp {
    fn selected_booking(&self) -> Option<&Booking> {
        match self {
            BookingOp::Selected(booking) => Some(booking),
            BookingOp::Pay(form) => Some(&form.booking),
            _ => None,
        }
    }
}

/// Card entry is a front end simulation, only the resulting payment record is
/// sent to the backend
#[derive(Debug)]
struct PayFormState {
    booking: Booking,
    card_number: String,
    expiry: String,
    cvv: String,
    validation_error: Option<String>,
    save_status: DataState<()>,
}

impl PayFormState {
    fn new(booking: Booking) -> Self {
        Self {
            booking,
            card_number: Default::default(),
            expiry: Default::default(),
            cvv: Default::default(),
            validation_error: None,
            save_status: Default::default(),
        }
    }

    fn to_draft(&self) -> PaymentDraft {
        PaymentDraft {
            booking: self.booking.id,
            amount: self.booking.total_price,
            payment_method: PaymentMethod::Card,
            transaction_id: random_string_def_len(),
            status: PaymentStatus::Completed,
        }
    }
}

impl DisplayablePage for UiMyBookings {
    displayable_page_common!("My Bookings", super::ROLES_CUSTOMER);

    fn reset_to_default(&mut self, _: super::private::Token) {
        self.should_refresh = Default::default();
        self.data_state = Default::default();
        self.booking_op = Default::default();
    }

    fn show(&mut self, ui: &mut eframe::egui::Ui, data_shared: &mut crate::DataShared) {
        if self.should_refresh {
            self.reset_to_default(super::private::Token {});
        }
        if let DataState::Present(bookings) = &mut self.data_state {
            egui::TopBottomPanel::bottom(format!("booking detail panel{}", self.page_unique_number))
                .show_inside(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        if ui_show_booking_op(ui, &data_shared.client, &mut self.booking_op)
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
                if bookings.is_empty() {
                    ui.label("You have no bookings yet");
                } else {
                    egui::ScrollArea::horizontal()
                        .show(ui, |ui| ui_show_booking_list(ui, bookings, &mut self.booking_op));
                }
            });
        } else {
            let ctx = ui.ctx().clone();
            self.data_state.get(Some(ui), None, || {
                AwaitingType(data_shared.client.list_bookings(wake_fn(ctx)))
            });
        }
    }
}

fn ui_show_booking_op(
    ui: &mut egui::Ui,
    client_core: &Client,
    booking_op: &mut BookingOp,
) -> OpResult {
    match booking_op {
        BookingOp::None => {
            ui.label("[NO BOOKING SELECTED]");
            OpResult::NoAction
        }
        BookingOp::Selected(booking) => {
            ui_booking_detail(ui, booking);
            let mut next_op = None;
            if booking.status != BookingStatus::Cancelled
                && ui.button("Cancel Booking").clicked()
            {
                next_op = Some(BookingOp::Mutate(DataState::AwaitingResponse(AwaitingType(
                    client_core.cancel_booking(booking.id, wake_fn(ui.ctx().clone())),
                ))));
            }
            if booking.status == BookingStatus::Confirmed && ui.button("Pay Now").clicked() {
                next_op = Some(BookingOp::Pay(PayFormState::new(booking.clone())));
            }
            if let Some(op) = next_op {
                *booking_op = op;
            }
            OpResult::NoAction
        }
        BookingOp::Pay(form) => ui_show_pay_form(ui, client_core, form),
        BookingOp::Mutate(save_status) => {
            match poll_save_outcome(get_save_outcome(save_status), ui) {
                std::ops::ControlFlow::Continue(()) => OpResult::NoAction,
                std::ops::ControlFlow::Break(action) => action,
            }
        }
    }
}

fn ui_booking_detail(ui: &mut egui::Ui, booking: &Booking) {
    ui.label(format!(
        "{} | {} {} | {} | departs {} | {} seat(s) | {} | {}",
        booking.booking_reference,
        booking.flight.airline.name,
        booking.flight.flight_number,
        booking.flight.route(),
        fmt_datetime(booking.flight.departure_time),
        booking.seats_booked,
        booking.status,
        fmt_money(booking.total_price),
    ));
    if !booking.passengers.is_empty() {
        let names: Vec<String> = booking
            .passengers
            .iter()
            .map(|p| format!("{} {} ({})", p.first_name, p.last_name, p.passport_number))
            .collect();
        ui.label(format!("Passengers: {}", names.join(", ")));
    }
}

fn ui_show_pay_form(ui: &mut egui::Ui, client_core: &Client, form: &mut PayFormState) -> OpResult {
    match &mut form.save_status {
        DataState::None => {} // Fall through to the form below
        DataState::AwaitingResponse(rx) => {
            if let Some(new_state) = DataState::await_data(Some(ui), rx) {
                form.save_status = new_state;
            }
            return OpResult::NoAction;
        }
        DataState::Present(()) => {
            ui.label("Payment recorded. Thank you.");
            if ui.button("Done").clicked() {
                return OpResult::ResetPage;
            }
            return OpResult::NoAction;
        }
        DataState::Failed(e) => {
            ui.colored_label(ui.visuals().error_fg_color, format!("Payment failed: {e}"));
            if ui.button("Try Again").clicked() {
                form.save_status = DataState::None;
            }
            return OpResult::NoAction;
        }
    }

    ui.label(format!(
        "Paying {} for booking {}",
        fmt_money(form.booking.total_price),
        form.booking.booking_reference
    ));

    let mut has_errors = false;
    egui::Grid::new("Payment Grid").num_columns(2).show(ui, |ui| {
        ui.label("Card Number");
        ui.text_edit_singleline(&mut form.card_number);
        if form.card_number.trim().is_empty() {
            has_errors = true;
            ui.colored_label(ui.visuals().error_fg_color, "Required");
        }
        ui.end_row();

        ui.label("Expiry (MM/YY)");
        ui.text_edit_singleline(&mut form.expiry);
        if form.expiry.trim().is_empty() {
            has_errors = true;
            ui.colored_label(ui.visuals().error_fg_color, "Required");
        }
        ui.end_row();

        ui.label("CVV");
        ui.text_edit_singleline(&mut form.cvv);
        if form.cvv.trim().is_empty() {
            has_errors = true;
            ui.colored_label(ui.visuals().error_fg_color, "Required");
        }
        ui.end_row();
    });

    if let Some(e) = &form.validation_error {
        ui.colored_label(ui.visuals().error_fg_color, e);
    }

    if ui.add_enabled(!has_errors, Button::new("Pay")).clicked() {
        let draft = form.to_draft();
        match draft.validate() {
            Ok(()) => {
                form.validation_error = None;
                form.save_status = DataState::AwaitingResponse(AwaitingType(
                    client_core.create_payment(&draft, wake_fn(ui.ctx().clone())),
                ));
            }
            Err(e) => form.validation_error = Some(e.to_string()),
        }
    }

    if ui_escape_button(ui, "Cancel") {
        return OpResult::ResetPage;
    }

    OpResult::NoAction
}

fn ui_show_booking_list(ui: &mut egui::Ui, bookings: &[Booking], booking_op: &mut BookingOp) {
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
            ui.strong("Reference");
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
            ui.strong("Seats");
        });
        header.col(|ui| {
            ui.strong("Status");
        });
    });

    table.body(|body| {
        body.rows(text_height, bookings.len(), |mut row| {
            let row_index = row.index();
            let booking = &bookings[row_index];
            let is_selected_at_start = if let Some(selected) = booking_op.selected_booking() {
                let is_selected = selected.id == booking.id;
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
                ui.label(&booking.booking_reference);
            });
            row.col(|ui| {
                ui.label(&booking.flight.flight_number);
            });
            row.col(|ui| {
                ui.label(&booking.flight.airline.name);
            });
            row.col(|ui| {
                ui.label(booking.flight.route());
            });
            row.col(|ui| {
                ui.label(fmt_datetime(booking.flight.departure_time));
            });
            row.col(|ui| {
                ui.label(booking.seats_booked.to_string());
            });
            row.col(|ui| {
                ui.label(booking.status.to_string());
            });

            // Check for click of a row
            if row.response().clicked() {
                is_selected_at_end = !is_selected_at_end;
            }
            match (is_selected_at_start, is_selected_at_end) {
                (true, true) | (false, false) => {} // No change
                (true, false) => *booking_op = BookingOp::None,
                (false, true) => *booking_op = BookingOp::Selected(booking.clone()),
            }
        });
    });
}
