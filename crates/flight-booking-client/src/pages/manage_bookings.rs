use std::ops::ControlFlow;

use egui_extras::{Column, TableBuilder};
use flight_client_core::Client;
use flight_shared::booking::{Booking, BookingStatus};

use crate::{
    app::wake_fn,
    displayable_page_common,
    ui_helpers::{fmt_datetime, fmt_money, get_text_height},
};

use super::{
    data_state::{AwaitingType, DataState},
    save_state::{get_save_outcome, poll_save_outcome, OpResult},
    DisplayablePage,
};

/// Admin review of all bookings with status control
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiManageBookings {
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
    Mutate(DataState<()>),
}

impl BookingOp {
    fn selected_booking(&self) -> Option<&Booking> {
        match self {
            BookingOp::Selected(booking) => Some(booking),
            _ => None,
        }
    }
}

impl DisplayablePage for UiManageBookings {
    displayable_page_common!("Manage Bookings", super::ROLES_ADMIN);

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
            egui::TopBottomPanel::bottom(format!("booking admin panel{}", self.page_unique_number))
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
                egui::ScrollArea::horizontal()
                    .show(ui, |ui| ui_show_booking_list(ui, bookings, &mut self.booking_op));
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
            ui.label(format!(
                "{} | {} | {} seat(s) | {} | {}",
                booking.booking_reference,
                booking.flight.flight_number,
                booking.seats_booked,
                booking.status,
                fmt_money(booking.total_price),
            ));
            let mut next_op = None;
            if booking.status == BookingStatus::Pending {
                if ui.button("Confirm").clicked() {
                    next_op = Some(mutate_status(
                        ui,
                        client_core,
                        booking,
                        BookingStatus::Confirmed,
                    ));
                }
                if ui.button("Cancel Booking").clicked() {
                    next_op = Some(mutate_status(
                        ui,
                        client_core,
                        booking,
                        BookingStatus::Cancelled,
                    ));
                }
            }
            if ui.button("Delete Booking").clicked() {
                next_op = Some(BookingOp::Mutate(DataState::AwaitingResponse(AwaitingType(
                    client_core.delete_booking(booking.id, wake_fn(ui.ctx().clone())),
                ))));
            }
            if let Some(op) = next_op {
                *booking_op = op;
            }
            OpResult::NoAction
        }
        BookingOp::Mutate(save_status) => {
            match poll_save_outcome(get_save_outcome(save_status), ui) {
                ControlFlow::Continue(()) => OpResult::NoAction,
                ControlFlow::Break(action) => action,
            }
        }
    }
}

fn mutate_status(
    ui: &egui::Ui,
    client_core: &Client,
    booking: &Booking,
    status: BookingStatus,
) -> BookingOp {
    BookingOp::Mutate(DataState::AwaitingResponse(AwaitingType(
        client_core.update_booking_status(booking.id, status, wake_fn(ui.ctx().clone())),
    )))
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
            ui.strong("User");
        });
        header.col(|ui| {
            ui.strong("Flight No.");
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
        header.col(|ui| {
            ui.strong("Total");
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
                let username = booking
                    .user
                    .as_ref()
                    .map(|user| user.username.to_string())
                    .unwrap_or_else(|| "[UNKNOWN]".to_string());
                ui.label(username);
            });
            row.col(|ui| {
                ui.label(&booking.flight.flight_number);
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
            row.col(|ui| {
                ui.label(fmt_money(booking.total_price));
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
