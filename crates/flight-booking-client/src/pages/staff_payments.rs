use std::ops::ControlFlow;

use egui::Button;
use egui_extras::{Column, TableBuilder};
use flight_client_core::Client;
use flight_shared::{
    booking::{Booking, BookingStatus},
    id::DbId,
    payment::{Payment, PaymentDraft, PaymentMethod, PaymentStatus},
    random_string_def_len,
};
use strum::IntoEnumIterator as _;

use crate::{
    app::wake_fn,
    displayable_page_common,
    ui_helpers::{fmt_money, get_text_height, ui_escape_button},
};

use super::{
    data_state::{AwaitingType, DataState},
    save_state::{get_save_outcome, poll_save_outcome, OpResult},
    DisplayablePage,
};

/// Staff ledger of payments with manual capture against confirmed bookings
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiStaffPayments {
    is_open: bool,
    page_unique_number: usize,
    #[serde(skip)]
    should_refresh: bool,
    #[serde(skip)]
    data_state: DataState<Vec<Payment>>,
    /// Needed for the booking dropdown in the capture form
    #[serde(skip)]
    bookings: DataState<Vec<Booking>>,
    #[serde(skip)]
    payment_op: PaymentOp,
}

#[derive(Debug, Default)]
enum PaymentOp {
    #[default]
    None,
    Selected(Payment),
    New(PaymentFormState),
    Delete(DataState<()>),
}

impl PaymentOp {
    // Serves as a way to check if there are changes to be lost
    fn has_changes(&self) -> bool {
        matches!(self, PaymentOp::New(_))
    }

    fn selected_payment(&self) -> Option<&Payment> {
        match self {
            PaymentOp::Selected(payment) => Some(payment),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct PaymentFormState {
    booking_id: Option<DbId>,
    amount: f64,
    payment_method: PaymentMethod,
    transaction_id: String,
    validation_error: Option<String>,
    save_status: DataState<()>,
}

impl Default for PaymentFormState {
    fn default() -> Self {
        Self {
            booking_id: None,
            amount: 0.0,
            payment_method: PaymentMethod::default(),
            // Prefilled so manual captures still get a unique reference
            transaction_id: random_string_def_len(),
            validation_error: None,
            save_status: Default::default(),
        }
    }
}

impl PaymentFormState {
    fn try_into_draft(&self) -> anyhow::Result<PaymentDraft> {
        use anyhow::Context as _;
        let booking = self.booking_id.context("a booking must be selected")?;
        let draft = PaymentDraft {
            booking,
            amount: self.amount,
            payment_method: self.payment_method,
            transaction_id: self.transaction_id.clone(),
            status: PaymentStatus::Completed,
        };
        draft.validate()?;
        Ok(draft)
    }
}

impl DisplayablePage for UiStaffPayments {
    displayable_page_common!("Manage Payments", super::ROLES_STAFF);

    fn reset_to_default(&mut self, _: super::private::Token) {
        self.should_refresh = Default::default();
        self.data_state = Default::default();
        self.bookings = Default::default();
        self.payment_op = Default::default();
    }

    fn show(&mut self, ui: &mut eframe::egui::Ui, data_shared: &mut crate::DataShared) {
        if self.should_refresh {
            self.reset_to_default(super::private::Token {});
        }
        if !self.bookings.is_present() {
            let ctx = ui.ctx().clone();
            self.bookings.get(Some(ui), None, || {
                AwaitingType(data_shared.client.list_bookings(wake_fn(ctx)))
            });
            return;
        }
        if let DataState::Present(payments) = &mut self.data_state {
            let DataState::Present(bookings) = &self.bookings else {
                unreachable!("checked above");
            };
            egui::TopBottomPanel::bottom(format!("payment edit panel{}", self.page_unique_number))
                .show_inside(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        if ui_show_payment_op(
                            ui,
                            &data_shared.client,
                            bookings,
                            &mut self.payment_op,
                        ) == OpResult::ResetPage
                        {
                            self.should_refresh = true;
                        };
                    });
                });

            egui::CentralPanel::default().show_inside(ui, |ui| {
                if self.payment_op.has_changes() {
                    // Reduce risk of accidental data loss by changing selection
                    ui.disable();
                }
                ui.horizontal_wrapped(|ui| {
                    if ui.button("Refresh Page").clicked() {
                        self.should_refresh = true;
                        return;
                    }
                    ui.spacing();
                    if ui.button("Record Payment").clicked() {
                        self.payment_op = PaymentOp::New(PaymentFormState::default());
                    }
                });
                ui.separator();
                egui::ScrollArea::horizontal()
                    .show(ui, |ui| ui_show_payment_list(ui, payments, &mut self.payment_op));
            });
        } else {
            let ctx = ui.ctx().clone();
            self.data_state.get(Some(ui), None, || {
                AwaitingType(data_shared.client.list_payments(wake_fn(ctx)))
            });
        }
    }
}

fn ui_show_payment_op(
    ui: &mut egui::Ui,
    client_core: &Client,
    bookings: &[Booking],
    payment_op: &mut PaymentOp,
) -> OpResult {
    match payment_op {
        PaymentOp::None => {
            ui.label("[NO PAYMENT SELECTED]");
            OpResult::NoAction
        }
        PaymentOp::Selected(payment) => {
            ui.label(format!(
                "{} | booking {} | {} | {}",
                payment.transaction_id,
                payment.booking,
                fmt_money(payment.amount),
                payment.status,
            ));
            let mut next_op = None;
            if ui.button("Delete Payment").clicked() {
                next_op = Some(PaymentOp::Delete(DataState::AwaitingResponse(AwaitingType(
                    client_core.delete_payment(payment.id, wake_fn(ui.ctx().clone())),
                ))));
            }
            if let Some(op) = next_op {
                *payment_op = op;
            }
            OpResult::NoAction
        }
        PaymentOp::New(form) => ui_show_payment_form(ui, client_core, bookings, form),
        PaymentOp::Delete(save_status) => {
            match poll_save_outcome(get_save_outcome(save_status), ui) {
                ControlFlow::Continue(()) => OpResult::NoAction,
                ControlFlow::Break(action) => action,
            }
        }
    }
}

fn ui_show_payment_form(
    ui: &mut egui::Ui,
    client_core: &Client,
    bookings: &[Booking],
    form: &mut PaymentFormState,
) -> OpResult {
    match poll_save_outcome(get_save_outcome(&mut form.save_status), ui) {
        ControlFlow::Continue(()) => {} // Do nothing just continue
        ControlFlow::Break(action) => return action,
    }

    egui::Grid::new("Payment Grid").num_columns(2).show(ui, |ui| {
        ui.label("Booking");
        ui_booking_select(ui, &mut form.booking_id, &mut form.amount, bookings);
        ui.end_row();

        ui.label("Amount");
        ui.add(
            egui::DragValue::new(&mut form.amount)
                .range(0.0..=1_000_000.0)
                .speed(1.0)
                .prefix("$"),
        );
        ui.end_row();

        ui.label("Method");
        egui::ComboBox::from_id_salt("payment method combo")
            .selected_text(form.payment_method.to_string())
            .show_ui(ui, |ui| {
                for method in PaymentMethod::iter() {
                    ui.selectable_value(&mut form.payment_method, method, method.to_string());
                }
            });
        ui.end_row();

        ui.label("Transaction Id");
        ui.text_edit_singleline(&mut form.transaction_id);
        ui.end_row();
    });

    if let Some(e) = &form.validation_error {
        ui.colored_label(ui.visuals().error_fg_color, e);
    }

    if ui.add(Button::new("Save Payment")).clicked() {
        // The draft never reaches the network unless it passes validation
        match form.try_into_draft() {
            Ok(draft) => {
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

/// Only confirmed bookings can be paid, choosing one prefills the amount due
fn ui_booking_select(
    ui: &mut egui::Ui,
    selection: &mut Option<DbId>,
    amount: &mut f64,
    bookings: &[Booking],
) {
    let confirmed: Vec<&Booking> = bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Confirmed)
        .collect();
    let selected_text = selection
        .and_then(|id| confirmed.iter().find(|b| b.id == id))
        .map(|b| b.booking_reference.clone())
        .unwrap_or_else(|| "[NOT SET]".to_string());
    egui::ComboBox::from_id_salt("payment booking combo")
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            for booking in confirmed {
                if ui
                    .selectable_value(
                        selection,
                        Some(booking.id),
                        format!(
                            "{} ({})",
                            booking.booking_reference,
                            fmt_money(booking.total_price)
                        ),
                    )
                    .clicked()
                {
                    *amount = booking.total_price;
                }
            }
        });
}

fn ui_show_payment_list(ui: &mut egui::Ui, payments: &[Payment], payment_op: &mut PaymentOp) {
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
            ui.strong("Transaction Id");
        });
        header.col(|ui| {
            ui.strong("Booking");
        });
        header.col(|ui| {
            ui.strong("Amount");
        });
        header.col(|ui| {
            ui.strong("Method");
        });
        header.col(|ui| {
            ui.strong("Status");
        });
    });

    table.body(|body| {
        body.rows(text_height, payments.len(), |mut row| {
            let row_index = row.index();
            let payment = &payments[row_index];
            let is_selected_at_start = if let Some(selected) = payment_op.selected_payment() {
                let is_selected = selected.id == payment.id;
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
                ui.label(&payment.transaction_id);
            });
            row.col(|ui| {
                ui.label(payment.booking.to_string());
            });
            row.col(|ui| {
                ui.label(fmt_money(payment.amount));
            });
            row.col(|ui| {
                ui.label(payment.payment_method.to_string());
            });
            row.col(|ui| {
                ui.label(payment.status.to_string());
            });

            // Check for click of a row
            if row.response().clicked() {
                is_selected_at_end = !is_selected_at_end;
            }
            match (is_selected_at_start, is_selected_at_end) {
                (true, true) | (false, false) => {} // No change
                (true, false) => *payment_op = PaymentOp::None,
                (false, true) => *payment_op = PaymentOp::Selected(payment.clone()),
            }
        });
    });
}
