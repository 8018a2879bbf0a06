use flight_shared::{
    booking::{Booking, BookingDraft, BookingStatus},
    const_config::path::{
        PATH_BOOKING, PATH_BOOKINGS, PATH_BOOKING_CREATE, PATH_BOOKING_DELETE, PATH_BOOKING_UPDATE,
    },
    id::DbId,
    req_args::api::booking::StatusUpdateReqArgs,
};
use futures::channel::oneshot;

use crate::{
    client::{UiCallBack, DUMMY_ARGUMENT},
    Client,
};

impl Client {
    /// Customers get their own bookings, staff and admin get all of them
    #[tracing::instrument(skip(ui_notify))]
    pub fn list_bookings<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<Booking>>> {
        self.send_request_expect_json(PATH_BOOKINGS, &DUMMY_ARGUMENT, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn get_booking<F: UiCallBack>(
        &self,
        booking_id: DbId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Booking>> {
        self.send_request_expect_json_at(PATH_BOOKING, booking_id, &DUMMY_ARGUMENT, ui_notify)
    }

    /// NOTE: Callers are expected to have run [`BookingDraft::validate`] first
    #[tracing::instrument(skip(ui_notify))]
    pub fn create_booking<F: UiCallBack>(
        &self,
        draft: &BookingDraft,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Booking>> {
        self.send_request_expect_json(PATH_BOOKING_CREATE, draft, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn update_booking_status<F: UiCallBack>(
        &self,
        booking_id: DbId,
        status: BookingStatus,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        let args = StatusUpdateReqArgs { status };
        self.send_request_expect_empty_at(PATH_BOOKING_UPDATE, booking_id, &args, ui_notify)
    }

    /// Convenience wrapper for the one status customers set themselves
    #[tracing::instrument(skip(ui_notify))]
    pub fn cancel_booking<F: UiCallBack>(
        &self,
        booking_id: DbId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        self.update_booking_status(booking_id, BookingStatus::Cancelled, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn delete_booking<F: UiCallBack>(
        &self,
        booking_id: DbId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        self.send_request_expect_empty_at(PATH_BOOKING_DELETE, booking_id, &"", ui_notify)
    }
}
