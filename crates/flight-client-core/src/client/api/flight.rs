use flight_shared::{
    const_config::path::{
        PATH_FLIGHT, PATH_FLIGHTS, PATH_FLIGHT_CREATE, PATH_FLIGHT_DELETE, PATH_FLIGHT_UPDATE,
    },
    flight::{Flight, FlightDraft},
    id::DbId,
    req_args::api::flight::SearchReqArgs,
};
use futures::channel::oneshot;

use crate::{
    client::{UiCallBack, DUMMY_ARGUMENT},
    Client,
};

impl Client {
    /// Search with no filters returns the full list
    #[tracing::instrument(skip(ui_notify))]
    pub fn search_flights<F: UiCallBack>(
        &self,
        args: &SearchReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<Flight>>> {
        self.send_request_expect_json(PATH_FLIGHTS, args, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn get_flight<F: UiCallBack>(
        &self,
        flight_id: DbId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Flight>> {
        self.send_request_expect_json_at(PATH_FLIGHT, flight_id, &DUMMY_ARGUMENT, ui_notify)
    }

    /// NOTE: Callers are expected to have run [`FlightDraft::validate`] first
    #[tracing::instrument(skip(ui_notify))]
    pub fn create_flight<F: UiCallBack>(
        &self,
        draft: &FlightDraft,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        self.send_request_expect_empty(PATH_FLIGHT_CREATE, draft, ui_notify)
    }

    /// NOTE: Callers are expected to have run [`FlightDraft::validate`] first
    #[tracing::instrument(skip(ui_notify))]
    pub fn update_flight<F: UiCallBack>(
        &self,
        flight_id: DbId,
        draft: &FlightDraft,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        self.send_request_expect_empty_at(PATH_FLIGHT_UPDATE, flight_id, draft, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn delete_flight<F: UiCallBack>(
        &self,
        flight_id: DbId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        self.send_request_expect_empty_at(PATH_FLIGHT_DELETE, flight_id, &"", ui_notify)
    }
}
