use flight_shared::{
    airport::{Airport, AirportDraft},
    const_config::path::{
        PATH_AIRPORTS, PATH_AIRPORT_CREATE, PATH_AIRPORT_DELETE, PATH_AIRPORT_UPDATE,
    },
    id::DbId,
};
use futures::channel::oneshot;

use crate::{
    client::{UiCallBack, DUMMY_ARGUMENT},
    Client,
};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn list_airports<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<Airport>>> {
        self.send_request_expect_json(PATH_AIRPORTS, &DUMMY_ARGUMENT, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn create_airport<F: UiCallBack>(
        &self,
        draft: &AirportDraft,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        self.send_request_expect_empty(PATH_AIRPORT_CREATE, draft, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn update_airport<F: UiCallBack>(
        &self,
        airport_id: DbId,
        draft: &AirportDraft,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        self.send_request_expect_empty_at(PATH_AIRPORT_UPDATE, airport_id, draft, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn delete_airport<F: UiCallBack>(
        &self,
        airport_id: DbId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        self.send_request_expect_empty_at(PATH_AIRPORT_DELETE, airport_id, &"", ui_notify)
    }
}
