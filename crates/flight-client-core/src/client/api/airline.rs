use flight_shared::{
    airline::{Airline, AirlineDraft},
    const_config::path::{
        PATH_AIRLINES, PATH_AIRLINE_CREATE, PATH_AIRLINE_DELETE, PATH_AIRLINE_UPDATE,
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
    pub fn list_airlines<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<Airline>>> {
        self.send_request_expect_json(PATH_AIRLINES, &DUMMY_ARGUMENT, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn create_airline<F: UiCallBack>(
        &self,
        draft: &AirlineDraft,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        self.send_request_expect_empty(PATH_AIRLINE_CREATE, draft, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn update_airline<F: UiCallBack>(
        &self,
        airline_id: DbId,
        draft: &AirlineDraft,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        self.send_request_expect_empty_at(PATH_AIRLINE_UPDATE, airline_id, draft, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn delete_airline<F: UiCallBack>(
        &self,
        airline_id: DbId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        self.send_request_expect_empty_at(PATH_AIRLINE_DELETE, airline_id, &"", ui_notify)
    }
}
