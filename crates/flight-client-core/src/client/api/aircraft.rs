use flight_shared::{
    aircraft::{Aircraft, AircraftDraft},
    const_config::path::{
        PATH_AIRCRAFTS, PATH_AIRCRAFT_CREATE, PATH_AIRCRAFT_DELETE, PATH_AIRCRAFT_UPDATE,
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
    pub fn list_aircrafts<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<Aircraft>>> {
        self.send_request_expect_json(PATH_AIRCRAFTS, &DUMMY_ARGUMENT, ui_notify)
    }

    /// NOTE: Callers are expected to have run [`AircraftDraft::validate`] first
    #[tracing::instrument(skip(ui_notify))]
    pub fn create_aircraft<F: UiCallBack>(
        &self,
        draft: &AircraftDraft,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        self.send_request_expect_empty(PATH_AIRCRAFT_CREATE, draft, ui_notify)
    }

    /// NOTE: Callers are expected to have run [`AircraftDraft::validate`] first
    #[tracing::instrument(skip(ui_notify))]
    pub fn update_aircraft<F: UiCallBack>(
        &self,
        aircraft_id: DbId,
        draft: &AircraftDraft,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        self.send_request_expect_empty_at(PATH_AIRCRAFT_UPDATE, aircraft_id, draft, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn delete_aircraft<F: UiCallBack>(
        &self,
        aircraft_id: DbId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        self.send_request_expect_empty_at(PATH_AIRCRAFT_DELETE, aircraft_id, &"", ui_notify)
    }
}
