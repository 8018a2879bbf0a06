use flight_shared::{
    const_config::path::{PATH_STAFF_FLIGHTS, PATH_STAFF_FLIGHT_STATUS},
    flight::{Flight, FlightStatus},
    id::DbId,
    req_args::api::staff::FlightStatusReqArgs,
};
use futures::channel::oneshot;

use crate::{
    client::{UiCallBack, DUMMY_ARGUMENT},
    Client,
};

impl Client {
    /// Flights as served to staff, includes flights no longer bookable
    #[tracing::instrument(skip(ui_notify))]
    pub fn staff_flights<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<Flight>>> {
        self.send_request_expect_json(PATH_STAFF_FLIGHTS, &DUMMY_ARGUMENT, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn update_flight_status<F: UiCallBack>(
        &self,
        flight_id: DbId,
        status: FlightStatus,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        let args = FlightStatusReqArgs { status };
        self.send_request_expect_empty_at(PATH_STAFF_FLIGHT_STATUS, flight_id, &args, ui_notify)
    }
}
