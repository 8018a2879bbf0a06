use futures::channel::oneshot;
use secrecy::ExposeSecret as _;
use flight_shared::{
    const_config::path::{PATH_REGISTER, PATH_USER_PROFILE},
    req_args::RegisterReqArgs,
    uac::UserInfo,
};

use crate::{
    client::{UiCallBack, DUMMY_ARGUMENT},
    Client,
};

pub mod aircraft;
pub mod airline;
pub mod airport;
pub mod booking;
pub mod flight;
pub mod payment;
pub mod staff;

impl Client {
    /// Creates the account but does not log in, the user signs in afterwards
    #[tracing::instrument(skip(ui_notify))]
    pub fn register<F: UiCallBack>(
        &self,
        args: &RegisterReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        let args = serde_json::json!({
            "username": args.username,
            "password": args.password.expose_secret(),
            "first_name": args.first_name,
            "last_name": args.last_name,
            "phone_number": args.phone_number,
            "user_type": args.role,
        });
        self.send_request_expect_empty(PATH_REGISTER, &args, ui_notify)
    }

    /// Re-fetches the profile of the logged in user
    #[tracing::instrument(skip(ui_notify))]
    pub fn fetch_profile<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<UserInfo>> {
        self.send_request_expect_json(PATH_USER_PROFILE, &DUMMY_ARGUMENT, ui_notify)
    }
}
