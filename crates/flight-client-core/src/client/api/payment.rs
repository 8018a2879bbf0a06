use flight_shared::{
    const_config::path::{
        PATH_PAYMENTS, PATH_PAYMENT_CREATE, PATH_PAYMENT_DELETE, PATH_PAYMENT_UPDATE,
    },
    id::DbId,
    payment::{Payment, PaymentDraft},
};
use futures::channel::oneshot;

use crate::{
    client::{UiCallBack, DUMMY_ARGUMENT},
    Client,
};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn list_payments<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<Payment>>> {
        self.send_request_expect_json(PATH_PAYMENTS, &DUMMY_ARGUMENT, ui_notify)
    }

    /// NOTE: Callers are expected to have run [`PaymentDraft::validate`] first
    #[tracing::instrument(skip(ui_notify))]
    pub fn create_payment<F: UiCallBack>(
        &self,
        draft: &PaymentDraft,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        self.send_request_expect_empty(PATH_PAYMENT_CREATE, draft, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn update_payment<F: UiCallBack>(
        &self,
        payment_id: DbId,
        draft: &PaymentDraft,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        self.send_request_expect_empty_at(PATH_PAYMENT_UPDATE, payment_id, draft, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn delete_payment<F: UiCallBack>(
        &self,
        payment_id: DbId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        self.send_request_expect_empty_at(PATH_PAYMENT_DELETE, payment_id, &"", ui_notify)
    }
}
