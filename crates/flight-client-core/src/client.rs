use anyhow::{anyhow, Context};
use closure_traits::{ChannelCallBack, ChannelCallBackOutput};
use flight_shared::{
    const_config::{
        client::CLIENT_DEFAULT_SERVER_ADDRESS,
        path::{PathSpec, PATH_LOGIN, PATH_USER_PROFILE},
    },
    id::DbId,
    req_args::LoginReqArgs,
    token::{AuthToken, StoredTokens},
    uac::{AuthError, LoginResponse, Role, UserInfo},
};
use futures::channel::oneshot;
use reqwest::{header::AUTHORIZATION, Method, StatusCode};
use secrecy::ExposeSecret as _;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use tracing::info;

pub mod api;
pub mod guard;
pub mod storage;

use storage::{MemoryTokenStore, TokenStore};

pub const DUMMY_ARGUMENT: &[(&str, &str)] = &[("", "")];

#[derive(Debug, Clone)]
pub struct Client {
    api_client: reqwest::Client,
    inner: Arc<Mutex<ClientInner>>,
    token_store: Arc<dyn TokenStore>,
}

#[derive(Debug)]
struct ClientInner {
    server_address: String,
    session: SessionState,
}

/// The single source of truth for "who is logged in"
#[derive(Debug, Default)]
struct SessionState {
    user: Option<Arc<UserInfo>>,
    token: Option<AuthToken>,
    loading: bool,
    error: Option<Arc<AuthError>>,
}

/// Point in time copy of the session consumed by the route guard
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub user: Option<Arc<UserInfo>>,
    pub is_loading: bool,
    pub error: Option<Arc<AuthError>>,
}

impl SessionSnapshot {
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(CLIENT_DEFAULT_SERVER_ADDRESS.to_string())
    }
}

impl ClientInner {
    #[tracing::instrument]
    fn new(server_address: String) -> Self {
        Self {
            server_address,
            session: SessionState::default(),
        }
    }
}

impl Client {
    #[tracing::instrument(name = "NEW CLIENT-CORE")]
    pub fn new(server_address: String) -> Self {
        Self::new_with_store(server_address, Arc::new(MemoryTokenStore::default()))
    }

    #[tracing::instrument(name = "NEW CLIENT-CORE WITH STORE")]
    pub fn new_with_store(server_address: String, token_store: Arc<dyn TokenStore>) -> Self {
        let api_client = reqwest::Client::builder()
            .build()
            .expect("Unable to create reqwest client");
        Self {
            api_client,
            inner: Arc::new(Mutex::new(ClientInner::new(server_address))),
            token_store,
        }
    }

    /// Restores the session from the persisted token if one is available
    ///
    /// If no token is persisted the receiver resolves with `Ok(None)` without
    /// touching the network. A failed restore drops the persisted token. The
    /// session always ends with `loading == false` once the receiver resolves.
    #[tracing::instrument(skip(ui_notify))]
    pub fn initialize<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Option<Arc<UserInfo>>>> {
        let (tx, rx) = oneshot::channel();
        let Some(tokens) = self.token_store.load() else {
            {
                let mut inner = self.inner.lock().expect("mutex poisoned");
                inner.session.loading = false;
            }
            if tx.send(Ok(None)).is_err() {
                info!("initialize result discarded, receiver was dropped");
            }
            ui_notify();
            return rx;
        };
        {
            let mut inner = self.inner.lock().expect("mutex poisoned");
            inner.session.token = Some(tokens.access);
            inner.session.loading = true;
        }
        let client = self.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async {
            let msg = process_initialize(resp, client).await;
            if tx.send(msg).is_err() {
                info!("initialize result discarded, receiver was dropped");
            }
            ui_notify();
        };
        self.initiate_request(PATH_USER_PROFILE, &DUMMY_ARGUMENT, on_done);
        rx
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn login<F: UiCallBack>(
        &self,
        args: LoginReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Arc<UserInfo>>> {
        let (tx, rx) = oneshot::channel();
        let args = serde_json::json!({
            "username": args.username,
            "password": args.password.expose_secret(),
        });
        let client = self.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async {
            let msg = process_login(resp, client).await;
            if tx.send(msg).is_err() {
                info!("login result discarded, receiver was dropped");
            }
            ui_notify();
        };
        self.initiate_request(PATH_LOGIN, &args, on_done);
        rx
    }

    /// Clears the user, the session token and the persisted tokens
    ///
    /// Synchronous and idempotent. The backend's bearer tokens are stateless
    /// so no request needs to be sent.
    #[tracing::instrument]
    pub fn logout(&self) {
        self.clear_session(None);
    }

    /// Forced logout used when the backend reports the token is no longer
    /// accepted
    fn expire_session(&self) {
        self.clear_session(Some(AuthError::SessionExpired));
    }

    fn clear_session(&self, error: Option<AuthError>) {
        self.token_store.clear();
        let mut inner = self.inner.lock().expect("mutex poisoned");
        inner.session.user = None;
        inner.session.token = None;
        inner.session.loading = false;
        inner.session.error = error.map(Arc::new);
    }

    fn complete_login(&self, login_response: LoginResponse) -> Arc<UserInfo> {
        let LoginResponse {
            access,
            refresh,
            user,
        } = login_response;
        self.token_store.store(&StoredTokens {
            access: access.clone(),
            refresh,
        });
        let user = Arc::new(user);
        let mut inner = self.inner.lock().expect("mutex poisoned");
        inner.session.user = Some(user.clone());
        inner.session.token = Some(access);
        inner.session.loading = false;
        inner.session.error = None;
        user
    }

    fn record_auth_error(&self, error: Arc<AuthError>) {
        self.inner.lock().expect("mutex poisoned").session.error = Some(error);
    }

    #[tracing::instrument(skip(args, on_done))]
    // WARNING: Must skip args as it may contain sensitive info and "safe" versions
    // would usually already be logged by the caller
    fn initiate_request<T, F, O>(&self, path_spec: PathSpec, args: &T, on_done: F)
    where
        T: serde::Serialize + Debug,
        F: ChannelCallBack<O>,
        O: ChannelCallBackOutput,
    {
        let url = self.path_to_url(path_spec.path);
        self.initiate_request_at(path_spec.method, url, args, on_done)
    }

    fn initiate_request_at<T, F, O>(&self, method: Method, url: String, args: &T, on_done: F)
    where
        T: serde::Serialize + Debug,
        F: ChannelCallBack<O>,
        O: ChannelCallBackOutput,
    {
        let is_get_method = method == Method::GET;
        let mut request = self.api_client.request(method, url);
        if let Some(token) = self.token() {
            request = request.header(AUTHORIZATION, token.bearer_value());
        }
        request = if is_get_method {
            request.query(&args)
        } else {
            request.json(&args)
        };
        reqwest_cross::fetch(request, on_done)
    }

    pub(crate) fn send_request_expect_json<F, T, U>(
        &self,
        path_spec: PathSpec,
        args: &T,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<U>>
    where
        T: serde::Serialize + std::fmt::Debug,
        F: UiCallBack,
        U: Send + std::fmt::Debug + serde::de::DeserializeOwned + 'static,
    {
        let url = self.path_to_url(path_spec.path);
        self.send_json_request(path_spec.method, url, args, ui_notify)
    }

    pub(crate) fn send_request_expect_json_at<F, T, U>(
        &self,
        path_spec: PathSpec,
        id: DbId,
        args: &T,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<U>>
    where
        T: serde::Serialize + std::fmt::Debug,
        F: UiCallBack,
        U: Send + std::fmt::Debug + serde::de::DeserializeOwned + 'static,
    {
        let url = self.path_to_url(&path_spec.instance_path(id));
        self.send_json_request(path_spec.method, url, args, ui_notify)
    }

    fn send_json_request<F, T, U>(
        &self,
        method: Method,
        url: String,
        args: &T,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<U>>
    where
        T: serde::Serialize + std::fmt::Debug,
        F: UiCallBack,
        U: Send + std::fmt::Debug + serde::de::DeserializeOwned + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let client = self.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async {
            let msg = process_json_body(resp, client).await;
            if tx.send(msg).is_err() {
                info!("response discarded, receiver was dropped before completion");
            }
            ui_notify();
        };
        self.initiate_request_at(method, url, args, on_done);
        rx
    }

    pub(crate) fn send_request_expect_empty<F, T>(
        &self,
        path_spec: PathSpec,
        args: &T,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>>
    where
        T: serde::Serialize + std::fmt::Debug,
        F: UiCallBack,
    {
        let url = self.path_to_url(path_spec.path);
        self.send_empty_request(path_spec.method, url, args, ui_notify)
    }

    pub(crate) fn send_request_expect_empty_at<F, T>(
        &self,
        path_spec: PathSpec,
        id: DbId,
        args: &T,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>>
    where
        T: serde::Serialize + std::fmt::Debug,
        F: UiCallBack,
    {
        let url = self.path_to_url(&path_spec.instance_path(id));
        self.send_empty_request(path_spec.method, url, args, ui_notify)
    }

    fn send_empty_request<F, T>(
        &self,
        method: Method,
        url: String,
        args: &T,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>>
    where
        T: serde::Serialize + std::fmt::Debug,
        F: UiCallBack,
    {
        let (tx, rx) = oneshot::channel();
        let client = self.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async {
            let msg = process_empty(resp, client).await;
            if tx.send(msg).is_err() {
                info!("response discarded, receiver was dropped before completion");
            }
            ui_notify();
        };
        self.initiate_request_at(method, url, args, on_done);
        rx
    }

    #[tracing::instrument(ret)]
    fn path_to_url(&self, path: &str) -> String {
        format!(
            "{}{path}",
            &self
                .inner
                .lock()
                .expect("failed to unlock client mutex")
                .server_address
        )
    }

    fn token(&self) -> Option<AuthToken> {
        self.inner
            .lock()
            .expect("mutex poisoned")
            .session
            .token
            .clone()
    }

    pub fn user_info(&self) -> Option<Arc<UserInfo>> {
        self.inner
            .lock()
            .expect("mutex poisoned")
            .session
            .user
            .clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner
            .lock()
            .expect("mutex poisoned")
            .session
            .user
            .is_some()
    }

    pub fn is_session_loading(&self) -> bool {
        self.inner.lock().expect("mutex poisoned").session.loading
    }

    pub fn session_error(&self) -> Option<Arc<AuthError>> {
        self.inner
            .lock()
            .expect("mutex poisoned")
            .session
            .error
            .clone()
    }

    pub fn session_snapshot(&self) -> SessionSnapshot {
        let inner = self.inner.lock().expect("mutex poisoned");
        SessionSnapshot {
            user: inner.session.user.clone(),
            is_loading: inner.session.loading,
            error: inner.session.error.clone(),
        }
    }

    /// The durable entries as currently persisted, used by app shells that
    /// sync the store into their own persistence layer
    pub fn stored_tokens(&self) -> Option<StoredTokens> {
        self.token_store.load()
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_empty(
    response: reqwest::Result<reqwest::Response>,
    client: Client,
) -> anyhow::Result<()> {
    let (response, status) = extract_response(response)?;
    if status.is_success() {
        Ok(())
    } else {
        Err(handle_error(response, &client).await)
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_json_body<T>(
    response: reqwest::Result<reqwest::Response>,
    client: Client,
) -> anyhow::Result<T>
where
    T: Debug + serde::de::DeserializeOwned,
{
    let (response, status) = extract_response(response)?;
    if status.is_success() {
        response
            .json()
            .await
            .context("failed to parse result as json")
    } else {
        Err(handle_error(response, &client).await)
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_login(
    response: reqwest::Result<reqwest::Response>,
    client: Client,
) -> anyhow::Result<Arc<UserInfo>> {
    match try_process_login(response, &client).await {
        Ok(user) => Ok(user),
        Err(e) => {
            // Login failure is recorded on the session and still returned to
            // the caller so it is never silently swallowed
            let msg = e.to_string();
            client.record_auth_error(Arc::new(e));
            Err(anyhow!(msg))
        }
    }
}

async fn try_process_login(
    response: reqwest::Result<reqwest::Response>,
    client: &Client,
) -> Result<Arc<UserInfo>, AuthError> {
    let (response, status) = extract_response(response).map_err(AuthError::UnexpectedError)?;
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::BAD_REQUEST {
        return Err(AuthError::InvalidUserOrPassword);
    }
    if !status.is_success() {
        return Err(AuthError::UnexpectedError(handle_error_body(response).await));
    }
    let login_response: LoginResponse = response
        .json()
        .await
        .context("failed to parse result as json")
        .map_err(AuthError::UnexpectedError)?;
    Ok(client.complete_login(login_response))
}

#[tracing::instrument(ret, err(Debug))]
async fn process_initialize(
    response: reqwest::Result<reqwest::Response>,
    client: Client,
) -> anyhow::Result<Option<Arc<UserInfo>>> {
    match process_json_body::<UserInfo>(response, client.clone()).await {
        Ok(user) => {
            let user = Arc::new(user);
            let mut inner = client.inner.lock().expect("mutex poisoned");
            inner.session.user = Some(user.clone());
            inner.session.loading = false;
            inner.session.error = None;
            Ok(Some(user))
        }
        Err(e) => {
            let token_still_set = client
                .inner
                .lock()
                .expect("mutex poisoned")
                .session
                .token
                .is_some();
            if token_still_set {
                // Not an auth rejection (those already cleared the session),
                // but a stored token that did not produce a session is still
                // dropped so the next start goes straight to the login screen
                client.clear_session(None);
            }
            Err(e).context("failed to restore session from stored token")
        }
    }
}

#[tracing::instrument(ret)]
async fn handle_error(response: reqwest::Response, client: &Client) -> anyhow::Error {
    if response.status() == StatusCode::UNAUTHORIZED {
        // Expired or invalid token, treated as logged out
        client.expire_session();
    }
    handle_error_body(response).await
}

async fn handle_error_body(response: reqwest::Response) -> anyhow::Error {
    let status = response.status();
    debug_assert!(
        !status.is_success(),
        "this is supposed to be an error, right? Status code is: {status}"
    );
    let Ok(body) = response.text().await else {
        return anyhow!("failed to get response body");
    };
    if body.is_empty() {
        anyhow!("request failed with status code: {status} and no body")
    } else {
        anyhow!("{body}")
    }
}

/// Provides a way to standardize the error message
#[tracing::instrument(ret, err(Debug))]
fn extract_response(
    response: reqwest::Result<reqwest::Response>,
) -> anyhow::Result<(reqwest::Response, StatusCode)> {
    if response.is_err() {
        info!("Response is err: {:#?}", response);
    }
    let response = response.context("failed to send request")?;
    let status = response.status();
    Ok((response, status))
}

pub trait UiCallBack: 'static + Send + FnOnce() {}
impl<T> UiCallBack for T where T: 'static + Send + FnOnce() {}

#[cfg(not(target_arch = "wasm32"))]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> + Send {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> + Send {}
}

#[cfg(target_arch = "wasm32")]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> {}
}
