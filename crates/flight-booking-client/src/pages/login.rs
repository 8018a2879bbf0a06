use super::data_state::{AwaitingType, DataState};
use crate::{app::wake_fn, ui_helpers::ui_password_edit, DataShared};
use flight_shared::{
    const_config::client::CLIENT_MIN_PASSWORD_LENGTH,
    internal_error,
    req_args::{LoginReqArgs, RegisterReqArgs},
    uac::{UserInfo, Username},
};
use futures::channel::oneshot;
use secrecy::{ExposeSecret, SecretString};
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug)]
pub struct UiLogin {
    password: SecretString,
    login_attempt_status: LoginAttemptStatus,
    register_page: Option<UiRegister>,
}

type LoginAwaitingType = oneshot::Receiver<anyhow::Result<Arc<UserInfo>>>;

#[derive(Default)]
enum LoginAttemptStatus {
    #[default]
    NotAttempted,
    AwaitingResponse(LoginAwaitingType),
    Failed(String),
    Success,
}

impl Debug for LoginAttemptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAttempted => write!(f, "NotAttempted"),
            Self::AwaitingResponse(_) => write!(f, "AwaitingResponse"),
            Self::Failed(e) => f.debug_tuple("Failed").field(e).finish(),
            Self::Success => write!(f, "Success"),
        }
    }
}

impl LoginAttemptStatus {
    fn is_allowed_to_login(&self) -> bool {
        match self {
            LoginAttemptStatus::NotAttempted | LoginAttemptStatus::Failed(_) => true,
            LoginAttemptStatus::AwaitingResponse(_) | LoginAttemptStatus::Success => false,
        }
    }
}

impl UiLogin {
    fn is_password_set(&self) -> bool {
        !self.password.expose_secret().is_empty()
    }

    fn login_prompt(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) {
        if matches!(self.login_attempt_status, LoginAttemptStatus::NotAttempted) {
            // Surface a forced logout (eg expired token) from before this attempt
            if let Some(session_error) = data_shared.client.session_error() {
                ui.colored_label(ui.visuals().warn_fg_color, session_error.to_string());
            }
        }

        let username_widget =
            egui::TextEdit::singleline(&mut data_shared.username).hint_text("Username");
        let mut lost_focus = ui.add(username_widget).lost_focus();

        lost_focus =
            ui_password_edit(ui, &mut self.password, "Password").lost_focus() || lost_focus;

        if lost_focus
            && is_allowed_to_login(self, &data_shared.username)
            && ui.input(|i| i.key_pressed(egui::Key::Enter))
        {
            self.send_login_attempt(ui, data_shared)
        }
    }

    fn check_login_attempt_status(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) {
        match &mut self.login_attempt_status {
            LoginAttemptStatus::NotAttempted => {
                // No special UI needed
            }
            LoginAttemptStatus::Success => {
                data_shared.mark_login_complete();
                ui.ctx().request_repaint(); // Repaint with new value
            }
            LoginAttemptStatus::AwaitingResponse(rx) => match rx.try_recv() {
                Ok(recv_opt) => match recv_opt {
                    Some(outcome_result) => match outcome_result {
                        Ok(user) => {
                            info!("login completed for {}", user.username);
                            self.login_attempt_status = LoginAttemptStatus::Success;
                            // Repaint with new value
                            ui.ctx().request_repaint();
                        }
                        Err(e) => {
                            info!("error returned from client-core: {e:?}");
                            self.login_attempt_status = LoginAttemptStatus::Failed(e.to_string())
                        }
                    },
                    None => {
                        ui.spinner();
                    }
                },
                Err(e) => {
                    error!("Error receiving on channel. Canceled: {e:?}");
                    self.login_attempt_status = LoginAttemptStatus::Failed(internal_error!(e));
                }
            },
            LoginAttemptStatus::Failed(e) => {
                let err_msg = format!("Login attempt failed: {e}");
                ui.separator();
                ui.colored_label(ui.visuals().error_fg_color, err_msg);
                if ui.button("Clear error status").clicked() {
                    self.login_attempt_status = LoginAttemptStatus::NotAttempted;
                }
                ui.separator();
            }
        }
    }

    pub fn show(&mut self, ctx: &egui::Context, data_shared: &mut DataShared) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(register_page) = self.register_page.as_mut() {
                if register_page.show(ui, data_shared) {
                    self.register_page = None;
                }
            } else {
                ui.vertical_centered(|ui| {
                    ui.heading("Login");

                    self.login_prompt(ui, data_shared);

                    self.check_login_attempt_status(ui, data_shared);

                    self.login_button(ui, data_shared);

                    ui.separator();
                    if ui.button("Create an account").clicked() {
                        self.register_page = Some(UiRegister::default());
                    }
                });
            }
        });
    }

    fn login_button(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) {
        if ui
            .add_enabled(
                is_allowed_to_login(self, &data_shared.username),
                egui::Button::new("Login"),
            )
            .clicked()
        {
            self.send_login_attempt(ui, data_shared);
        }
    }

    fn send_login_attempt(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) {
        let args = LoginReqArgs::new(data_shared.username.clone(), self.password.clone());

        let rx = data_shared.client.login(args, wake_fn(ui.ctx().clone()));
        self.login_attempt_status = LoginAttemptStatus::AwaitingResponse(rx);
    }
}

impl Default for UiLogin {
    fn default() -> Self {
        Self {
            password: SecretString::from(""),
            login_attempt_status: Default::default(),
            register_page: Default::default(),
        }
    }
}

fn is_allowed_to_login(data: &UiLogin, username: &str) -> bool {
    !username.is_empty()
        && data.is_password_set()
        && data.login_attempt_status.is_allowed_to_login()
}

/// Self service registration, always creates a customer account
#[derive(Debug)]
struct UiRegister {
    username: String,
    password: SecretString,
    confirm_password: SecretString,
    first_name: String,
    last_name: String,
    phone_number: String,
    save_status: DataState<()>,
}

impl Default for UiRegister {
    fn default() -> Self {
        Self {
            username: Default::default(),
            password: SecretString::from(""),
            confirm_password: SecretString::from(""),
            first_name: Default::default(),
            last_name: Default::default(),
            phone_number: Default::default(),
            save_status: Default::default(),
        }
    }
}

impl UiRegister {
    /// Returns true when the user is done and wants to go back to the login
    /// screen
    fn show(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) -> bool {
        let mut back_to_login = false;
        ui.vertical_centered(|ui| {
            ui.heading("Create Account");
            match &mut self.save_status {
                DataState::None => back_to_login = self.show_form(ui, data_shared),
                DataState::AwaitingResponse(rx) => {
                    if let Some(new_state) = DataState::await_data(None, rx) {
                        self.save_status = new_state;
                    } else {
                        ui.spinner();
                    }
                }
                DataState::Present(()) => {
                    ui.spacing();
                    ui.label("Account created. You can now log in.");
                    if ui.button("Back to Login").clicked() {
                        back_to_login = true;
                    }
                }
                DataState::Failed(e) => {
                    ui.colored_label(ui.visuals().error_fg_color, format!("Failed {e}"));
                    if ui.button("Try Again").clicked() {
                        self.save_status = DataState::default();
                    }
                }
            }
        });
        back_to_login
    }

    fn show_form(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) -> bool {
        let mut has_errors = false;
        egui::Grid::new("Register Grid").num_columns(2).show(ui, |ui| {
            ui.label("Username");
            ui.text_edit_singleline(&mut self.username);
            if let Err(e) = Username::try_from(self.username.clone()) {
                has_errors = true;
                ui.colored_label(ui.visuals().error_fg_color, e.to_string());
            }
            ui.end_row();

            //----------------------------------------------------------------------
            ui.label("Password");
            ui_password_edit(ui, &mut self.password, "Password");
            if self.password.expose_secret().len() < CLIENT_MIN_PASSWORD_LENGTH {
                has_errors = true;
                ui.colored_label(
                    ui.visuals().error_fg_color,
                    format!("At least {CLIENT_MIN_PASSWORD_LENGTH} characters"),
                );
            }
            ui.end_row();

            //----------------------------------------------------------------------
            ui.label("Confirm Password");
            ui_password_edit(ui, &mut self.confirm_password, "Confirm Password");
            if self.password.expose_secret() != self.confirm_password.expose_secret() {
                has_errors = true;
                ui.colored_label(ui.visuals().error_fg_color, "Passwords must match");
            }
            ui.end_row();

            //----------------------------------------------------------------------
            ui.label("First Name");
            ui.text_edit_singleline(&mut self.first_name);
            if self.first_name.trim().is_empty() {
                has_errors = true;
                ui.colored_label(ui.visuals().error_fg_color, "Required");
            }
            ui.end_row();

            //----------------------------------------------------------------------
            ui.label("Last Name");
            ui.text_edit_singleline(&mut self.last_name);
            if self.last_name.trim().is_empty() {
                has_errors = true;
                ui.colored_label(ui.visuals().error_fg_color, "Required");
            }
            ui.end_row();

            //----------------------------------------------------------------------
            ui.label("Phone Number");
            ui.text_edit_singleline(&mut self.phone_number);
            ui.end_row();
        });

        if ui
            .add_enabled(!has_errors, egui::Button::new("Create Account"))
            .clicked()
        {
            self.save(ui, data_shared);
        }

        ui.button("Back to Login").clicked()
    }

    fn save(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) {
        match self.try_into_req_args() {
            Ok(args) => {
                let rx = data_shared
                    .client
                    .register(&args, wake_fn(ui.ctx().clone()));
                self.save_status = DataState::AwaitingResponse(AwaitingType(rx));
            }
            Err(e) => self.save_status = DataState::Failed(e.to_string()),
        }
    }

    fn try_into_req_args(&self) -> anyhow::Result<RegisterReqArgs> {
        use anyhow::Context as _;
        let username = self
            .username
            .clone()
            .try_into()
            .context("invalid username")?;
        Ok(RegisterReqArgs::new_customer(
            username,
            self.password.clone(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.phone_number.clone(),
        ))
    }
}
