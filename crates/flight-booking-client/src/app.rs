use std::sync::Arc;

use egui::ScrollArea;
use flight_client_core::{Client, MemoryTokenStore};
use flight_shared::{
    const_config::client::{
        storage::{STORAGE_ACCESS_TOKEN_KEY, STORAGE_REFRESH_TOKEN_KEY},
        CLIENT_DEFAULT_SERVER_ADDRESS,
    },
    token::{AuthToken, StoredTokens},
    uac::UserInfo,
};
use tracing::{debug, error, instrument};
use tracing::{info, warn};

use crate::pages::{
    data_state::{AwaitingType, DataState},
    egui_settings::UiEguiSettings,
    flight_search::UiFlightSearch,
    manage_aircraft::UiManageAircraft,
    manage_airlines::UiManageAirlines,
    manage_airports::UiManageAirports,
    manage_bookings::UiManageBookings,
    manage_flights::UiManageFlights,
    my_bookings::UiMyBookings,
    profile::UiProfile,
    staff_flights::UiStaffFlights,
    staff_payments::UiStaffPayments,
    UiLogin, UiPage,
};
use crate::shortcuts::Shortcuts;
use crate::DisplayablePage;

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct FlightBookingApp {
    #[serde(skip)]
    login_page: Option<UiLogin>,
    data_shared: DataShared,
    active_pages: Vec<UiPage>,
    shortcuts: Shortcuts,
    #[serde(skip)]
    session_restore: Option<AwaitingType<Option<Arc<UserInfo>>>>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct DataShared {
    pub username: String,

    #[serde(skip)]
    /// Allows the app to run its own post login steps outside of the
    /// client-core
    is_login_completed: bool,
    #[serde(skip)]
    pub full_name: String,
    #[serde(skip)]
    pub client: Client,
}

impl DataShared {
    /// Doesn't do anything if the client does not have user info
    #[instrument]
    pub(crate) fn mark_login_complete(&mut self) {
        if let Some(user_info) = self.client.user_info() {
            debug!("Updating username to {}", user_info.username);
            self.username = user_info.username.clone().into();
            self.full_name = user_info.full_name();
            self.is_login_completed = true;
        } else {
            warn!("No user found in client");
        }
    }

    pub fn is_logged_in(&mut self) -> bool {
        if self.client.is_logged_in() {
            self.is_login_completed
        } else {
            self.is_login_completed = false; // Reset completed status (ensure reset after logout)
            false
        }
    }

    fn has_access<T: DisplayablePage>(&self) -> bool {
        let Some(user) = self.client.user_info() else {
            error!(
                "Attempt to get user information when it doesn't exist. Isn't the user logged in?"
            );
            debug_assert!(false, "This shouldn't happen we should only be checking user information after login when it exists");
            return false;
        };
        T::has_access(user.role)
    }
}

impl eframe::App for FlightBookingApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        info!("Saving with key: {}", eframe::APP_KEY);
        eframe::set_value(storage, eframe::APP_KEY, self);
        // The durable token entries are synced from the live store so a
        // logout also removes the persisted copies
        let tokens = self.data_shared.client.stored_tokens();
        eframe::set_value(
            storage,
            STORAGE_ACCESS_TOKEN_KEY,
            &tokens.as_ref().map(|t| t.access.clone()),
        );
        eframe::set_value(
            storage,
            STORAGE_REFRESH_TOKEN_KEY,
            &tokens.and_then(|t| t.refresh),
        );
    }

    /// Called each time the UI needs repainting, which may be many times per
    /// second. Put your widgets into a `SidePanel`, `TopPanel`,
    /// `CentralPanel`, `Window` or `Area`.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_session_restore();
        self.top_panel(ctx);
        self.bottom_panel(ctx);
        self.show_pages(ctx);

        // Request repaint after 1 second
        ctx.request_repaint_after(std::time::Duration::from_secs(1));
    }
}

impl FlightBookingApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Load previous app state (if any).
        // Note that you must enable the `persistence` feature for this to work.
        let mut app: FlightBookingApp = if let Some(storage) = cc.storage {
            info!("Storage found. Loading...");
            match eframe::get_value(storage, eframe::APP_KEY) {
                Some(value) => {
                    info!("Loaded succeeded");
                    value
                }
                None => {
                    warn!("Load failed");
                    Default::default()
                }
            }
        } else {
            info!("No storage found");
            Default::default()
        };

        // The tokens persist in their own entries and seed the client's store,
        // then the session restore runs against the backend
        let token_store = Arc::new(MemoryTokenStore::with_tokens(
            cc.storage.and_then(load_stored_tokens),
        ));
        app.data_shared.client =
            Client::new_with_store(CLIENT_DEFAULT_SERVER_ADDRESS.to_string(), token_store);
        app.session_restore = Some(AwaitingType(
            app.data_shared.client.initialize(wake_fn(cc.egui_ctx.clone())),
        ));
        app
    }

    fn poll_session_restore(&mut self) {
        let Some(rx) = self.session_restore.as_mut() else {
            return;
        };
        if let Some(state) = DataState::await_data(None, rx) {
            match &state {
                DataState::Present(Some(user)) => {
                    info!("session restored for {}", user.username);
                    self.data_shared.mark_login_complete();
                }
                DataState::Present(None) => info!("no stored session to restore"),
                DataState::Failed(e) => warn!("session restore failed: {e}"),
                DataState::None | DataState::AwaitingResponse(_) => {}
            }
            self.session_restore = None;
        }
    }

    fn is_logged_in(&mut self) -> bool {
        self.data_shared.is_logged_in()
    }

    fn menu(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.style_mut().wrap_mode = Some(egui::TextWrapMode::Extend);
        self.ui_menu_file(ui, ctx);
        self.ui_menu_pages(ui);
    }

    fn ui_menu_pages(&mut self, ui: &mut egui::Ui) {
        ui.menu_button("Pages", |ui| {
            self.ui_menu_page_btn::<UiFlightSearch>(ui);
            self.ui_menu_page_btn::<UiMyBookings>(ui);
            ui.separator();
            self.ui_menu_page_btn::<UiStaffFlights>(ui);
            self.ui_menu_page_btn::<UiStaffPayments>(ui);
            ui.separator();
            self.ui_menu_page_btn::<UiManageFlights>(ui);
            self.ui_menu_page_btn::<UiManageAirlines>(ui);
            self.ui_menu_page_btn::<UiManageAirports>(ui);
            self.ui_menu_page_btn::<UiManageAircraft>(ui);
            self.ui_menu_page_btn::<UiManageBookings>(ui);
            ui.separator();
            self.ui_menu_page_btn::<UiEguiSettings>(ui);

            ui.separator();
            if ui.button("Open All Pages").clicked() {
                self.open_all_pages();
                ui.close_menu();
            }
            if ui.button("Close All Pages").clicked() {
                self.close_all_pages();
                ui.close_menu();
            }
            if ui.button("Deactivate All Pages").clicked() {
                self.deactivate_all_pages();
                ui.close_menu();
            }
            if ui.button("Sort Pages By Name").clicked() {
                self.sort_pages_by_name();
                ui.close_menu();
            }
            if ui
                .add(
                    egui::Button::new("Organize Pages")
                        .shortcut_text(ui.ctx().format_shortcut(&self.shortcuts.organize_pages)),
                )
                .clicked()
            {
                do_organize_pages(ui);
                ui.close_menu();
            }
        });
    }

    fn top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);
                if self.is_logged_in() {
                    ui.separator();
                    self.menu(ui, ctx);
                }
            });
        });
    }

    fn bottom_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::BOTTOM), |ui| {
                ui.label(self.current_time());
                if self.is_logged_in() {
                    if ui.button("Logout").clicked() {
                        self.logout();
                    }
                    let role = self
                        .data_shared
                        .client
                        .user_info()
                        .map(|user| user.role.to_string())
                        .unwrap_or_default();
                    ui.label(format!(
                        "Logged in as {} ({role})",
                        self.data_shared.full_name
                    ));
                }
                egui::warn_if_debug_build(ui);
            });
        });
    }

    fn show_pages(&mut self, ctx: &egui::Context) {
        if self.data_shared.client.is_session_loading() {
            // Session restore still in flight, neutral indicator and no redirect
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
            });
        } else if !self.is_logged_in() {
            self.login_page
                .get_or_insert(Default::default())
                .show(ctx, &mut self.data_shared);
        } else {
            self.ui_active_pages_panel(ctx);
            self.login_page = None; // Clear out login page once we are logged in
            for page in self.active_pages.iter_mut() {
                page.display_page(ctx, &mut self.data_shared);
            }
        }
    }

    fn current_time(&self) -> String {
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
    }

    fn logout(&mut self) {
        self.data_shared.client.logout();

        // Convert pages to json and back to remove state that should only stay when
        // logged in
        let pages =
            serde_json::to_string(&self.active_pages).expect("failed to parse pages to json");
        self.active_pages =
            serde_json::from_str(&pages).expect("failed to convert back into pages from json");
    }

    fn ui_menu_page_btn<T: DisplayablePage>(&mut self, ui: &mut egui::Ui) {
        if !self.data_shared.has_access::<T>() {
            return;
        }
        let base_title = T::title_base();
        if ui.button(base_title).clicked() {
            let mut max_id_found = None;
            for page in self.active_pages.iter_mut() {
                if page.title_base() == base_title {
                    max_id_found = max_id_found.max(Some(page.page_unique_number()))
                }
            }
            let new_num = if let Some(val) = max_id_found {
                val + 1
            } else {
                0
            };
            self.active_pages
                .push(UiPage::new_page_with_unique_number::<T>(new_num));
            ui.close_menu();
        }
    }

    #[cfg_attr(target_arch = "wasm32", allow(unused_variables))]
    fn ui_menu_file(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.menu_button("File", |ui| {
            self.ui_menu_page_btn::<UiProfile>(ui);

            // On the web the browser controls the zoom
            #[cfg(not(target_arch = "wasm32"))]
            {
                ui.separator();
                egui::gui_zoom::zoom_menu_buttons(ui);
                ui.weak(format!(
                    "Current zoom: {:.0}%",
                    100.0 * ui.ctx().zoom_factor()
                ))
                .on_hover_text("The UI zoom level, on top of the operating system's default value");
                ui.separator();
            }

            if ui.button("Logout").clicked() {
                self.logout();
                ui.close_menu();
            }

            #[cfg(not(target_arch = "wasm32"))] // no File->Quit on web pages!
            if ui.button("Quit").clicked() {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
    }

    fn ui_active_pages_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("side_panel")
            .resizable(false)
            .default_width(200.0)
            .show(ctx, |ui| {
                self.process_shortcuts(ui);

                ui.vertical_centered(|ui| {
                    ui.heading("Active Pages");
                });

                ui.separator();

                self.ui_pages_list(ui);
            });
    }

    fn ui_pages_list(&mut self, ui: &mut egui::Ui) {
        ScrollArea::vertical().show(ui, |ui| {
            ui.with_layout(egui::Layout::top_down_justified(egui::Align::LEFT), |ui| {
                if self.active_pages.is_empty() {
                    ui.label("NO PAGES ARE ACTIVE.\nUse top menu to activate a page");
                }
                let mut to_deactivate = Vec::new();
                for (i, page) in self.active_pages.iter_mut().enumerate() {
                    let mut is_open = page.is_page_open();
                    ui.horizontal(|ui| {
                        let is_open_before = is_open;
                        if ui.button("x").clicked() {
                            to_deactivate.push(i); // Mark page for removal
                        }
                        if ui.toggle_value(&mut is_open, page.title()).middle_clicked() {
                            to_deactivate.push(i); // Mark page for removal
                        };
                        if is_open != is_open_before {
                            if is_open {
                                page.open_page();
                            } else {
                                page.close_page();
                            }
                        }
                    });
                }

                // Deactivate marked pages
                to_deactivate.sort_unstable(); // Should already be sorted but put here because it is assumed in following loop
                while let Some(marked_index) = to_deactivate.pop() {
                    self.active_pages.remove(marked_index);
                }

                ui.separator();

                if ui.button("Open All Pages").clicked() {
                    self.open_all_pages();
                }
                if ui.button("Close All Pages").clicked() {
                    self.close_all_pages();
                }
                if ui.button("Deactivate All Pages").clicked() {
                    self.deactivate_all_pages();
                }
                if ui.button("Sort Pages by Name").clicked() {
                    self.sort_pages_by_name();
                }
                if ui
                    .add(
                        egui::Button::new("Organize Pages").shortcut_text(
                            ui.ctx().format_shortcut(&self.shortcuts.organize_pages),
                        ),
                    )
                    .clicked()
                {
                    do_organize_pages(ui);
                }
            });
        });
    }

    fn deactivate_all_pages(&mut self) {
        self.active_pages.clear();
    }

    fn close_all_pages(&mut self) {
        self.active_pages
            .iter_mut()
            .for_each(|page| page.close_page())
    }

    fn open_all_pages(&mut self) {
        self.active_pages
            .iter_mut()
            .for_each(|page| page.open_page())
    }

    fn sort_pages_by_name(&mut self) {
        self.active_pages.sort_by_key(|x| x.title());
    }

    fn process_shortcuts(&mut self, ui: &mut egui::Ui) {
        if ui.input_mut(|i| i.consume_shortcut(&self.shortcuts.organize_pages)) {
            do_organize_pages(ui);
        }
    }
}

fn do_organize_pages(ui: &mut egui::Ui) {
    ui.ctx().memory_mut(|mem| mem.reset_areas());
}

fn load_stored_tokens(storage: &dyn eframe::Storage) -> Option<StoredTokens> {
    let access: AuthToken =
        eframe::get_value::<Option<AuthToken>>(storage, STORAGE_ACCESS_TOKEN_KEY)??;
    let refresh =
        eframe::get_value::<Option<AuthToken>>(storage, STORAGE_REFRESH_TOKEN_KEY).flatten();
    Some(StoredTokens { access, refresh })
}

#[inline]
pub fn wake_fn(ctx: egui::Context) -> impl flight_client_core::UiCallBack {
    move || ctx.request_repaint()
}
