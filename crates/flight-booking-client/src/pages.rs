use crate::DataShared;

pub mod data_state;
pub mod egui_settings;
pub mod flight_search;
pub mod login;
mod macros;
pub mod manage_aircraft;
pub mod manage_airlines;
pub mod manage_airports;
pub mod manage_bookings;
pub mod manage_flights;
pub mod my_bookings;
pub mod profile;
pub mod save_state;
pub mod staff_flights;
pub mod staff_payments;

mod private {
    /// Used to make some trait methods private
    pub struct Token;
}

use egui_settings::UiEguiSettings;
use flight_client_core::RouteAccess;
use flight_search::UiFlightSearch;
use flight_shared::uac::Role;
pub use login::UiLogin;
use manage_aircraft::UiManageAircraft;
use manage_airlines::UiManageAirlines;
use manage_airports::UiManageAirports;
use manage_bookings::UiManageBookings;
use manage_flights::UiManageFlights;
use my_bookings::UiMyBookings;
use profile::UiProfile;
use staff_flights::UiStaffFlights;
use staff_payments::UiStaffPayments;
use strum::{EnumIter, IntoEnumIterator};
use tracing::{error, info};

pub const ROLES_ALL: &[Role] = &[Role::Admin, Role::Staff, Role::Customer];
pub const ROLES_ADMIN: &[Role] = &[Role::Admin];
pub const ROLES_STAFF: &[Role] = &[Role::Staff];
pub const ROLES_CUSTOMER: &[Role] = &[Role::Customer];

#[derive(Debug, serde::Serialize, serde::Deserialize, EnumIter)]
pub enum UiPage {
    EguiSetting(UiEguiSettings),
    FlightSearch(UiFlightSearch),
    ManageAircraft(UiManageAircraft),
    ManageAirlines(UiManageAirlines),
    ManageAirports(UiManageAirports),
    ManageBookings(UiManageBookings),
    ManageFlights(UiManageFlights),
    MyBookings(UiMyBookings),
    Profile(UiProfile),
    StaffFlights(UiStaffFlights),
    StaffPayments(UiStaffPayments),
}

/// Trait for types that can be treated as pages to display
///
/// It uses Default and serde Traits as super traits to ensure all these types
/// implement these traits
pub trait DisplayablePage: Default + serde::Serialize + serde::de::DeserializeOwned {
    /// Reset the state of the screen
    fn reset_to_default(&mut self, _: private::Token);

    /// Displays the page
    fn show(&mut self, ui: &mut eframe::egui::Ui, data_shared: &mut DataShared);

    /// Base of the page's title (numbers get appended to duplicates)
    ///
    /// ASSUMPTION: THIS IS UNIQUE PER TYPE
    fn title_base() -> &'static str;

    /// Convenance function for working with instances inside of the enum
    fn title_base_from_instance(&self) -> &'static str {
        Self::title_base()
    }

    /// Page number to make title unique
    ///
    /// Assumed that the caller will ensure this number is unique across pages
    /// with the same base title
    fn page_unique_number(&self) -> usize;

    /// Creates a page with the unique number passed
    fn new_page(page_unique_number: usize) -> Self;

    /// Pages display title (includes page number if not first)
    fn title(&self) -> String {
        if self.page_unique_number() == 0 {
            Self::title_base().to_string()
        } else {
            format!("{} ({})", Self::title_base(), self.page_unique_number())
        }
    }

    fn is_page_open(&self) -> bool;

    fn open_page(&mut self) {
        info!("Open Page {}", self.title());
        self.internal_do_open_page(private::Token {});
    }

    fn close_page(&mut self) {
        info!("Close Page {}", self.title());
        self.internal_do_close_page(private::Token {});
    }

    fn internal_do_open_page(&mut self, _: private::Token);

    /// This usually clears any state loaded from the backend
    fn internal_do_close_page(&mut self, _: private::Token);

    /// Convenance method for chaining
    #[must_use]
    fn and_open_page(mut self) -> Self {
        self.open_page();
        self
    }

    /// Provides an opportunity for the page to change settings on the window
    /// before display
    fn adjust_window_settings<'open>(&self, window: egui::Window<'open>) -> egui::Window<'open> {
        // Provide identity default impl
        window
    }

    /// Roles allowed to open and view this page
    fn allowed_roles() -> &'static [Role];

    fn has_access(role: Role) -> bool {
        Self::allowed_roles().contains(&role)
    }
}

macro_rules! do_on_ui_page {
    ($on:ident, $page:ident, $body:tt) => {
        match $on {
            UiPage::EguiSetting($page) => $body,
            UiPage::FlightSearch($page) => $body,
            UiPage::ManageAircraft($page) => $body,
            UiPage::ManageAirlines($page) => $body,
            UiPage::ManageAirports($page) => $body,
            UiPage::ManageBookings($page) => $body,
            UiPage::ManageFlights($page) => $body,
            UiPage::MyBookings($page) => $body,
            UiPage::Profile($page) => $body,
            UiPage::StaffFlights($page) => $body,
            UiPage::StaffPayments($page) => $body,
        }
    };
}

impl UiPage {
    #[tracing::instrument(ret)]
    pub fn new_page_with_unique_number<T: DisplayablePage>(page_unique_number: usize) -> UiPage {
        for page in Self::iter() {
            if page.title_base() == T::title_base() {
                return match page {
                    UiPage::EguiSetting(_) => Self::EguiSetting(
                        UiEguiSettings::new_page(page_unique_number).and_open_page(),
                    ),
                    UiPage::FlightSearch(_) => Self::FlightSearch(
                        UiFlightSearch::new_page(page_unique_number).and_open_page(),
                    ),
                    UiPage::ManageAircraft(_) => Self::ManageAircraft(
                        UiManageAircraft::new_page(page_unique_number).and_open_page(),
                    ),
                    UiPage::ManageAirlines(_) => Self::ManageAirlines(
                        UiManageAirlines::new_page(page_unique_number).and_open_page(),
                    ),
                    UiPage::ManageAirports(_) => Self::ManageAirports(
                        UiManageAirports::new_page(page_unique_number).and_open_page(),
                    ),
                    UiPage::ManageBookings(_) => Self::ManageBookings(
                        UiManageBookings::new_page(page_unique_number).and_open_page(),
                    ),
                    UiPage::ManageFlights(_) => Self::ManageFlights(
                        UiManageFlights::new_page(page_unique_number).and_open_page(),
                    ),
                    UiPage::MyBookings(_) => Self::MyBookings(
                        UiMyBookings::new_page(page_unique_number).and_open_page(),
                    ),
                    UiPage::Profile(_) => {
                        Self::Profile(UiProfile::new_page(page_unique_number).and_open_page())
                    }
                    UiPage::StaffFlights(_) => Self::StaffFlights(
                        UiStaffFlights::new_page(page_unique_number).and_open_page(),
                    ),
                    UiPage::StaffPayments(_) => Self::StaffPayments(
                        UiStaffPayments::new_page(page_unique_number).and_open_page(),
                    ),
                };
            }
        }
        let msg = format!("execution should never get here. All pages should be able to be found but {:?} not found", T::title_base());
        error!("{msg}");
        unreachable!("{msg}");
    }

    pub fn display_page(&mut self, ctx: &egui::Context, data_shared: &mut DataShared) {
        do_on_ui_page!(self, page, { show_page(page, ctx, data_shared) })
    }

    pub fn title_base(&self) -> &'static str {
        do_on_ui_page!(self, page, { page.title_base_from_instance() })
    }

    pub fn page_unique_number(&self) -> usize {
        do_on_ui_page!(self, page, { page.page_unique_number() })
    }

    pub fn is_page_open(&self) -> bool {
        do_on_ui_page!(self, page, { page.is_page_open() })
    }

    pub fn title(&self) -> String {
        do_on_ui_page!(self, page, { page.title() })
    }

    pub fn open_page(&mut self) {
        do_on_ui_page!(self, page, { page.open_page() })
    }

    pub fn close_page(&mut self) {
        do_on_ui_page!(self, page, { page.close_page() })
    }
}

/// Every page window runs through the route guard before any content renders.
/// The decision is recomputed from the current session snapshot on every frame
fn show_page<P: DisplayablePage>(page: &mut P, ctx: &egui::Context, data_shared: &mut DataShared) {
    let mut is_open = page.is_page_open();
    if !is_open {
        return;
    }
    let mut window = egui::Window::new(page.title()).vscroll(true).hscroll(true);
    window = page.adjust_window_settings(window);
    window.open(&mut is_open).show(ctx, |ui| {
        match data_shared.client.route_access(P::allowed_roles()) {
            RouteAccess::Unknown => {
                ui.spinner();
            }
            RouteAccess::Unauthenticated => {
                ui.label("Please log in to view this page");
            }
            RouteAccess::Forbidden => {
                ui.colored_label(
                    ui.visuals().error_fg_color,
                    "You are not authorized to view this page",
                );
            }
            RouteAccess::Authorized => page.show(ui, data_shared),
        }
    });
    if !is_open {
        page.close_page();
    }
}
