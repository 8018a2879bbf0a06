use flight_shared::uac::UserInfo;

use crate::{app::wake_fn, displayable_page_common};

use super::{
    data_state::{AwaitingType, DataState},
    DisplayablePage,
};

/// Shows the identity record as the backend currently has it
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiProfile {
    is_open: bool,
    page_unique_number: usize,
    #[serde(skip)]
    data_state: DataState<UserInfo>,
}

impl DisplayablePage for UiProfile {
    displayable_page_common!("Profile", super::ROLES_ALL);

    fn reset_to_default(&mut self, _: super::private::Token) {
        self.data_state = Default::default();
    }

    fn show(&mut self, ui: &mut eframe::egui::Ui, data_shared: &mut crate::DataShared) {
        if let DataState::Present(user) = &self.data_state {
            egui::Grid::new("Profile Grid").num_columns(2).show(ui, |ui| {
                ui.label("Username");
                ui.label(&user.username);
                ui.end_row();

                ui.label("Name");
                ui.label(user.full_name());
                ui.end_row();

                ui.label("Phone Number");
                ui.label(&user.phone_number);
                ui.end_row();

                ui.label("Role");
                ui.label(&user.role);
                ui.end_row();
            });
            if ui.button("Refresh").clicked() {
                self.data_state = Default::default();
            }
        } else {
            let ctx = ui.ctx().clone();
            self.data_state.get(Some(ui), None, || {
                AwaitingType(data_shared.client.fetch_profile(wake_fn(ctx)))
            });
        }
    }
}
