use chrono::{DateTime, Local, NaiveDateTime, Timelike as _, Utc};
use secrecy::{ExposeSecret as _, SecretString};

pub fn get_text_height(ui: &mut egui::Ui) -> f32 {
    egui::TextStyle::Body
        .resolve(ui.style())
        .size
        .max(ui.spacing().interact_size.y)
}

pub fn ui_password_edit(
    ui: &mut egui::Ui,
    password: &mut SecretString,
    hint_text: &str,
) -> egui::Response {
    let mut temp = password.expose_secret().to_owned();
    let result = ui.add(
        egui::TextEdit::singleline(&mut temp)
            .password(true)
            .hint_text(hint_text),
    );
    *password = SecretString::from(temp);
    result
}

pub fn readonly_checkbox_no_text(ui: &mut egui::Ui, mut value: bool) {
    ui.add_enabled(false, egui::Checkbox::without_text(&mut value));
}

/// Convenience function to create escape buttons
pub fn ui_escape_button(ui: &mut egui::Ui, caption: impl Into<egui::WidgetText>) -> bool {
    crate::shortcuts::shortcut_button(
        ui,
        caption,
        "",
        &egui::KeyboardShortcut::new(egui::Modifiers::NONE, egui::Key::Escape),
    )
}

/// Date picker plus hour/minute entry, seconds are always zero
pub fn ui_datetime_edit(ui: &mut egui::Ui, id_salt: &str, value: &mut NaiveDateTime) {
    let mut date = value.date();
    let mut hour = value.hour();
    let mut minute = value.minute();
    ui.horizontal(|ui| {
        ui.add(egui_extras::DatePickerButton::new(&mut date).id_salt(id_salt));
        ui.add(egui::DragValue::new(&mut hour).range(0..=23));
        ui.label(":");
        ui.add(egui::DragValue::new(&mut minute).range(0..=59));
    });
    if let Some(updated) = date.and_hms_opt(hour, minute, 0) {
        *value = updated;
    }
}

/// Consistent money formatting across the panels
pub fn fmt_money(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Timestamps arrive in UTC and are shown in the viewer's timezone
pub fn fmt_datetime(value: DateTime<Utc>) -> String {
    value
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(fmt_money(199.0), "$199.00");
        assert_eq!(fmt_money(0.5), "$0.50");
    }
}
