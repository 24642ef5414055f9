// src/ui/mod.rs
use eframe::egui;

pub mod donut;
pub mod image;
pub mod login;
pub mod signup;
pub mod twitter;

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(100, 150, 255);
pub const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 80, 80);

/// Inline error box used by every page.
pub fn error_box(ui: &mut egui::Ui, message: &str, hint: Option<&str>) {
    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(1.0, ERROR_COLOR))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.colored_label(ERROR_COLOR, format!("⚠ {}", message));
            if let Some(hint) = hint {
                ui.small(hint);
            }
        });
}

/// True when Enter was pressed while `response` had focus.
pub fn submitted(ui: &egui::Ui, response: &egui::Response) -> bool {
    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
}

/// Narrow centered column for the auth forms.
pub fn form_column(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.set_max_width(360.0);
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            add_contents(ui);
        });
    });
}
