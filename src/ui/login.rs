// src/ui/login.rs
use eframe::egui;

use crate::state::{AppState, Screen};
use crate::ui::{error_box, form_column, submitted};

pub fn show_login_view(ui: &mut egui::Ui, state: &mut AppState) {
    let mut go_signup = false;

    form_column(ui, |ui| {
        ui.heading("Sign In");
        ui.add_space(8.0);

        let busy = state.login.is_submitting();

        ui.label("Username");
        ui.add_enabled(
            !busy,
            egui::TextEdit::singleline(&mut state.login.username)
                .hint_text("Enter your username")
                .desired_width(f32::INFINITY),
        );

        ui.label("Password");
        let password = ui.add_enabled(
            !busy,
            egui::TextEdit::singleline(&mut state.login.password)
                .password(true)
                .hint_text("Enter your password")
                .desired_width(f32::INFINITY),
        );

        ui.add_space(8.0);

        if let Some(error) = &state.login.error {
            error_box(ui, error, None);
            ui.add_space(4.0);
        }

        let label = if busy { "Signing in..." } else { "Sign In" };
        let clicked = ui.add_enabled(!busy, egui::Button::new(label)).clicked();
        if clicked || submitted(ui, &password) {
            state.submit_login();
        }
        if busy {
            ui.spinner();
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label("Don't have an account?");
            if ui.link("Sign up").clicked() {
                go_signup = true;
            }
        });
    });

    if go_signup {
        state.navigate(Screen::Signup);
    }
}
