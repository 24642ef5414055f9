// src/ui/signup.rs
use eframe::egui;

use crate::state::{AppState, Screen};
use crate::ui::{error_box, form_column, submitted};

pub fn show_signup_view(ui: &mut egui::Ui, state: &mut AppState) {
    let mut submit = false;
    let mut go_login = false;

    form_column(ui, |ui| {
        ui.heading("Create Account");
        ui.add_space(8.0);

        let form = &mut state.signup;

        ui.label("Name");
        ui.add(egui::TextEdit::singleline(&mut form.name)
            .hint_text("Your name")
            .desired_width(f32::INFINITY));

        ui.label("Email");
        ui.add(egui::TextEdit::singleline(&mut form.email)
            .hint_text("you@example.com")
            .desired_width(f32::INFINITY));

        ui.label("Password");
        let password = ui.add(egui::TextEdit::singleline(&mut form.password)
            .password(true)
            .hint_text("Choose a password")
            .desired_width(f32::INFINITY));

        ui.add_space(8.0);

        if let Some(error) = &form.error {
            error_box(ui, error, None);
            ui.add_space(4.0);
        }

        if ui.button("Sign Up").clicked() || submitted(ui, &password) {
            submit = true;
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label("Already have an account?");
            if ui.link("Sign in").clicked() {
                go_login = true;
            }
        });
    });

    if submit {
        state.submit_signup();
    } else if go_login {
        state.navigate(Screen::Login);
    }
}
