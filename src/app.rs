// src/app.rs
use std::time::Duration;

use eframe::egui;

use crate::state::{AppState, Screen};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct PersonaApp {
    state: AppState,
}

impl PersonaApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    fn show_menu(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.strong("Persona");
            ui.separator();

            // Tab selection using buttons
            let tabs = if self.state.is_authenticated() {
                [
                    (Screen::TwitterAnalyzer, "Twitter/X Analyzer"),
                    (Screen::ImageAnalyzer, "Gender Analyzer"),
                ]
            } else {
                [
                    (Screen::Login, "Sign In"),
                    (Screen::Signup, "Sign Up"),
                ]
            };

            for (screen, label) in tabs {
                if ui.selectable_label(self.state.current_screen == screen, label).clicked() {
                    self.state.navigate(screen);
                }
            }

            if self.state.is_authenticated() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Logout").clicked() {
                        self.state.logout();
                    }
                    if let Some(name) = self.state.user_name() {
                        ui.label(format!("👤 {}", name));
                    }
                });
            }
        });
    }
}

impl eframe::App for PersonaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let pending = self.state.poll();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.show_menu(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            match self.state.current_screen {
                Screen::Login => {
                    crate::ui::login::show_login_view(ui, &mut self.state);
                },
                Screen::Signup => {
                    crate::ui::signup::show_signup_view(ui, &mut self.state);
                },
                Screen::ImageAnalyzer => {
                    crate::ui::image::show_image_view(ui, &mut self.state);
                },
                Screen::TwitterAnalyzer => {
                    crate::ui::twitter::show_twitter_view(ui, &mut self.state);
                },
            }
        });

        // Show error modal if needed
        let error_msg = self.state.error_message.clone();
        if let Some(error) = error_msg {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        self.state.error_message = None;
                    }
                });
        }

        // Workers report through channels; keep polling until they do
        if pending || self.state.poll() {
            ctx.request_repaint_after(POLL_INTERVAL);
        }
    }
}
