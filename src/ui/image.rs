// src/ui/image.rs
use eframe::egui;
use rfd::FileDialog;

use crate::analysis::result::{display_gender, percent};
use crate::analysis::GenderResult;
use crate::report::ReportFormat;
use crate::state::{AppState, ImageMode};
use crate::ui::{error_box, ACCENT};

const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "webp", "gif", "bmp", "jfif"];

pub fn show_image_view(ui: &mut egui::Ui, state: &mut AppState) {
    egui::ScrollArea::vertical()
        .id_source("image_view_scroll")
        .show(ui, |ui| {
            ui.heading("Gender Analysis");
            ui.label("Analyze a photo or a short camera capture.");
            ui.add_space(8.0);

            show_input_card(ui, state);

            if let Some(error) = &state.image.error {
                ui.add_space(8.0);
                error_box(ui, error, None);
            }

            if state.image.result.is_some() {
                ui.add_space(16.0);
                show_result_card(ui, state);
            }
        });
}

fn show_input_card(ui: &mut egui::Ui, state: &mut AppState) {
    let busy = state.image.is_analyzing();

    ui.group(|ui| {
        ui.set_width(ui.available_width());

        ui.add_enabled_ui(!busy, |ui| {
            ui.horizontal(|ui| {
                ui.radio_value(&mut state.image.mode, ImageMode::Upload, "📁 Upload Image");
                ui.radio_value(&mut state.image.mode, ImageMode::Camera, "📷 Use Camera");
            });
        });
        ui.add_space(8.0);

        match state.image.mode {
            ImageMode::Upload => {
                ui.horizontal(|ui| {
                    if ui.add_enabled(!busy, egui::Button::new("Choose Image...")).clicked() {
                        let picked = FileDialog::new()
                            .add_filter("Images", &IMAGE_EXTENSIONS)
                            .set_title("Choose Image")
                            .pick_file();
                        if let Some(path) = picked {
                            state.image.selected_file = Some(path);
                            state.image.error = None;
                        }
                    }
                    match &state.image.selected_file {
                        Some(path) => ui.label(path.display().to_string()),
                        None => ui.weak("No file selected"),
                    };
                });
            }
            ImageMode::Camera => {
                let capture = &state.config.capture;
                ui.label(format!("Device: {}", capture.device));
                ui.weak(format!(
                    "Captures {} frames, {} ms apart",
                    capture.frame_count, capture.frame_delay_ms
                ));
            }
        }

        ui.add_space(8.0);

        let ready = match state.image.mode {
            ImageMode::Upload => state.image.selected_file.is_some(),
            ImageMode::Camera => true,
        };

        ui.horizontal(|ui| {
            let label = if busy { "Analyzing..." } else { "Analyze Gender" };
            if ui.add_enabled(ready && !busy, egui::Button::new(label)).clicked() {
                match state.image.mode {
                    ImageMode::Upload => state.analyze_file(),
                    ImageMode::Camera => state.analyze_camera(),
                };
            }
            if busy {
                ui.spinner();
                if state.image.is_capturing() && ui.button("Cancel").clicked() {
                    state.image.cancel();
                }
            }
        });
    });
}

fn show_result_card(ui: &mut egui::Ui, state: &mut AppState) {
    let Some(result) = state.image.result.clone() else {
        return;
    };

    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.heading("Analysis Result");
        ui.add_space(8.0);

        show_summary(ui, &result);

        if let Some(frames) = result.frames() {
            ui.add_space(8.0);
            ui.label(egui::RichText::new("Frame-by-frame").strong());
            egui::Grid::new("frame_genders_grid")
                .num_columns(3)
                .striped(true)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    for (idx, frame) in frames.iter().enumerate() {
                        ui.label(format!("Frame {}", idx + 1));
                        ui.label(display_gender(&frame.gender));
                        ui.label(percent(frame.confidence));
                        ui.end_row();
                    }
                });
        }

        ui.add_space(12.0);
        ui.separator();
        ui.label(egui::RichText::new("Export").strong());

        ui.horizontal(|ui| {
            for format in ReportFormat::ALL {
                if ui.button(format.label()).clicked() {
                    state.image.export(format, &state.export_dir);
                }
            }
        });

        ui.horizontal(|ui| {
            ui.label("Save to:");
            ui.label(state.export_dir.display().to_string());
            if ui.small_button("Change...").clicked() {
                let picked = FileDialog::new()
                    .set_title("Choose Export Folder")
                    .set_directory(&state.export_dir)
                    .pick_folder();
                if let Some(dir) = picked {
                    state.export_dir = dir;
                }
            }
        });

        if let Some(status) = &state.image.export_status {
            ui.small(status);
        }
    });
}

fn show_summary(ui: &mut egui::Ui, result: &GenderResult) {
    ui.horizontal(|ui| {
        ui.label("Detected Gender:");
        ui.label(egui::RichText::new(result.display_gender()).size(22.0).strong().color(ACCENT));
    });
    ui.horizontal(|ui| {
        ui.label("Confidence:");
        ui.strong(result.display_confidence());
    });
    ui.add(
        egui::ProgressBar::new(result.confidence.clamp(0.0, 1.0) as f32)
            .desired_width(240.0)
            .fill(ACCENT),
    );
}
