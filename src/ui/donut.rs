// src/ui/donut.rs
use std::f32::consts::TAU;

use eframe::egui;

use crate::analysis::{SentimentBreakdown, SentimentCategory};

const SIZE: f32 = 180.0;
const RING_WIDTH: f32 = 26.0;
const SEGMENTS_PER_TURN: f32 = 96.0;
const TRACK_COLOR: egui::Color32 = egui::Color32::from_gray(60);

pub fn category_color(category: SentimentCategory) -> egui::Color32 {
    match category {
        SentimentCategory::Positive => egui::Color32::from_rgb(16, 185, 129),
        SentimentCategory::Negative => egui::Color32::from_rgb(239, 68, 68),
        SentimentCategory::Neutral => egui::Color32::from_rgb(107, 114, 128),
    }
}

/// Donut, legend, per-category bars and the insight line.
pub fn show_sentiment(ui: &mut egui::Ui, breakdown: &SentimentBreakdown) {
    ui.horizontal(|ui| {
        draw_donut(ui, breakdown);
        ui.add_space(16.0);

        ui.vertical(|ui| {
            for slice in &breakdown.slices {
                ui.horizontal(|ui| {
                    let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                    ui.painter().rect_filled(rect, 2.0, category_color(slice.category));
                    ui.label(format!("{} {}", slice.category.emoji(), slice.category.name()));
                    ui.strong(slice.label());
                });
            }

            ui.add_space(8.0);

            for slice in &breakdown.slices {
                let fraction = (slice.value / 100.0).clamp(0.0, 1.0) as f32;
                ui.add(
                    egui::ProgressBar::new(fraction)
                        .desired_width(220.0)
                        .fill(category_color(slice.category))
                        .text(format!("{} {}", slice.category.name(), slice.label())),
                );
            }
        });
    });

    ui.add_space(8.0);
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new("💡 Insight").strong());
        ui.label(breakdown.insight());
    });
}

fn draw_donut(ui: &mut egui::Ui, breakdown: &SentimentBreakdown) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(SIZE, SIZE), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let center = rect.center();
    let radius = SIZE / 2.0 - RING_WIDTH / 2.0;

    painter.circle_stroke(center, radius, egui::Stroke::new(RING_WIDTH, TRACK_COLOR));

    // Clockwise from twelve o'clock
    let mut start = -TAU / 4.0;
    for (slice, fraction) in breakdown.slices.iter().zip(breakdown.arc_fractions()) {
        let sweep = fraction as f32 * TAU;
        if sweep > 0.0 {
            painter.add(egui::Shape::line(
                arc_points(center, radius, start, sweep),
                egui::Stroke::new(RING_WIDTH, category_color(slice.category)),
            ));
        }
        start += sweep;
    }

    let dominant = breakdown.dominant();
    painter.text(
        center - egui::vec2(0.0, 12.0),
        egui::Align2::CENTER_CENTER,
        dominant.category.emoji(),
        egui::FontId::proportional(28.0),
        ui.visuals().text_color(),
    );
    painter.text(
        center + egui::vec2(0.0, 16.0),
        egui::Align2::CENTER_CENTER,
        format!("{} {}", dominant.label(), dominant.category.name()),
        egui::FontId::proportional(14.0),
        ui.visuals().strong_text_color(),
    );
}

fn arc_points(center: egui::Pos2, radius: f32, start: f32, sweep: f32) -> Vec<egui::Pos2> {
    let steps = ((sweep / TAU) * SEGMENTS_PER_TURN).ceil().max(2.0) as usize;
    (0..=steps)
        .map(|i| {
            let angle = start + sweep * i as f32 / steps as f32;
            center + radius * egui::vec2(angle.cos(), angle.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_points_span_the_sweep() {
        let center = egui::pos2(0.0, 0.0);
        let points = arc_points(center, 10.0, 0.0, TAU / 4.0);

        assert!(points.len() >= 3);
        let first = points[0];
        let last = points[points.len() - 1];
        assert!((first.x - 10.0).abs() < 1e-4 && first.y.abs() < 1e-4);
        assert!(last.x.abs() < 1e-4 && (last.y - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_categories_have_distinct_colors() {
        let colors: Vec<_> = SentimentCategory::ALL.iter().map(|c| category_color(*c)).collect();
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }
}
