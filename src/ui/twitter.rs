// src/ui/twitter.rs
use eframe::egui;

use crate::analysis::{SentimentBreakdown, TraitValue, TwitterResult};
use crate::state::AppState;
use crate::ui::{donut, error_box, submitted, ACCENT};

pub fn show_twitter_view(ui: &mut egui::Ui, state: &mut AppState) {
    egui::ScrollArea::vertical()
        .id_source("twitter_view_scroll")
        .show(ui, |ui| {
            ui.heading("Twitter/X Analyzer");
            ui.label("Analyze personality insights from Twitter/X profiles and tweets");
            ui.add_space(8.0);

            show_input_card(ui, state);

            if let Some(error) = &state.twitter.error {
                ui.add_space(8.0);
                let hint = state.twitter.error_hint(state.backend.base_url());
                error_box(ui, error, hint.as_deref());
            }

            ui.add_space(16.0);
            match &state.twitter.result {
                Some(result) => show_result(ui, state.twitter.display_username(), result),
                None => show_how_it_works(ui),
            }
        });
}

fn show_input_card(ui: &mut egui::Ui, state: &mut AppState) {
    let busy = state.twitter.is_analyzing();

    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new("Twitter/X Username").strong());

        let mut enter = false;
        ui.horizontal(|ui| {
            ui.label("@");
            let input = ui.add_enabled(
                !busy,
                egui::TextEdit::singleline(&mut state.twitter.username)
                    .hint_text("elonmusk")
                    .desired_width(260.0),
            );
            enter = submitted(ui, &input);
        });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let label = if busy { "Analyzing..." } else { "Analyze Profile" };
            let clicked = ui.add_enabled(state.twitter.can_submit(), egui::Button::new(label)).clicked();
            if clicked || enter {
                state.submit_twitter();
            }
            if busy {
                ui.spinner();
            }
        });
    });
}

fn show_result(ui: &mut egui::Ui, username: &str, result: &TwitterResult) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.heading(format!("Analysis Results for @{}", username));
        ui.add_space(8.0);

        if result.has_profile_stats() {
            show_stats(ui, result);
            ui.add_space(12.0);
        }

        if let Some(bio) = &result.bio {
            ui.label(egui::RichText::new("Bio").strong());
            ui.label(bio);
            ui.add_space(12.0);
        }

        if let Some(sentiment) = &result.sentiment {
            ui.label(egui::RichText::new("Sentiment").strong());
            donut::show_sentiment(ui, &SentimentBreakdown::from_sentiment(Some(sentiment)));
            ui.add_space(12.0);
        }

        if let Some(traits) = &result.personality_traits {
            show_traits(ui, traits);
            ui.add_space(12.0);
        }

        let tweets = result.tweets();
        if !tweets.is_empty() {
            ui.label(egui::RichText::new(format!("Recent Tweets ({})", tweets.len())).strong());
            for (idx, tweet) in tweets.iter().enumerate() {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal_wrapped(|ui| {
                        ui.strong(format!("#{}", idx + 1));
                        ui.label(tweet);
                    });
                });
            }
            ui.add_space(12.0);
        }

        if result.needs_raw_view() {
            ui.label(egui::RichText::new("Analysis Data").strong());
            let mut raw = result.raw_pretty();
            ui.add(
                egui::TextEdit::multiline(&mut raw)
                    .code_editor()
                    .interactive(false)
                    .desired_width(f32::INFINITY),
            );
            ui.add_space(12.0);
        }

        if result.is_limited() {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.strong("⚠ Limited Data Available");
                    ui.label("The profile analysis returned limited information. This might be due to privacy settings or API limitations.");
                });
            });
        }
    });
}

fn show_stats(ui: &mut egui::Ui, result: &TwitterResult) {
    let cards = [
        ("Followers", result.followers_display()),
        ("Following", result.following_display()),
        ("Tweets", result.tweets_display()),
        ("Status", "✓".to_string()),
    ];

    ui.columns(cards.len(), |columns| {
        for (column, (title, value)) in columns.iter_mut().zip(cards) {
            column.group(|ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.weak(title);
                    ui.label(egui::RichText::new(value).size(20.0).strong());
                });
            });
        }
    });
}

fn show_traits(ui: &mut egui::Ui, traits: &[(String, TraitValue)]) {
    ui.label(egui::RichText::new("Personality Traits").strong());

    egui::Grid::new("personality_traits_grid")
        .num_columns(2)
        .striped(true)
        .spacing([24.0, 4.0])
        .show(ui, |ui| {
            for (name, value) in traits {
                ui.label(name);
                ui.strong(value.to_string());
                ui.end_row();
            }
        });

    let scored: Vec<(&str, f64)> = traits.iter()
        .filter_map(|(name, value)| value.score().map(|score| (name.as_str(), score)))
        .collect();
    if scored.is_empty() {
        return;
    }

    ui.add_space(8.0);
    let bars: Vec<egui_plot::Bar> = scored.iter()
        .enumerate()
        .map(|(idx, (name, score))| {
            egui_plot::Bar::new(idx as f64, (score * 100.0).round())
                .name(*name)
                .width(0.6)
                .fill(ACCENT)
        })
        .collect();

    let plot = egui_plot::Plot::new("personality_traits_chart")
        .height(180.0)
        .allow_zoom(false)
        .allow_drag(false)
        .show_background(false)
        .include_y(0.0)
        .include_y(100.0);

    plot.show(ui, |plot_ui| {
        plot_ui.bar_chart(egui_plot::BarChart::new(bars).name("Score (%)"));
    });
}

fn show_how_it_works(ui: &mut egui::Ui) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new("💡 How It Works").strong());
        ui.label(
            "Enter any public Twitter/X username to analyze their personality based on their \
             profile bio and recent tweets. The analysis looks at writing patterns, sentiment \
             and content themes to provide insights into personality traits.",
        );
        ui.small("🔒 Your searches are private and data is processed securely");
    });
}
