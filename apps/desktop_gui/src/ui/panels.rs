//! The two word panels. Both render straight from a `CompressionView`.

use client_core::{AnnotatedUnit, CompressionView, WordStyle};
use eframe::egui;

/// Stand-in glyph so an empty token still takes up a slot.
const EMPTY_WORD: &str = "\u{00b7}";

fn panel_frame(ui: &egui::Ui) -> egui::Frame {
    egui::Frame::NONE
        .fill(ui.visuals().faint_bg_color)
        .stroke(egui::Stroke::new(
            1.0,
            ui.visuals().widgets.noninteractive.bg_stroke.color,
        ))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(12, 10))
}

fn word_text(word: &str) -> &str {
    if word.is_empty() {
        EMPTY_WORD
    } else {
        word
    }
}

fn annotated_word_text(unit: &AnnotatedUnit<'_>, visuals: &egui::Visuals) -> egui::RichText {
    let text = egui::RichText::new(word_text(unit.word)).size(16.0);
    match unit.style {
        WordStyle::Kept => text.color(visuals.strong_text_color()),
        WordStyle::Removed => text.color(visuals.error_fg_color).strikethrough(),
    }
}

fn hover_detail(unit: &AnnotatedUnit<'_>) -> Option<String> {
    match (unit.pos, unit.dep) {
        (None, None) => None,
        (pos, dep) => Some(format!(
            "part of speech: {}\ndependency: {}",
            pos.unwrap_or("-"),
            dep.unwrap_or("-")
        )),
    }
}

fn compression_heading(source: Option<&str>) -> String {
    match source {
        Some(sentence) => format!("Compression of \"{sentence}\""),
        None => "Compression".to_string(),
    }
}

/// `source` is the sentence the shown annotations were computed for, which
/// can differ from what is currently typed in the form.
pub fn show_compression_panel(
    ui: &mut egui::Ui,
    view: &CompressionView<'_>,
    source: Option<&str>,
) {
    ui.label(
        egui::RichText::new(compression_heading(source))
            .strong()
            .size(16.0),
    );
    panel_frame(ui).show(ui, |ui| {
        ui.set_min_height(36.0);
        ui.set_width(ui.available_width());
        ui.horizontal_wrapped(|ui| {
            let visuals = ui.visuals().clone();
            for unit in view.annotated() {
                let response = ui.label(annotated_word_text(unit, &visuals));
                if let Some(detail) = hover_detail(unit) {
                    response.on_hover_text(detail);
                }
            }
        });
    });
}

pub fn show_result_panel(ui: &mut egui::Ui, view: &CompressionView<'_>) {
    ui.label(egui::RichText::new("Result").strong().size(16.0));
    panel_frame(ui).show(ui, |ui| {
        ui.set_min_height(36.0);
        ui.set_width(ui.available_width());
        ui.horizontal_wrapped(|ui| {
            for word in view.compressed() {
                ui.label(egui::RichText::new(word_text(word)).size(16.0));
            }
        });
    });
}
