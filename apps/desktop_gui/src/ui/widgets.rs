use eframe::egui;
use shared::domain::NavItem;

use crate::ui::theme::{lighten_color, Palette};

pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction.clamp(0.0, 1.0) * 100.0)
}

pub fn format_latency(latency_ms: u32) -> String {
    format!("{latency_ms}ms")
}

pub fn glass_frame(palette: Palette) -> egui::Frame {
    egui::Frame::NONE
        .fill(palette.surface.gamma_multiply(0.85))
        .stroke(egui::Stroke::new(1.0, palette.surface_stroke))
        .corner_radius(12.0)
        .inner_margin(egui::Margin::symmetric(14, 12))
}

pub fn metric_row(ui: &mut egui::Ui, label: &str, value: &str, color: egui::Color32) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(label).size(13.0).weak());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(egui::RichText::new(value).strong().color(color));
        });
    });
}

pub fn stat_card(ui: &mut egui::Ui, palette: Palette, value: &str, label: &str) {
    glass_frame(palette).show(ui, |ui| {
        ui.set_min_width(120.0);
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new(value)
                    .size(24.0)
                    .strong()
                    .color(palette.primary),
            );
            ui.label(egui::RichText::new(label).size(12.0).color(palette.muted));
        });
    });
}

pub fn feature_card(ui: &mut egui::Ui, palette: Palette, title: &str, description: &str) {
    glass_frame(palette).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new(title).size(17.0).strong());
        ui.add_space(4.0);
        ui.label(egui::RichText::new(description).size(13.0).color(palette.muted));
    });
}

/// Sidebar entry (`compact == false`) or bottom-bar/overlay tile.
pub fn nav_button(
    ui: &mut egui::Ui,
    palette: Palette,
    item: &NavItem,
    active: bool,
    compact: bool,
) -> egui::Response {
    let fill = if active {
        palette.primary
    } else {
        egui::Color32::TRANSPARENT
    };
    let text_color = if active { palette.text } else { palette.muted };
    let text = if compact {
        egui::RichText::new(item.label).size(12.0).strong().color(text_color)
    } else {
        egui::RichText::new(format!("{}\n{}", item.label, item.description))
            .size(14.0)
            .color(text_color)
    };
    let min_size = if compact {
        egui::vec2(72.0, 40.0)
    } else {
        egui::vec2(ui.available_width(), 52.0)
    };
    ui.add(
        egui::Button::new(text)
            .min_size(min_size)
            .fill(fill)
            .stroke(egui::Stroke::NONE)
            .corner_radius(10.0),
    )
}

pub fn evolution_button(ui: &mut egui::Ui, palette: Palette) -> egui::Response {
    ui.add(
        egui::Button::new(
            egui::RichText::new("⚡ Trigger Evolution")
                .strong()
                .color(egui::Color32::WHITE),
        )
        .min_size(egui::vec2(ui.available_width(), 42.0))
        .fill(palette.accent)
        .corner_radius(12.0),
    )
}

pub fn progress_bar(ui: &mut egui::Ui, palette: Palette, fraction: f32) -> egui::Response {
    ui.add(
        egui::ProgressBar::new(fraction.clamp(0.0, 1.0))
            .desired_width(ui.available_width())
            .fill(palette.primary),
    )
}

/// Ring gauge filled clockwise to `fraction`.
pub fn gauge(
    ui: &mut egui::Ui,
    palette: Palette,
    fraction: f64,
    caption: &str,
    color: egui::Color32,
) -> egui::Response {
    let size = egui::vec2(132.0, 156.0);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let center = rect.center_top() + egui::vec2(0.0, rect.width() * 0.5);
    let radius = rect.width() * 0.42;

    painter.circle_stroke(
        center,
        radius,
        egui::Stroke::new(8.0, palette.surface_stroke),
    );

    let fraction = fraction.clamp(0.0, 1.0) as f32;
    let segments = 64;
    let filled = (segments as f32 * fraction).round() as usize;
    if filled > 0 {
        let start = -std::f32::consts::FRAC_PI_2;
        let points: Vec<egui::Pos2> = (0..=filled)
            .map(|i| {
                let angle = start + std::f32::consts::TAU * (i as f32 / segments as f32);
                center + egui::vec2(angle.cos(), angle.sin()) * radius
            })
            .collect();
        painter.add(egui::Shape::line(points, egui::Stroke::new(8.0, color)));
    }

    painter.text(
        center,
        egui::Align2::CENTER_CENTER,
        format_percent(f64::from(fraction)),
        egui::FontId::proportional(20.0),
        palette.text,
    );
    painter.text(
        center + egui::vec2(0.0, radius + 14.0),
        egui::Align2::CENTER_CENTER,
        caption,
        egui::FontId::proportional(12.0),
        lighten_color(palette.muted, 0.1),
    );
    response
}
