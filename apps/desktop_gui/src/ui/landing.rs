use eframe::egui;

use crate::{
    controller::events::UiIntent,
    ui::{
        theme::Palette,
        widgets::{feature_card, stat_card},
    },
};

const STAT_CARDS: [(&str, &str); 4] = [
    ("<100ms", "Response Latency"),
    ("60 FPS", "3D Performance"),
    ("94.2%", "Agent Accuracy"),
    ("99.95%", "Platform Stability"),
];

const FEATURE_CARDS: [(&str, &str); 6] = [
    (
        "Daedalus Consciousness",
        "Recursive LLM architecture with ethical oversight and multi-agent orchestration for autonomous cognitive evolution.",
    ),
    (
        "Neural Substrate Layer",
        "Hybrid transformer and graph neural networks with quantum-inspired processing for enhanced decision-making.",
    ),
    (
        "EchoNode Mesh",
        "Decentralized knowledge propagation with CRDT consensus mechanisms for real-time collaboration.",
    ),
    (
        "Σ-Matrix Engine",
        "Multi-tiered ethical validation with constitutional AI fusion and autonomous self-stabilization.",
    ),
    (
        "InfiniGen Evolution",
        "Metaprogramming core with G-RAG code blueprint mutation and real-time logic rewriting.",
    ),
    (
        "DreamWeaver Studio",
        "Multimodal content generation with AI band jamming and biometric feedback integration.",
    ),
];

pub fn brand_header(ui: &mut egui::Ui, palette: Palette, tagline: &str) {
    ui.horizontal(|ui| {
        let (logo, _) = ui.allocate_exact_size(egui::vec2(40.0, 40.0), egui::Sense::hover());
        ui.painter()
            .circle_filled(logo.center(), 18.0, palette.primary);
        ui.painter().circle_stroke(
            logo.center(),
            18.0,
            egui::Stroke::new(2.0, palette.secondary),
        );
        ui.vertical(|ui| {
            ui.label(
                egui::RichText::new("Synth3sis")
                    .size(22.0)
                    .strong()
                    .color(palette.text),
            );
            ui.label(egui::RichText::new(tagline).size(12.0).color(palette.muted));
        });
    });
}

pub fn powered_by(ui: &mut egui::Ui, palette: Palette) {
    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new("Powered by").size(11.0).color(palette.muted));
        ui.label(
            egui::RichText::new("Or4cl3 AI Solutions")
                .size(13.0)
                .strong()
                .color(palette.brand),
        );
    });
}

pub fn show_landing(ctx: &egui::Context, palette: Palette) -> Option<UiIntent> {
    let mut intent = None;
    if ctx.input(|i| i.key_pressed(egui::Key::Enter)) {
        intent = Some(UiIntent::EnterPlatform);
    }

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(palette.background).inner_margin(egui::Margin::same(24)))
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.horizontal(|ui| {
                    brand_header(ui, palette, "Unified Cognitive Intelligence");
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        powered_by(ui, palette);
                    });
                });

                ui.add_space(48.0);
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new("Evolve Intelligence.")
                            .size(44.0)
                            .strong()
                            .color(palette.primary),
                    );
                    ui.label(
                        egui::RichText::new("Vibe Code Reality.")
                            .size(44.0)
                            .strong()
                            .color(palette.text),
                    );
                    ui.add_space(24.0);

                    let enter = egui::Button::new(
                        egui::RichText::new("Enter the Cognitive Realm")
                            .size(18.0)
                            .strong()
                            .color(egui::Color32::WHITE),
                    )
                    .min_size(egui::vec2(280.0, 48.0))
                    .fill(palette.primary)
                    .corner_radius(24.0);
                    if ui.add(enter).clicked() {
                        intent = Some(UiIntent::EnterPlatform);
                    }
                });

                ui.add_space(36.0);
                ui.horizontal_wrapped(|ui| {
                    for (value, label) in STAT_CARDS {
                        stat_card(ui, palette, value, label);
                    }
                });

                ui.add_space(36.0);
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new("The Three Pillars of Consciousness")
                            .size(26.0)
                            .strong(),
                    );
                    ui.label(
                        egui::RichText::new(
                            "Unifying SOLUS, QSCI, and EvOS-AI + InfiniGen into a singular cognitive entity",
                        )
                        .color(palette.muted),
                    );
                });
                ui.add_space(16.0);
                let columns = if ui.available_width() >= 900.0 { 3 } else { 1 };
                for row in FEATURE_CARDS.chunks(columns) {
                    ui.columns(columns, |cols| {
                        for (col, (title, description)) in cols.iter_mut().zip(row) {
                            feature_card(col, palette, title, description);
                        }
                    });
                    ui.add_space(8.0);
                }

                ui.add_space(24.0);
                ui.separator();
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(
                            "© 2024 Synth3sis. Pioneering the future of cognitive intelligence.",
                        )
                        .size(12.0)
                        .color(palette.muted),
                    );
                });
            });
        });

    intent
}
