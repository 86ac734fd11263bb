//! Dashboard chrome: sidebar on wide windows, header + overlay + bottom bar on
//! narrow ones. The active panel renders in the remaining central area.

use eframe::egui;
use platform_core::StoreState;
use shared::domain::{NavItem, NAV_ITEMS};

use crate::{
    controller::{events::UiIntent, reducer::NavState},
    ui::{
        landing::{brand_header, powered_by},
        panels::PanelRegistry,
        theme::Palette,
        widgets::{evolution_button, format_latency, format_percent, glass_frame, metric_row, nav_button},
    },
};

const SIDEBAR_WIDTH: f32 = 280.0;
const OVERLAY_WIDTH: f32 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavLayout {
    Sidebar,
    Compact,
}

impl NavLayout {
    pub fn for_width(width: f32, breakpoint: f32) -> Self {
        if width >= breakpoint {
            Self::Sidebar
        } else {
            Self::Compact
        }
    }
}

fn status_card(ui: &mut egui::Ui, palette: Palette, state: &StoreState) {
    let metrics = state.system_metrics;
    glass_frame(palette).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new("System Status").strong());
        ui.add_space(6.0);
        metric_row(ui, "Active Agents", &state.agents.len().to_string(), palette.positive);
        metric_row(
            ui,
            "Network Health",
            &format_percent(metrics.network_health),
            palette.positive,
        );
        metric_row(ui, "Latency", &format_latency(metrics.latency_ms), palette.info);
        metric_row(
            ui,
            "Ethical Score",
            &format_percent(metrics.ethical_compliance),
            palette.secondary,
        );
    });
}

fn nav_entries(
    ui: &mut egui::Ui,
    palette: Palette,
    state: &StoreState,
    compact: bool,
    intents: &mut Vec<UiIntent>,
) {
    for item in NAV_ITEMS.iter() {
        nav_entry(ui, palette, state, item, compact, intents);
    }
}

fn nav_entry(
    ui: &mut egui::Ui,
    palette: Palette,
    state: &StoreState,
    item: &NavItem,
    compact: bool,
    intents: &mut Vec<UiIntent>,
) {
    let active = state.selected_view == item.view;
    if nav_button(ui, palette, item, active, compact).clicked() {
        intents.push(UiIntent::SelectView(item.view));
    }
}

fn show_sidebar(ctx: &egui::Context, palette: Palette, state: &StoreState, intents: &mut Vec<UiIntent>) {
    egui::SidePanel::left("nav_sidebar")
        .exact_width(SIDEBAR_WIDTH)
        .resizable(false)
        .frame(
            egui::Frame::NONE
                .fill(palette.surface)
                .inner_margin(egui::Margin::symmetric(16, 18)),
        )
        .show(ctx, |ui| {
            brand_header(ui, palette, "Cognitive Platform");
            ui.add_space(20.0);
            ui.spacing_mut().item_spacing.y = 6.0;
            nav_entries(ui, palette, state, false, intents);

            egui::TopBottomPanel::bottom("nav_sidebar_footer")
                .frame(egui::Frame::NONE)
                .show_inside(ui, |ui| {
                    ui.add_space(8.0);
                    status_card(ui, palette, state);
                    ui.add_space(10.0);
                    if evolution_button(ui, palette).clicked() {
                        intents.push(UiIntent::TriggerEvolution);
                    }
                    ui.add_space(12.0);
                    powered_by(ui, palette);
                });
        });
}

/// A primary click that lands outside the open overlay dismisses it.
fn is_backdrop_click(overlay: egui::Rect, click: Option<egui::Pos2>) -> bool {
    click.is_some_and(|pos| !overlay.contains(pos))
}

fn show_compact_chrome(
    ctx: &egui::Context,
    palette: Palette,
    state: &StoreState,
    nav: NavState,
    intents: &mut Vec<UiIntent>,
) {
    egui::TopBottomPanel::top("compact_header")
        .frame(
            egui::Frame::NONE
                .fill(palette.surface)
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                brand_header(ui, palette, "Cognitive Platform");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let icon = if nav.open { "✕" } else { "☰" };
                    let toggle = egui::Button::new(egui::RichText::new(icon).size(20.0))
                        .min_size(egui::vec2(36.0, 36.0))
                        .stroke(egui::Stroke::NONE)
                        .fill(egui::Color32::TRANSPARENT);
                    if ui.add(toggle).clicked() {
                        intents.push(UiIntent::ToggleNav);
                    }
                });
            });
        });

    egui::TopBottomPanel::bottom("compact_bottom_nav")
        .frame(
            egui::Frame::NONE
                .fill(palette.surface)
                .inner_margin(egui::Margin::symmetric(8, 6)),
        )
        .show(ctx, |ui| {
            ui.columns(NAV_ITEMS.len(), |cols| {
                for (col, item) in cols.iter_mut().zip(NAV_ITEMS.iter()) {
                    col.vertical_centered(|ui| nav_entry(ui, palette, state, item, true, intents));
                }
            });
        });

    if !nav.open {
        return;
    }

    let overlay = egui::Window::new("Navigation")
        .id(egui::Id::new("compact_nav_overlay"))
        .title_bar(false)
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 64.0))
        .default_width(OVERLAY_WIDTH)
        .frame(glass_frame(palette).fill(palette.surface))
        .show(ctx, |ui| {
            egui::Grid::new("compact_nav_grid")
                .num_columns(2)
                .spacing([8.0, 8.0])
                .show(ui, |ui| {
                    for (index, item) in NAV_ITEMS.iter().enumerate() {
                        nav_entry(ui, palette, state, item, true, intents);
                        if index % 2 == 1 {
                            ui.end_row();
                        }
                    }
                });
            ui.add_space(10.0);
            status_card(ui, palette, state);
            ui.add_space(10.0);
            if evolution_button(ui, palette).clicked() {
                intents.push(UiIntent::TriggerEvolution);
            }
        });
    let backdrop_clicked = overlay.is_some_and(|overlay| {
        let click = ctx.input(|i| {
            i.pointer
                .primary_clicked()
                .then(|| i.pointer.interact_pos())
                .flatten()
        });
        is_backdrop_click(overlay.response.rect, click)
    });
    if backdrop_clicked || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        intents.push(UiIntent::CloseNav);
    }
}

/// Renders the dashboard for the current store snapshot and returns the
/// intents raised by its widgets, in click order.
pub fn show_dashboard(
    ctx: &egui::Context,
    palette: Palette,
    state: &StoreState,
    registry: &PanelRegistry,
    nav: NavState,
    layout: NavLayout,
) -> Vec<UiIntent> {
    let mut intents = Vec::new();
    match layout {
        NavLayout::Sidebar => show_sidebar(ctx, palette, state, &mut intents),
        NavLayout::Compact => show_compact_chrome(ctx, palette, state, nav, &mut intents),
    }

    let panel = registry.panel_for(state.selected_view);
    egui::CentralPanel::default()
        .frame(
            egui::Frame::NONE
                .fill(palette.background)
                .inner_margin(egui::Margin::same(24)),
        )
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                if let Some(intent) = panel.show(ui, palette, state) {
                    intents.push(intent);
                }
            });
        });

    intents
}
