//! The four dashboard views. Each renders from a store snapshot and may only
//! ask for changes by returning an intent.

use eframe::egui;
use platform_core::StoreState;
use shared::domain::{Agent, AgentRole, ViewId};

use crate::{
    controller::events::UiIntent,
    ui::{
        theme::{mix_color, Palette},
        widgets::{format_latency, format_percent, gauge, glass_frame, metric_row},
    },
};

pub trait ViewPanel {
    fn view_id(&self) -> ViewId;
    fn title(&self) -> &'static str;
    fn subtitle(&self) -> &'static str;
    fn show(&self, ui: &mut egui::Ui, palette: Palette, state: &StoreState) -> Option<UiIntent>;
}

pub struct PanelRegistry {
    panels: Vec<Box<dyn ViewPanel>>,
}

impl Default for PanelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self {
            panels: vec![
                Box::new(DaedalusConsciousness),
                Box::new(NeuralSubstrate),
                Box::new(EchoNodeMesh),
                Box::new(SigmaMatrix),
            ],
        }
    }

    /// Panel for `view`; the consciousness hub stands in for anything unregistered.
    pub fn panel_for(&self, view: ViewId) -> &dyn ViewPanel {
        self.panels
            .iter()
            .find(|panel| panel.view_id() == view)
            .or_else(|| {
                self.panels
                    .iter()
                    .find(|panel| panel.view_id() == ViewId::Dashboard)
            })
            .map(|panel| panel.as_ref())
            .unwrap_or(&DaedalusConsciousness)
    }

    pub fn panel_for_raw(&self, raw: &str) -> &dyn ViewPanel {
        self.panel_for(ViewId::resolve(raw))
    }
}

fn panel_header(ui: &mut egui::Ui, palette: Palette, panel: &dyn ViewPanel) {
    ui.label(
        egui::RichText::new(panel.title())
            .size(26.0)
            .strong()
            .color(palette.text),
    );
    ui.label(egui::RichText::new(panel.subtitle()).color(palette.muted));
    ui.add_space(12.0);
}

fn agents_with_role(state: &StoreState, role: AgentRole) -> impl Iterator<Item = &Agent> {
    state.agents.iter().filter(move |agent| agent.role == role)
}

fn agent_row(ui: &mut egui::Ui, palette: Palette, agent: &Agent) {
    ui.horizontal(|ui| {
        let (dot, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
        ui.painter()
            .circle_filled(dot.center(), 4.0, palette.positive);
        ui.label(egui::RichText::new(&agent.name).strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(egui::RichText::new(agent.role.as_str()).color(palette.muted));
        });
    });
}

fn empty_roster(ui: &mut egui::Ui, palette: Palette) {
    ui.label(egui::RichText::new("No agents online. Initialize the platform to seed the roster.").color(palette.muted));
}

/// Mean of the health and compliance fractions; shown as "coherence".
pub fn coherence(state: &StoreState) -> f64 {
    (state.system_metrics.network_health + state.system_metrics.ethical_compliance) / 2.0
}

pub struct DaedalusConsciousness;

impl ViewPanel for DaedalusConsciousness {
    fn view_id(&self) -> ViewId {
        ViewId::Dashboard
    }

    fn title(&self) -> &'static str {
        "Daedalus Consciousness"
    }

    fn subtitle(&self) -> &'static str {
        "Recursive orchestration with ethical oversight"
    }

    fn show(&self, ui: &mut egui::Ui, palette: Palette, state: &StoreState) -> Option<UiIntent> {
        panel_header(ui, palette, self);
        ui.horizontal_wrapped(|ui| {
            gauge(ui, palette, coherence(state), "Cognitive Coherence", palette.primary);
            ui.add_space(16.0);
            glass_frame(palette).show(ui, |ui| {
                ui.set_min_width(260.0);
                ui.label(egui::RichText::new("Agent Roster").strong());
                ui.add_space(6.0);
                if state.agents.is_empty() {
                    empty_roster(ui, palette);
                }
                for agent in &state.agents {
                    agent_row(ui, palette, agent);
                }
            });
        });
        ui.add_space(12.0);
        ui.label(
            egui::RichText::new(format!("Evolution generation {}", state.generation))
                .color(palette.muted),
        );
        None
    }
}

pub struct NeuralSubstrate;

impl ViewPanel for NeuralSubstrate {
    fn view_id(&self) -> ViewId {
        ViewId::Neural
    }

    fn title(&self) -> &'static str {
        "Neural Substrate Layer"
    }

    fn subtitle(&self) -> &'static str {
        "Hybrid transformer and graph processing"
    }

    fn show(&self, ui: &mut egui::Ui, palette: Palette, state: &StoreState) -> Option<UiIntent> {
        panel_header(ui, palette, self);
        glass_frame(palette).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new("Substrate Health").strong());
            let fraction = state.system_metrics.network_health as f32;
            ui.add(
                egui::ProgressBar::new(fraction)
                    .fill(mix_color(palette.accent, palette.positive, fraction))
                    .text(format_percent(state.system_metrics.network_health)),
            );
        });
        ui.add_space(10.0);
        egui::Grid::new("neural_roles")
            .num_columns(2)
            .spacing([24.0, 8.0])
            .show(ui, |ui| {
                for role in [
                    AgentRole::Orchestrator,
                    AgentRole::Synthesizer,
                    AgentRole::Analyst,
                    AgentRole::Relay,
                    AgentRole::Guardian,
                ] {
                    ui.label(egui::RichText::new(role.as_str()).color(palette.muted));
                    ui.label(agents_with_role(state, role).count().to_string());
                    ui.end_row();
                }
            });
        None
    }
}

pub struct EchoNodeMesh;

impl ViewPanel for EchoNodeMesh {
    fn view_id(&self) -> ViewId {
        ViewId::Mesh
    }

    fn title(&self) -> &'static str {
        "EchoNode Mesh"
    }

    fn subtitle(&self) -> &'static str {
        "Decentralized knowledge propagation"
    }

    fn show(&self, ui: &mut egui::Ui, palette: Palette, state: &StoreState) -> Option<UiIntent> {
        panel_header(ui, palette, self);
        glass_frame(palette).show(ui, |ui| {
            ui.set_width(ui.available_width());
            metric_row(
                ui,
                "Mesh Latency",
                &format_latency(state.system_metrics.latency_ms),
                palette.info,
            );
            metric_row(
                ui,
                "Network Health",
                &format_percent(state.system_metrics.network_health),
                palette.positive,
            );
        });
        ui.add_space(10.0);
        let relays: Vec<&Agent> = agents_with_role(state, AgentRole::Relay).collect();
        glass_frame(palette).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(format!("Relay Nodes ({})", relays.len())).strong());
            if relays.is_empty() {
                empty_roster(ui, palette);
            }
            for agent in relays {
                agent_row(ui, palette, agent);
            }
        });
        None
    }
}

pub struct SigmaMatrix;

impl ViewPanel for SigmaMatrix {
    fn view_id(&self) -> ViewId {
        ViewId::Sigma
    }

    fn title(&self) -> &'static str {
        "Σ-Matrix Engine"
    }

    fn subtitle(&self) -> &'static str {
        "Multi-tiered ethical validation"
    }

    fn show(&self, ui: &mut egui::Ui, palette: Palette, state: &StoreState) -> Option<UiIntent> {
        panel_header(ui, palette, self);
        let mut intent = None;
        ui.horizontal_wrapped(|ui| {
            gauge(
                ui,
                palette,
                state.system_metrics.ethical_compliance,
                "Ethical Compliance",
                palette.secondary,
            );
            ui.add_space(16.0);
            glass_frame(palette).show(ui, |ui| {
                ui.set_min_width(240.0);
                metric_row(ui, "Generation", &state.generation.to_string(), palette.text);
                metric_row(
                    ui,
                    "Guardians",
                    &agents_with_role(state, AgentRole::Guardian).count().to_string(),
                    palette.text,
                );
                ui.add_space(8.0);
                if ui.button("Run self-stabilization").clicked() {
                    intent = Some(UiIntent::TriggerEvolution);
                }
            });
        });
        intent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform_core::Store;

    #[test]
    fn registry_maps_every_view_to_its_panel() {
        let registry = PanelRegistry::new();
        for view in ViewId::ALL {
            assert_eq!(registry.panel_for(view).view_id(), view);
        }
    }

    #[test]
    fn unknown_raw_view_renders_dashboard_panel() {
        let registry = PanelRegistry::new();
        assert_eq!(registry.panel_for_raw("xyzzy").view_id(), ViewId::Dashboard);
        assert_eq!(registry.panel_for_raw("sigma").title(), "Σ-Matrix Engine");
    }

    #[test]
    fn coherence_averages_health_and_compliance() {
        let mut store = Store::new();
        store.initialize_system();
        let value = coherence(store.state());
        assert!((value - (0.942 + 0.968) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn panels_render_without_emitting_intents() {
        let registry = PanelRegistry::new();
        let mut store = Store::new();
        store.initialize_system();
        let ctx = egui::Context::default();

        for view in ViewId::ALL {
            let mut emitted = None;
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    emitted = registry
                        .panel_for(view)
                        .show(ui, Palette::default(), store.state());
                });
            });
            assert_eq!(emitted, None, "{view} emitted an intent without input");
        }
    }
}
