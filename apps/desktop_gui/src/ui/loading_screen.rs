use eframe::egui;
use shared::loading::{LoadState, LoadStep, FULL_PROGRESS};

use crate::{
    controller::events::UiIntent,
    ui::{
        landing::powered_by,
        theme::{mix_color, Palette},
        widgets::{glass_frame, progress_bar},
    },
};

const PARTICLE_COUNT: usize = 50;
const FALLBACK_STEP_LABEL: &str = "Initializing...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Reached,
}

/// Steps up to and including the current one are shown as reached.
pub fn step_status(index: usize, state: &LoadState) -> StepStatus {
    if state.is_done() || index <= state.step_index {
        StepStatus::Reached
    } else {
        StepStatus::Pending
    }
}

pub fn current_label(steps: &[LoadStep], state: &LoadState) -> &'static str {
    steps
        .get(state.step_index)
        .map(|step| step.label)
        .unwrap_or(FALLBACK_STEP_LABEL)
}

/// Deterministic particle placement in unit coordinates for frame time `time`.
pub fn particle_position(index: usize, time: f64) -> (f32, f32, f32) {
    let seed = index as f64 * 12.9898;
    let speed = 0.02 + (seed.sin().abs() * 0.05);
    let x = (seed.cos().abs() + time * speed).fract() as f32;
    let y = ((seed * 1.618).sin().abs() + time * speed * 0.6).fract() as f32;
    let phase = ((time * 0.5 + seed).sin() * 0.5 + 0.5) as f32;
    (x, y, phase)
}

fn paint_background(ui: &egui::Ui, palette: Palette, time: f64) {
    let rect = ui.max_rect();
    let painter = ui.painter();
    for index in 0..PARTICLE_COUNT {
        let (x, y, alpha) = particle_position(index, time);
        let pos = rect.min + egui::vec2(rect.width() * x, rect.height() * y);
        painter.circle_filled(pos, 1.5, palette.primary.gamma_multiply(alpha));
    }

    let center = rect.center();
    let spin = (time * 0.4) as f32;
    for (ring, (radius, color)) in [
        (190.0, palette.primary),
        (160.0, palette.secondary),
        (128.0, palette.accent),
    ]
    .into_iter()
    .enumerate()
    {
        painter.circle_stroke(
            center,
            radius,
            egui::Stroke::new(1.0, color.gamma_multiply(0.2)),
        );
        let direction = if ring % 2 == 0 { 1.0 } else { -1.0 };
        let angle = spin * direction + ring as f32;
        painter.circle_filled(
            center + egui::vec2(angle.cos(), angle.sin()) * radius,
            3.0,
            color.gamma_multiply(0.6),
        );
    }
}

pub fn show_loading(
    ctx: &egui::Context,
    palette: Palette,
    steps: &[LoadStep],
    state: LoadState,
) -> Option<UiIntent> {
    let mut intent = None;
    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        intent = Some(UiIntent::AbortLoading);
    }
    let time = ctx.input(|i| i.time);

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(palette.background))
        .show(ctx, |ui| {
            paint_background(ui, palette, time);

            let card_width = ui.available_width().clamp(320.0, 440.0);
            let top_space = (ui.available_height() * 0.15).clamp(16.0, 120.0);
            ui.add_space(top_space);
            ui.vertical_centered(|ui| {
                ui.set_width(card_width);
                ui.label(
                    egui::RichText::new("Synth3sis")
                        .size(32.0)
                        .strong()
                        .color(palette.primary),
                );
                ui.label(egui::RichText::new("Unified Cognitive Intelligence").color(palette.muted));
                ui.add_space(28.0);

                ui.label(
                    egui::RichText::new(current_label(steps, &state))
                        .size(17.0)
                        .strong(),
                );
                ui.add_space(16.0);

                let fraction = (state.progress / FULL_PROGRESS) as f32;
                progress_bar(ui, palette, fraction);
                ui.label(egui::RichText::new(state.percent_label()).color(palette.muted));
                ui.add_space(20.0);

                egui::Grid::new("loading_steps")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        for (index, step) in steps.iter().enumerate() {
                            let reached = step_status(index, &state) == StepStatus::Reached;
                            let color = if reached {
                                palette.positive
                            } else {
                                mix_color(palette.muted, palette.background, 0.3)
                            };
                            glass_frame(palette).show(ui, |ui| {
                                ui.horizontal(|ui| {
                                    ui.label(
                                        egui::RichText::new(step.short_label())
                                            .size(12.0)
                                            .color(color),
                                    );
                                    if reached {
                                        ui.label(egui::RichText::new("●").color(palette.positive));
                                    }
                                });
                            });
                            if index % 2 == 1 {
                                ui.end_row();
                            }
                        }
                    });

                ui.add_space(24.0);
                if ui.button("Abort").clicked() {
                    intent = Some(UiIntent::AbortLoading);
                }
                ui.add_space(24.0);
                powered_by(ui, palette);
            });
        });

    intent
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::loading::{LoadPhase, LOADING_STEPS};

    fn running_at(step_index: usize, progress: f64) -> LoadState {
        LoadState {
            step_index,
            progress,
            phase: LoadPhase::Running,
        }
    }

    #[test]
    fn steps_up_to_current_are_reached() {
        let state = running_at(2, 45.0);
        let statuses: Vec<StepStatus> = (0..LOADING_STEPS.len())
            .map(|index| step_status(index, &state))
            .collect();
        assert_eq!(
            statuses,
            vec![
                StepStatus::Reached,
                StepStatus::Reached,
                StepStatus::Reached,
                StepStatus::Pending,
                StepStatus::Pending,
            ]
        );
    }

    #[test]
    fn finished_run_marks_every_step_reached() {
        let state = LoadState {
            step_index: LOADING_STEPS.len(),
            progress: FULL_PROGRESS,
            phase: LoadPhase::Done,
        };
        assert!((0..LOADING_STEPS.len()).all(|i| step_status(i, &state) == StepStatus::Reached));
    }

    #[test]
    fn label_falls_back_past_the_last_step() {
        assert_eq!(
            current_label(&LOADING_STEPS, &running_at(1, 25.0)),
            "Activating Neural Substrate Layer"
        );
        let done = LoadState {
            step_index: LOADING_STEPS.len(),
            progress: FULL_PROGRESS,
            phase: LoadPhase::Done,
        };
        assert_eq!(current_label(&LOADING_STEPS, &done), FALLBACK_STEP_LABEL);
    }

    #[test]
    fn particles_stay_inside_unit_square() {
        for index in 0..PARTICLE_COUNT {
            for time in [0.0, 1.5, 1234.5] {
                let (x, y, alpha) = particle_position(index, time);
                assert!((0.0..=1.0).contains(&x));
                assert!((0.0..=1.0).contains(&y));
                assert!((0.0..=1.0).contains(&alpha));
            }
        }
    }
}
