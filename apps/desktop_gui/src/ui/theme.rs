use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: egui::Color32,
    pub surface: egui::Color32,
    pub surface_stroke: egui::Color32,
    pub primary: egui::Color32,
    pub secondary: egui::Color32,
    pub accent: egui::Color32,
    pub positive: egui::Color32,
    pub info: egui::Color32,
    pub text: egui::Color32,
    pub muted: egui::Color32,
    pub brand: egui::Color32,
}

impl Palette {
    pub const fn cognitive_dark() -> Self {
        Self {
            background: egui::Color32::from_rgb(6, 4, 12),
            surface: egui::Color32::from_rgb(22, 18, 34),
            surface_stroke: egui::Color32::from_rgb(48, 42, 66),
            primary: egui::Color32::from_rgb(147, 51, 234),
            secondary: egui::Color32::from_rgb(6, 182, 212),
            accent: egui::Color32::from_rgb(236, 72, 153),
            positive: egui::Color32::from_rgb(74, 222, 128),
            info: egui::Color32::from_rgb(96, 165, 250),
            text: egui::Color32::from_rgb(243, 244, 246),
            muted: egui::Color32::from_rgb(156, 163, 175),
            brand: egui::Color32::from_rgb(250, 204, 21),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::cognitive_dark()
    }
}

pub fn visuals_for_palette(palette: Palette) -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = palette.background;
    visuals.window_fill = palette.surface;
    visuals.extreme_bg_color = palette.background;
    visuals.faint_bg_color = palette.surface;
    visuals.selection.bg_fill = palette.primary;
    visuals.hyperlink_color = palette.secondary;
    visuals.override_text_color = Some(palette.text);
    visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, palette.surface_stroke);
    visuals.widgets.inactive.weak_bg_fill = palette.surface;
    visuals.widgets.hovered.weak_bg_fill = lighten_color(palette.surface, 0.08);
    visuals.widgets.active.weak_bg_fill = palette.primary;
    visuals
}

pub fn lighten_color(c: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |channel: u8| -> u8 {
        let channel = f32::from(channel);
        (channel + (255.0 - channel) * t).round() as u8
    };
    egui::Color32::from_rgba_unmultiplied(lerp(c.r()), lerp(c.g()), lerp(c.b()), c.a())
}

/// Linear blend from `from` toward `to`.
pub fn mix_color(from: egui::Color32, to: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: u8, b: u8| -> u8 {
        (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8
    };
    egui::Color32::from_rgb(
        lerp(from.r(), to.r()),
        lerp(from.g(), to.g()),
        lerp(from.b(), to.b()),
    )
}
