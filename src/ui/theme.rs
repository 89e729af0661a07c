use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

/// Blue accent used for buttons, selection and task boxes
pub fn accent() -> Color32 {
    Color32::from_rgb(19, 152, 244)
}

pub fn setup_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();

    // Phosphor icons as fallback in the proportional family
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    ctx.set_fonts(fonts);
}

pub fn setup_theme(ctx: &egui::Context) {
    let mut style = Style::default();

    // Dark visuals with blue accents
    let mut visuals = Visuals::dark();

    // Background colors - pure black
    let bg = Color32::BLACK;
    visuals.panel_fill = bg;
    visuals.window_fill = bg;
    visuals.faint_bg_color = Color32::from_rgb(20, 20, 18);
    visuals.extreme_bg_color = bg;

    // Widget colors - warm grays (R=G > B for warmth)
    visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(40, 40, 38);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, Color32::from_rgb(176, 176, 168));

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(56, 56, 52);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, Color32::from_rgb(200, 200, 192));

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(80, 80, 74);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, Color32::from_rgb(255, 255, 255));

    visuals.widgets.active.bg_fill = accent();
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);

    // Selection color (accent background, white text)
    visuals.selection.bg_fill = accent();
    visuals.selection.stroke = Stroke::new(1.0, Color32::WHITE);

    visuals.hyperlink_color = accent();

    // Rounded corners
    visuals.widgets.noninteractive.rounding = Rounding::same(6.0);
    visuals.widgets.inactive.rounding = Rounding::same(6.0);
    visuals.widgets.hovered.rounding = Rounding::same(6.0);
    visuals.widgets.active.rounding = Rounding::same(6.0);
    visuals.window_rounding = Rounding::same(8.0);

    style.visuals = visuals;

    // Font sizes - standardized at 14pt
    style.text_styles = [
        (TextStyle::Small, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Button, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(16.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(14.0, FontFamily::Monospace)),
    ]
    .into();

    style.spacing.item_spacing = egui::vec2(10.0, 8.0);
    style.spacing.button_padding = egui::vec2(14.0, 8.0);
    style.spacing.window_margin = egui::Margin::same(20.0);

    ctx.set_style(style);
}

/// Returns (text_color, secondary_text_color)
pub fn text_colors() -> (Color32, Color32) {
    (Color32::WHITE, Color32::from_rgb(208, 208, 200))
}

/// Returns (bg_color, stripe/border accent) for painted task boxes
pub fn task_box_colors() -> (Color32, Color32) {
    (Color32::from_rgb(0x1c, 0x1c, 0x1a), accent())
}

/// Returns (grid_line, hour_label) colors for the week grid
pub fn grid_colors() -> (Color32, Color32) {
    (
        Color32::from_rgb(0x40, 0x40, 0x3c),
        Color32::from_rgb(0x70, 0x70, 0x68),
    )
}

/// Returns (content_bg, frame_color) for dialogs
pub fn dialog_colors() -> (Color32, Color32) {
    (Color32::BLACK, Color32::from_rgb(40, 40, 38))
}
