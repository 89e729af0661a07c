use anyhow::{Context, Result};
use eframe::egui;
use egui::{Color32, RichText};

use super::views;
use crate::config::{Config, ViewMode};
use crate::plan::{layout_week, parse_hhmm, week_listing, PlanStore, TimeSpan, WeekId, Weekday};

pub struct WeekPlanApp {
    config: Config,
    store: PlanStore,

    // Current selection
    year: i32,
    week: u32,

    // Add form
    form_day: Weekday,
    form_start: String,
    form_end: String,
    form_label: String,

    // Delete confirmation
    pending_delete: Option<(Weekday, usize)>,
    show_delete_confirm: bool,

    // Settings dialog
    show_settings: bool,
    settings_start_hour: u8,
    settings_end_hour: u8,
    settings_font_scale: f32,

    // Status
    status_message: Option<(String, bool)>, // (message, is_error)
}

impl WeekPlanApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Result<Self> {
        let config = Config::load().unwrap_or_default();
        super::setup_fonts(&cc.egui_ctx);
        super::setup_theme(&cc.egui_ctx);

        // A malformed plan file is fatal here; there is no partial recovery
        let data_path = config.data_path()?;
        let store = PlanStore::load(&data_path)
            .with_context(|| format!("Failed to load plans from {}", data_path.display()))?;

        let current = WeekId::current();

        Ok(Self {
            year: current.year,
            week: current.week,
            form_day: Weekday::Monday,
            form_start: "08:00".to_string(),
            form_end: "09:00".to_string(),
            form_label: String::new(),
            pending_delete: None,
            show_delete_confirm: false,
            show_settings: false,
            settings_start_hour: config.grid_start_hour,
            settings_end_hour: config.grid_end_hour,
            settings_font_scale: config.font_scale,
            status_message: None,
            config,
            store,
        })
    }

    fn week_id(&self) -> WeekId {
        WeekId::new(self.year, self.week)
    }

    /// Writes the whole store back to disk. The in-memory mutation has
    /// already happened; a failed save is reported but not rolled back.
    fn persist(&mut self, success: String) {
        match self.store.save() {
            Ok(()) => self.status_message = Some((success, false)),
            Err(e) => self.status_message = Some((format!("Failed to save: {e}"), true)),
        }
    }

    fn add_task(&mut self) {
        let start = match parse_hhmm(self.form_start.trim()) {
            Ok(time) => time,
            Err(e) => {
                self.status_message = Some((format!("Invalid start time: {e}"), true));
                return;
            }
        };
        let end = match parse_hhmm(self.form_end.trim()) {
            Ok(time) => time,
            Err(e) => {
                self.status_message = Some((format!("Invalid end time: {e}"), true));
                return;
            }
        };
        let span = match TimeSpan::new(start, end, &self.form_label) {
            Ok(span) => span,
            Err(e) => {
                self.status_message =
                    Some((format!("Please enter a valid time range and a task: {e}"), true));
                return;
            }
        };

        let id = self.week_id();
        let label = span.label().to_string();
        self.store.get_or_create(id).add(self.form_day, span);
        self.persist(format!("Added \"{}\" to {} ({})", label, self.form_day, id));
        if self.status_message.as_ref().is_some_and(|(_, err)| !err) {
            self.form_label.clear();
        }
    }

    fn delete_task(&mut self, day: Weekday, index: usize) {
        let id = self.week_id();
        match self.store.get_or_create(id).remove_at(day, index) {
            Ok(span) => self.persist(format!(
                "Removed {} – {} \"{}\" from {}",
                span.start_hhmm(),
                span.end_hhmm(),
                span.label(),
                day
            )),
            Err(e) => self.status_message = Some((format!("Failed to delete: {e}"), true)),
        }
    }

    fn save_settings(&mut self) {
        self.config.grid_start_hour = self.settings_start_hour;
        self.config.grid_end_hour = self.settings_end_hour;
        self.config.font_scale = self.settings_font_scale;

        match self.config.save() {
            Ok(()) => self.show_settings = false,
            Err(e) => {
                self.status_message = Some((format!("Failed to save settings: {e}"), true));
            }
        }
    }

    fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let current = WeekId::current();

            egui::ComboBox::from_id_salt("year_select")
                .selected_text(self.year.to_string())
                .width(80.0)
                .show_ui(ui, |ui| {
                    for year in (current.year - 2)..=(current.year + 2) {
                        ui.selectable_value(&mut self.year, year, year.to_string());
                    }
                });

            egui::ComboBox::from_id_salt("week_select")
                .selected_text(format!("KW {:02}", self.week))
                .width(90.0)
                .show_ui(ui, |ui| {
                    for week in 1..=53 {
                        ui.selectable_value(&mut self.week, week, format!("KW {week:02}"));
                    }
                });

            ui.add_space(16.0);

            // View mode switcher, persisted so the choice sticks
            let mut view_mode = self.config.view_mode;
            ui.selectable_value(
                &mut view_mode,
                ViewMode::List,
                format!("{} List", egui_phosphor::regular::LIST),
            );
            ui.selectable_value(
                &mut view_mode,
                ViewMode::Grid,
                format!("{} Grid", egui_phosphor::regular::SQUARES_FOUR),
            );
            if view_mode != self.config.view_mode {
                self.config.view_mode = view_mode;
                let _ = self.config.save();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let gear = ui.add(
                    egui::Label::new(RichText::new(egui_phosphor::regular::GEAR).size(18.0))
                        .sense(egui::Sense::click()),
                );
                if gear.hovered() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                }
                if gear.clicked() {
                    self.settings_start_hour = self.config.grid_start_hour;
                    self.settings_end_hour = self.config.grid_end_hour;
                    self.settings_font_scale = self.config.font_scale;
                    self.show_settings = true;
                }
            });
        });
    }

    fn render_add_form(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            egui::ComboBox::from_id_salt("weekday_select")
                .selected_text(self.form_day.name())
                .width(120.0)
                .show_ui(ui, |ui| {
                    for day in Weekday::ALL {
                        ui.selectable_value(&mut self.form_day, day, day.name());
                    }
                });

            ui.add(
                egui::TextEdit::singleline(&mut self.form_start)
                    .hint_text("08:00")
                    .desired_width(56.0),
            );
            ui.label("–");
            ui.add(
                egui::TextEdit::singleline(&mut self.form_end)
                    .hint_text("09:00")
                    .desired_width(56.0),
            );

            let label_edit = ui.add(
                egui::TextEdit::singleline(&mut self.form_label)
                    .hint_text("Task")
                    .desired_width(280.0),
            );
            let submitted =
                label_edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            if ui
                .button(format!("{} Add", egui_phosphor::regular::PLUS))
                .clicked()
                || submitted
            {
                self.add_task();
            }
        });
    }

    fn render_main(&mut self, ui: &mut egui::Ui) {
        self.render_header(ui);
        ui.separator();
        self.render_add_form(ui);
        ui.add_space(4.0);

        let id = self.week_id();
        ui.heading(format!("Week overview – {id}"));
        ui.add_space(4.0);

        // Make sure the selected week exists before rendering it
        self.store.get_or_create(id);

        let mut delete_request = None;
        if let Some(plan) = self.store.plan(id) {
            match self.config.view_mode {
                ViewMode::List => {
                    let listing = week_listing(plan);
                    views::render_week_list(ui, &listing);
                }
                ViewMode::Grid => {
                    let grid = layout_week(plan, self.config.grid_hours());
                    views::render_week_grid(ui, &grid);
                }
            }

            if !plan.is_empty() {
                ui.add_space(8.0);
                ui.separator();
                ui.label(
                    RichText::new(format!(
                        "{} Delete tasks",
                        egui_phosphor::regular::TRASH
                    ))
                    .size(14.0),
                );
                delete_request = views::render_delete_list(ui, plan);
            }
        }

        if let Some((day, index)) = delete_request {
            self.pending_delete = Some((day, index));
            self.show_delete_confirm = true;
        }
    }

    fn render_delete_confirm(&mut self, ctx: &egui::Context) {
        let (content_bg, frame_color) = super::theme::dialog_colors();
        let dialog_frame = egui::Frame::none()
            .fill(content_bg)
            .stroke(egui::Stroke::new(2.0, frame_color))
            .rounding(egui::Rounding::same(8.0))
            .inner_margin(egui::Margin::same(20.0));

        let mut confirmed = false;
        let mut cancelled = false;

        egui::Window::new("Confirm Delete")
            .collapsible(false)
            .resizable(false)
            .default_width(360.0)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .frame(dialog_frame)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                ui.label(RichText::new("Delete this task?").size(14.0));
                ui.add_space(6.0);

                if let Some((day, index)) = self.pending_delete {
                    let span = self
                        .store
                        .plan(self.week_id())
                        .and_then(|plan| plan.day(day).get(index));
                    if let Some(span) = span {
                        ui.horizontal(|ui| {
                            ui.label(
                                RichText::new(format!(
                                    "{} – {}",
                                    span.start_hhmm(),
                                    span.end_hhmm()
                                ))
                                .strong(),
                            );
                            ui.add(egui::Label::new(span.label()).truncate());
                        });
                        ui.label(format!("{} ({})", day, self.week_id()));
                    }
                }

                ui.add_space(16.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                    if ui
                        .button(RichText::new("Delete").color(Color32::from_rgb(224, 108, 117)))
                        .clicked()
                    {
                        confirmed = true;
                    }
                });
            });

        if cancelled {
            self.pending_delete = None;
            self.show_delete_confirm = false;
        }
        if confirmed {
            self.show_delete_confirm = false;
            if let Some((day, index)) = self.pending_delete.take() {
                self.delete_task(day, index);
            }
        }
    }

    fn render_settings(&mut self, ctx: &egui::Context) {
        let (content_bg, frame_color) = super::theme::dialog_colors();
        let dialog_frame = egui::Frame::none()
            .fill(content_bg)
            .stroke(egui::Stroke::new(2.0, frame_color))
            .rounding(egui::Rounding::same(8.0))
            .inner_margin(egui::Margin::same(20.0));

        let mut save_clicked = false;
        let mut cancel_clicked = false;

        egui::Window::new("Settings")
            .collapsible(false)
            .resizable(false)
            .default_width(380.0)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .frame(dialog_frame)
            .show(ctx, |ui| {
                egui::Grid::new("settings_grid")
                    .num_columns(2)
                    .spacing([20.0, 10.0])
                    .show(ui, |ui| {
                        ui.label("Grid starts at:");
                        ui.add(
                            egui::DragValue::new(&mut self.settings_start_hour)
                                .range(0..=23)
                                .suffix(":00"),
                        );
                        ui.end_row();

                        ui.label("Grid ends at:");
                        ui.add(
                            egui::DragValue::new(&mut self.settings_end_hour)
                                .range(1..=24)
                                .suffix(":00"),
                        );
                        ui.end_row();

                        ui.label("Font scale:");
                        ui.add(
                            egui::Slider::new(&mut self.settings_font_scale, 0.75..=2.0)
                                .fixed_decimals(2),
                        );
                        ui.end_row();

                        ui.label("Plan file:");
                        match self.config.data_path() {
                            Ok(path) => {
                                ui.add(
                                    egui::Label::new(
                                        RichText::new(path.display().to_string()).size(12.0),
                                    )
                                    .truncate(),
                                );
                            }
                            Err(_) => {
                                ui.label("unavailable");
                            }
                        }
                        ui.end_row();
                    });

                ui.add_space(16.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        cancel_clicked = true;
                    }
                    if ui.button("Save").clicked() {
                        save_clicked = true;
                    }
                });
            });

        if cancel_clicked {
            self.show_settings = false;
        }
        if save_clicked {
            self.save_settings();
        }
    }
}

impl eframe::App for WeekPlanApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle pinch-to-zoom (trackpad pinch or Ctrl+scroll)
        let zoom_delta = ctx.input(|i| i.zoom_delta());
        if zoom_delta != 1.0 {
            self.config.font_scale = (self.config.font_scale * zoom_delta).clamp(0.75, 2.5);
            if (zoom_delta - 1.0).abs() > 0.01 {
                let _ = self.config.save();
            }
        }
        ctx.set_pixels_per_point(self.config.font_scale);

        if self.show_delete_confirm {
            self.render_delete_confirm(ctx);
        }
        if self.show_settings {
            self.render_settings(ctx);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().inner_margin(egui::Margin::symmetric(12.0, 8.0)))
            .show(ctx, |ui| {
                // Status line with a dismiss control
                let mut dismiss_message = false;
                if let Some((msg, is_error)) = &self.status_message {
                    let color = if *is_error {
                        Color32::from_rgb(224, 108, 117)
                    } else {
                        Color32::from_rgb(152, 195, 121)
                    };
                    let dim_color = Color32::from_rgb(120, 120, 130);
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(msg).color(color));
                        ui.add_space(8.0);
                        let close_btn = ui.add(
                            egui::Label::new(
                                RichText::new(egui_phosphor::regular::X)
                                    .size(14.0)
                                    .color(dim_color),
                            )
                            .sense(egui::Sense::click()),
                        );
                        if close_btn.hovered() {
                            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                        }
                        if close_btn.clicked() {
                            dismiss_message = true;
                        }
                    });
                    ui.add_space(4.0);
                }
                if dismiss_message {
                    self.status_message = None;
                }

                self.render_main(ui);
            });
    }
}
