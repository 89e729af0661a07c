use egui::{Color32, RichText, Ui};

use super::theme;
use crate::plan::{DayListing, TimeSpan, WeekGrid, WeekPlan, Weekday};

/// Compact per-day listing, one expander per weekday with a task count.
/// Tasks come pre-sorted by start time from the listing.
pub fn render_week_list(ui: &mut Ui, listing: &[DayListing<'_>]) {
    let (text_color, secondary_color) = theme::text_colors();

    egui::ScrollArea::vertical()
        .id_salt("week_list")
        .show(ui, |ui| {
            for day in listing {
                let title = format!("{}  –  {} task(s)", day.day, day.count);
                egui::CollapsingHeader::new(RichText::new(title).color(text_color))
                    .default_open(day.count > 0)
                    .show(ui, |ui| {
                        if day.tasks.is_empty() {
                            ui.label(RichText::new("No tasks planned.").color(secondary_color));
                            return;
                        }
                        for span in &day.tasks {
                            ui.horizontal(|ui| {
                                ui.label(
                                    RichText::new(format!(
                                        "{} – {}",
                                        span.start_hhmm(),
                                        span.end_hhmm()
                                    ))
                                    .strong()
                                    .color(text_color),
                                );
                                ui.label(RichText::new(span.label()).color(secondary_color));
                            });
                        }
                    });
            }
        });
}

/// Hour-by-hour week table, painted directly like the schedule canvas.
/// Row heights grow with the deepest cell in that hour so stacked task
/// boxes never overlap.
pub fn render_week_grid(ui: &mut Ui, grid: &WeekGrid<'_>) {
    let (grid_line_color, hour_label_color) = theme::grid_colors();

    // Layout constants
    let hour_label_width = 92.0;
    let header_height = 28.0;
    let box_height = 34.0;
    let box_gap = 3.0;
    let min_row_height = 30.0;

    let available_width = ui.available_width();
    let day_width = (available_width - hour_label_width) / 7.0;

    // Fixed day headers (outside the ScrollArea)
    let (header_rect, _) = ui.allocate_exact_size(
        egui::vec2(available_width, header_height),
        egui::Sense::hover(),
    );

    let painter = ui.painter();
    for (i, day) in Weekday::ALL.iter().enumerate() {
        let x = header_rect.min.x + hour_label_width + i as f32 * day_width;
        painter.text(
            egui::pos2(x + day_width / 2.0, header_rect.center().y),
            egui::Align2::CENTER_CENTER,
            day.name(),
            egui::FontId::proportional(14.0),
            Color32::from_rgb(0xb0, 0xb0, 0xa8),
        );
        if i > 0 {
            painter.line_segment(
                [
                    egui::pos2(x, header_rect.min.y + 4.0),
                    egui::pos2(x, header_rect.max.y - 4.0),
                ],
                egui::Stroke::new(1.0, grid_line_color),
            );
        }
    }

    egui::ScrollArea::vertical()
        .id_salt("week_grid")
        .show(ui, |ui| {
            // One height per hour row, driven by the deepest cell
            let row_heights: Vec<f32> = grid
                .hours()
                .map(|hour| {
                    let depth = grid.row_depth(hour) as f32;
                    (depth * (box_height + box_gap) + box_gap * 2.0).max(min_row_height)
                })
                .collect();
            let total_height: f32 = row_heights.iter().sum();

            let (grid_rect, _) = ui.allocate_exact_size(
                egui::vec2(available_width, total_height),
                egui::Sense::hover(),
            );
            let painter = ui.painter();

            // Vertical column lines, including both outer edges
            for i in 0..=7 {
                let x = grid_rect.min.x + hour_label_width + i as f32 * day_width;
                painter.line_segment(
                    [
                        egui::pos2(x, grid_rect.min.y),
                        egui::pos2(x, grid_rect.max.y),
                    ],
                    egui::Stroke::new(1.0, grid_line_color),
                );
            }

            let mut y = grid_rect.min.y;
            for (row, hour) in grid.hours().enumerate() {
                painter.line_segment(
                    [egui::pos2(grid_rect.min.x, y), egui::pos2(grid_rect.max.x, y)],
                    egui::Stroke::new(1.0, grid_line_color),
                );

                painter.text(
                    egui::pos2(grid_rect.min.x + hour_label_width - 8.0, y + 4.0),
                    egui::Align2::RIGHT_TOP,
                    format!("{:02}:00 - {:02}:00", hour, hour + 1),
                    egui::FontId::proportional(11.0),
                    hour_label_color,
                );

                for (day_idx, day) in Weekday::ALL.iter().enumerate() {
                    let col_x = grid_rect.min.x + hour_label_width + day_idx as f32 * day_width;
                    for (slot, span) in grid.cell(*day, hour).iter().enumerate() {
                        let box_rect = egui::Rect::from_min_size(
                            egui::pos2(
                                col_x + 2.0,
                                y + box_gap + slot as f32 * (box_height + box_gap),
                            ),
                            egui::vec2(day_width - 4.0, box_height),
                        );
                        paint_task_box(painter, box_rect, span);
                    }
                }

                y += row_heights[row];
            }

            // Bottom edge
            painter.line_segment(
                [
                    egui::pos2(grid_rect.min.x, grid_rect.max.y),
                    egui::pos2(grid_rect.max.x, grid_rect.max.y),
                ],
                egui::Stroke::new(1.0, grid_line_color),
            );
        });
}

/// One task box in a grid cell: time range on top, label below
fn paint_task_box(painter: &egui::Painter, rect: egui::Rect, span: &TimeSpan) {
    let (box_bg, accent_color) = theme::task_box_colors();
    let (text_color, secondary_color) = theme::text_colors();
    let corner_radius = 4.0;

    painter.rect(
        rect,
        corner_radius,
        box_bg,
        egui::Stroke::new(1.0, accent_color),
    );

    // Left accent stripe
    let accent_width = 3.0;
    painter.rect(
        egui::Rect::from_min_size(rect.min, egui::vec2(accent_width, rect.height())),
        egui::Rounding {
            nw: corner_radius,
            sw: corner_radius,
            ne: 0.0,
            se: 0.0,
        },
        accent_color,
        egui::Stroke::NONE,
    );

    // Clip text to the box so long labels don't bleed into the next column
    let clipped = painter.with_clip_rect(rect.shrink2(egui::vec2(2.0, 0.0)));
    let text_left = rect.min.x + accent_width + 4.0;
    clipped.text(
        egui::pos2(text_left, rect.min.y + 3.0),
        egui::Align2::LEFT_TOP,
        format!("{}–{}", span.start_hhmm(), span.end_hhmm()),
        egui::FontId::proportional(12.0),
        text_color,
    );
    clipped.text(
        egui::pos2(text_left, rect.max.y - 3.0),
        egui::Align2::LEFT_BOTTOM,
        span.label(),
        egui::FontId::proportional(12.0),
        secondary_color,
    );
}

/// Per-day delete lists in stored order. Returns the (day, stored index)
/// of a clicked delete button; the caller confirms before removing.
pub fn render_delete_list(ui: &mut Ui, plan: &WeekPlan) -> Option<(Weekday, usize)> {
    let (text_color, secondary_color) = theme::text_colors();
    let mut clicked = None;

    for day in Weekday::ALL {
        let tasks = plan.day(day);
        if tasks.is_empty() {
            continue;
        }
        egui::CollapsingHeader::new(
            RichText::new(format!("{} ({} task(s))", day, tasks.len())).color(text_color),
        )
        .show(ui, |ui| {
            for (index, span) in tasks.iter().enumerate() {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("{} – {}", span.start_hhmm(), span.end_hhmm()))
                            .strong()
                            .color(text_color),
                    );
                    ui.label(RichText::new(span.label()).color(secondary_color));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let trash = ui.add(
                            egui::Label::new(
                                RichText::new(egui_phosphor::regular::TRASH)
                                    .size(14.0)
                                    .color(secondary_color),
                            )
                            .sense(egui::Sense::click()),
                        );
                        if trash.hovered() {
                            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                        }
                        if trash.clicked() {
                            clicked = Some((day, index));
                        }
                    });
                });
            }
        });
    }

    clicked
}
