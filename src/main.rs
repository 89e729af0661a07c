#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod config;
mod plan;
mod ui;

use eframe::egui;

fn main() -> eframe::Result<()> {
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1100.0, 800.0])
        .with_min_inner_size([800.0, 600.0])
        .with_title("Weekplan");

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Weekplan",
        options,
        Box::new(|cc| Ok(Box::new(ui::WeekPlanApp::new(cc)?))),
    )
}
