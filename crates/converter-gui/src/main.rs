#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! Desktop front end for the image converter.

mod app;

use app::ConverterApp;
use converter_core::ConverterConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ConverterConfig::resolve(None).unwrap_or_else(|e| {
        log::error!("{}; using default settings", e);
        ConverterConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 380.0])
            .with_min_inner_size([360.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Image Converter",
        options,
        Box::new(|_cc| Ok(Box::new(ConverterApp::new(config)))),
    )
}
