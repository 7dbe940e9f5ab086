mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::PenguinReportApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let state = match app::load_state() {
        Ok(state) => state,
        Err(e) => {
            log::error!("Cannot start: {e:#}");
            std::process::exit(1);
        }
    };
    let title = state.title.clone();

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([1400.0, 900.0])
        .with_min_inner_size([800.0, 500.0]);
    match window_icon() {
        Ok(icon) => viewport = viewport.with_icon(icon),
        Err(e) => log::warn!("No window icon: {e}"),
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|cc| {
            // Install image loaders so egui can render the sidebar logo.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(PenguinReportApp::new(state)))
        }),
    )
}

fn window_icon() -> Result<egui::IconData, image::ImageError> {
    let img = image::load_from_memory(include_bytes!("../assets/icon.png"))?.into_rgba8();
    let (width, height) = img.dimensions();
    Ok(egui::IconData {
        rgba: img.into_raw(),
        width,
        height,
    })
}
