//! egui rendering. Every function here reads or mutates [`crate::state::AppState`]
//! and draws one part of the page; none of them own state of their own.

use eframe::egui::{self, Ui};

pub mod panels;
pub mod plot;
pub mod table;

/// Framed box with a heading, the dashboard's unit of layout.
pub fn card<R>(ui: &mut Ui, title: &str, add_contents: impl FnOnce(&mut Ui) -> R) -> R {
    egui::Frame::group(ui.style())
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.strong(title);
            ui.separator();
            add_contents(ui)
        })
        .inner
}
