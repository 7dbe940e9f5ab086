use eframe::egui::{self, Color32, RichText, Ui};

use crate::config::{PLOTLY_BIN_RANGE, SEABORN_BIN_RANGE};
use crate::data::export::export_csv;
use crate::data::model::{Attribute, Species};
use crate::state::{AppState, Status};

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the sidebar.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    // ---- Logo (centered) ----
    let logo = egui::include_image!("../../assets/icon.png");
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add(egui::Image::new(logo).max_height(64.0));
    });
    ui.add_space(4.0);

    ui.heading("Sidebar");
    ui.separator();

    ui.strong("Choose Attribute");
    egui::ComboBox::from_id_salt("selected_attribute")
        .selected_text(state.selected_attribute.column_name())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for attr in Attribute::ALL {
                ui.selectable_value(&mut state.selected_attribute, attr, attr.column_name());
            }
        });
    ui.add_space(6.0);

    ui.strong("Histogram Bins");
    ui.add(egui::DragValue::new(&mut state.plotly_bin_count).range(PLOTLY_BIN_RANGE))
        .on_hover_text("0 picks a bin count automatically");
    ui.add_space(6.0);

    ui.strong("Seaborn Bins");
    ui.add(egui::Slider::new(&mut state.seaborn_bin_count, SEABORN_BIN_RANGE));
    ui.add_space(6.0);

    ui.strong("Filter Species");
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for species in Species::ALL {
            let mut checked = state.is_selected(species);
            let text = RichText::new(species.as_str()).color(state.colors.color_for(species));
            let response = ui
                .checkbox(&mut checked, text)
                .on_hover_text(format!("{} rows", state.dataset.count_by_species(species)));
            if response.changed() {
                log::debug!("{species} {}", if checked { "selected" } else { "deselected" });
                state.set_species(species, checked);
            }
        }
    });

    ui.separator();

    ui.add(egui::Hyperlink::from_label_and_url("GitHub", &state.github_url).open_in_new_tab(true));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / title bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    let view = state.filtered_view();

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            let export = egui::Button::new("Export filtered view…");
            if ui.add_enabled(view.is_some(), export).clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.strong(&state.title);
        ui.separator();

        let shown = view.as_ref().map_or(0, |v| v.len());
        ui.label(format!("{} penguins loaded, {shown} shown", state.dataset.len()))
            .on_hover_text(format!(
                "filter recomputed {} times",
                state.filter_recomputations()
            ));

        match &state.status {
            Some(Status::Info(msg)) => {
                ui.separator();
                ui.label(msg);
            }
            Some(Status::Error(msg)) => {
                ui.separator();
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// Export dialog
// ---------------------------------------------------------------------------

pub fn export_dialog(state: &mut AppState) {
    let Some(view) = state.filtered_view() else {
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Export filtered penguins")
        .set_file_name("penguins_filtered.csv")
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match export_csv(&state.dataset, &view, &path) {
            Ok(n) => {
                state.status = Some(Status::Info(format!(
                    "Exported {n} rows to {}",
                    path.display()
                )));
            }
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                state.status = Some(Status::Error(format!("Error: {e:#}")));
            }
        }
    }
}
