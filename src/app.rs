use std::sync::Arc;

use anyhow::Result;
use eframe::egui;

use crate::config::DashboardConfig;
use crate::data::loader;
use crate::state::{AppState, Status};
use crate::ui::{card, panels, plot, table};

const TABLE_HEIGHT: f32 = 280.0;
const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Startup
// ---------------------------------------------------------------------------

/// Read config and data from the environment.
pub fn load_state() -> Result<AppState> {
    state_from_config(DashboardConfig::from_env())
}

/// Build the state from an already-resolved config.
///
/// A broken config file or data path is reported and replaced by the
/// defaults / bundled dataset; only a broken bundled dataset is fatal.
fn state_from_config(config: Result<DashboardConfig>) -> Result<AppState> {
    let mut problems = Vec::new();

    let config = config.unwrap_or_else(|e| {
        log::error!("Ignoring config: {e:#}");
        problems.push(format!("Config: {e:#}"));
        DashboardConfig::default()
    });

    let dataset = match &config.data_path {
        Some(path) => match loader::load_file(path) {
            Ok(ds) => ds,
            Err(e) => {
                log::error!("Falling back to bundled data: {e:#}");
                problems.push(format!("Data: {e:#}"));
                loader::load_bundled()?
            }
        },
        None => loader::load_bundled()?,
    };
    if dataset.is_empty() {
        log::warn!("Dataset has no rows; tables and charts will be empty");
    } else {
        log::info!("Dataset ready: {} penguins", dataset.len());
    }

    let mut state = AppState::new(Arc::new(dataset), &config);
    if !problems.is_empty() {
        state.status = Some(Status::Error(problems.join("; ")));
    }
    Ok(state)
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PenguinReportApp {
    pub state: AppState,
}

impl PenguinReportApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for PenguinReportApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: inputs ----
        egui::SidePanel::left("sidebar")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: tables, then charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.columns(2, |cols| {
                        card(&mut cols[0], "Data Table", |ui| {
                            table::data_table(ui, &mut self.state, TABLE_HEIGHT);
                        });
                        card(&mut cols[1], "Data Grid", |ui| {
                            table::data_grid(ui, &mut self.state, TABLE_HEIGHT);
                        });
                    });

                    ui.add_space(8.0);

                    let view = self.state.filtered_view();
                    let state = &self.state;
                    ui.columns(3, |cols| {
                        plot::plotly_histogram(&mut cols[0], state, view.as_ref(), CHART_HEIGHT);
                        plot::seaborn_histogram(&mut cols[1], state, view.as_ref(), CHART_HEIGHT);
                        plot::scatterplot(&mut cols[2], state, view.as_ref(), CHART_HEIGHT);
                    });
                });
        });
    }
}
