use eframe::egui::{Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points};

use crate::data::filter::FilteredView;
use crate::data::histogram::{species_histogram, Histogram};
use crate::data::model::{PenguinDataset, Species};
use crate::state::AppState;

/// Fill alpha for the overlapping histogram.
const LAYER_ALPHA: u8 = 110;
/// Scatter marker radius in points (8 px diameter).
const MARKER_RADIUS: f32 = 4.0;

// ---------------------------------------------------------------------------
// Chart row (bottom of the central panel)
// ---------------------------------------------------------------------------

/// Stacked histogram of the selected attribute, binned by the numeric input.
pub fn plotly_histogram(ui: &mut Ui, state: &AppState, view: Option<&FilteredView>, height: f32) {
    chart_title(ui, "Palmer Penguins - Plotly");
    let Some(view) = view else {
        waiting(ui, height);
        return;
    };
    let attribute = state.selected_attribute;
    let hist = species_histogram(&state.dataset, view, attribute, state.plotly_bins());
    let colors = &state.colors;

    Plot::new("plotly_histogram")
        .legend(Legend::default())
        .height(height)
        .x_axis_label(attribute.column_name())
        .y_axis_label("Value")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            let Some(hist) = hist else {
                return;
            };
            let mut charts: Vec<BarChart> = Vec::new();
            for (species, counts) in &hist.counts {
                let color = colors.color_for(*species);
                let bars = histogram_bars(&hist, counts, species)
                    .map(|b| b.fill(color).stroke(Stroke::new(0.5, color)))
                    .collect();
                let below: Vec<&BarChart> = charts.iter().collect();
                let chart = BarChart::new(bars)
                    .name(species.as_str())
                    .color(color)
                    .stack_on(&below);
                charts.push(chart);
            }
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

/// Layered histogram of the selected attribute, binned by the slider.
pub fn seaborn_histogram(ui: &mut Ui, state: &AppState, view: Option<&FilteredView>, height: f32) {
    chart_title(ui, "Palmer Penguins - Seaborn");
    let Some(view) = view else {
        waiting(ui, height);
        return;
    };
    let attribute = state.selected_attribute;
    let hist = species_histogram(&state.dataset, view, attribute, state.seaborn_bins());
    let colors = &state.colors;

    Plot::new("seaborn_histogram")
        .legend(Legend::default())
        .height(height)
        .x_axis_label(attribute.column_name())
        .y_axis_label("Value")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            let Some(hist) = hist else {
                return;
            };
            for (species, counts) in &hist.counts {
                let fill = colors.translucent(*species, LAYER_ALPHA);
                let edge = Stroke::new(1.0, colors.color_for(*species));
                let bars = histogram_bars(&hist, counts, species)
                    .map(|b| b.fill(fill).stroke(edge))
                    .collect();
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .name(species.as_str())
                        .color(colors.color_for(*species)),
                );
            }
        });
}

/// Bill length against body mass, one series per species.
pub fn scatterplot(ui: &mut Ui, state: &AppState, view: Option<&FilteredView>, height: f32) {
    chart_title(ui, "Palmer Penguins - Plotly Scatterplot");
    let Some(view) = view else {
        waiting(ui, height);
        return;
    };
    let series = scatter_series(&state.dataset, view);

    Plot::new("plotly_scatterplot")
        .legend(Legend::default())
        .height(height)
        .x_axis_label("Bill Length (mm)")
        .y_axis_label("Body Mass (g)")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (species, points) in series {
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(species.as_str())
                        .color(state.colors.color_for(species))
                        .radius(MARKER_RADIUS)
                        .filled(true),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn histogram_bars<'a>(
    hist: &'a Histogram,
    counts: &'a [usize],
    species: &'a Species,
) -> impl Iterator<Item = Bar> + 'a {
    let width = hist.bin_width();
    counts.iter().enumerate().map(move |(i, &n)| {
        Bar::new(hist.center(i), n as f64)
            .width(width)
            .name(format!("{species} {:.1}–{:.1}", hist.edges[i], hist.edges[i + 1]))
    })
}

/// Points per species, skipping rows with either coordinate missing.
fn scatter_series(dataset: &PenguinDataset, view: &FilteredView) -> Vec<(Species, Vec<[f64; 2]>)> {
    Species::ALL
        .into_iter()
        .filter_map(|species| {
            let points: Vec<[f64; 2]> = view
                .iter(dataset)
                .filter(|p| p.species == species)
                .filter_map(|p| Some([p.bill_length_mm?, p.body_mass_g?]))
                .collect();
            (!points.is_empty()).then_some((species, points))
        })
        .collect()
}

fn chart_title(ui: &mut Ui, title: &str) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(title);
    });
}

/// Shown in place of a chart while no species is selected.
fn waiting(ui: &mut Ui, height: f32) {
    ui.allocate_ui(eframe::egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.weak("Select at least one species");
        });
    });
}
