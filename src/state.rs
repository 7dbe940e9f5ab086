use std::sync::Arc;

use crate::color::SpeciesColors;
use crate::config::DashboardConfig;
use crate::data::filter::{FilteredView, FilteredViewProvider, SpeciesSelection};
use crate::data::histogram::BinCount;
use crate::data::model::{Attribute, PenguinDataset, Species};
use crate::data::table::{cycle_sort, TableColumn, TableSort};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Message shown at the right of the top bar.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// Which of the two table cards a sort click belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    DataTable,
    DataGrid,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded once at startup, never mutated.
    pub dataset: Arc<PenguinDataset>,

    /// Species checked in the sidebar.
    pub selected_species: SpeciesSelection,

    /// Histogram x-axis.
    pub selected_attribute: Attribute,

    /// "Histogram Bins" numeric input; 0 means automatic.
    pub plotly_bin_count: u32,

    /// "Seaborn Bins" slider value.
    pub seaborn_bin_count: u32,

    /// Memoised species filter feeding the charts.
    filtered: FilteredViewProvider,

    pub data_table_sort: Option<TableSort>,
    pub data_grid_sort: Option<TableSort>,

    pub colors: SpeciesColors,

    pub title: String,
    pub github_url: String,

    /// Status / error message shown in the UI.
    pub status: Option<Status>,
}

impl AppState {
    pub fn new(dataset: Arc<PenguinDataset>, config: &DashboardConfig) -> Self {
        Self {
            dataset,
            selected_species: config.selected_species.iter().copied().collect(),
            selected_attribute: config.selected_attribute,
            plotly_bin_count: config.plotly_bin_count,
            seaborn_bin_count: config.seaborn_bin_count,
            filtered: FilteredViewProvider::new(),
            data_table_sort: None,
            data_grid_sort: None,
            colors: SpeciesColors::default(),
            title: config.title.clone(),
            github_url: config.github_url.clone(),
            status: None,
        }
    }

    /// The filtered view for the current selection, or `None` while no
    /// species is checked.
    pub fn filtered_view(&mut self) -> Option<FilteredView> {
        self.filtered.view(&self.dataset, &self.selected_species)
    }

    /// How often the filtered view has been recomputed this session.
    pub fn filter_recomputations(&self) -> usize {
        self.filtered.recomputations()
    }

    pub fn is_selected(&self, species: Species) -> bool {
        self.selected_species.contains(&species)
    }

    /// Check or uncheck one species.
    pub fn set_species(&mut self, species: Species, checked: bool) {
        if checked {
            self.selected_species.insert(species);
        } else {
            self.selected_species.remove(&species);
        }
    }

    pub fn plotly_bins(&self) -> BinCount {
        BinCount::from_input(self.plotly_bin_count)
    }

    pub fn seaborn_bins(&self) -> BinCount {
        BinCount::Fixed(self.seaborn_bin_count as usize)
    }

    pub fn sort_for(&self, table: TableKind) -> Option<TableSort> {
        match table {
            TableKind::DataTable => self.data_table_sort,
            TableKind::DataGrid => self.data_grid_sort,
        }
    }

    /// Apply a header click to one table's sort state.
    pub fn click_header(&mut self, table: TableKind, column: TableColumn) {
        let slot = match table {
            TableKind::DataTable => &mut self.data_table_sort,
            TableKind::DataGrid => &mut self.data_grid_sort,
        };
        *slot = cycle_sort(*slot, column);
    }
}
