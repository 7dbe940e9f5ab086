use std::cell::Cell;

use eframe::egui::{self, Align, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::table::{sorted_rows, SortDirection, TableColumn};
use crate::state::{AppState, TableKind};

const ROW_HEIGHT: f32 = 18.0;
const HEADER_HEIGHT: f32 = 22.0;

// ---------------------------------------------------------------------------
// Full-dataset tables (top row of cards)
// ---------------------------------------------------------------------------

/// Striped, read-only table of every penguin.
pub fn data_table(ui: &mut Ui, state: &mut AppState, height: f32) {
    penguin_table(ui, state, TableKind::DataTable, height);
}

/// Spreadsheet-style grid: row numbers, resizable columns, right-aligned numbers.
pub fn data_grid(ui: &mut Ui, state: &mut AppState, height: f32) {
    penguin_table(ui, state, TableKind::DataGrid, height);
}

fn penguin_table(ui: &mut Ui, state: &mut AppState, kind: TableKind, height: f32) {
    let grid = kind == TableKind::DataGrid;
    let sort = state.sort_for(kind);
    let order = sorted_rows(&state.dataset, sort);
    let dataset = &state.dataset;
    let clicked: Cell<Option<TableColumn>> = Cell::new(None);

    ui.push_id(kind_id(kind), |ui: &mut Ui| {
        let mut builder = TableBuilder::new(ui)
            .striped(!grid)
            .resizable(grid)
            .cell_layout(Layout::left_to_right(Align::Center))
            .min_scrolled_height(0.0)
            .max_scroll_height(height);
        if grid {
            builder = builder.column(Column::auto().at_least(36.0));
        }
        builder = builder.columns(Column::auto().at_least(56.0), TableColumn::ALL.len());

        builder
            .header(HEADER_HEIGHT, |mut header| {
                if grid {
                    header.col(|ui| {
                        ui.weak("#");
                    });
                }
                for column in TableColumn::ALL {
                    header.col(|ui| {
                        let arrow = match sort {
                            Some(s) if s.column == column => match s.direction {
                                SortDirection::Ascending => " ⬆",
                                SortDirection::Descending => " ⬇",
                            },
                            _ => "",
                        };
                        let label = RichText::new(format!("{}{arrow}", column.header())).strong();
                        if ui.add(egui::Button::new(label).frame(false)).clicked() {
                            clicked.set(Some(column));
                        }
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, order.len(), |mut row| {
                    let index = order[row.index()];
                    let Some(penguin) = dataset.get(index) else {
                        return;
                    };
                    if grid {
                        row.col(|ui| {
                            ui.weak((index + 1).to_string());
                        });
                    }
                    for column in TableColumn::ALL {
                        row.col(|ui| {
                            let text = column.cell(penguin);
                            if grid && column.is_numeric() {
                                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                    ui.label(text);
                                });
                            } else {
                                ui.label(text);
                            }
                        });
                    }
                });
            });
    });

    if let Some(column) = clicked.get() {
        state.click_header(kind, column);
    }
}

fn kind_id(kind: TableKind) -> &'static str {
    match kind {
        TableKind::DataTable => "penguins_df",
        TableKind::DataGrid => "penguins_dg",
    }
}
