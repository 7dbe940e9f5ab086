use std::cmp::Ordering;

use super::model::{Attribute, NA, Penguin, PenguinDataset};

// ---------------------------------------------------------------------------
// Table columns
// ---------------------------------------------------------------------------

/// One displayed column of the penguin tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableColumn {
    Species,
    Island,
    Measurement(Attribute),
    Sex,
    Year,
}

impl TableColumn {
    /// Columns in file order.
    pub const ALL: [TableColumn; 8] = [
        TableColumn::Species,
        TableColumn::Island,
        TableColumn::Measurement(Attribute::BillLengthMm),
        TableColumn::Measurement(Attribute::BillDepthMm),
        TableColumn::Measurement(Attribute::FlipperLengthMm),
        TableColumn::Measurement(Attribute::BodyMassG),
        TableColumn::Sex,
        TableColumn::Year,
    ];

    pub fn header(self) -> &'static str {
        match self {
            TableColumn::Species => "species",
            TableColumn::Island => "island",
            TableColumn::Measurement(attr) => attr.column_name(),
            TableColumn::Sex => "sex",
            TableColumn::Year => "year",
        }
    }

    /// Whether the column holds numbers (right-aligned in the grid).
    pub fn is_numeric(self) -> bool {
        matches!(self, TableColumn::Measurement(_) | TableColumn::Year)
    }

    /// Text shown in a cell; missing values read `NA`.
    pub fn cell(self, p: &Penguin) -> String {
        match self {
            TableColumn::Species => p.species.to_string(),
            TableColumn::Island => p.island.clone(),
            TableColumn::Measurement(attr) => match attr.value(p) {
                Some(v) if v.fract() == 0.0 => format!("{v:.0}"),
                Some(v) => format!("{v:.1}"),
                None => NA.to_string(),
            },
            TableColumn::Sex => p.sex.clone().unwrap_or_else(|| NA.to_string()),
            TableColumn::Year => p.year.map_or_else(|| NA.to_string(), |y| y.to_string()),
        }
    }

    /// Compare two rows by this column. `None` means the value is missing.
    fn compare(self, a: &Penguin, b: &Penguin) -> Option<Ordering> {
        match self {
            TableColumn::Species => Some(a.species.as_str().cmp(b.species.as_str())),
            TableColumn::Island => Some(a.island.cmp(&b.island)),
            TableColumn::Measurement(attr) => both(attr.value(a), attr.value(b), f64::total_cmp),
            TableColumn::Sex => both(a.sex.as_ref(), b.sex.as_ref(), |x, y| x.cmp(y)),
            TableColumn::Year => both(a.year, b.year, |x, y| x.cmp(y)),
        }
    }

    fn is_missing(self, p: &Penguin) -> bool {
        match self {
            TableColumn::Species | TableColumn::Island => false,
            TableColumn::Measurement(attr) => attr.value(p).is_none(),
            TableColumn::Sex => p.sex.is_none(),
            TableColumn::Year => p.year.is_none(),
        }
    }
}

fn both<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Option<Ordering> {
    match (a, b) {
        (Some(a), Some(b)) => Some(cmp(&a, &b)),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Click-to-sort
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSort {
    pub column: TableColumn,
    pub direction: SortDirection,
}

/// Advance the sort state after a click on `column`'s header:
/// ascending → descending → unsorted.
pub fn cycle_sort(current: Option<TableSort>, column: TableColumn) -> Option<TableSort> {
    match current {
        Some(s) if s.column == column => match s.direction {
            SortDirection::Ascending => Some(TableSort {
                column,
                direction: SortDirection::Descending,
            }),
            SortDirection::Descending => None,
        },
        _ => Some(TableSort {
            column,
            direction: SortDirection::Ascending,
        }),
    }
}

/// Row order for a table. Unsorted means dataset order; missing values sort
/// last in both directions. The sort is stable.
pub fn sorted_rows(dataset: &PenguinDataset, sort: Option<TableSort>) -> Vec<usize> {
    let mut rows: Vec<usize> = (0..dataset.len()).collect();
    let Some(sort) = sort else {
        return rows;
    };
    let col = sort.column;
    let table = dataset.rows();
    rows.sort_by(|&i, &j| {
        let (a, b) = (&table[i], &table[j]);
        match (col.is_missing(a), col.is_missing(b)) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ord = col.compare(a, b).unwrap_or(Ordering::Equal);
                match sort.direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            }
        }
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Species;

    fn row(species: Species, island: &str, mass: Option<f64>, year: i64) -> Penguin {
        Penguin {
            species,
            island: island.into(),
            bill_length_mm: Some(39.1),
            bill_depth_mm: None,
            flipper_length_mm: Some(181.0),
            body_mass_g: mass,
            sex: None,
            year: Some(year),
        }
    }

    fn sample() -> PenguinDataset {
        PenguinDataset::from_rows(vec![
            row(Species::Gentoo, "Biscoe", Some(5000.0), 2009),
            row(Species::Adelie, "Torgersen", None, 2007),
            row(Species::Chinstrap, "Dream", Some(3700.0), 2008),
            row(Species::Adelie, "Dream", Some(3400.0), 2007),
        ])
    }

    #[test]
    fn cells_render_na_and_trim_integers() {
        let p = row(Species::Adelie, "Dream", None, 2007);
        assert_eq!(TableColumn::Measurement(Attribute::BillLengthMm).cell(&p), "39.1");
        assert_eq!(TableColumn::Measurement(Attribute::FlipperLengthMm).cell(&p), "181");
        assert_eq!(TableColumn::Measurement(Attribute::BodyMassG).cell(&p), "NA");
        assert_eq!(TableColumn::Sex.cell(&p), "NA");
        assert_eq!(TableColumn::Year.cell(&p), "2007");
    }

    #[test]
    fn unsorted_keeps_dataset_order() {
        assert_eq!(sorted_rows(&sample(), None), vec![0, 1, 2, 3]);
    }

    #[test]
    fn missing_values_sort_last_both_ways() {
        let ds = sample();
        let column = TableColumn::Measurement(Attribute::BodyMassG);
        let asc = sorted_rows(&ds, Some(TableSort { column, direction: SortDirection::Ascending }));
        assert_eq!(asc, vec![3, 2, 0, 1]);
        let desc = sorted_rows(&ds, Some(TableSort { column, direction: SortDirection::Descending }));
        assert_eq!(desc, vec![0, 2, 3, 1]);
    }

    #[test]
    fn text_columns_sort_alphabetically_and_stably() {
        let ds = sample();
        let column = TableColumn::Species;
        let asc = sorted_rows(&ds, Some(TableSort { column, direction: SortDirection::Ascending }));
        assert_eq!(asc, vec![1, 3, 2, 0]);
    }

    #[test]
    fn header_clicks_cycle() {
        let col = TableColumn::Island;
        let s1 = cycle_sort(None, col);
        assert_eq!(s1.map(|s| s.direction), Some(SortDirection::Ascending));
        let s2 = cycle_sort(s1, col);
        assert_eq!(s2.map(|s| s.direction), Some(SortDirection::Descending));
        assert_eq!(cycle_sort(s2, col), None);

        // Clicking another column restarts at ascending.
        let other = cycle_sort(s2, TableColumn::Year);
        assert_eq!(
            other,
            Some(TableSort { column: TableColumn::Year, direction: SortDirection::Ascending })
        );
    }
}
