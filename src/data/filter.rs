use std::collections::BTreeSet;
use std::sync::Arc;

use super::model::{PenguinDataset, Species};

// ---------------------------------------------------------------------------
// Selection state: which species are checked
// ---------------------------------------------------------------------------

/// The species currently checked in the "Filter Species" group.
pub type SpeciesSelection = BTreeSet<Species>;

/// Row indices of the dataset that survive the current selection, in
/// dataset order. Cheap to clone; every chart reads the same view.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView {
    rows: Arc<[usize]>,
}

impl FilteredView {
    pub fn indices(&self) -> &[usize] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate the selected rows of `dataset`.
    pub fn iter<'a>(
        &'a self,
        dataset: &'a PenguinDataset,
    ) -> impl Iterator<Item = &'a super::model::Penguin> + 'a {
        self.rows.iter().filter_map(move |&i| dataset.get(i))
    }
}

/// Restrict `dataset` to the rows whose species is in `selection`.
///
/// Returns `None` for an empty selection: rendering waits for the user to
/// pick at least one species rather than drawing an empty chart.
pub fn filter_by_species(
    dataset: &PenguinDataset,
    selection: &SpeciesSelection,
) -> Option<FilteredView> {
    if selection.is_empty() {
        return None;
    }
    let rows: Arc<[usize]> = dataset
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, p)| selection.contains(&p.species))
        .map(|(i, _)| i)
        .collect();
    Some(FilteredView { rows })
}

// ---------------------------------------------------------------------------
// Memoised provider
// ---------------------------------------------------------------------------

/// Recomputes the filtered view only when the selection it was computed for
/// differs from the one being asked about.
#[derive(Debug, Default)]
pub struct FilteredViewProvider {
    cached: Option<(SpeciesSelection, Option<FilteredView>)>,
    recomputations: usize,
}

impl FilteredViewProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current filtered view for `selection`, or `None` while it is empty.
    pub fn view(
        &mut self,
        dataset: &PenguinDataset,
        selection: &SpeciesSelection,
    ) -> Option<FilteredView> {
        match &self.cached {
            Some((seen, view)) if seen == selection => view.clone(),
            _ => {
                let view = filter_by_species(dataset, selection);
                self.recomputations += 1;
                log::debug!(
                    "Recomputed filtered view for {:?}: {} rows",
                    selection,
                    view.as_ref().map_or(0, FilteredView::len)
                );
                self.cached = Some((selection.clone(), view.clone()));
                view
            }
        }
    }

    /// How many times the view has actually been computed.
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Penguin;

    fn penguin(species: Species, mass: f64) -> Penguin {
        Penguin {
            species,
            island: "Dream".into(),
            bill_length_mm: Some(40.0),
            bill_depth_mm: Some(18.0),
            flipper_length_mm: Some(190.0),
            body_mass_g: Some(mass),
            sex: None,
            year: Some(2008),
        }
    }

    /// A, G, C, A, C, G, A interleaved so order preservation is visible.
    fn mixed() -> PenguinDataset {
        use Species::*;
        PenguinDataset::from_rows(
            [Adelie, Gentoo, Chinstrap, Adelie, Chinstrap, Gentoo, Adelie]
                .into_iter()
                .enumerate()
                .map(|(i, s)| penguin(s, 3000.0 + i as f64))
                .collect(),
        )
    }

    fn select(species: &[Species]) -> SpeciesSelection {
        species.iter().copied().collect()
    }

    fn all_subsets() -> Vec<SpeciesSelection> {
        (1u8..8)
            .map(|mask| {
                Species::ALL
                    .iter()
                    .enumerate()
                    .filter(|(bit, _)| mask & (1 << bit) != 0)
                    .map(|(_, s)| *s)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn every_non_empty_subset_matches_exactly() {
        let ds = mixed();
        for sel in all_subsets() {
            let view = filter_by_species(&ds, &sel).expect("non-empty selection");
            let expected: Vec<usize> = ds
                .rows()
                .iter()
                .enumerate()
                .filter(|(_, p)| sel.contains(&p.species))
                .map(|(i, _)| i)
                .collect();
            assert_eq!(view.indices(), expected.as_slice(), "selection {sel:?}");
            assert!(view.iter(&ds).all(|p| sel.contains(&p.species)));
            assert!(view.indices().iter().all(|&i| i < ds.len()));
        }
    }

    #[test]
    fn adelie_and_gentoo_keep_original_order() {
        let ds = mixed();
        let view = filter_by_species(&ds, &select(&[Species::Adelie, Species::Gentoo])).unwrap();
        assert_eq!(view.indices(), &[0, 1, 3, 5, 6]);
        assert!(view.iter(&ds).all(|p| p.species != Species::Chinstrap));
    }

    #[test]
    fn chinstrap_only() {
        let ds = mixed();
        let view = filter_by_species(&ds, &select(&[Species::Chinstrap])).unwrap();
        assert_eq!(view.indices(), &[2, 4]);
    }

    #[test]
    fn empty_selection_produces_no_view() {
        assert!(filter_by_species(&mixed(), &SpeciesSelection::new()).is_none());
    }

    #[test]
    fn empty_dataset_gives_present_but_empty_view() {
        let view = filter_by_species(&PenguinDataset::default(), &select(&Species::ALL)).unwrap();
        assert!(view.is_empty());
    }

    #[test]
    fn provider_is_idempotent_and_memoised() {
        let ds = mixed();
        let sel = select(&[Species::Gentoo]);
        let mut provider = FilteredViewProvider::new();

        let first = provider.view(&ds, &sel);
        let second = provider.view(&ds, &sel);
        assert_eq!(first, second);
        assert_eq!(provider.recomputations(), 1);
    }

    #[test]
    fn provider_never_returns_stale_view() {
        let ds = mixed();
        let mut provider = FilteredViewProvider::new();
        let mut sel = select(&[Species::Adelie]);

        assert_eq!(provider.view(&ds, &sel).unwrap().len(), 3);

        sel.insert(Species::Chinstrap);
        assert_eq!(provider.view(&ds, &sel).unwrap().indices(), &[0, 2, 3, 4, 6]);

        sel.clear();
        assert!(provider.view(&ds, &sel).is_none());

        sel.insert(Species::Gentoo);
        assert_eq!(provider.view(&ds, &sel).unwrap().indices(), &[1, 5]);
        assert_eq!(provider.recomputations(), 4);
    }
}
