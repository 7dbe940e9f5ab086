use std::collections::BTreeMap;

use super::filter::FilteredView;
use super::model::{Attribute, PenguinDataset, Species};

// ---------------------------------------------------------------------------
// Per-species histogram over a filtered view
// ---------------------------------------------------------------------------

/// How many bins the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinCount {
    /// Pick a count from the number of observations (Sturges' rule).
    Auto,
    Fixed(usize),
}

impl BinCount {
    /// Map a raw widget value to a bin count; zero means automatic.
    pub fn from_input(n: u32) -> Self {
        if n == 0 {
            BinCount::Auto
        } else {
            BinCount::Fixed(n as usize)
        }
    }

    fn resolve(self, n_values: usize) -> usize {
        match self {
            BinCount::Fixed(n) => n.max(1),
            BinCount::Auto => sturges(n_values),
        }
    }
}

fn sturges(n: usize) -> usize {
    if n <= 1 {
        1
    } else {
        (n as f64).log2().ceil() as usize + 1
    }
}

/// Equal-width bins shared by all species.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Bin edges; `edges.len() == bin_count() + 1`.
    pub edges: Vec<f64>,
    /// Count per bin for each species present in the view.
    pub counts: BTreeMap<Species, Vec<usize>>,
}

impl Histogram {
    pub fn bin_count(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }

    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.get(1)) {
            (Some(a), Some(b)) => b - a,
            _ => 0.0,
        }
    }

    /// Centre of bin `i`.
    pub fn center(&self, i: usize) -> f64 {
        (self.edges[i] + self.edges[i + 1]) / 2.0
    }

    /// Sum of counts over all species and bins.
    pub fn total(&self) -> usize {
        self.counts.values().flatten().sum()
    }
}

/// Bin `attribute` over the rows of `view`, split by species.
///
/// Rows with a missing value are skipped. Returns `None` when no row in the
/// view has a finite value for the attribute.
pub fn species_histogram(
    dataset: &PenguinDataset,
    view: &FilteredView,
    attribute: Attribute,
    bins: BinCount,
) -> Option<Histogram> {
    let values: Vec<(Species, f64)> = view
        .iter(dataset)
        .filter_map(|p| {
            attribute
                .value(p)
                .filter(|v| v.is_finite())
                .map(|v| (p.species, v))
        })
        .collect();

    if values.is_empty() {
        return None;
    }

    let min = values.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
    let max = values.iter().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max);

    let (lo, n_bins, width) = if (max - min).abs() < f64::EPSILON {
        // Degenerate range: one unit-wide bin centred on the value.
        (min - 0.5, 1, 1.0)
    } else {
        let n = bins.resolve(values.len());
        (min, n, (max - min) / n as f64)
    };

    let edges: Vec<f64> = (0..=n_bins).map(|i| lo + i as f64 * width).collect();
    let mut counts: BTreeMap<Species, Vec<usize>> = BTreeMap::new();

    for (species, v) in values {
        // Last bin is closed on the right so `max` lands in it.
        let idx = (((v - lo) / width).floor() as usize).min(n_bins - 1);
        counts.entry(species).or_insert_with(|| vec![0; n_bins])[idx] += 1;
    }

    Some(Histogram { edges, counts })
}
