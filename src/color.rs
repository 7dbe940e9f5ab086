use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Species;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            // Offset so the first hue is orange rather than red.
            let hue = 30.0 + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Species → Color32
// ---------------------------------------------------------------------------

/// One fixed colour per species, shared by every chart and the checkbox labels
/// so a species keeps its colour whatever else is selected.
#[derive(Debug, Clone)]
pub struct SpeciesColors {
    mapping: BTreeMap<Species, Color32>,
}

impl Default for SpeciesColors {
    fn default() -> Self {
        let mapping = Species::ALL
            .into_iter()
            .zip(generate_palette(Species::ALL.len()))
            .collect();
        SpeciesColors { mapping }
    }
}

impl SpeciesColors {
    pub fn color_for(&self, species: Species) -> Color32 {
        self.mapping.get(&species).copied().unwrap_or(Color32::GRAY)
    }

    /// The same colour with `alpha` applied, for overlapping bars.
    pub fn translucent(&self, species: Species, alpha: u8) -> Color32 {
        let c = self.color_for(species);
        Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), alpha)
    }
}
