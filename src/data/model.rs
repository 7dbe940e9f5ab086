use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Species – the categorical column every view is filtered on
// ---------------------------------------------------------------------------

/// The three species present in the Palmer dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Species {
    Adelie,
    Gentoo,
    Chinstrap,
}

impl Species {
    /// All species in the order the checkbox group lists them.
    pub const ALL: [Species; 3] = [Species::Adelie, Species::Gentoo, Species::Chinstrap];

    pub fn as_str(self) -> &'static str {
        match self {
            Species::Adelie => "Adelie",
            Species::Gentoo => "Gentoo",
            Species::Chinstrap => "Chinstrap",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown species '{0}' (expected Adelie, Gentoo or Chinstrap)")]
pub struct ParseSpeciesError(pub String);

impl FromStr for Species {
    type Err = ParseSpeciesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // palmerpenguins' raw table uses the long form, e.g. "Adelie Penguin (Pygoscelis adeliae)".
        let head = s.trim().split_whitespace().next().unwrap_or("");
        Species::ALL
            .into_iter()
            .find(|sp| sp.as_str().eq_ignore_ascii_case(head))
            .ok_or_else(|| ParseSpeciesError(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Attribute – numeric measurement selectable as the histogram axis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    #[serde(rename = "bill_length_mm")]
    BillLengthMm,
    #[serde(rename = "bill_depth_mm")]
    BillDepthMm,
    #[serde(rename = "flipper_length_mm")]
    FlipperLengthMm,
    #[serde(rename = "body_mass_g")]
    BodyMassG,
}

impl Attribute {
    pub const ALL: [Attribute; 4] = [
        Attribute::BillLengthMm,
        Attribute::BillDepthMm,
        Attribute::FlipperLengthMm,
        Attribute::BodyMassG,
    ];

    /// Column name as it appears in the data files.
    pub fn column_name(self) -> &'static str {
        match self {
            Attribute::BillLengthMm => "bill_length_mm",
            Attribute::BillDepthMm => "bill_depth_mm",
            Attribute::FlipperLengthMm => "flipper_length_mm",
            Attribute::BodyMassG => "body_mass_g",
        }
    }

    /// Read this measurement from a row.
    pub fn value(self, penguin: &Penguin) -> Option<f64> {
        match self {
            Attribute::BillLengthMm => penguin.bill_length_mm,
            Attribute::BillDepthMm => penguin.bill_depth_mm,
            Attribute::FlipperLengthMm => penguin.flipper_length_mm,
            Attribute::BodyMassG => penguin.body_mass_g,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

// ---------------------------------------------------------------------------
// Penguin – one row of the dataset
// ---------------------------------------------------------------------------

/// A single observation. Measurements are optional because the source data
/// records a handful of birds as `NA`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Penguin {
    #[serde(deserialize_with = "species_field")]
    pub species: Species,
    pub island: String,
    #[serde(deserialize_with = "na_f64", serialize_with = "write_na")]
    pub bill_length_mm: Option<f64>,
    #[serde(deserialize_with = "na_f64", serialize_with = "write_na")]
    pub bill_depth_mm: Option<f64>,
    #[serde(deserialize_with = "na_f64", serialize_with = "write_na")]
    pub flipper_length_mm: Option<f64>,
    #[serde(deserialize_with = "na_f64", serialize_with = "write_na")]
    pub body_mass_g: Option<f64>,
    #[serde(deserialize_with = "na_string", serialize_with = "write_na")]
    pub sex: Option<String>,
    #[serde(deserialize_with = "na_i64", serialize_with = "write_na")]
    pub year: Option<i64>,
}

fn species_field<'de, D: Deserializer<'de>>(d: D) -> Result<Species, D::Error> {
    let raw = String::deserialize(d)?;
    raw.parse().map_err(serde::de::Error::custom)
}

/// Marker text for missing values in CSV files.
pub const NA: &str = "NA";

fn is_na(s: &str) -> bool {
    let s = s.trim();
    s.is_empty() || s == NA || s.eq_ignore_ascii_case("nan")
}

/// Accept a number, a numeric string, `NA`, an empty cell or null.
fn na_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }
    match Option::<Raw>::deserialize(d)? {
        None => Ok(None),
        Some(Raw::Num(v)) if v.is_nan() => Ok(None),
        Some(Raw::Num(v)) => Ok(Some(v)),
        Some(Raw::Text(s)) if is_na(&s) => Ok(None),
        Some(Raw::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("'{s}' is not a number"))),
    }
}

/// Missing values are written back as `NA` so exports reload cleanly.
fn write_na<T: Serialize, S: serde::Serializer>(v: &Option<T>, s: S) -> Result<S::Ok, S::Error> {
    match v {
        Some(v) => v.serialize(s),
        None => s.serialize_str(NA),
    }
}

/// Like [`na_f64`], but the value must be a whole number.
fn na_i64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    match na_f64(d)? {
        Some(v) if v.fract() != 0.0 || !v.is_finite() => Err(serde::de::Error::custom(format!(
            "'{v}' is not a whole number"
        ))),
        other => Ok(other.map(|v| v as i64)),
    }
}

fn na_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(d)?.filter(|s| !is_na(s)))
}

// ---------------------------------------------------------------------------
// PenguinDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full dataset. Immutable once built; shared behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct PenguinDataset {
    rows: Vec<Penguin>,
}

impl PenguinDataset {
    pub fn from_rows(rows: Vec<Penguin>) -> Self {
        PenguinDataset { rows }
    }

    pub fn rows(&self) -> &[Penguin] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&Penguin> {
        self.rows.get(index)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row count per species, for the status line.
    pub fn count_by_species(&self, species: Species) -> usize {
        self.rows.iter().filter(|p| p.species == species).count()
    }
}
