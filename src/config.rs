use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::model::{Attribute, Species};

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "PENGUIN_REPORT_CONFIG";
/// Environment variable overriding `data_path`.
pub const DATA_ENV: &str = "PENGUIN_REPORT_DATA";

/// Allowed range of the "Histogram Bins" numeric input. 0 picks the bin count
/// automatically.
pub const PLOTLY_BIN_RANGE: std::ops::RangeInclusive<u32> = 0..=500;
/// Allowed range of the "Seaborn Bins" slider.
pub const SEABORN_BIN_RANGE: std::ops::RangeInclusive<u32> = 1..=60;

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Page title and widget defaults. Every field has a default, so a config
/// file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub title: String,
    /// Data file to load instead of the bundled dataset.
    pub data_path: Option<PathBuf>,
    pub selected_species: Vec<Species>,
    pub selected_attribute: Attribute,
    pub plotly_bin_count: u32,
    pub seaborn_bin_count: u32,
    pub github_url: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Smiller's Penguin Report".to_string(),
            data_path: None,
            selected_species: vec![Species::Adelie, Species::Gentoo],
            selected_attribute: Attribute::BillLengthMm,
            plotly_bin_count: 25,
            seaborn_bin_count: 30,
            github_url: "https://github.com/scmiller77".to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("plotly_bin_count {0} is outside 0..=500")]
    PlotlyBinsOutOfRange(u32),
    #[error("seaborn_bin_count {0} is outside 1..=60")]
    SeabornBinsOutOfRange(u32),
    #[error("title must not be empty")]
    EmptyTitle,
}

impl DashboardConfig {
    /// Parse and validate a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: DashboardConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Build the config from the environment: the file named by
    /// [`CONFIG_ENV`] if set, then [`DATA_ENV`] on top.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(
            std::env::var_os(CONFIG_ENV).map(PathBuf::from),
            std::env::var_os(DATA_ENV).map(PathBuf::from),
        )
    }

    fn from_vars(config_path: Option<PathBuf>, data_path: Option<PathBuf>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => {
                log::info!("Reading config from {}", path.display());
                Self::from_file(&path)?
            }
            None => Self::default(),
        };
        if let Some(path) = data_path {
            config.data_path = Some(path);
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !PLOTLY_BIN_RANGE.contains(&self.plotly_bin_count) {
            return Err(ConfigError::PlotlyBinsOutOfRange(self.plotly_bin_count));
        }
        if !SEABORN_BIN_RANGE.contains(&self.seaborn_bin_count) {
            return Err(ConfigError::SeabornBinsOutOfRange(self.seaborn_bin_count));
        }
        if self.title.trim().is_empty() {
            return Err(ConfigError::EmptyTitle);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn config_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_match_sidebar_widgets() {
        let c = DashboardConfig::default();
        assert_eq!(c.selected_species, vec![Species::Adelie, Species::Gentoo]);
        assert_eq!(c.selected_attribute, Attribute::BillLengthMm);
        assert_eq!(c.plotly_bin_count, 25);
        assert_eq!(c.seaborn_bin_count, 30);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let file = config_file(r#"{ "selected_attribute": "body_mass_g", "seaborn_bin_count": 12 }"#);
        let c = DashboardConfig::from_file(file.path()).unwrap();
        assert_eq!(c.selected_attribute, Attribute::BodyMassG);
        assert_eq!(c.seaborn_bin_count, 12);
        assert_eq!(c.plotly_bin_count, 25);
        assert_eq!(c.title, "Smiller's Penguin Report");
    }

    #[test]
    fn out_of_range_slider_is_rejected() {
        let file = config_file(r#"{ "seaborn_bin_count": 61 }"#);
        let err = DashboardConfig::from_file(file.path()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::SeabornBinsOutOfRange(61))
        );
    }

    #[test]
    fn oversized_bin_input_is_rejected() {
        let file = config_file(r#"{ "plotly_bin_count": 4000000000 }"#);
        let err = DashboardConfig::from_file(file.path()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::PlotlyBinsOutOfRange(4_000_000_000))
        );

        let file = config_file(r#"{ "plotly_bin_count": 0 }"#);
        assert_eq!(DashboardConfig::from_file(file.path()).unwrap().plotly_bin_count, 0);
    }

    #[test]
    fn unknown_species_fails_to_parse() {
        let file = config_file(r#"{ "selected_species": ["Emperor"] }"#);
        assert!(DashboardConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn data_override_wins() {
        let file = config_file(r#"{ "data_path": "from_file.csv" }"#);
        let c = DashboardConfig::from_vars(
            Some(file.path().to_path_buf()),
            Some(PathBuf::from("override.parquet")),
        )
        .unwrap();
        assert_eq!(c.data_path, Some(PathBuf::from("override.parquet")));

        let c = DashboardConfig::from_vars(None, None).unwrap();
        assert_eq!(c, DashboardConfig::default());
    }
}
