use crate::analyser::logic::City;
use crate::error::{BikeshareError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment override for [`AppSettings::data_dir`].
pub const DATA_DIR_ENV: &str = "BIKESHARE_DATA_DIR";

/// Dataset file for each city, relative to the data directory unless absolute.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DatasetFiles {
    pub chicago: PathBuf,
    pub new_york_city: PathBuf,
    pub washington: PathBuf,
}

impl Default for DatasetFiles {
    fn default() -> Self {
        Self {
            chicago: PathBuf::from("chicago.csv"),
            new_york_city: PathBuf::from("new_york_city.csv"),
            washington: PathBuf::from("washington.csv"),
        }
    }
}

impl DatasetFiles {
    pub fn get(&self, city: City) -> &Path {
        match city {
            City::Chicago => &self.chicago,
            City::NewYorkCity => &self.new_york_city,
            City::Washington => &self.washington,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppSettings {
    pub data_dir: PathBuf,
    pub datasets: DatasetFiles,
    /// Raw rows shown per page (default: 5)
    pub page_size: usize,
    /// Print "This took N seconds." after each statistics block
    pub show_timings: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            datasets: DatasetFiles::default(),
            page_size: 5,
            show_timings: true,
        }
    }
}

impl AppSettings {
    /// Full path of a city's dataset.
    pub fn dataset_path(&self, city: City) -> PathBuf {
        let file = self.datasets.get(city);
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.data_dir.join(file)
        }
    }

    /// Applies the environment override, then an explicit directory (CLI) on top.
    pub fn with_data_dir_override(mut self, cli_dir: Option<PathBuf>) -> Self {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV)
            && !dir.trim().is_empty()
        {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = cli_dir {
            self.data_dir = dir;
        }
        self
    }

    fn validated(mut self) -> Self {
        if self.page_size == 0 {
            tracing::warn!("page_size of 0 is not usable, falling back to 5");
            self.page_size = 5;
        }
        self
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("bikeshare").join("config.json"))
}

/// Reads settings from an explicit file.
///
/// # Errors
///
/// Fails if the file cannot be read or is not valid settings JSON.
pub fn load_settings_from(path: &Path) -> Result<AppSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        BikeshareError::Config(format!("Failed to read {}: {e}", path.display()))
    })?;
    let settings: AppSettings = serde_json::from_str(&content)?;
    Ok(settings.validated())
}

/// Loads settings from `explicit` if given, else the per-user config file, else defaults.
///
/// A broken per-user file is logged and ignored; a broken explicit file is an error.
///
/// # Errors
///
/// Only when `explicit` is given and cannot be loaded.
pub fn load_app_settings(explicit: Option<&Path>) -> Result<AppSettings> {
    if let Some(path) = explicit {
        return load_settings_from(path);
    }

    if let Some(path) = get_config_path()
        && path.exists()
    {
        match load_settings_from(&path) {
            Ok(settings) => return Ok(settings),
            Err(e) => tracing::warn!("Ignoring config at {}: {e}", path.display()),
        }
    }

    Ok(AppSettings::default())
}

/// Writes settings as pretty JSON, creating parent directories.
///
/// # Errors
///
/// Fails on I/O or serialisation errors.
pub fn save_settings(settings: &AppSettings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_default_dataset_paths() {
        let settings = AppSettings::default();
        assert_eq!(
            settings.dataset_path(City::NewYorkCity),
            PathBuf::from("data").join("new_york_city.csv")
        );
        assert_eq!(settings.page_size, 5);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "data_dir": "/srv/bikeshare", "page_size": 10 }"#).unwrap();

        let settings = load_app_settings(Some(&path)).unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("/srv/bikeshare"));
        assert_eq!(settings.page_size, 10);
        assert_eq!(settings.datasets, DatasetFiles::default());
        assert!(settings.show_timings);
    }

    #[test]
    fn test_round_trip_and_zero_page_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let settings = AppSettings {
            page_size: 0,
            ..AppSettings::default()
        };
        save_settings(&settings, &path).unwrap();

        let loaded = load_settings_from(&path).unwrap();
        assert_eq!(loaded.page_size, 5);
    }

    #[test]
    fn test_malformed_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_app_settings(Some(&path)).unwrap_err();
        assert!(matches!(err, BikeshareError::Config(_)), "Got: {err}");
    }

    #[test]
    fn test_absolute_dataset_path_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let absolute = dir.path().join("chi.csv");
        let mut settings = AppSettings::default();
        settings.datasets.chicago = absolute.clone();
        assert_eq!(settings.dataset_path(City::Chicago), absolute);
    }

    #[test]
    fn test_cli_data_dir_wins() {
        let settings =
            AppSettings::default().with_data_dir_override(Some(PathBuf::from("/tmp/trips")));
        assert_eq!(settings.data_dir, PathBuf::from("/tmp/trips"));
    }
}
